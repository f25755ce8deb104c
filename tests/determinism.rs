// Copyright 2026 Jobrec Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;

fn jobrec_cmd(config_root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("jobrec"));
    cmd.env("XDG_CONFIG_HOME", config_root);
    cmd.env("HOME", config_root);
    cmd.env("APPDATA", config_root);
    cmd
}

fn normalize_json(mut value: Value) -> Value {
    if let Some(stats) = value.get_mut("stats")
        && let Some(obj) = stats.as_object_mut()
    {
        obj.insert("took_ms".to_string(), json!(0));
        if obj.contains_key("searched_at") {
            obj.insert("searched_at".to_string(), json!(""));
        }
    }
    value
}

fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run command");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("parse json")
}

fn assert_repeatable(args: &[&str], runs: usize, config_root: &Path) {
    let mut baseline: Option<Value> = None;
    for _ in 0..runs {
        let mut cmd = jobrec_cmd(config_root);
        cmd.args(args);
        let json = normalize_json(run_json(&mut cmd));
        if let Some(ref expected) = baseline {
            assert_eq!(&json, expected);
        } else {
            baseline = Some(json);
        }
    }
}

#[test]
fn deterministic_outputs() {
    let temp = TempDir::new().expect("tempdir");
    let root = temp.path();
    let boards = root.join("boards");
    fs::create_dir_all(boards.join("eu")).expect("boards dir");
    fs::write(
        boards.join("a.jsonl"),
        [
            r#"{"title":"Rust Engineer","company":"Ferrous","skills":["Rust","Tokio"]}"#,
            r#"{"title":"Backend Engineer","company":"Crabs","skills":["Rust","Postgres"]}"#,
            r#"{"title":"Go Engineer","company":"Gopher","skills":["Go"]}"#,
        ]
        .join("\n"),
    )
    .expect("write catalog");
    fs::write(
        boards.join("eu").join("b.jsonl"),
        [
            r#"{"title":"Platform Engineer","company":"Oxide","skills":["Rust","Tokio","Postgres"]}"#,
            r#"{"title":"Data Engineer","company":"Ferrous","skills":["Python","Postgres"]}"#,
        ]
        .join("\n"),
    )
    .expect("write catalog");
    let catalog = boards.to_string_lossy().to_string();

    assert_repeatable(
        &[
            "search",
            "rust tokio postgres",
            "--catalog",
            &catalog,
            "--page-size",
            "2",
            "--explain",
            "--json",
        ],
        20,
        root,
    );

    assert_repeatable(
        &[
            "search",
            "engineer",
            "--catalog",
            &catalog,
            "--page",
            "2",
            "--page-size",
            "3",
            "--json",
        ],
        20,
        root,
    );

    assert_repeatable(&["search", "python", "--explain", "--json"], 20, root);
}
