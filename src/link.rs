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

use std::io;
use std::process::Command;
use std::process::Stdio;
use std::thread;
use std::thread::JoinHandle;

use tracing::info;
use tracing::warn;

/// Fire-and-forget: openers report nothing back to the caller.
pub trait LinkOpener {
    fn open(&self, url: &str);
}

/// Hands the URL to the desktop's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

/// Starts `cmd` detached from our stdio and waits on it from a background
/// thread so the exited child does not linger as a zombie.
fn spawn_reaped(mut cmd: Command) -> io::Result<JoinHandle<()>> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || {
        if let Err(err) = child.wait() {
            warn!(error = %err, "failed to reap link opener");
        }
    }))
}

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) {
        if url.is_empty() {
            warn!("job has no url to open");
            return;
        }
        match spawn_reaped(opener_command(url)) {
            Ok(_) => info!(url, "opened job link"),
            Err(err) => warn!(url, error = %err, "failed to open job link"),
        }
    }
}
