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

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_TOP_N: usize = 50;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOGO_SIZE: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Builtin,
    Catalog,
    Remote,
}

impl SourceKind {
    pub fn as_label(self) -> &'static str {
        match self {
            SourceKind::Builtin => "builtin",
            SourceKind::Catalog => "catalog",
            SourceKind::Remote => "remote",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub page_size: usize,
    pub top_n: usize,
    pub fetch_timeout_secs: u64,
    pub logo_width: u32,
    pub logo_height: u32,
    pub source: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    pub catalog_glob: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            top_n: DEFAULT_TOP_N,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            logo_width: DEFAULT_LOGO_SIZE,
            logo_height: DEFAULT_LOGO_SIZE,
            source: SourceKind::Builtin,
            catalog_path: None,
            catalog_glob: "**/*.jsonl".to_string(),
            remote_url: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn logo_size(&self) -> (u32, u32) {
        (self.logo_width, self.logo_height)
    }

    fn sanitize(mut self) -> Self {
        let defaults = Config::default();
        if self.page_size == 0 {
            self.page_size = defaults.page_size;
        }
        if self.top_n == 0 {
            self.top_n = defaults.top_n;
        }
        if self.fetch_timeout_secs == 0 {
            self.fetch_timeout_secs = defaults.fetch_timeout_secs;
        }
        if self.logo_width == 0 || self.logo_height == 0 {
            self.logo_width = defaults.logo_width;
            self.logo_height = defaults.logo_height;
        }
        if self.catalog_glob.trim().is_empty() {
            self.catalog_glob = defaults.catalog_glob;
        }
        self
    }
}

fn config_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return Some(PathBuf::from(appdata));
        }
        if let Ok(profile) = std::env::var("USERPROFILE") {
            return Some(PathBuf::from(profile).join("AppData").join("Roaming"));
        }
        return None;
    }

    if cfg!(target_os = "macos") {
        let home = std::env::var("HOME").ok()?;
        return Some(
            PathBuf::from(home)
                .join("Library")
                .join("Application Support"),
        );
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg));
    }
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config"))
}

pub fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("jobrec").join("jobrec.toml"))
}

pub fn load_global_config() -> Result<Config> {
    let Some(path) = global_config_path() else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    read_config(&path)
}

pub fn read_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config: Config = toml::from_str(&text).context("parse jobrec.toml")?;
    Ok(config.sanitize())
}

pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create dir {parent:?}"))?;
    }
    let text = toml::to_string_pretty(config).context("serialize config")?;
    std::fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
