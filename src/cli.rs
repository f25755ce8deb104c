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

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;

use crate::config::Config;
use crate::config::SourceKind;

#[derive(Parser, Debug)]
#[command(name = "jobrec", version, about = "Keyword job search with overlap ranking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Show the resolved configuration
    Config {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Search once and print one page of results
    Search(SearchArgs),

    /// Interactive search shell
    Browse(BrowseArgs),

    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Where jobs come from
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// JSONL file or directory for the catalog source
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Glob selecting catalog files inside a directory
    #[arg(long)]
    pub glob: Option<String>,

    /// Search endpoint for the remote source
    #[arg(long)]
    pub url: Option<String>,

    /// Fetch timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl SourceArgs {
    /// Flags win over the config file. Naming a catalog or URL implies its
    /// source unless `--source` says otherwise.
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
            config.source = SourceKind::Catalog;
        }
        if let Some(url) = &self.url {
            config.remote_url = Some(url.clone());
            config.source = SourceKind::Remote;
        }
        if let Some(glob) = &self.glob {
            config.catalog_glob = glob.clone();
        }
        if let Some(secs) = self.timeout
            && secs > 0
        {
            config.fetch_timeout_secs = secs;
        }
        if let Some(kind) = self.source {
            config.source = kind;
        }
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Job title or keywords
    pub query: String,

    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Results per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Max results kept after ranking
    #[arg(long)]
    pub top_n: Option<usize>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Load company logos
    #[arg(long)]
    pub logos: bool,

    /// Include scores
    #[arg(long)]
    pub explain: bool,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Results per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Max results kept after ranking
    #[arg(long)]
    pub top_n: Option<usize>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Load company logos
    #[arg(long)]
    pub logos: bool,

    /// Include scores
    #[arg(long)]
    pub explain: bool,
}
