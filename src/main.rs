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

mod cli;
mod config;
mod error;
mod link;
mod logo;
mod model;
mod output;
mod paging;
mod rank;
mod search;
mod session;
mod shell;
mod source;

use std::io::BufReader;
use std::time::Duration;

use anyhow::Context as _;
use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::BrowseArgs;
use crate::cli::Cli;
use crate::cli::Commands;
use crate::cli::SearchArgs;
use crate::config::Config;
use crate::error::SearchError;
use crate::error::SourceError;
use crate::link::SystemOpener;
use crate::logo::HttpLogoFetcher;
use crate::logo::LogoCache;
use crate::output::JsonResponse;
use crate::output::StatsOut;
use crate::output::print_json;
use crate::output::render_page;
use crate::search::SearchWorker;
use crate::session::BrowseSession;
use crate::shell::Shell;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_global_config()?;
    init_tracing(&config.log_level);
    debug!(command = ?cli.command, "starting");

    match cli.command {
        Commands::Init { force } => cmd_init(force),
        Commands::Config { json } => cmd_config(&config, json),
        Commands::Search(args) => {
            let json = args.json;
            handle_result(cmd_search(config, args), json)
        }
        Commands::Browse(args) => cmd_browse(config, args),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "jobrec", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Logs go to stderr; `JOBREC_LOG` overrides the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("JOBREC_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn handle_result(result: Result<()>, json: bool) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) => {
            if json {
                let code = if let Some(search_err) = err.downcast_ref::<SearchError>() {
                    search_err.code()
                } else if let Some(source_err) = err.downcast_ref::<SourceError>() {
                    source_err.code()
                } else {
                    "error"
                };
                let resp = JsonResponse::error(code, &format!("{err:#}"));
                print_json(&resp)?;
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}

fn cmd_init(force: bool) -> Result<()> {
    let path = config::global_config_path()
        .ok_or_else(|| anyhow::anyhow!("cannot resolve a config directory"))?;
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    config::write_config(&path, &Config::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn cmd_config(config: &Config, json: bool) -> Result<()> {
    if json {
        let value = serde_json::to_value(config).context("serialize config")?;
        print_json(&JsonResponse::ok().with_config(value))?;
    } else {
        let path = config::global_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<config dir unavailable>".to_string());
        println!("# {path}");
        print!("{}", toml::to_string_pretty(config).context("serialize config")?);
    }
    Ok(())
}

fn cmd_search(mut config: Config, args: SearchArgs) -> Result<()> {
    args.source.apply(&mut config);
    let page_size = args.page_size.filter(|n| *n > 0).unwrap_or(config.page_size);
    let top_n = args.top_n.filter(|n| *n > 0).unwrap_or(config.top_n);

    let query = search::validate_query(&args.query)?;
    let source = source::build_source(&config).context("configure job source")?;
    let outcome = search::search(source.as_ref(), query, top_n)?;
    let candidates = outcome.candidates;
    let took_ms = outcome.took_ms;
    let fetch_error = outcome
        .error
        .as_ref()
        .map(|err| (err.code(), err.to_string()));

    let logos = if args.logos {
        Some(LogoCache::new(HttpLogoFetcher::new(config.fetch_timeout())?))
    } else {
        None
    };
    let mut session = BrowseSession::new(page_size, logos, config.logo_size());
    let query = outcome.results.query.clone();
    session.show(outcome);
    // Out-of-range pages stop at the last one.
    for _ in 1..args.page {
        if !session.next() {
            break;
        }
    }
    let rows = session.rows();
    let info = session.page_info();

    if args.json {
        let mut resp = JsonResponse::ok()
            .with_query(&query, config.source.as_label(), top_n)
            .with_page(info)
            .with_results(rows.iter().map(|row| row.to_json(args.explain)).collect())
            .with_stats(StatsOut {
                took_ms,
                candidates: candidates as i64,
                total_hits: info.total_results as i64,
                searched_at: OffsetDateTime::now_utc().format(&Rfc3339).ok(),
            });
        if let Some((code, message)) = &fetch_error {
            resp = resp
                .with_warnings(vec![format!("job source failed: {message}")])
                .with_error(code, message, Some("results are empty because the fetch failed"));
        }
        print_json(&resp)?;
    } else {
        if let Some((_, message)) = &fetch_error {
            eprintln!("error: {message}");
        }
        print!("{}", render_page(&rows, &info, args.explain));
    }
    Ok(())
}

fn cmd_browse(mut config: Config, args: BrowseArgs) -> Result<()> {
    args.source.apply(&mut config);
    let page_size = args.page_size.filter(|n| *n > 0).unwrap_or(config.page_size);
    let top_n = args.top_n.filter(|n| *n > 0).unwrap_or(config.top_n);

    let source = source::build_source(&config).context("configure job source")?;
    let logos = if args.logos {
        Some(LogoCache::new(HttpLogoFetcher::new(config.fetch_timeout())?))
    } else {
        None
    };
    let (worker, replies) = SearchWorker::new(source, top_n);
    let opener = SystemOpener;
    let mut shell = Shell {
        worker,
        replies,
        session: BrowseSession::new(page_size, logos, config.logo_size()),
        opener: &opener,
        explain: args.explain,
        drain_timeout: config.fetch_timeout() + Duration::from_secs(1),
    };
    let input = BufReader::new(std::io::stdin());
    let mut out = std::io::stdout();
    shell.run(input, &mut out)
}
