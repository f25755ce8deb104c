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

//! Line-oriented browse shell.
//!
//! Input lines and search replies arrive on two channels; this thread owns
//! the session and is the only one that touches it.

use std::io::BufRead;
use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossbeam_channel::Receiver;
use crossbeam_channel::select;
use crossbeam_channel::unbounded;
use tracing::warn;

use crate::link::LinkOpener;
use crate::logo::LogoFetcher;
use crate::output::page_label;
use crate::output::render_page;
use crate::search::SearchReply;
use crate::search::SearchWorker;
use crate::session::BrowseSession;

const HELP: &str = "\
Type keywords to search.
  :n, :next     next page
  :p, :prev     previous page
  :open N       open result N from this page in the browser
  :help         show this help
  :q, :quit     exit
";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    Next,
    Prev,
    Open(usize),
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Search(line.to_string());
    };
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("n" | "next"), None) => Command::Next,
        (Some("p" | "prev"), None) => Command::Prev,
        (Some("q" | "quit"), None) => Command::Quit,
        (Some("help"), None) => Command::Help,
        (Some("open"), Some(n)) => match n.parse() {
            Ok(number) => Command::Open(number),
            Err(_) => Command::Unknown(trimmed.to_string()),
        },
        _ => Command::Unknown(trimmed.to_string()),
    }
}

pub struct Shell<'a, F> {
    pub worker: SearchWorker,
    pub replies: Receiver<SearchReply>,
    pub session: BrowseSession<F>,
    pub opener: &'a dyn LinkOpener,
    pub explain: bool,
    /// How long to wait for an in-flight search once input is exhausted.
    pub drain_timeout: Duration,
}

impl<F: LogoFetcher> Shell<'_, F> {
    pub fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: BufRead + Send + 'static,
        W: Write,
    {
        let (line_tx, lines) = unbounded::<String>();
        thread::spawn(move || {
            let mut input = input;
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match input.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {}
                    Err(err) => {
                        warn!(error = %err, "stopped reading input");
                        break;
                    }
                }
                // Undecodable bytes become U+FFFD rather than ending the shell.
                let line = String::from_utf8_lossy(&buf)
                    .trim_end_matches(['\n', '\r'])
                    .to_string();
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        });

        out.write_all(HELP.as_bytes())?;
        out.flush()?;

        let replies = self.replies.clone();
        loop {
            select! {
                recv(lines) -> msg => match msg {
                    Ok(line) => {
                        if !self.handle_line(&line, out)? {
                            return Ok(());
                        }
                    }
                    Err(_) => {
                        self.drain(out)?;
                        return Ok(());
                    }
                },
                recv(replies) -> msg => {
                    if let Ok(reply) = msg
                        && self.session.apply(reply)
                    {
                        self.render(out)?;
                    }
                }
            }
        }
    }

    /// Returns false when the shell should exit.
    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        match parse_command(line) {
            Command::Search(text) => match self.worker.submit(&text) {
                Ok(generation) => {
                    self.session.begin(generation);
                    writeln!(out, "Searching for \"{}\"...", text.trim())?;
                }
                Err(err) => writeln!(out, "warning: {err}")?,
            },
            Command::Next => {
                if self.session.next() {
                    self.render(out)?;
                } else {
                    writeln!(out, "Already on the last page.")?;
                }
            }
            Command::Prev => {
                if self.session.prev() {
                    self.render(out)?;
                } else {
                    writeln!(out, "Already on the first page.")?;
                }
            }
            Command::Open(number) => {
                if !self.session.open(number, self.opener) {
                    writeln!(out, "No result {number} on this page.")?;
                }
            }
            Command::Help => out.write_all(HELP.as_bytes())?,
            Command::Quit => return Ok(false),
            Command::Unknown(cmd) => writeln!(out, "Unknown command {cmd}; try :help")?,
        }
        out.flush()?;
        Ok(true)
    }

    fn drain<W: Write>(&mut self, out: &mut W) -> Result<()> {
        while self.session.is_pending() {
            match self.replies.recv_timeout(self.drain_timeout) {
                Ok(reply) => {
                    if self.session.apply(reply) {
                        self.render(out)?;
                    }
                }
                Err(_) => break,
            }
        }
        Ok(())
    }

    fn render<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if let Some(err) = self.session.last_error() {
            writeln!(out, "error: {err}")?;
        }
        let results = self.session.results();
        writeln!(out, "{} results for \"{}\"", results.len(), results.query)?;
        let rows = self.session.rows();
        let info = self.session.page_info();
        out.write_all(render_page(&rows, &info, self.explain).as_bytes())?;
        let prev = if info.has_prev { ":prev" } else { "-" };
        let next = if info.has_next { ":next" } else { "-" };
        writeln!(out, "[{prev}] {} [{next}]", page_label(&info))?;
        out.flush()?;
        Ok(())
    }
}
