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

//! Query validation, fetch + rank, and the background search worker.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use crossbeam_channel::unbounded;
use tracing::debug;
use tracing::warn;

use crate::error::SearchError;
use crate::error::SourceError;
use crate::model::RankedResultSet;
use crate::rank::rank;
use crate::source::JobSource;

/// Trims the raw input and rejects it when nothing is left.
pub fn validate_query(raw: &str) -> Result<&str, SearchError> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(query)
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub results: RankedResultSet,
    /// Set when the source failed; `results` is then empty.
    pub error: Option<SourceError>,
    pub candidates: usize,
    pub took_ms: i64,
}

/// Fetches and ranks. A failed fetch ranks zero candidates instead of failing.
pub fn run_search(source: &dyn JobSource, query: &str, top_n: usize) -> SearchOutcome {
    let started = Instant::now();
    let (candidates, error) = match source.fetch(query) {
        Ok(candidates) => (candidates, None),
        Err(err) => {
            warn!(source = source.name(), error = %err, "job fetch failed");
            (Vec::new(), Some(err))
        }
    };
    let ranked = rank(query, &candidates, top_n);
    debug!(
        source = source.name(),
        query,
        candidates = candidates.len(),
        ranked = ranked.len(),
        "search finished"
    );
    SearchOutcome {
        results: RankedResultSet::new(query, ranked),
        error,
        candidates: candidates.len(),
        took_ms: started.elapsed().as_millis() as i64,
    }
}

pub fn search(source: &dyn JobSource, raw: &str, top_n: usize) -> Result<SearchOutcome, SearchError> {
    let query = validate_query(raw)?;
    Ok(run_search(source, query, top_n))
}

#[derive(Debug)]
pub struct SearchReply {
    pub generation: u64,
    pub outcome: SearchOutcome,
}

/// Runs each submitted search on its own thread and delivers the reply on a
/// channel. Every submission gets a larger generation than the last.
pub struct SearchWorker {
    source: Arc<dyn JobSource>,
    top_n: usize,
    sender: Sender<SearchReply>,
    generation: u64,
}

impl SearchWorker {
    pub fn new(source: Arc<dyn JobSource>, top_n: usize) -> (Self, Receiver<SearchReply>) {
        let (sender, receiver) = unbounded();
        let worker = Self {
            source,
            top_n,
            sender,
            generation: 0,
        };
        (worker, receiver)
    }

    pub fn submit(&mut self, raw: &str) -> Result<u64, SearchError> {
        let query = validate_query(raw)?.to_string();
        self.generation += 1;
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        let top_n = self.top_n;
        debug!(generation, query = %query, "search submitted");
        thread::spawn(move || {
            let outcome = run_search(source.as_ref(), &query, top_n);
            // The receiver is gone once the shell exits.
            let _ = sender.send(SearchReply {
                generation,
                outcome,
            });
        });
        Ok(generation)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::*;
    use crate::model::JobRecord;
    use crate::source::BuiltinSource;

    #[derive(Default)]
    pub(crate) struct CountingSource {
        pub(crate) calls: AtomicUsize,
    }

    impl JobSource for CountingSource {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn fetch(&self, query: &str) -> Result<Vec<JobRecord>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            BuiltinSource.fetch(query)
        }
    }

    pub(crate) struct FailingSource;

    impl JobSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn fetch(&self, _query: &str) -> Result<Vec<JobRecord>, SourceError> {
            Err(SourceError::Timeout {
                url: "https://jobs.example.com/search".to_string(),
            })
        }
    }

    /// Sleeps for queries starting with "slow" before answering.
    pub(crate) struct DelayedSource;

    impl JobSource for DelayedSource {
        fn name(&self) -> &'static str {
            "delayed"
        }

        fn fetch(&self, query: &str) -> Result<Vec<JobRecord>, SourceError> {
            if query.starts_with("slow") {
                thread::sleep(Duration::from_millis(300));
            }
            Ok(vec![JobRecord::new(query, "", "", "", &[], "", "")])
        }
    }

    #[test]
    fn validate_trims_and_rejects_blank() {
        assert_eq!(validate_query("  rust  ").expect("valid"), "rust");
        assert!(matches!(validate_query(""), Err(SearchError::EmptyQuery)));
        assert!(matches!(validate_query(" \t\n"), Err(SearchError::EmptyQuery)));
    }

    #[test]
    fn empty_query_never_reaches_the_source() {
        let source = CountingSource::default();
        assert!(search(&source, "   ", 50).is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);

        let outcome = search(&source, " python ", 50).expect("search");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.results.query, "python");
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.candidates, 2);
    }

    #[test]
    fn fetch_failure_ranks_nothing() {
        let outcome = run_search(&FailingSource, "python", 50);
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.candidates, 0);
        assert_eq!(
            outcome.error.as_ref().map(|e| e.code()),
            Some("fetch_timeout")
        );
    }

    #[test]
    fn worker_delivers_replies_with_generations() {
        let (mut worker, replies) = SearchWorker::new(Arc::new(BuiltinSource), 50);
        assert!(worker.submit("").is_err());

        let first = worker.submit("python").expect("submit");
        let second = worker.submit("react").expect("submit");
        assert_eq!(first, 1);
        assert!(second > first);

        let mut got: Vec<(u64, String)> = (0..2)
            .map(|_| {
                let reply = replies
                    .recv_timeout(Duration::from_secs(5))
                    .expect("reply");
                (reply.generation, reply.outcome.results.query)
            })
            .collect();
        got.sort();
        assert_eq!(
            got,
            vec![(first, "python".to_string()), (second, "react".to_string())]
        );
    }
}
