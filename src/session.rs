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

//! State owned by the thread that renders results: the current result set,
//! its pager, and the logo cache.

use serde_json::json;
use tracing::debug;

use crate::link::LinkOpener;
use crate::logo::LogoCache;
use crate::logo::LogoFetcher;
use crate::logo::LogoImage;
use crate::model::RankedResultSet;
use crate::model::ScoredJob;
use crate::paging::PageInfo;
use crate::paging::Pager;
use crate::search::SearchOutcome;
use crate::search::SearchReply;

/// One rendered result. `number` is the 1-based position in the full list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub number: usize,
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub skills: Vec<String>,
    pub description: String,
    pub url: String,
    pub score: u32,
    pub logo: Option<LogoImage>,
}

impl ResultRow {
    fn from_scored(number: usize, scored: &ScoredJob) -> Self {
        let job = &scored.job;
        Self {
            number,
            id: job.id(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            skills: job.skills.clone(),
            description: job.description.clone(),
            url: job.url.clone(),
            score: scored.score,
            logo: None,
        }
    }

    pub fn to_json(&self, explain: bool) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("number".into(), json!(self.number));
        obj.insert("id".into(), json!(self.id));
        obj.insert("title".into(), json!(self.title));
        obj.insert("company".into(), json!(self.company));
        obj.insert("location".into(), json!(self.location));
        obj.insert("skills".into(), json!(self.skills));
        obj.insert("description".into(), json!(self.description));
        obj.insert("url".into(), json!(self.url));
        if explain {
            obj.insert("score".into(), json!(self.score));
        }
        if let Some(logo) = &self.logo {
            obj.insert(
                "logo".into(),
                json!({ "width": logo.width, "height": logo.height }),
            );
        }
        serde_json::Value::Object(obj)
    }
}

pub struct BrowseSession<F> {
    results: RankedResultSet,
    pager: Pager,
    page_size: usize,
    logos: Option<LogoCache<F>>,
    logo_size: (u32, u32),
    latest: u64,
    pending: bool,
    last_error: Option<String>,
}

impl<F: LogoFetcher> BrowseSession<F> {
    pub fn new(page_size: usize, logos: Option<LogoCache<F>>, logo_size: (u32, u32)) -> Self {
        Self {
            results: RankedResultSet::default(),
            pager: Pager::new(0, page_size),
            page_size,
            logos,
            logo_size,
            latest: 0,
            pending: false,
            last_error: None,
        }
    }

    /// Records `generation` as the only search whose reply may be shown.
    pub fn begin(&mut self, generation: u64) {
        self.latest = generation;
        self.pending = true;
    }

    /// Swaps in the reply's results if it belongs to the latest search.
    /// Returns whether it was applied.
    pub fn apply(&mut self, reply: SearchReply) -> bool {
        if reply.generation != self.latest {
            debug!(
                generation = reply.generation,
                latest = self.latest,
                "dropping stale search reply"
            );
            return false;
        }
        self.pending = false;
        self.show(reply.outcome);
        true
    }

    /// Replaces the current results and resets to page 1.
    pub fn show(&mut self, outcome: SearchOutcome) {
        self.last_error = outcome.error.map(|err| err.to_string());
        self.pager = Pager::new(outcome.results.len(), self.page_size);
        self.results = outcome.results;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn results(&self) -> &RankedResultSet {
        &self.results
    }

    pub fn next(&mut self) -> bool {
        self.pager.next()
    }

    pub fn prev(&mut self) -> bool {
        self.pager.prev()
    }

    pub fn page_info(&self) -> PageInfo {
        self.pager.info()
    }

    /// Rows of the current page, logos attached when a cache is configured.
    pub fn rows(&mut self) -> Vec<ResultRow> {
        let view = self.pager.view(&self.results.items);
        let mut rows: Vec<ResultRow> = view
            .items
            .iter()
            .enumerate()
            .map(|(idx, scored)| ResultRow::from_scored(view.offset + idx + 1, scored))
            .collect();
        if let Some(cache) = self.logos.as_mut() {
            for (row, scored) in rows.iter_mut().zip(view.items) {
                row.logo = cache.load(&scored.job.logo_url, self.logo_size);
            }
            debug!(cached = cache.len(), "logos attached");
        }
        rows
    }

    /// URL of row `number`, only if that row is on the current page.
    pub fn url_of(&self, number: usize) -> Option<&str> {
        let view = self.pager.view(&self.results.items);
        let idx = number.checked_sub(view.offset + 1)?;
        view.items.get(idx).map(|s| s.job.url.as_str())
    }

    /// Opens the job at `number`. Returns false unless that row is displayed.
    pub fn open(&self, number: usize, opener: &dyn LinkOpener) -> bool {
        match self.url_of(number) {
            Some(url) => {
                opener.open(url);
                true
            }
            None => false,
        }
    }
}
