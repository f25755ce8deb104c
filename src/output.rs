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

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::paging::PageInfo;
use crate::session::ResultRow;

#[derive(Debug, Clone, Serialize, Default)]
pub struct StatsOut {
    pub took_ms: i64,
    pub candidates: i64,
    pub total_hits: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searched_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryOut {
    pub text: String,
    pub source: String,
    pub top_n: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorOut {
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct JsonResponse {
    pub ok: bool,
    pub schema_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsOut>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOut>,
}

impl JsonResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            schema_version: "1".to_string(),
            ..Default::default()
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            ok: false,
            schema_version: "1".to_string(),
            error: Some(ErrorOut {
                code: code.to_string(),
                message: message.to_string(),
                hint: None,
            }),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, text: &str, source: &str, top_n: usize) -> Self {
        self.query = Some(QueryOut {
            text: text.to_string(),
            source: source.to_string(),
            top_n: top_n as i64,
        });
        self
    }

    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_results(mut self, results: Vec<Value>) -> Self {
        self.results = Some(results);
        self
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_stats(mut self, stats: StatsOut) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Attaches a non-fatal error, e.g. a failed fetch, without clearing `ok`.
    pub fn with_error(mut self, code: &str, message: &str, hint: Option<&str>) -> Self {
        self.error = Some(ErrorOut {
            code: code.to_string(),
            message: message.to_string(),
            hint: hint.map(str::to_string),
        });
        self
    }
}

pub fn print_json(resp: &JsonResponse) -> Result<()> {
    let text = serde_json::to_string_pretty(resp)?;
    println!("{text}");
    Ok(())
}

pub fn page_label(info: &PageInfo) -> String {
    format!("Page {} of {}", info.current_page, info.total_pages)
}

pub fn render_page(rows: &[ResultRow], info: &PageInfo, explain: bool) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        out.push_str("No results found.\n\n");
    }
    for row in rows {
        let _ = write!(out, "[{}] {} @ {}", row.number, row.title, row.company);
        if explain {
            let _ = write!(out, "  (score {})", row.score);
        }
        out.push('\n');
        let _ = writeln!(
            out,
            "    Location: {}  |  Skills: {}",
            row.location,
            row.skills.join(", ")
        );
        if let Some(logo) = &row.logo {
            let _ = writeln!(out, "    [logo {}x{}]", logo.width, logo.height);
        }
        if !row.description.is_empty() {
            let _ = writeln!(out, "    {}", row.description);
        }
        out.push('\n');
    }
    out.push_str(&page_label(info));
    out.push('\n');
    out
}
