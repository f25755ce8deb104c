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

use thiserror::Error;

/// Failures of a job source. Callers treat any of them as "no candidates".
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed job data in {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },

    #[error("invalid source configuration: {0}")]
    Config(String),
}

impl SourceError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "fetch_timeout",
            Self::Transport { .. } => "fetch_transport",
            Self::Status { .. } => "fetch_status",
            Self::Io { .. } => "fetch_io",
            Self::Parse { .. } => "fetch_parse",
            Self::Config(_) => "source_config",
        }
    }
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("enter job title or keywords")]
    EmptyQuery,
}

impl SearchError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "empty_query",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_origin() {
        let err = SourceError::Status {
            url: "https://jobs.example.com/search".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "https://jobs.example.com/search returned HTTP 503");
        assert_eq!(err.code(), "fetch_status");
        assert_eq!(SearchError::EmptyQuery.code(), "empty_query");
    }
}
