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

//! Shared domain types used across sources, ranking, and paging.

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

/// One job posting. Every field may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub url: String,
    pub description: String,
    pub skills: Vec<String>,
    pub location: String,
    pub logo_url: String,
}

impl JobRecord {
    pub fn new(
        title: &str,
        company: &str,
        url: &str,
        description: &str,
        skills: &[&str],
        location: &str,
        logo_url: &str,
    ) -> Self {
        Self {
            title: title.to_string(),
            company: company.to_string(),
            url: url.to_string(),
            description: description.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            location: location.to_string(),
            logo_url: logo_url.to_string(),
        }
    }

    /// Lowercased title, description and skills, joined by single spaces.
    pub fn searchable_text(&self) -> String {
        [
            self.title.to_lowercase(),
            self.description.to_lowercase(),
            self.skills.join(" ").to_lowercase(),
        ]
        .join(" ")
    }

    pub fn id(&self) -> String {
        let key = if self.url.is_empty() {
            format!("{}\0{}", self.title, self.company)
        } else {
            self.url.clone()
        };
        let digest = Sha256::digest(key.as_bytes());
        hex::encode(&digest[..8])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredJob {
    pub job: JobRecord,
    pub score: u32,
}

/// Output of one search. Replaced wholesale by the next search, never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedResultSet {
    pub query: String,
    pub items: Vec<ScoredJob>,
}

impl RankedResultSet {
    pub fn new(query: &str, items: Vec<ScoredJob>) -> Self {
        Self {
            query: query.to_string(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searchable_text_joins_lowercased_fields() {
        let job = JobRecord::new(
            "Python Developer",
            "TechCorp",
            "https://example.com/job1",
            "Develop backend applications using Python.",
            &["Python", "Django"],
            "Remote",
            "",
        );
        assert_eq!(
            job.searchable_text(),
            "python developer develop backend applications using python. python django"
        );
    }

    #[test]
    fn searchable_text_tolerates_empty_fields() {
        let job = JobRecord::default();
        assert_eq!(job.searchable_text(), "  ");
    }

    #[test]
    fn id_is_stable_and_falls_back_without_url() {
        let a = JobRecord::new("A", "Co", "https://example.com/a", "", &[], "", "");
        let b = JobRecord::new("A", "Co", "", "", &[], "", "");
        assert_eq!(a.id(), a.clone().id());
        assert_eq!(a.id().len(), 16);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn partial_records_deserialize_with_defaults() {
        let job: JobRecord = serde_json::from_str(r#"{"title":"Rust Engineer"}"#).expect("parse");
        assert_eq!(job.title, "Rust Engineer");
        assert!(job.skills.is_empty());
        assert!(job.logo_url.is_empty());
    }
}
