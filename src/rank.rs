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

//! Keyword-overlap scoring.
//!
//! A query is lowercased and split on whitespace into a set of distinct
//! tokens. A token matches a job when it occurs anywhere inside the job's
//! searchable text, so `script` matches `javascript`.

use std::collections::BTreeSet;

use crate::model::JobRecord;
use crate::model::ScoredJob;

pub fn tokenize(query: &str) -> BTreeSet<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Number of distinct tokens found in the job's searchable text.
pub fn score(tokens: &BTreeSet<String>, job: &JobRecord) -> u32 {
    let text = job.searchable_text();
    tokens
        .iter()
        .filter(|token| text.contains(token.as_str()))
        .count() as u32
}

/// Scores every candidate and returns the best `top_n`.
///
/// Candidates are kept even at score 0. Ties keep their input order.
pub fn rank(query: &str, candidates: &[JobRecord], top_n: usize) -> Vec<ScoredJob> {
    let tokens = tokenize(query);
    let mut scored: Vec<ScoredJob> = candidates
        .iter()
        .map(|job| ScoredJob {
            score: score(&tokens, job),
            job: job.clone(),
        })
        .collect();

    // `sort_by` is stable.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(top_n);
    scored
}

/// Keeps records matching at least one token.
///
/// Unlike [`rank`], which counts every matching token, one hit is enough here.
pub fn filter_by_query(query: &str, records: &[JobRecord]) -> Vec<JobRecord> {
    let tokens = tokenize(query);
    records
        .iter()
        .filter(|job| {
            let text = job.searchable_text();
            tokens.iter().any(|token| text.contains(token.as_str()))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::reference_jobs;

    fn titles(scored: &[ScoredJob]) -> Vec<&str> {
        scored.iter().map(|s| s.job.title.as_str()).collect()
    }

    fn job(title: &str, skills: &[&str]) -> JobRecord {
        JobRecord::new(title, "", "", "", skills, "", "")
    }

    #[test]
    fn tokenize_lowercases_and_collapses_duplicates() {
        let tokens = tokenize("  Python  python RUST\tgo ");
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
        assert_eq!(tokens, vec!["go", "python", "rust"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn python_ranks_matching_jobs_first() {
        let ranked = rank("python", &reference_jobs(), 50);
        assert_eq!(ranked.len(), 5);
        assert_eq!(titles(&ranked[..2]), vec!["Python Developer", "Data Scientist"]);
        assert!(ranked[..2].iter().all(|s| s.score >= 1));
        assert!(ranked[2..].iter().all(|s| s.score == 0));
        let java = ranked
            .iter()
            .find(|s| s.job.title == "Java Developer")
            .expect("java developer present");
        assert_eq!(java.score, 0);
    }

    #[test]
    fn tokens_match_as_substrings() {
        let ranked = rank("script", &reference_jobs(), 50);
        assert_eq!(ranked[0].job.title, "Frontend Engineer");
        assert_eq!(ranked[0].score, 1);
    }

    #[test]
    fn score_counts_distinct_tokens() {
        let ranked = rank("python python django develop", &reference_jobs(), 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].job.title, "Python Developer");
        assert_eq!(ranked[0].score, 3);
    }

    #[test]
    fn output_is_bounded_by_top_n_and_candidates() {
        let jobs = reference_jobs();
        assert_eq!(rank("python", &jobs, 2).len(), 2);
        assert_eq!(rank("python", &jobs, 6).len(), 5);
        assert!(rank("python", &[], 6).is_empty());
        for scored in rank("data java", &jobs, 3) {
            assert!(jobs.contains(&scored.job));
        }
    }

    #[test]
    fn ties_keep_input_order() {
        let jobs = vec![
            job("zeta", &["rust"]),
            job("alpha", &[]),
            job("mid", &["rust"]),
            job("beta", &[]),
            job("omega", &["rust"]),
        ];
        let ranked = rank("rust", &jobs, 10);
        assert_eq!(titles(&ranked), vec!["zeta", "mid", "omega", "alpha", "beta"]);
    }

    #[test]
    fn adding_a_token_never_lowers_a_score() {
        let jobs = reference_jobs();
        let tokens = tokenize("python");
        let wider = tokenize("python react");
        for job in &jobs {
            assert!(score(&wider, job) >= score(&tokens, job));
        }
    }

    #[test]
    fn rank_is_idempotent() {
        let jobs = reference_jobs();
        assert_eq!(rank("develop ux", &jobs, 50), rank("develop ux", &jobs, 50));
    }

    #[test]
    fn empty_records_score_zero() {
        let jobs = vec![JobRecord::default(), job("", &[])];
        let ranked = rank("anything", &jobs, 10);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|s| s.score == 0));
    }

    #[test]
    fn filter_keeps_any_token_match() {
        let jobs = reference_jobs();
        let filtered = filter_by_query("figma spring", &jobs);
        let titles: Vec<&str> = filtered.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Java Developer", "UI/UX Designer"]);

        // One token is enough to pass the filter, yet ranking still prefers
        // records matching more tokens.
        let filtered = filter_by_query("python pandas", &jobs);
        let ranked = rank("python pandas", &filtered, 50);
        assert_eq!(ranked[0].job.title, "Data Scientist");
        assert_eq!(ranked[0].score, 2);
        assert_eq!(ranked[1].score, 1);
    }

    #[test]
    fn filter_without_tokens_is_empty() {
        assert!(filter_by_query("  ", &reference_jobs()).is_empty());
    }
}
