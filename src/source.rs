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

//! Job sources: where candidate postings come from.

use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use serde::Deserialize;
use tracing::debug;
use tracing::info;
use walkdir::WalkDir;

use crate::config::Config;
use crate::config::SourceKind;
use crate::error::SourceError;
use crate::model::JobRecord;
use crate::rank::filter_by_query;

pub trait JobSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn fetch(&self, query: &str) -> Result<Vec<JobRecord>, SourceError>;
}

pub fn build_source(config: &Config) -> Result<Arc<dyn JobSource>, SourceError> {
    match config.source {
        SourceKind::Builtin => Ok(Arc::new(BuiltinSource)),
        SourceKind::Catalog => {
            let path = config.catalog_path.clone().ok_or_else(|| {
                SourceError::Config("catalog source requires catalog_path".to_string())
            })?;
            Ok(Arc::new(CatalogSource::new(path, &config.catalog_glob)?))
        }
        SourceKind::Remote => {
            let url = config.remote_url.clone().ok_or_else(|| {
                SourceError::Config("remote source requires remote_url".to_string())
            })?;
            Ok(Arc::new(RemoteSource::new(url, config.fetch_timeout())?))
        }
    }
}

/// The five demo postings the builtin source serves.
pub fn reference_jobs() -> Vec<JobRecord> {
    vec![
        JobRecord::new(
            "Python Developer",
            "TechCorp",
            "https://example.com/job1",
            "Develop backend applications using Python.",
            &["Python", "Django"],
            "Remote",
            "https://via.placeholder.com/100x100.png?text=TechCorp",
        ),
        JobRecord::new(
            "Frontend Engineer",
            "Webify",
            "https://example.com/job2",
            "Build responsive web apps with React.",
            &["JavaScript", "React"],
            "NY, USA",
            "https://via.placeholder.com/100x100.png?text=Webify",
        ),
        JobRecord::new(
            "Data Scientist",
            "DataWorks",
            "https://example.com/job3",
            "Analyze large datasets and build ML models.",
            &["Python", "ML", "Pandas"],
            "SF, USA",
            "https://via.placeholder.com/100x100.png?text=DataWorks",
        ),
        JobRecord::new(
            "Java Developer",
            "SoftSolutions",
            "https://example.com/job4",
            "Develop enterprise Java applications.",
            &["Java", "Spring"],
            "Remote",
            "https://via.placeholder.com/100x100.png?text=SoftSolutions",
        ),
        JobRecord::new(
            "UI/UX Designer",
            "DesignHub",
            "https://example.com/job5",
            "Design intuitive user interfaces.",
            &["Figma", "UX"],
            "LA, USA",
            "https://via.placeholder.com/100x100.png?text=DesignHub",
        ),
    ]
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

impl JobSource for BuiltinSource {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn fetch(&self, query: &str) -> Result<Vec<JobRecord>, SourceError> {
        Ok(filter_by_query(query, &reference_jobs()))
    }
}

/// JSON Lines job files: one record per line, blank lines skipped.
///
/// `path` is either a single file or a directory walked recursively, in which
/// case only files matching `glob` are read.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    path: PathBuf,
    include: GlobSet,
}

impl CatalogSource {
    pub fn new(path: PathBuf, glob: &str) -> Result<Self, SourceError> {
        let mut builder = GlobSetBuilder::new();
        builder.add(
            Glob::new(glob)
                .map_err(|err| SourceError::Config(format!("catalog glob {glob:?}: {err}")))?,
        );
        let include = builder
            .build()
            .map_err(|err| SourceError::Config(format!("catalog glob {glob:?}: {err}")))?;
        Ok(Self { path, include })
    }

    pub fn load_all(&self) -> Result<Vec<JobRecord>, SourceError> {
        let mut records = Vec::new();
        for file in self.catalog_files()? {
            records.extend(read_catalog_file(&file)?);
        }
        debug!(path = %self.path.display(), records = records.len(), "catalog loaded");
        Ok(records)
    }

    fn catalog_files(&self) -> Result<Vec<PathBuf>, SourceError> {
        if self.path.is_file() {
            return Ok(vec![self.path.clone()]);
        }
        if !self.path.is_dir() {
            return Err(SourceError::Io {
                path: self.path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "catalog not found"),
            });
        }
        let files = WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file() && self.include.is_match(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        Ok(files)
    }
}

impl JobSource for CatalogSource {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn fetch(&self, query: &str) -> Result<Vec<JobRecord>, SourceError> {
        let records = self.load_all()?;
        Ok(filter_by_query(query, &records))
    }
}

fn read_catalog_file(path: &Path) -> Result<Vec<JobRecord>, SourceError> {
    let io_err = |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::open(path).map_err(io_err)?;
    let mut buf = BufReader::new(file);
    let mut records = Vec::new();
    let mut line = String::new();
    let mut line_no = 0usize;
    loop {
        line.clear();
        let bytes = buf.read_line(&mut line).map_err(io_err)?;
        if bytes == 0 {
            break;
        }
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record: JobRecord =
            serde_json::from_str(trimmed).map_err(|source| SourceError::Parse {
                origin: format!("{}:{}", path.display(), line_no),
                source,
            })?;
        records.push(record);
    }
    Ok(records)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemotePayload {
    List(Vec<JobRecord>),
    Wrapped { jobs: Vec<JobRecord> },
}

/// HTTP search endpoint answering `GET <url>?q=<query>` with JSON jobs.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl RemoteSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self, SourceError> {
        let builder = reqwest::blocking::Client::builder().timeout(timeout);
        Self::with_builder(url, builder)
    }

    fn with_builder(
        url: String,
        builder: reqwest::blocking::ClientBuilder,
    ) -> Result<Self, SourceError> {
        let client = builder
            .user_agent(concat!("jobrec/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SourceError::Transport {
                url: url.clone(),
                source,
            })?;
        Ok(Self { url, client })
    }
}

impl JobSource for RemoteSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn fetch(&self, query: &str) -> Result<Vec<JobRecord>, SourceError> {
        info!(url = %self.url, query, "fetching remote jobs");
        let transport = |source: reqwest::Error| {
            if source.is_timeout() {
                SourceError::Timeout {
                    url: self.url.clone(),
                }
            } else {
                SourceError::Transport {
                    url: self.url.clone(),
                    source,
                }
            }
        };

        let response = self
            .client
            .get(&self.url)
            .query(&[("q", query)])
            .send()
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }
        let body = response.text().map_err(transport)?;
        let payload: RemotePayload =
            serde_json::from_str(&body).map_err(|source| SourceError::Parse {
                origin: self.url.clone(),
                source,
            })?;
        let records = match payload {
            RemotePayload::List(jobs) => jobs,
            RemotePayload::Wrapped { jobs } => jobs,
        };
        debug!(url = %self.url, records = records.len(), "remote jobs fetched");
        Ok(records)
    }
}
