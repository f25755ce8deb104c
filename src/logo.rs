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

//! Company logo loading. A missing logo is a normal state, so every failure
//! collapses to `None`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use image::imageops::FilterType;
use tracing::debug;

/// Decoded RGBA pixels, resized to the requested box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Arc<Vec<u8>>,
}

pub trait LogoFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpLogoFetcher {
    client: reqwest::blocking::Client,
}

impl HttpLogoFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("build logo http client")?;
        Ok(Self { client })
    }
}

impl LogoFetcher for HttpLogoFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().context("fetch logo")?;
        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }
        let bytes = response.bytes().context("read logo body")?;
        Ok(bytes.to_vec())
    }
}

pub fn decode_logo(bytes: &[u8], (width, height): (u32, u32)) -> Result<LogoImage> {
    let img = image::load_from_memory(bytes).context("decode logo")?;
    let rgba = img
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_rgba8();
    Ok(LogoImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: Arc::new(rgba.into_raw()),
    })
}

/// Logos keyed by exact URL. Failed loads are remembered too, so a broken
/// URL costs one request per session.
pub struct LogoCache<F> {
    fetcher: F,
    entries: HashMap<String, Option<LogoImage>>,
}

impl<F: LogoFetcher> LogoCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            entries: HashMap::new(),
        }
    }

    pub fn load(&mut self, url: &str, size: (u32, u32)) -> Option<LogoImage> {
        if url.is_empty() {
            return None;
        }
        if let Some(entry) = self.entries.get(url) {
            return entry.clone();
        }
        let loaded = self
            .fetcher
            .fetch_bytes(url)
            .and_then(|bytes| decode_logo(&bytes, size));
        let entry = match loaded {
            Ok(logo) => Some(logo),
            Err(err) => {
                debug!(url, error = %err, "logo unavailable");
                None
            }
        };
        self.entries.insert(url.to_string(), entry.clone());
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
