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

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
    /// Position of `items[0]` in the full result list.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_results: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// At least one page, even for an empty list.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slices page `page_number` (1-indexed) out of `results`.
///
/// A page past the end is empty rather than an error.
pub fn page<T>(results: &[T], page_number: usize, page_size: usize) -> PageView<'_, T> {
    let page_size = page_size.max(1);
    let start = page_number
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(results.len());
    let end = start.saturating_add(page_size).min(results.len());
    PageView {
        items: &results[start..end],
        current_page: page_number,
        total_pages: total_pages(results.len(), page_size),
        offset: start,
    }
}

/// Navigation state for one result list. Starts on page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current_page: usize,
    page_size: usize,
    len: usize,
}

impl Pager {
    pub fn new(len: usize, page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            len,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.len, self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.current_page * self.page_size < self.len
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Returns whether the page changed.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn view<'a, T>(&self, results: &'a [T]) -> PageView<'a, T> {
        page(results, self.current_page, self.page_size)
    }

    pub fn info(&self) -> PageInfo {
        PageInfo {
            current_page: self.current_page(),
            total_pages: self.total_pages(),
            page_size: self.page_size,
            total_results: self.len,
            has_prev: self.has_prev(),
            has_next: self.has_next(),
        }
    }
}
