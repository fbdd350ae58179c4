// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Class-name lookup table.
//!
//! # File Formats
//! - `*.json` — a JSON array of strings: `["apple", "banana", "cherry"]`.
//! - anything else — one label per line; blank lines are skipped and
//!   surrounding whitespace is trimmed.

use crate::RankError;
use std::path::Path;

/// Ordered class names, index-aligned with the model's output classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Creates a table from an in-memory list.
    ///
    /// # Errors
    /// Returns [`RankError::EmptyLabels`] if `labels` is empty.
    pub fn new(labels: Vec<String>) -> Result<Self, RankError> {
        if labels.is_empty() {
            return Err(RankError::EmptyLabels);
        }
        Ok(Self { labels })
    }

    /// Loads a table from a text or JSON file.
    pub fn from_file(path: &Path) -> Result<Self, RankError> {
        let content = std::fs::read_to_string(path).map_err(|source| RankError::LabelRead {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let table = if is_json {
            let labels: Vec<String> =
                serde_json::from_str(&content).map_err(|source| RankError::LabelParse {
                    path: path.to_path_buf(),
                    source,
                })?;
            Self::new(labels)?
        } else {
            Self::from_lines(&content)?
        };

        tracing::info!("loaded {} labels from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parses the one-label-per-line format.
    pub fn from_lines(content: &str) -> Result<Self, RankError> {
        let labels = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label for `class_index`.
    pub fn get(&self, class_index: usize) -> Option<&str> {
        self.labels.get(class_index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LabelTable {
    /// Collects labels without the emptiness check; [`crate::rank`] still
    /// rejects a table whose length disagrees with the logits.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}
