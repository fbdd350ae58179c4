// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for ranking and label loading.

use std::path::PathBuf;

/// Errors that can occur while ranking model output.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    /// The number of logits differs from the number of class labels.
    #[error("label count mismatch: model produced {logits} logits but {labels} labels are configured")]
    LabelCountMismatch { logits: usize, labels: usize },

    /// `k` must be at least 1.
    #[error("invalid k: must be at least 1, got {0}")]
    InvalidK(usize),

    /// The logit vector is empty.
    #[error("logit vector is empty")]
    EmptyLogits,

    /// A logit is NaN or infinite.
    #[error("logit at index {index} is not finite: {value}")]
    NonFiniteLogit { index: usize, value: f32 },

    /// The label file could not be read.
    #[error("failed to read labels from '{path}': {source}")]
    LabelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON label file is malformed.
    #[error("failed to parse labels from '{path}': {source}")]
    LabelParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The label table contains no labels.
    #[error("label table is empty")]
    EmptyLabels,
}
