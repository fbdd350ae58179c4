// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor construction.

/// Errors that can occur while turning pixels into an input tensor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TensorError {
    /// The pixel buffer does not match the declared tensor shape.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// The tensor shape declares a channel count other than 3 (RGB).
    #[error("invalid channel count: expected 3, got {0}")]
    InvalidChannelCount(usize),

    /// The tensor shape declares a batch size other than 1.
    #[error("invalid batch size: expected 1, got {0}")]
    InvalidBatchSize(usize),

    /// The tensor shape has a zero height or width.
    #[error("tensor shape has a zero-sized spatial dimension")]
    EmptyShape,

    /// A normalization profile value is unusable.
    #[error("invalid normalization profile for channel {channel}: {detail}")]
    InvalidProfile { channel: usize, detail: String },
}

impl TensorError {
    pub(crate) fn shape_mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
