// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the classification pipeline.

use std::path::PathBuf;

/// Boxed error from an external collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures of the image decode + resize collaborator.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The image file could not be read.
    #[error("cannot read image '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image data could not be decoded.
    #[error("cannot decode image: {0}")]
    Image(#[from] image::ImageError),

    /// The requested output size is unusable.
    #[error("invalid resize target {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },

    /// Any other decoder failure.
    #[error("{0}")]
    Other(BoxError),
}

/// Failures of the inference session collaborator.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session could not be created from the model file.
    #[error("failed to create session from '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The inference run itself failed.
    #[error("inference failed: {0}")]
    Run(#[source] BoxError),

    /// The model declares no inputs.
    #[error("model declares no inputs")]
    NoInputs,

    /// The model declares no outputs.
    #[error("model declares no outputs")]
    NoOutputs,

    /// A configured input name is not declared by the model.
    #[error("model has no input named '{name}' (available: {available:?})")]
    UnknownInput { name: String, available: Vec<String> },

    /// A configured output name is not declared by the model.
    #[error("model has no output named '{name}' (available: {available:?})")]
    UnknownOutput { name: String, available: Vec<String> },

    /// The run succeeded but did not return the expected output.
    #[error("inference returned no output named '{0}'")]
    MissingOutput(String),

    /// No inference backend was compiled in.
    #[error("no inference backend available: {0}")]
    BackendUnavailable(&'static str),
}

/// Errors that can occur during a classification call.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The image collaborator failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The inference session failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The pixel buffer could not be turned into a tensor.
    #[error("tensor build failed: {0}")]
    Tensor(#[from] tensor_core::TensorError),

    /// The label table could not be read or parsed.
    #[error("cannot load label table: {0}")]
    Labels(#[source] result_ranker::RankError),

    /// The model output could not be ranked.
    #[error("ranking failed: {0}")]
    Rank(#[from] result_ranker::RankError),

    /// A blocking pipeline stage panicked or was cancelled.
    #[error("pipeline task failed: {0}")]
    TaskFailed(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl From<tokio::task::JoinError> for RuntimeError {
    fn from(e: tokio::task::JoinError) -> Self {
        RuntimeError::TaskFailed(e.to_string())
    }
}
