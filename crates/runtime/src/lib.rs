// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # runtime
//!
//! Orchestrates one image classification: decode and resize the image,
//! build the normalized input tensor, run the model, rank the logits.
//!
//! The runtime takes:
//! - An [`ImageDecoder`] (default: [`ImageCrateDecoder`]).
//! - An [`InferenceSession`] (ONNX Runtime via [`OnnxSession`] with the
//!   `onnx` feature, or any other implementation).
//! - A label table from `result-ranker`.
//!
//! # Type-State Pipeline
//! ```text
//! Classifier<Configured> → Classifier<Ready>
//! ```
//! Transitions are compile-time checked.
//!
//! # Async Execution
//! [`Classifier::classify`] is `async`; decode and inference run on the
//! `tokio` blocking pool so callers on the async runtime are not stalled.

mod config;
mod engine;
mod error;
mod image_source;
mod metrics;
#[cfg(feature = "onnx")]
mod onnx;
mod session;

pub use config::ClassifierConfig;
pub use engine::{ClassificationOutput, Classifier, ClassifierState, Configured, Ready};
pub use error::{BoxError, DecodeError, RuntimeError, SessionError};
pub use image_source::{ImageCrateDecoder, ImageDecoder, ImageInput, ResizeFilter};
pub use metrics::{LatencyStats, StageMetrics};
#[cfg(feature = "onnx")]
pub use onnx::OnnxSession;
pub use session::{InferenceSession, SessionInputs, SessionIo, SessionOutputs};
