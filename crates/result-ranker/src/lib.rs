// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # result-ranker
//!
//! Turns raw classifier logits into a stable, human-readable ranking.
//!
//! - [`LogitVector`] — validated raw scores, one per class.
//! - [`softmax`] — the numerically stable probability transform.
//! - [`rank`] / [`Ranker`] — top-K selection with a deterministic tie-break.
//! - [`LabelTable`] — class names loaded from a text or JSON file.
//! - [`ClassPrediction`], [`RankedResultSet`] — the serializable output.

mod error;
mod labels;
mod logits;
mod prediction;
mod ranker;
mod softmax;

pub use error::RankError;
pub use labels::LabelTable;
pub use logits::LogitVector;
pub use prediction::{ClassPrediction, RankedResultSet};
pub use ranker::{rank, Ranker};
pub use softmax::{softmax, Probabilities};
