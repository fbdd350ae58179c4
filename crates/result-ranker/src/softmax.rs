// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Softmax over a logit vector.

use crate::LogitVector;

/// A probability distribution over classes, in class-index order.
#[derive(Debug, Clone, PartialEq)]
pub struct Probabilities {
    values: Vec<f64>,
}

impl Probabilities {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Probability of class `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Sum of all probabilities (1.0 up to rounding).
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Computes `p[i] = exp(x[i] - max) / sum(exp(x - max))`.
///
/// The maximum is subtracted before exponentiation so that large logits
/// cannot overflow and the largest term is always `exp(0) = 1`, which keeps
/// the normalizer at least 1. Accumulation is done in `f64`.
///
/// # Examples
/// ```
/// use result_ranker::{softmax, LogitVector};
/// let p = softmax(&LogitVector::new(vec![1.0, 1.0]).unwrap());
/// assert_eq!(p.as_slice(), &[0.5, 0.5]);
/// ```
pub fn softmax(logits: &LogitVector) -> Probabilities {
    let src = logits.as_slice();

    // Find max for numerical stability.
    let max_val = src
        .iter()
        .map(|&x| f64::from(x))
        .fold(f64::NEG_INFINITY, f64::max);

    // Compute exp(x - max) and sum.
    let mut values: Vec<f64> = src.iter().map(|&x| (f64::from(x) - max_val).exp()).collect();
    let sum: f64 = values.iter().sum();

    // Normalize. `sum >= 1` because the max term contributes exp(0).
    for v in values.iter_mut() {
        *v /= sum;
    }

    Probabilities { values }
}
