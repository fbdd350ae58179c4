// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Raw model scores.

use crate::RankError;

/// Raw, unnormalized per-class scores in class-index order.
///
/// Guaranteed non-empty and finite, so the softmax that consumes it is
/// always well-defined.
#[derive(Debug, Clone, PartialEq)]
pub struct LogitVector {
    values: Vec<f32>,
}

impl LogitVector {
    /// Wraps model output scores.
    ///
    /// # Errors
    /// - [`RankError::EmptyLogits`] if `values` is empty.
    /// - [`RankError::NonFiniteLogit`] if any score is NaN or infinite.
    pub fn new(values: Vec<f32>) -> Result<Self, RankError> {
        if values.is_empty() {
            return Err(RankError::EmptyLogits);
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(RankError::NonFiniteLogit { index, value });
        }
        Ok(Self { values })
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Index of the highest score (lowest index on ties).
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (i, &v) in self.values.iter().enumerate().skip(1) {
            if v > self.values[best] {
                best = i;
            }
        }
        best
    }
}

impl TryFrom<Vec<f32>> for LogitVector {
    type Error = RankError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(LogitVector::new(vec![]), Err(RankError::EmptyLogits)));
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = LogitVector::new(vec![1.0, f32::NAN, 2.0]).unwrap_err();
        assert!(matches!(err, RankError::NonFiniteLogit { index: 1, .. }));

        let err = LogitVector::new(vec![f32::NEG_INFINITY]).unwrap_err();
        assert!(matches!(err, RankError::NonFiniteLogit { index: 0, .. }));
    }

    #[test]
    fn test_argmax_prefers_lowest_index() {
        let l = LogitVector::new(vec![0.5, 3.0, 3.0, -1.0]).unwrap();
        assert_eq!(l.argmax(), 1);
    }
}
