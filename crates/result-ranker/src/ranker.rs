// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Logits → top-K predictions.

use crate::{
    softmax, ClassPrediction, LabelTable, LogitVector, RankError, RankedResultSet,
};
use std::cmp::Ordering;

/// Ranks classes by softmax probability and keeps the best `k`.
///
/// Steps:
/// 1. Validate `k >= 1` and `logits.len() == labels.len()`.
/// 2. Softmax the full logit vector.
/// 3. Sort `(index, probability)` pairs by probability descending; equal
///    probabilities keep ascending class-index order.
/// 4. Keep the first `min(k, n)` entries and attach their labels.
///
/// # Errors
/// - [`RankError::InvalidK`] if `k == 0`.
/// - [`RankError::LabelCountMismatch`] if the label table does not have one
///   entry per logit.
///
/// # Examples
/// ```
/// use result_ranker::{rank, LabelTable, LogitVector};
///
/// let labels: LabelTable = ["apple", "banana", "cherry"].into_iter().collect();
/// let logits = LogitVector::new(vec![2.0, 1.0, 0.1]).unwrap();
/// let top = rank(&logits, &labels, 2).unwrap();
/// assert_eq!(top.len(), 2);
/// assert_eq!(top.top().unwrap().class_name, "apple");
/// ```
pub fn rank(
    logits: &LogitVector,
    labels: &LabelTable,
    k: usize,
) -> Result<RankedResultSet, RankError> {
    if k == 0 {
        return Err(RankError::InvalidK(k));
    }
    if logits.len() != labels.len() {
        return Err(RankError::LabelCountMismatch {
            logits: logits.len(),
            labels: labels.len(),
        });
    }

    let probs = softmax(logits);

    let mut indexed: Vec<(usize, f64)> = probs.as_slice().iter().copied().enumerate().collect();
    indexed.sort_by(by_probability_desc);

    let predictions = indexed
        .into_iter()
        .take(k)
        .map(|(class_index, probability)| ClassPrediction {
            class_index,
            class_name: labels.get(class_index).unwrap_or_default().to_string(),
            probability,
        })
        .collect();

    Ok(RankedResultSet::new(predictions))
}

/// Descending probability, then ascending class index.
fn by_probability_desc(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Ranks repeatedly against a fixed label table and `k`.
#[derive(Debug, Clone)]
pub struct Ranker {
    labels: LabelTable,
    k: usize,
}

impl Ranker {
    /// Creates a ranker, rejecting `k == 0` up front.
    pub fn new(labels: LabelTable, k: usize) -> Result<Self, RankError> {
        if k == 0 {
            return Err(RankError::InvalidK(k));
        }
        Ok(Self { labels, k })
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Ranks `logits` with this ranker's labels and `k`.
    pub fn rank(&self, logits: &LogitVector) -> Result<RankedResultSet, RankError> {
        rank(logits, &self.labels, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> LabelTable {
        ["apple", "banana", "cherry"].into_iter().collect()
    }

    fn numbered(n: usize) -> LabelTable {
        (0..n).map(|i| format!("class-{i}")).collect()
    }

    fn logits(v: &[f32]) -> LogitVector {
        LogitVector::new(v.to_vec()).unwrap()
    }

    #[test]
    fn test_fruit_top2() {
        let r = rank(&logits(&[2.0, 1.0, 0.1]), &fruit(), 2).unwrap();
        assert_eq!(r.len(), 2);
        let p = r.as_slice();
        assert_eq!(p[0].class_name, "apple");
        assert_eq!(p[0].class_index, 0);
        assert!((p[0].probability - 0.659).abs() < 1e-3);
        assert_eq!(p[1].class_name, "banana");
        assert!((p[1].probability - 0.242).abs() < 1e-3);
    }

    #[test]
    fn test_sorted_non_increasing() {
        let v = [0.1, 3.2, -0.5, 2.2, 3.2, 0.0, 1.7];
        let r = rank(&logits(&v), &numbered(v.len()), v.len()).unwrap();
        for w in r.as_slice().windows(2) {
            assert!(w[0].probability >= w[1].probability);
        }
    }

    #[test]
    fn test_ties_keep_ascending_index() {
        let v = [1.0, 5.0, 1.0, 5.0, 1.0];
        let r = rank(&logits(&v), &numbered(5), 5).unwrap();
        let order: Vec<usize> = r.iter().map(|p| p.class_index).collect();
        assert_eq!(order, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_k_larger_than_classes() {
        let r = rank(&logits(&[0.1, 0.8]), &numbered(2), 10).unwrap();
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_k_equals_classes_returns_full_distribution() {
        let v = [0.4, -2.0, 1.3, 0.9];
        let r = rank(&logits(&v), &numbered(4), 4).unwrap();
        assert_eq!(r.len(), 4);
        let total: f64 = r.iter().map(|p| p.probability).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_k_one_is_argmax() {
        let v = [0.3, -1.0, 4.5, 4.4, 2.0];
        let l = logits(&v);
        let r = rank(&l, &numbered(5), 1).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.top().unwrap().class_index, l.argmax());
    }

    #[test]
    fn test_idempotent() {
        let v = [0.2, 0.2, 1.9, -0.3, 0.2];
        let l = logits(&v);
        let labels = numbered(5);
        assert_eq!(rank(&l, &labels, 3).unwrap(), rank(&l, &labels, 3).unwrap());
    }

    #[test]
    fn test_invalid_k() {
        let err = rank(&logits(&[1.0, 2.0, 3.0]), &fruit(), 0).unwrap_err();
        assert!(matches!(err, RankError::InvalidK(0)));
    }

    #[test]
    fn test_label_count_mismatch() {
        let err = rank(&logits(&[1.0, 2.0]), &fruit(), 1).unwrap_err();
        assert!(matches!(
            err,
            RankError::LabelCountMismatch { logits: 2, labels: 3 }
        ));
    }

    #[test]
    fn test_ranker_reuse() {
        let ranker = Ranker::new(fruit(), 1).unwrap();
        let r = ranker.rank(&logits(&[0.0, 0.0, 9.0])).unwrap();
        assert_eq!(r.top().unwrap().class_name, "cherry");
        assert!(Ranker::new(fruit(), 0).is_err());
    }
}
