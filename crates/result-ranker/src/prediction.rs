// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Ranked classification output.

use std::fmt;

/// A single class with its probability.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassPrediction {
    /// Class index (0-based) in the model's output.
    pub class_index: usize,
    /// Human-readable label from the [`crate::LabelTable`].
    pub class_name: String,
    /// Softmax probability in `[0, 1]`.
    pub probability: f64,
}

impl fmt::Display for ClassPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (#{}) {:.2}%",
            self.class_name,
            self.class_index,
            self.probability * 100.0
        )
    }
}

/// Predictions sorted by non-increasing probability, ties by ascending
/// class index. Holds `min(k, num_classes)` entries.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RankedResultSet {
    predictions: Vec<ClassPrediction>,
}

impl RankedResultSet {
    pub(crate) fn new(predictions: Vec<ClassPrediction>) -> Self {
        Self { predictions }
    }

    /// The most probable class.
    pub fn top(&self) -> Option<&ClassPrediction> {
        self.predictions.first()
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassPrediction> {
        self.predictions.iter()
    }

    pub fn as_slice(&self) -> &[ClassPrediction] {
        &self.predictions
    }

    pub fn into_vec(self) -> Vec<ClassPrediction> {
        self.predictions
    }
}

impl<'a> IntoIterator for &'a RankedResultSet {
    type Item = &'a ClassPrediction;
    type IntoIter = std::slice::Iter<'a, ClassPrediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.predictions.iter()
    }
}

impl IntoIterator for RankedResultSet {
    type Item = ClassPrediction;
    type IntoIter = std::vec::IntoIter<ClassPrediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.predictions.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(class_index: usize, class_name: &str, probability: f64) -> ClassPrediction {
        ClassPrediction {
            class_index,
            class_name: class_name.into(),
            probability,
        }
    }

    #[test]
    fn test_display_format() {
        assert_eq!(prediction(0, "apple", 0.659).to_string(), "apple (#0) 65.90%");
        assert_eq!(prediction(12, "kiwi", 0.00004).to_string(), "kiwi (#12) 0.00%");
    }

    #[test]
    fn test_json_is_plain_array() {
        let set = RankedResultSet::new(vec![
            prediction(1, "banana", 0.75),
            prediction(0, "apple", 0.25),
        ]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "class_index": 1, "class_name": "banana", "probability": 0.75 },
                { "class_index": 0, "class_name": "apple", "probability": 0.25 },
            ])
        );

        let back: RankedResultSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }
}
