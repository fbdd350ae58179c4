// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-call stage timings.
//!
//! [`StageMetrics`] splits one classify call into its four stages. Only
//! `inference` is the model latency reported to callers; the other stages
//! are kept so that preprocessing cost is visible without polluting it.

use std::time::Duration;

/// Wall-clock time spent in each stage of one classify call.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct StageMetrics {
    /// Decode + resize. Zero when the caller supplied pixels.
    pub decode: Duration,
    /// Pixel buffer → input tensor.
    pub preprocess: Duration,
    /// Model execution as reported by the session. Backends that share one
    /// session behind a lock exclude the wait; the default
    /// `InferenceSession::run_timed` includes it.
    pub inference: Duration,
    /// Logits → ranked predictions.
    pub postprocess: Duration,
}

impl StageMetrics {
    /// Sum of all stages.
    pub fn total(&self) -> Duration {
        self.decode + self.preprocess + self.inference + self.postprocess
    }

    /// Model latency in seconds.
    pub fn inference_seconds(&self) -> f64 {
        self.inference.as_secs_f64()
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        format!(
            "Classify: {:.2}ms total, {:.2}ms decode, {:.2}ms preprocess, \
             {:.2}ms inference, {:.2}ms postprocess",
            ms(self.total()),
            ms(self.decode),
            ms(self.preprocess),
            ms(self.inference),
            ms(self.postprocess),
        )
    }
}

/// Latency statistics over repeated runs.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct LatencyStats {
    pub runs: usize,
    pub min: Duration,
    pub mean: Duration,
    pub p50: Duration,
    pub max: Duration,
}

impl LatencyStats {
    /// Computes statistics over `samples`; `None` if empty.
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort();
        let total: Duration = sorted.iter().sum();
        Some(Self {
            runs: sorted.len(),
            min: sorted[0],
            mean: total / sorted.len() as u32,
            p50: sorted[sorted.len() / 2],
            max: sorted[sorted.len() - 1],
        })
    }

    pub fn summary(&self) -> String {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        format!(
            "{} runs: min {:.2}ms, mean {:.2}ms, p50 {:.2}ms, max {:.2}ms",
            self.runs,
            ms(self.min),
            ms(self.mean),
            ms(self.p50),
            ms(self.max),
        )
    }
}
