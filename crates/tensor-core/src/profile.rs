// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-channel normalization constants.

use crate::TensorError;

/// Per-channel mean and standard deviation used to rescale `[0, 1]`
/// intensities into the range a model was trained on:
/// `normalized = (value - mean[c]) / std[c]`.
///
/// A profile is fixed for a given model and shared read-only for the
/// lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawProfile", into = "RawProfile")]
pub struct NormalizationProfile {
    mean: [f32; 3],
    std: [f32; 3],
}

#[derive(serde::Serialize, serde::Deserialize)]
struct RawProfile {
    mean: [f32; 3],
    std: [f32; 3],
}

impl NormalizationProfile {
    /// Creates a profile after checking every constant.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidProfile`] if a mean is not finite or a
    /// standard deviation is not strictly positive and finite.
    pub fn new(mean: [f32; 3], std: [f32; 3]) -> Result<Self, TensorError> {
        for (channel, (&m, &s)) in mean.iter().zip(std.iter()).enumerate() {
            if !m.is_finite() {
                return Err(TensorError::InvalidProfile {
                    channel,
                    detail: format!("mean {m} is not finite"),
                });
            }
            if !s.is_finite() || s <= 0.0 {
                return Err(TensorError::InvalidProfile {
                    channel,
                    detail: format!("std must be finite and greater than 0, got {s}"),
                });
            }
        }
        Ok(Self { mean, std })
    }

    /// The ImageNet statistics most torchvision backbones are trained with.
    pub fn imagenet() -> Self {
        Self {
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }

    /// Identity profile: values stay in `[0, 1]`.
    pub fn unit() -> Self {
        Self {
            mean: [0.0; 3],
            std: [1.0; 3],
        }
    }

    pub fn mean(&self) -> [f32; 3] {
        self.mean
    }

    pub fn std(&self) -> [f32; 3] {
        self.std
    }

    /// Normalizes one 8-bit sample of channel `channel` (0 = R, 1 = G, 2 = B).
    #[inline]
    pub fn apply(&self, channel: usize, sample: u8) -> f32 {
        (f32::from(sample) / 255.0 - self.mean[channel]) / self.std[channel]
    }
}

impl TryFrom<RawProfile> for NormalizationProfile {
    type Error = TensorError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        Self::new(raw.mean, raw.std)
    }
}

impl From<NormalizationProfile> for RawProfile {
    fn from(p: NormalizationProfile) -> Self {
        Self {
            mean: p.mean,
            std: p.std,
        }
    }
}
