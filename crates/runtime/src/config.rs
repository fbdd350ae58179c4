// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Classifier configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! model_path = "./models/classifier.onnx"
//! labels_path = "./models/labels.txt"
//! input_width = 224
//! input_height = 224
//! top_k = 10
//! resize_filter = "triangle"
//! num_threads = 4
//!
//! [normalization]
//! mean = [0.5488, 0.5056, 0.3494]
//! std = [0.2189, 0.2199, 0.2283]
//! ```

use crate::image_source::ResizeFilter;
use crate::RuntimeError;
use std::path::{Path, PathBuf};
use tensor_core::{NormalizationProfile, TensorShape};

/// Configuration for the classification pipeline.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassifierConfig {
    /// Path to the model file.
    pub model_path: PathBuf,
    /// Path to the label table (one label per line, or a JSON array).
    pub labels_path: PathBuf,
    /// Width images are resized to before tensor construction.
    #[serde(default = "default_side")]
    pub input_width: u32,
    /// Height images are resized to before tensor construction.
    #[serde(default = "default_side")]
    pub input_height: u32,
    /// Number of ranked predictions returned per call.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Resize filter name: `nearest`, `triangle`, `catmull-rom`, `gaussian`, `lanczos3`.
    #[serde(default = "default_filter")]
    pub resize_filter: String,
    /// Model input to feed; defaults to the model's first input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_name: Option<String>,
    /// Model output holding the logits; defaults to the model's first output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_name: Option<String>,
    /// Intra-op threads for the inference backend (defaults to online CPU cores).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_threads: Option<usize>,
    /// Per-channel normalization applied to pixel intensities.
    #[serde(default = "default_profile")]
    pub normalization: NormalizationProfile,
}

fn default_side() -> u32 {
    224
}

fn default_top_k() -> usize {
    10
}

fn default_filter() -> String {
    "triangle".to_string()
}

/// Statistics of the dataset the default model was trained on.
fn default_profile() -> NormalizationProfile {
    NormalizationProfile::new([0.5488, 0.5056, 0.3494], [0.2189, 0.2199, 0.2283])
        .expect("built-in normalization constants are valid")
}

impl ClassifierConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, RuntimeError> {
        toml::from_str(toml_str)
            .map_err(|e| RuntimeError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, RuntimeError> {
        toml::to_string_pretty(self)
            .map_err(|e| RuntimeError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Checks the values that cannot be expressed in the type system.
    pub fn validate(&self) -> Result<(), RuntimeError> {
        if self.input_width == 0 || self.input_height == 0 {
            return Err(RuntimeError::ConfigError(format!(
                "input size must be non-zero, got {}x{}",
                self.input_width, self.input_height
            )));
        }
        if self.top_k == 0 {
            return Err(RuntimeError::ConfigError("top_k must be at least 1".into()));
        }
        self.parse_filter()?;
        Ok(())
    }

    /// The `(1, 3, input_height, input_width)` model input shape.
    pub fn tensor_shape(&self) -> TensorShape {
        TensorShape::image(self.input_height as usize, self.input_width as usize)
    }

    /// Parses the resize filter name.
    pub fn parse_filter(&self) -> Result<ResizeFilter, RuntimeError> {
        self.resize_filter.parse().map_err(|_| {
            RuntimeError::ConfigError(format!(
                "unknown resize filter '{}'; expected 'nearest', 'triangle', 'catmull-rom', 'gaussian', or 'lanczos3'",
                self.resize_filter
            ))
        })
    }

    /// Resolves the number of worker threads.
    pub fn resolve_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./models/classifier.onnx"),
            labels_path: PathBuf::from("./models/labels.txt"),
            input_width: default_side(),
            input_height: default_side(),
            top_k: default_top_k(),
            resize_filter: default_filter(),
            input_name: None,
            output_name: None,
            num_threads: None,
            normalization: default_profile(),
        }
    }
}
