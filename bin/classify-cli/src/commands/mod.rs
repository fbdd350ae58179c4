// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared setup.

pub mod benchmark;
pub mod inspect;
pub mod run;

use runtime::{Classifier, ClassifierConfig, Ready};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber.
///
/// `-v` count picks the default level; `RUST_LOG` wins when set. Logs go to
/// stderr so `--json` output stays clean.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Reads the config file, or falls back to defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ClassifierConfig> {
    match path {
        Some(p) => {
            let config = ClassifierConfig::from_file(p)?;
            tracing::info!("loaded config from '{}'", p.display());
            Ok(config)
        }
        None => Ok(ClassifierConfig::default()),
    }
}

/// Applies command-line overrides on top of the file configuration.
pub fn apply_overrides(
    config: &mut ClassifierConfig,
    model: Option<PathBuf>,
    labels: Option<PathBuf>,
    top_k: Option<usize>,
) {
    if let Some(m) = model {
        config.model_path = m;
    }
    if let Some(l) = labels {
        config.labels_path = l;
    }
    if let Some(k) = top_k {
        config.top_k = k;
    }
}

/// Opens the model and prepares a classifier.
#[cfg(feature = "onnx")]
pub fn open_classifier(config: ClassifierConfig) -> anyhow::Result<Classifier<Ready>> {
    Ok(Classifier::new(config).load()?)
}

/// Without an inference backend there is nothing to open.
#[cfg(not(feature = "onnx"))]
pub fn open_classifier(_config: ClassifierConfig) -> anyhow::Result<Classifier<Ready>> {
    Err(runtime::RuntimeError::from(runtime::SessionError::BackendUnavailable(
        "imgclass was built without the `onnx` feature",
    ))
    .into())
}

/// Prints a boxed banner.
pub fn banner(title: &str) {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║ {:^52} ║", title);
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
}
