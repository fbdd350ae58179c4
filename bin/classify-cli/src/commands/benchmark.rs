// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `imgclass benchmark` command: repeated classification of one image.
//!
//! The image is read once and fed as bytes on every iteration, so the
//! numbers cover decode, tensor build, inference and ranking but not disk
//! I/O. Latency statistics are over the session-reported run time only.

use runtime::{ClassifierConfig, ImageInput, LatencyStats};
use std::path::PathBuf;
use std::time::Duration;

pub async fn execute(
    config: ClassifierConfig,
    image: PathBuf,
    iterations: usize,
    warmup: usize,
) -> anyhow::Result<()> {
    anyhow::ensure!(iterations > 0, "--iterations must be at least 1");

    super::banner("imgclass · Benchmark");
    println!("  Model:      {}", config.model_path.display());
    println!("  Image:      {}", image.display());
    println!("  Iterations: {iterations} (+{warmup} warm-up)");
    println!();

    let bytes = std::fs::read(&image)
        .map_err(|e| anyhow::anyhow!("cannot read image '{}': {e}", image.display()))?;
    let input = ImageInput::Bytes(bytes);

    let classifier = super::open_classifier(config)?;

    for _ in 0..warmup {
        classifier.classify(&input).await?;
    }

    let mut inference = Vec::with_capacity(iterations);
    let mut total = Vec::with_capacity(iterations);
    let mut top = None;
    for i in 0..iterations {
        let output = classifier.classify(&input).await?;
        tracing::debug!("iteration {i}: {}", output.metrics.summary());
        inference.push(output.metrics.inference);
        total.push(output.metrics.total());
        top = output.predictions.top().cloned();
    }

    println!("  {:<12} {:>10} {:>10} {:>10} {:>10}", "Stage", "Min", "Mean", "P50", "Max");
    println!("  {}", "-".repeat(56));
    if let Some(s) = LatencyStats::from_samples(&inference) {
        print_row("inference", &s);
    }
    if let Some(s) = LatencyStats::from_samples(&total) {
        print_row("end-to-end", &s);
    }
    println!();

    if let Some(p) = top {
        println!("  Top prediction: {p}");
        println!();
    }

    Ok(())
}

fn print_row(stage: &str, s: &LatencyStats) {
    println!(
        "  {:<12} {:>8.2}ms {:>8.2}ms {:>8.2}ms {:>8.2}ms",
        stage,
        ms(s.min),
        ms(s.mean),
        ms(s.p50),
        ms(s.max),
    );
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
