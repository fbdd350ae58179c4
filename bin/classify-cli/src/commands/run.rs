// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `imgclass run` command: classify one image.
//!
//! Walks the type-state pipeline:
//! ```text
//! Classifier<Configured> → load → <Ready> → classify
//! ```

use result_ranker::RankedResultSet;
use runtime::{ClassificationOutput, ClassifierConfig, ImageInput};
use std::path::PathBuf;

pub async fn execute(config: ClassifierConfig, image: PathBuf, json: bool) -> anyhow::Result<()> {
    if !json {
        super::banner("imgclass · Classifier");
        println!("  Config:");
        println!("   Model:   {}", config.model_path.display());
        println!("   Labels:  {}", config.labels_path.display());
        println!("   Input:   {}", config.tensor_shape());
        println!("   Top-K:   {}", config.top_k);
        println!("   Image:   {}", image.display());
        println!();
    }

    let classifier = super::open_classifier(config)?;
    let output = classifier.classify(&ImageInput::Path(image.clone())).await?;

    if json {
        println!("{}", to_json(&image, &output)?);
    } else {
        print_predictions(&output.predictions);
        println!("  Metrics:");
        println!("   {}", output.metrics.summary());
        println!("   Inference: {:.6}s", output.inference_seconds());
        println!();
    }

    Ok(())
}

fn to_json(image: &std::path::Path, output: &ClassificationOutput) -> anyhow::Result<String> {
    let value = serde_json::json!({
        "image": image.display().to_string(),
        "predictions": output.predictions,
        "inference_seconds": output.inference_seconds(),
        "metrics": output.metrics,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn print_predictions(predictions: &RankedResultSet) {
    println!("  {:<4} {:<40} {:>7} {:>10}", "Rank", "Label", "Class", "Prob.");
    println!("  {}", "-".repeat(64));
    for (rank, p) in predictions.iter().enumerate() {
        println!(
            "  {:<4} {:<40} {:>7} {:>9.2}%",
            rank + 1,
            truncate(&p.class_name, 40),
            p.class_index,
            p.probability * 100.0,
        );
    }
    println!();
}

/// Truncates a string with ellipsis.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
