// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `imgclass inspect` command: show the resolved pipeline.
//!
//! Prints the tensor shape, normalization profile and session IO, then runs
//! the model once on a grey image to check that the label table has one
//! entry per output.

use runtime::ClassifierConfig;

pub async fn execute(config: ClassifierConfig) -> anyhow::Result<()> {
    super::banner("imgclass · Pipeline Inspector");

    config.validate()?;
    let profile = config.normalization;

    println!("  Configuration:");
    println!("   Model:        {}", config.model_path.display());
    println!("   Labels:       {}", config.labels_path.display());
    println!("   Tensor shape: {}", config.tensor_shape());
    println!("   Resize:       {}", config.parse_filter()?.as_str());
    println!("   Mean:         {:?}", profile.mean());
    println!("   Std:          {:?}", profile.std());
    println!("   Top-K:        {}", config.top_k);
    println!();

    let classifier = super::open_classifier(config)?;
    let session = classifier.session();

    println!("  Session:");
    println!("   Inputs:  {:?}", session.input_names());
    println!("   Outputs: {:?}", session.output_names());
    println!(
        "   Using:   '{}' → '{}'",
        classifier.input_name(),
        classifier.output_name(),
    );
    println!();

    let labels = classifier.labels().len();
    let outputs = classifier.probe_output_len().await?;

    println!("  Labels:");
    println!("   Entries:       {labels}");
    println!("   Model outputs: {outputs}");
    if labels != outputs {
        tracing::warn!("label table has {labels} entries but the model produces {outputs} scores");
        println!("   WARNING: label count does not match model output length;");
        println!("            classification will fail with a label count mismatch.");
    } else {
        println!("   OK");
    }
    println!();

    Ok(())
}
