// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # imgclass
//!
//! Command-line interface for the image classification runtime.
//!
//! ## Usage
//! ```bash
//! # Classify one image
//! imgclass run --image ./cat.jpg --model ./models/classifier.onnx --labels ./models/labels.txt
//!
//! # Measure inference latency
//! imgclass benchmark --image ./cat.jpg --iterations 50 --warmup 5
//!
//! # Show the resolved pipeline and check the label table against the model
//! imgclass inspect --config ./classifier.toml
//! ```

mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "imgclass",
    about = "Image classification with a pretrained ONNX model",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI arguments override it).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Model and label overrides shared by every subcommand.
#[derive(Args, Debug)]
struct ModelArgs {
    /// Path to the ONNX model file.
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Path to the label table (one label per line, or a JSON array).
    #[arg(short, long)]
    labels: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an image and print the top predictions.
    Run {
        /// Image to classify.
        #[arg(short, long)]
        image: PathBuf,

        #[command(flatten)]
        model: ModelArgs,

        /// Number of predictions to print.
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Print machine-readable JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Classify the same image repeatedly and report inference latency.
    Benchmark {
        /// Image to classify.
        #[arg(short, long)]
        image: PathBuf,

        #[command(flatten)]
        model: ModelArgs,

        /// Timed iterations.
        #[arg(short = 'n', long, default_value_t = 20)]
        iterations: usize,

        /// Untimed iterations run first.
        #[arg(short, long, default_value_t = 3)]
        warmup: usize,
    },

    /// Print the resolved configuration and model inputs/outputs.
    Inspect {
        #[command(flatten)]
        model: ModelArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let mut config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            image,
            model,
            top_k,
            json,
        } => {
            commands::apply_overrides(&mut config, model.model, model.labels, top_k);
            commands::run::execute(config, image, json).await
        }
        Commands::Benchmark {
            image,
            model,
            iterations,
            warmup,
        } => {
            commands::apply_overrides(&mut config, model.model, model.labels, None);
            commands::benchmark::execute(config, image, iterations, warmup).await
        }
        Commands::Inspect { model } => {
            commands::apply_overrides(&mut config, model.model, model.labels, None);
            commands::inspect::execute(config).await
        }
    }
}
