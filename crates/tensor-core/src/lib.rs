// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Turns decoded RGBA pixels into the normalized planar tensor an image
//! classifier expects.
//!
//! This crate provides:
//! - [`PixelBuffer`] — an RGBA8 image in `[height][width][channel]` order.
//! - [`NormalizationProfile`] — per-channel mean / standard deviation.
//! - [`TensorShape`] — the `[batch, channels, height, width]` descriptor.
//! - [`InputTensor`] — the planar `f32` model input.
//! - [`build`] — the pixel → tensor transform.
//! - [`layout`] — the explicit interleaved ↔ planar index mapping.
//!
//! # Design Goals
//! - Every type checks its length/shape invariant at construction.
//! - The transform is a pure function with no hidden state.
//! - Clean error types via `thiserror`.

mod builder;
mod error;
pub mod layout;
mod pixel;
mod profile;
mod shape;
mod tensor;

pub use builder::build;
pub use error::TensorError;
pub use pixel::{PixelBuffer, RGBA_CHANNELS};
pub use profile::NormalizationProfile;
pub use shape::{TensorShape, RGB_CHANNELS};
pub use tensor::InputTensor;
