// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pixel buffer → normalized planar tensor.

use crate::layout::interleaved_to_planar;
use crate::shape::RGB_CHANNELS;
use crate::{InputTensor, NormalizationProfile, PixelBuffer, TensorError, TensorShape};

/// Builds the model input tensor from an RGBA pixel buffer.
///
/// Each pixel's R, G and B samples (alpha is skipped) are scaled from
/// `[0, 255]` to `[0, 1]`, normalized with `(v - mean[c]) / std[c]`, and
/// written to planar layout: all red values, then all green, then all blue.
///
/// All preconditions are checked before any output is allocated.
///
/// # Errors
/// - [`TensorError::InvalidChannelCount`] if `shape.channels != 3`.
/// - [`TensorError::InvalidBatchSize`] if `shape.batch != 1`.
/// - [`TensorError::EmptyShape`] if the height or width is zero.
/// - [`TensorError::ShapeMismatch`] if the buffer's dimensions or length
///   disagree with `shape`.
///
/// # Examples
/// ```
/// use tensor_core::{build, NormalizationProfile, PixelBuffer, TensorShape};
///
/// let white = PixelBuffer::filled(2, 2, [255, 255, 255, 255]);
/// let profile = NormalizationProfile::new([0.5; 3], [0.25; 3]).unwrap();
/// let t = build(&white, TensorShape::image(2, 2), &profile).unwrap();
/// assert_eq!(t.len(), 12);
/// assert!(t.as_slice().iter().all(|&v| v == 2.0));
/// ```
pub fn build(
    pixels: &PixelBuffer,
    shape: TensorShape,
    profile: &NormalizationProfile,
) -> Result<InputTensor, TensorError> {
    if shape.channels != RGB_CHANNELS {
        return Err(TensorError::InvalidChannelCount(shape.channels));
    }
    if shape.batch != 1 {
        return Err(TensorError::InvalidBatchSize(shape.batch));
    }
    if shape.height == 0 || shape.width == 0 {
        return Err(TensorError::EmptyShape);
    }
    if pixels.height() != shape.height || pixels.width() != shape.width {
        return Err(TensorError::shape_mismatch(
            format!("{}x{} pixels", shape.height, shape.width),
            format!("{}x{} pixels", pixels.height(), pixels.width()),
        ));
    }
    let expected = shape.plane_len() * 4;
    if pixels.len() != expected {
        return Err(TensorError::shape_mismatch(
            format!("{expected} samples"),
            format!("{} samples", pixels.len()),
        ));
    }

    let data = interleaved_to_planar(pixels.as_bytes(), |c, v| profile.apply(c, v));
    Ok(InputTensor::new(shape, data))
}
