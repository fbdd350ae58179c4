// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Conversion between interleaved (HWC) and planar (CHW) layouts.
//!
//! For an image with `P = height * width` pixels:
//!
//! ```text
//! interleaved[p * 4 + c]   (p in 0..P, c in 0..4, alpha = 3)
//!         │
//!         ▼
//! planar[c * P + p]        (p in 0..P, c in 0..3, alpha dropped)
//! ```
//!
//! Element `p` of plane `c` is therefore always pixel `p` in raster order.

use crate::pixel::RGBA_CHANNELS;
use crate::shape::RGB_CHANNELS;

/// Index of channel `channel` of pixel `pixel` in an RGBA interleaved buffer.
#[inline]
pub fn interleaved_index(pixel: usize, channel: usize) -> usize {
    pixel * RGBA_CHANNELS + channel
}

/// Index of channel `channel` of pixel `pixel` in a planar buffer whose
/// planes hold `plane_len` values each.
#[inline]
pub fn planar_index(channel: usize, pixel: usize, plane_len: usize) -> usize {
    channel * plane_len + pixel
}

/// Transposes interleaved RGBA samples into three contiguous planes,
/// mapping every sample through `map(channel, sample)`.
///
/// Alpha is skipped. The caller guarantees `src.len()` is a multiple of 4;
/// any trailing partial pixel is ignored.
pub fn interleaved_to_planar<F>(src: &[u8], map: F) -> Vec<f32>
where
    F: Fn(usize, u8) -> f32,
{
    let plane_len = src.len() / RGBA_CHANNELS;
    let mut dst = vec![0.0f32; RGB_CHANNELS * plane_len];

    for p in 0..plane_len {
        for c in 0..RGB_CHANNELS {
            dst[planar_index(c, p, plane_len)] = map(c, src[interleaved_index(p, c)]);
        }
    }

    dst
}

/// Inverse of [`interleaved_to_planar`]: regroups planar values per pixel.
///
/// Returns one `[r, g, b]` triple per pixel in raster order.
pub fn planar_to_interleaved(planar: &[f32]) -> Vec<[f32; 3]> {
    let plane_len = planar.len() / RGB_CHANNELS;
    (0..plane_len)
        .map(|p| {
            [
                planar[planar_index(0, p, plane_len)],
                planar[planar_index(1, p, plane_len)],
                planar[planar_index(2, p, plane_len)],
            ]
        })
        .collect()
}
