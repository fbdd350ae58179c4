// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Decoded RGBA pixel data.

use crate::TensorError;

/// Samples per pixel in a [`PixelBuffer`] (R, G, B, A).
pub const RGBA_CHANNELS: usize = 4;

/// An owned RGBA8 image laid out row-major as `[height][width][channel]`.
///
/// The length invariant `data.len() == height * width * 4` is checked when
/// the buffer is created, so every `PixelBuffer` in circulation is
/// well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps interleaved RGBA8 samples.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] if `data` does not hold exactly
    /// `width * height * 4` samples.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::PixelBuffer;
    /// let px = PixelBuffer::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
    /// assert_eq!(px.pixel_count(), 2);
    /// assert!(PixelBuffer::from_rgba(2, 2, vec![0; 8]).is_err());
    /// ```
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self, TensorError> {
        let expected = width * height * RGBA_CHANNELS;
        if data.len() != expected {
            return Err(TensorError::shape_mismatch(
                format!("{expected} samples ({height}x{width}x{RGBA_CHANNELS})"),
                format!("{} samples", data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a buffer where every pixel has the same RGBA value.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width * height * RGBA_CHANNELS)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of samples (`pixel_count * 4`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the raw interleaved samples.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the RGBA samples of the pixel at raster index `index`.
    pub fn pixel(&self, index: usize) -> Option<[u8; 4]> {
        let start = index.checked_mul(RGBA_CHANNELS)?;
        let px = self.data.get(start..start + RGBA_CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_length_checked() {
        assert!(PixelBuffer::from_rgba(3, 2, vec![0; 24]).is_ok());
        let err = PixelBuffer::from_rgba(3, 2, vec![0; 18]).unwrap_err();
        assert!(matches!(err, TensorError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_filled() {
        let px = PixelBuffer::filled(2, 3, [1, 2, 3, 4]);
        assert_eq!(px.len(), 24);
        assert_eq!(px.pixel(5), Some([1, 2, 3, 4]));
        assert_eq!(px.pixel(6), None);
    }

    #[test]
    fn test_pixel_raster_order() {
        let data: Vec<u8> = (0..16).collect();
        let px = PixelBuffer::from_rgba(2, 2, data).unwrap();
        assert_eq!(px.pixel(0), Some([0, 1, 2, 3]));
        assert_eq!(px.pixel(3), Some([12, 13, 14, 15]));
    }
}
