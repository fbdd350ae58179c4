// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! NCHW tensor shape descriptor.

use std::fmt;

/// Number of colour channels fed to the model (R, G, B).
pub const RGB_CHANNELS: usize = 3;

/// Describes the `[batch, channels, height, width]` layout of an
/// [`crate::InputTensor`].
///
/// The shape itself is not validated at construction; [`crate::build`]
/// checks that it describes a single RGB image before producing a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TensorShape {
    pub batch: usize,
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

impl TensorShape {
    /// Creates a shape from explicit dimensions.
    pub fn new(batch: usize, channels: usize, height: usize, width: usize) -> Self {
        Self {
            batch,
            channels,
            height,
            width,
        }
    }

    /// Creates the `(1, 3, height, width)` shape of a single RGB image.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::TensorShape;
    /// let s = TensorShape::image(224, 224);
    /// assert_eq!(s.dims(), [1, 3, 224, 224]);
    /// assert_eq!(s.num_elements(), 3 * 224 * 224);
    /// ```
    pub fn image(height: usize, width: usize) -> Self {
        Self::new(1, RGB_CHANNELS, height, width)
    }

    /// Returns the dimensions in NCHW order.
    pub fn dims(&self) -> [usize; 4] {
        [self.batch, self.channels, self.height, self.width]
    }

    /// Number of pixels in one channel plane (`height * width`).
    pub fn plane_len(&self) -> usize {
        self.height * self.width
    }

    /// Total number of elements.
    pub fn num_elements(&self) -> usize {
        self.batch * self.channels * self.plane_len()
    }

    /// Dimensions as `i64`, the form inference runtimes take.
    pub fn dims_i64(&self) -> [i64; 4] {
        self.dims().map(|d| d as i64)
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.batch, self.channels, self.height, self.width
        )
    }
}
