// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The normalized, planar model input.

use crate::TensorShape;
use ndarray::ArrayView4;

/// An owned `f32` tensor in planar NCHW order, ready to be fed to a model.
///
/// `InputTensor` can only be produced by [`crate::build`], which guarantees
/// `data.len() == shape.num_elements()`. It is immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    shape: TensorShape,
    data: Vec<f32>,
}

impl InputTensor {
    pub(crate) fn new(shape: TensorShape, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), shape.num_elements());
        Self { shape, data }
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> TensorShape {
        self.shape
    }

    /// Returns all values, plane by plane.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Number of elements (`channels * height * width`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the values of a single channel plane, or `None` if
    /// `channel` is out of range.
    pub fn plane(&self, channel: usize) -> Option<&[f32]> {
        if channel >= self.shape.channels {
            return None;
        }
        let n = self.shape.plane_len();
        self.data.get(channel * n..(channel + 1) * n)
    }

    /// Zero-copy `ndarray` view in NCHW order.
    pub fn view(&self) -> ArrayView4<'_, f32> {
        let [n, c, h, w] = self.shape.dims();
        ArrayView4::from_shape((n, c, h, w), &self.data)
            .expect("InputTensor length always matches its shape")
    }

    /// Consumes the tensor and returns the flat buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}
