// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Image decode + resize collaborator.
//!
//! The pipeline only needs RGBA8 pixels at the model's input size, so the
//! collaborator is reduced to a single [`ImageDecoder::decode`] call. The
//! default implementation, [`ImageCrateDecoder`], uses the `image` crate.

use crate::DecodeError;
use image::imageops::FilterType;
use std::path::PathBuf;
use std::str::FromStr;
use tensor_core::PixelBuffer;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// An encoded image file on disk.
    Path(PathBuf),
    /// Encoded image bytes (PNG, JPEG, ...).
    Bytes(Vec<u8>),
}

impl From<PathBuf> for ImageInput {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

impl From<&std::path::Path> for ImageInput {
    fn from(p: &std::path::Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageInput {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

/// Decodes an image and resizes it to exactly `width x height`.
///
/// Implementations must return a buffer with 4 samples per pixel in
/// `[height][width][channel]` order. The pipeline does not re-check
/// sample values.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, input: &ImageInput, width: u32, height: u32)
        -> Result<PixelBuffer, DecodeError>;
}

/// Resampling filter used when resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeFilter {
    Nearest,
    /// Bilinear.
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Triangle => "triangle",
            ResizeFilter::CatmullRom => "catmull-rom",
            ResizeFilter::Gaussian => "gaussian",
            ResizeFilter::Lanczos3 => "lanczos3",
        }
    }
}

impl FromStr for ResizeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(ResizeFilter::Nearest),
            "triangle" | "bilinear" => Ok(ResizeFilter::Triangle),
            "catmull-rom" | "catmullrom" | "bicubic" => Ok(ResizeFilter::CatmullRom),
            "gaussian" => Ok(ResizeFilter::Gaussian),
            "lanczos3" | "lanczos" => Ok(ResizeFilter::Lanczos3),
            other => Err(format!("unknown resize filter '{other}'")),
        }
    }
}

impl From<ResizeFilter> for FilterType {
    fn from(f: ResizeFilter) -> Self {
        match f {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// [`ImageDecoder`] backed by the `image` crate.
///
/// Resizes to the exact target size without preserving aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateDecoder {
    filter: ResizeFilter,
}

impl ImageCrateDecoder {
    pub fn new(filter: ResizeFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> ResizeFilter {
        self.filter
    }
}

impl Default for ImageCrateDecoder {
    fn default() -> Self {
        Self::new(ResizeFilter::Triangle)
    }
}

impl ImageDecoder for ImageCrateDecoder {
    fn decode(
        &self,
        input: &ImageInput,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidTarget { width, height });
        }

        let img = match input {
            ImageInput::Path(path) => {
                let bytes = std::fs::read(path).map_err(|source| DecodeError::Read {
                    path: path.clone(),
                    source,
                })?;
                image::load_from_memory(&bytes)?
            }
            ImageInput::Bytes(bytes) => image::load_from_memory(bytes)?,
        };

        tracing::debug!(
            "decoded {}x{} image, resizing to {width}x{height} ({})",
            img.width(),
            img.height(),
            self.filter.as_str(),
        );

        let rgba = if img.width() == width && img.height() == height {
            img.into_rgba8()
        } else {
            img.resize_exact(width, height, self.filter.into()).into_rgba8()
        };

        PixelBuffer::from_rgba(width as usize, height as usize, rgba.into_raw())
            .map_err(|e| DecodeError::Other(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(img: RgbImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_adds_opaque_alpha() {
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 10, y as u8 * 20, 7]));
        let decoder = ImageCrateDecoder::default();
        let px = decoder.decode(&ImageInput::Bytes(png_bytes(img)), 3, 2).unwrap();

        assert_eq!(px.width(), 3);
        assert_eq!(px.height(), 2);
        // Pixel (x=2, y=1) is raster index 5.
        assert_eq!(px.pixel(5), Some([20, 20, 7, 255]));
    }

    #[test]
    fn test_decode_resizes_exactly() {
        let img = RgbImage::from_pixel(40, 10, Rgb([200, 100, 50]));
        let decoder = ImageCrateDecoder::new(ResizeFilter::Nearest);
        let px = decoder.decode(&ImageInput::Bytes(png_bytes(img)), 8, 8).unwrap();
        assert_eq!(px.len(), 8 * 8 * 4);
        assert_eq!(px.pixel(63), Some([200, 100, 50, 255]));
    }

    #[test]
    fn test_decode_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        RgbImage::from_pixel(4, 4, Rgb([255, 0, 0])).save(&path).unwrap();

        let px = ImageCrateDecoder::default()
            .decode(&ImageInput::Path(path), 4, 4)
            .unwrap();
        assert_eq!(px.pixel(0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = ImageCrateDecoder::default()
            .decode(&ImageInput::Bytes(vec![1, 2, 3, 4]), 2, 2)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ImageCrateDecoder::default()
            .decode(&ImageInput::Path("/nonexistent/cat.png".into()), 2, 2)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Read { .. }));
    }

    #[test]
    fn test_zero_target_rejected() {
        let err = ImageCrateDecoder::default()
            .decode(&ImageInput::Bytes(vec![]), 0, 2)
            .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTarget { .. }));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("Bilinear".parse::<ResizeFilter>().unwrap(), ResizeFilter::Triangle);
        assert_eq!("lanczos3".parse::<ResizeFilter>().unwrap(), ResizeFilter::Lanczos3);
        assert!("box".parse::<ResizeFilter>().is_err());
    }
}
