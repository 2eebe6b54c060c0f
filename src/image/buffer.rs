//! Owned input image with a runtime pixel type.
//!
//! This is the hand-off format between the image-loading collaborator and the
//! pipeline: `width × height × depth` samples in row-major order, stored in
//! their native type. Stages never mutate an `Image`; they read it through
//! [`Image::sample`] or convert it to an [`ImageF32`] working buffer.
use super::ImageF32;
use crate::error::SegmentationError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelType {
    U8,
    U16,
    F32,
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelType::U8 => "8-bit unsigned",
            PixelType::U16 => "16-bit unsigned",
            PixelType::F32 => "32-bit float",
        };
        f.write_str(name)
    }
}

/// Sample storage tagged by pixel type.
#[derive(Clone, Debug, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

impl Samples {
    pub fn pixel_type(&self) -> PixelType {
        match self {
            Samples::U8(_) => PixelType::U8,
            Samples::U16(_) => PixelType::U16,
            Samples::F32(_) => PixelType::F32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Samples::U8(v) => v.len(),
            Samples::U16(v) => v.len(),
            Samples::F32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, idx: usize) -> f64 {
        match self {
            Samples::U8(v) => v[idx] as f64,
            Samples::U16(v) => v[idx] as f64,
            Samples::F32(v) => v[idx] as f64,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    depth: usize,
    samples: Samples,
}

impl Image {
    /// Planar image; `samples` must hold exactly `width * height` values.
    pub fn new(width: usize, height: usize, samples: Samples) -> Result<Self, SegmentationError> {
        Self::with_depth(width, height, 1, samples)
    }

    pub fn with_depth(
        width: usize,
        height: usize,
        depth: usize,
        samples: Samples,
    ) -> Result<Self, SegmentationError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(depth))
            .ok_or_else(|| SegmentationError::invalid("image dimensions overflow"))?;
        if samples.len() != expected {
            return Err(SegmentationError::invalid(format!(
                "{width}x{height}x{depth} image needs {expected} samples, got {}",
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            depth,
            samples,
        })
    }

    pub fn from_u8(width: usize, height: usize, data: Vec<u8>) -> Result<Self, SegmentationError> {
        Self::new(width, height, Samples::U8(data))
    }

    pub fn from_u16(width: usize, height: usize, data: Vec<u16>) -> Result<Self, SegmentationError> {
        Self::new(width, height, Samples::U16(data))
    }

    pub fn from_f32(width: usize, height: usize, data: Vec<f32>) -> Result<Self, SegmentationError> {
        Self::new(width, height, Samples::F32(data))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel_type(&self) -> PixelType {
        self.samples.pixel_type()
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    /// Sample at (x, y) on the first plane, widened to f64.
    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> f64 {
        self.samples.get(y * self.width + x)
    }

    /// Checks the preconditions every stage relies on: a non-empty single
    /// plane of finite samples. NaN has no order and an infinite sample would
    /// stretch the histogram range to infinity.
    pub fn validate_planar(&self) -> Result<(), SegmentationError> {
        if self.width == 0 || self.height == 0 {
            return Err(SegmentationError::invalid(format!(
                "zero-area image ({}x{})",
                self.width, self.height
            )));
        }
        if self.depth != 1 {
            return Err(SegmentationError::invalid(format!(
                "expected a single plane, got depth {}",
                self.depth
            )));
        }
        if let Samples::F32(v) = &self.samples {
            if v.iter().any(|s| !s.is_finite()) {
                return Err(SegmentationError::UnsupportedPixelType {
                    pixel_type: PixelType::F32,
                });
            }
        }
        Ok(())
    }

    /// Copy the first plane into an f32 buffer in native intensity units.
    pub fn to_f32(&self) -> ImageF32 {
        let n = self.width * self.height;
        let data = match &self.samples {
            Samples::U8(v) => v[..n].iter().map(|&s| s as f32).collect(),
            Samples::U16(v) => v[..n].iter().map(|&s| s as f32).collect(),
            Samples::F32(v) => v[..n].to_vec(),
        };
        ImageF32::from_vec(self.width, self.height, data)
    }
}
