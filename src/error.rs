//! Error types.
//!
//! [`SegmentationError`] covers everything the segmentation core can reject.
//! Each variant is fatal for the image being processed; no partial label map
//! or region table escapes a failed run. [`IoError`] belongs to the boundary
//! collaborators (image loading, table and raster export, config parsing).

use crate::image::PixelType;
use std::path::PathBuf;

/// Errors raised by the segmentation core.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SegmentationError {
    /// Zero-area, volumetric or otherwise malformed input.
    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },
    /// Samples that cannot be reduced to a scalar ordering.
    #[error("unsupported pixel type: {pixel_type}")]
    UnsupportedPixelType { pixel_type: PixelType },
    /// Two rasters that must share a grid do not.
    #[error("dimension mismatch: expected {}x{}, found {}x{}", expected.0, expected.1, found.0, found.1)]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A configuration value outside its domain (negative sigma, ...).
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// The provisional label space ran out.
    #[error("label space exhausted (limit {limit})")]
    LabelOverflow { limit: u32 },
}

impl SegmentationError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }
}

/// Errors raised by the file-backed collaborators around the core.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to encode image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("image {} is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: SegmentationError,
    },
}

/// Failure of a pipeline run that also hands its outputs to sinks.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Segmentation(#[from] SegmentationError),
    #[error(transparent)]
    Export(#[from] IoError),
}
