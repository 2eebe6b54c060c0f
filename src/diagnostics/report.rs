use super::TimingBreakdown;
use crate::image::PixelType;
use crate::preprocess::Threshold;
use crate::regions::ResultRow;
use serde::{Deserialize, Serialize};

/// Serializable summary of one segmentation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    pub input: InputDescriptor,
    pub threshold: Threshold,
    pub foreground_pixels: usize,
    pub num_regions: u32,
    pub regions: Vec<ResultRow>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub pixel_type: PixelType,
}
