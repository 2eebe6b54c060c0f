//! Run diagnostics: stage timings and the serializable run summary.

pub mod report;
pub mod timing;

pub use report::{InputDescriptor, SegmentationReport};
pub use timing::{StageTiming, TimingBreakdown};
