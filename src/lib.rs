#![doc = include_str!("../README.md")]

// Public modules
pub mod colorize;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod label;
pub mod mask;
pub mod pipeline;
pub mod preprocess;
pub mod regions;
pub mod sink;

mod parallel;

// --- High-level re-exports -------------------------------------------------

// Main entry point and its result.
pub use crate::pipeline::{CellCounter, PipelineConfig, Segmentation};

// Error types of the core and of the file-backed collaborators.
pub use crate::error::{IoError, PipelineError, SegmentationError};

// Stage entry points, usable on their own.
pub use crate::colorize::{colorize, ColorRaster, Palette};
pub use crate::label::{label, Connectivity, LabelMap};
pub use crate::preprocess::{preprocess, Polarity, PreprocessOptions, ThresholdMethod};
pub use crate::regions::{aggregate, Region, ResultRow};

/// Whether the data-parallel backend behind `gpu_offload` was compiled in.
pub use crate::parallel::available as parallel_backend_available;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use cell_counter::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (w, h) = (320usize, 240usize);
/// let gray = vec![200u8; w * h];
/// let image = Image::from_u8(w, h, gray)?;
///
/// let counter = CellCounter::new(PipelineConfig::cell_counting(Connectivity::Four));
/// let run = counter.run(&image)?;
/// println!("objects={} total_ms={:.3}", run.num_regions(), run.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::Image;
    pub use crate::label::Connectivity;
    pub use crate::preprocess::Polarity;
    pub use crate::regions::ResultRow;
    pub use crate::{CellCounter, PipelineConfig, Segmentation};
}
