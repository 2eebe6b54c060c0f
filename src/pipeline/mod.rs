//! Single-image segmentation pipeline.
//!
//! [`CellCounter`] runs preprocess → label → aggregate → colorize on one
//! image and returns a [`Segmentation`] holding every product of the run.
//! A failing stage aborts the run and nothing but the error is returned.
//!
//! ```no_run
//! use cell_counter::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = Image::from_u8(64, 64, vec![0u8; 64 * 64])?;
//! let counter = CellCounter::new(PipelineConfig::new(Connectivity::Four));
//! let run = counter.run(&image)?;
//! for row in run.rows() {
//!     println!("{} {} {:.2}", row.index, row.area, row.mean_intensity);
//! }
//! # Ok(())
//! # }
//! ```

mod config;

pub use self::config::PipelineConfig;

use crate::colorize::{colorize_with, ColorRaster, Palette};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{InputDescriptor, SegmentationReport, TimingBreakdown};
use crate::error::{PipelineError, SegmentationError};
use crate::image::Image;
use crate::label::{label_with, LabelMap};
use crate::mask::BinaryMask;
use crate::preprocess::{preprocess, Threshold};
use crate::regions::{aggregate_with, result_rows, Region, ResultRow};
use crate::sink::{RasterSink, ResultSink};
use log::debug;
use std::time::Instant;

/// Everything one run produces.
#[derive(Clone, Debug)]
pub struct Segmentation {
    pub input: InputDescriptor,
    pub mask: BinaryMask,
    pub threshold: Threshold,
    pub labels: LabelMap,
    /// One entry per label, ascending.
    pub regions: Vec<Region>,
    pub colors: ColorRaster,
    pub timings: TimingBreakdown,
}

impl Segmentation {
    pub fn num_regions(&self) -> u32 {
        self.labels.num_labels()
    }

    pub fn rows(&self) -> Vec<ResultRow> {
        result_rows(&self.regions)
    }

    pub fn report(&self) -> SegmentationReport {
        SegmentationReport {
            input: self.input.clone(),
            threshold: self.threshold,
            foreground_pixels: self.mask.count_foreground(),
            num_regions: self.num_regions(),
            regions: self.rows(),
            timings: self.timings.clone(),
        }
    }
}

/// Pipeline entry point.
#[derive(Clone, Debug)]
pub struct CellCounter {
    config: PipelineConfig,
}

impl CellCounter {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Segment `image` and measure every region on the unblurred input.
    pub fn run(&self, image: &Image) -> Result<Segmentation, SegmentationError> {
        let parallel = self.config.use_parallel();
        debug!(
            "CellCounter::run start w={} h={} type={} parallel={}",
            image.width(),
            image.height(),
            image.pixel_type(),
            parallel
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let options = self.config.preprocess_options(parallel);
        let pre = timings.time("preprocess", || preprocess(image, &options))?;
        let labels = timings.time("label", || {
            label_with(&pre.mask, self.config.connectivity, parallel)
        })?;
        let regions = timings.time("aggregate", || aggregate_with(&labels, image, parallel))?;
        let colors = timings.time("colorize", || {
            let palette = Palette::seeded(labels.num_labels(), self.config.color_seed);
            colorize_with(&labels, &palette, parallel)
        });
        timings.total_ms = elapsed_ms(total_start);

        debug!(
            "CellCounter::run done regions={} total_ms={:.3}",
            labels.num_labels(),
            timings.total_ms
        );

        Ok(Segmentation {
            input: InputDescriptor {
                width: image.width(),
                height: image.height(),
                pixel_type: image.pixel_type(),
            },
            mask: pre.mask,
            threshold: pre.threshold,
            labels,
            regions,
            colors,
            timings,
        })
    }

    /// Run and hand the outputs over: the table goes to `table` when
    /// `export_table` is set, the colour rendering to `raster` if given.
    pub fn run_with_sinks(
        &self,
        image: &Image,
        table: &mut dyn ResultSink,
        raster: Option<&mut dyn RasterSink>,
    ) -> Result<Segmentation, PipelineError> {
        let run = self.run(image)?;
        if self.config.export_table {
            table.consume(&run.rows())?;
        }
        if let Some(sink) = raster {
            sink.consume(&run.colors)?;
        }
        Ok(run)
    }
}
