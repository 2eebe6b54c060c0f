//! Blur, binarize and optionally invert an intensity image.
//!
//! Steps
//! - Convert the input plane to an [`ImageF32`] in native units.
//! - Separable Gaussian blur ([`GaussianKernel`], clamp-to-edge borders).
//! - 256-bin histogram over `[min, max]` and Otsu threshold selection.
//! - Binarize by histogram bin under the configured [`Polarity`]; a
//!   degenerate histogram (one non-empty bin) yields an all-background mask.
//! - Optional in-place inversion of the mask. A degenerate mask is not
//!   inverted: with a single class there is no foreground to select.
//!
//! The blurred image is returned alongside the mask for diagnostics; region
//! measurements are taken on the original input, not on this buffer.

pub mod blur;
pub mod filters;
mod options;
pub mod threshold;

pub use blur::separable_blur;
pub use filters::{GaussianKernel, SeparableFilter};
pub use options::PreprocessOptions;
pub use threshold::{otsu, Histogram, Polarity, Threshold, ThresholdMethod};

use crate::error::SegmentationError;
use crate::image::{Image, ImageF32};
use crate::mask::BinaryMask;
use crate::parallel;
use log::{debug, warn};

/// Products of the preprocessing stage.
#[derive(Clone, Debug)]
pub struct Preprocessed {
    pub mask: BinaryMask,
    pub blurred: ImageF32,
    pub threshold: Threshold,
}

/// Turn an intensity image into a binary mask.
pub fn preprocess(
    image: &Image,
    options: &PreprocessOptions,
) -> Result<Preprocessed, SegmentationError> {
    image.validate_planar()?;
    options.validate()?;

    let source = image.to_f32();
    let blurred = separable_blur(&source, &GaussianKernel::new(options.sigma), options.parallel);
    let hist = Histogram::build(&blurred, options.parallel)
        .ok_or_else(|| SegmentationError::invalid("empty image"))?;
    let threshold = threshold::select_threshold(&hist, options.method);
    if threshold.degenerate {
        warn!(
            "preprocess: uniform intensity {:.3} after blur, mask left empty",
            hist.min
        );
    }

    let mut mask = binarize(&blurred, &hist, &threshold, options.polarity, options.parallel);
    if options.invert && !threshold.degenerate {
        mask.invert();
    }
    debug!(
        "preprocess w={} h={} sigma={} threshold={:.3} (bin {}) foreground={}",
        mask.w,
        mask.h,
        options.sigma,
        threshold.value,
        threshold.bin,
        mask.count_foreground()
    );

    Ok(Preprocessed {
        mask,
        blurred,
        threshold,
    })
}

/// Classify every pixel of `img` against `threshold`.
pub fn binarize(
    img: &ImageF32,
    hist: &Histogram,
    threshold: &Threshold,
    polarity: Polarity,
    parallel: bool,
) -> BinaryMask {
    let mut mask = BinaryMask::new(img.w, img.h);
    parallel::for_each_row_mut(&mut mask.data, img.w, parallel, |y, out| {
        let row = &img.data[y * img.w..(y + 1) * img.w];
        for (cell, &v) in out.iter_mut().zip(row) {
            *cell = threshold.is_foreground(hist.bin_of(v), polarity) as u8;
        }
    });
    mask
}
