//! Intensity histogram and Otsu's threshold.
//!
//! The histogram spans `[min, max]` of the (blurred) image with
//! [`HISTOGRAM_BINS`] uniform bins, so 8-bit, 16-bit and float inputs are
//! handled alike. Otsu picks the split `t` maximising the between-class
//! variance of bins `< t` and `>= t`; ties keep the lowest `t`.
//!
//! Complexity: O(W·H) for the histogram build (partitioned by row bands and
//! summed), O(bins) for the threshold search.
use crate::image::ImageF32;
use crate::parallel;
use serde::{Deserialize, Serialize};

pub const HISTOGRAM_BINS: usize = 256;

#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub counts: Vec<u64>,
    pub min: f32,
    pub max: f32,
}

impl Histogram {
    /// Build the histogram of `img`; `None` for an empty image.
    pub fn build(img: &ImageF32, parallel: bool) -> Option<Self> {
        let (min, max) = img.min_max()?;
        let mut hist = Self {
            counts: vec![0; HISTOGRAM_BINS],
            min,
            max,
        };
        let partials = parallel::map_row_bands(&img.data, img.w, parallel, |_, samples| {
            let mut counts = vec![0u64; HISTOGRAM_BINS];
            for &v in samples {
                counts[hist.bin_of(v)] += 1;
            }
            counts
        });
        for partial in partials {
            for (acc, c) in hist.counts.iter_mut().zip(partial) {
                *acc += c;
            }
        }
        Some(hist)
    }

    /// Bin holding intensity `v`.
    #[inline]
    pub fn bin_of(&self, v: f32) -> usize {
        let span = self.max as f64 - self.min as f64;
        if span <= 0.0 {
            return 0;
        }
        let pos = (v as f64 - self.min as f64) / span * HISTOGRAM_BINS as f64;
        (pos.max(0.0) as usize).min(HISTOGRAM_BINS - 1)
    }

    /// Intensity at the lower edge of `bin`.
    pub fn lower_edge(&self, bin: usize) -> f32 {
        let span = self.max as f64 - self.min as f64;
        (self.min as f64 + span * bin as f64 / HISTOGRAM_BINS as f64) as f32
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn non_empty_bins(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

/// Threshold selection method. Only Otsu is provided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMethod {
    #[default]
    Otsu,
}

/// Which side of the threshold is foreground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Foreground is darker than the threshold (`bin < t`).
    #[default]
    Dark,
    /// Foreground is at or above the threshold (`bin >= t`).
    Bright,
}

/// Outcome of threshold selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    /// First bin of the upper class.
    pub bin: usize,
    /// Intensity at the lower edge of `bin`, in source units.
    pub value: f32,
    /// The histogram had a single non-empty bin; no split exists.
    pub degenerate: bool,
}

impl Threshold {
    /// Classify a histogram bin under `polarity`. A degenerate threshold
    /// classifies everything as background.
    #[inline]
    pub fn is_foreground(&self, bin: usize, polarity: Polarity) -> bool {
        if self.degenerate {
            return false;
        }
        match polarity {
            Polarity::Dark => bin < self.bin,
            Polarity::Bright => bin >= self.bin,
        }
    }
}

/// Select a threshold with `method`.
pub fn select_threshold(hist: &Histogram, method: ThresholdMethod) -> Threshold {
    match method {
        ThresholdMethod::Otsu => otsu(hist),
    }
}

/// Otsu's method over cumulative weighted sums of the histogram.
pub fn otsu(hist: &Histogram) -> Threshold {
    if hist.non_empty_bins() <= 1 {
        let bin = hist.counts.iter().position(|&c| c > 0).unwrap_or(0);
        return Threshold {
            bin,
            value: hist.lower_edge(bin),
            degenerate: true,
        };
    }

    let total = hist.total() as f64;
    let sum_all: f64 = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut weight_b = 0.0f64;
    let mut sum_b = 0.0f64;
    let mut best_var = -1.0f64;
    let mut best_bin = 1usize;
    for t in 1..hist.counts.len() {
        let c = hist.counts[t - 1] as f64;
        weight_b += c;
        sum_b += (t - 1) as f64 * c;
        let weight_f = total - weight_b;
        if weight_b == 0.0 || weight_f == 0.0 {
            continue;
        }
        let mean_b = sum_b / weight_b;
        let mean_f = (sum_all - sum_b) / weight_f;
        let var = weight_b * weight_f * (mean_b - mean_f).powi(2);
        if var > best_var {
            best_var = var;
            best_bin = t;
        }
    }

    Threshold {
        bin: best_bin,
        value: hist.lower_edge(best_bin),
        degenerate: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist_from(counts: &[(usize, u64)]) -> Histogram {
        let mut h = Histogram {
            counts: vec![0; HISTOGRAM_BINS],
            min: 0.0,
            max: 256.0,
        };
        for &(bin, c) in counts {
            h.counts[bin] = c;
        }
        h
    }

    #[test]
    fn bimodal_split_lands_between_modes() {
        let h = hist_from(&[(20, 500), (21, 300), (200, 400), (201, 200)]);
        let t = otsu(&h);
        assert!(!t.degenerate);
        assert!(t.bin > 21 && t.bin <= 200, "bin={}", t.bin);
    }

    #[test]
    fn equal_variance_plateau_keeps_lowest_split() {
        let h = hist_from(&[(10, 5), (50, 5)]);
        let t = otsu(&h);
        assert_eq!(t.bin, 11);
    }

    #[test]
    fn single_bin_is_degenerate_and_all_background() {
        let h = hist_from(&[(37, 1000)]);
        let t = otsu(&h);
        assert!(t.degenerate);
        assert_eq!(t.bin, 37);
        assert!(!t.is_foreground(0, Polarity::Dark));
        assert!(!t.is_foreground(255, Polarity::Bright));
    }

    #[test]
    fn histogram_build_covers_min_and_max() {
        let img = ImageF32::from_vec(4, 1, vec![10.0, 10.0, 30.0, 50.0]);
        let h = Histogram::build(&img, false).unwrap();
        assert_eq!(h.total(), 4);
        assert_eq!(h.counts[0], 2);
        assert_eq!(h.counts[HISTOGRAM_BINS - 1], 1);
        assert_eq!(h.bin_of(30.0), 128);
    }

    #[test]
    fn constant_image_has_one_bin() {
        let img = ImageF32::from_vec(3, 3, vec![7.0; 9]);
        let h = Histogram::build(&img, true).unwrap();
        assert_eq!(h.non_empty_bins(), 1);
        assert!(otsu(&h).degenerate);
    }
}
