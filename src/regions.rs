//! Per-region statistics from a label map and an intensity source.
//!
//! One pass over the pixels accumulates the pixel count and intensity sum of
//! every label. The pass runs over fixed row bands whose partial sums are
//! merged in band order, so the sums (and the means derived from them) do not
//! depend on whether the bands ran in parallel.
use crate::error::SegmentationError;
use crate::image::{Image, ImageView};
use crate::label::LabelMap;
use crate::parallel;
use serde::{Deserialize, Serialize};

/// Aggregated statistics of one labeled component.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub label: u32,
    pub pixel_count: u64,
    pub intensity_sum: f64,
}

impl Region {
    pub fn mean_intensity(&self) -> f64 {
        debug_assert!(self.pixel_count > 0, "region {} is empty", self.label);
        self.intensity_sum / self.pixel_count as f64
    }
}

/// One line of the measurement table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    /// Zero-based position in the table (`label - 1`).
    pub index: usize,
    /// Pixel count.
    pub area: u64,
    pub mean_intensity: f64,
}

impl From<&Region> for ResultRow {
    fn from(region: &Region) -> Self {
        Self {
            index: region.label as usize - 1,
            area: region.pixel_count,
            mean_intensity: region.mean_intensity(),
        }
    }
}

/// Table rows for `regions`, in the same (ascending label) order.
pub fn result_rows(regions: &[Region]) -> Vec<ResultRow> {
    regions.iter().map(ResultRow::from).collect()
}

struct RegionAccumulator {
    pixel_count: Vec<u64>,
    intensity_sum: Vec<f64>,
}

impl RegionAccumulator {
    fn new(num_labels: usize) -> Self {
        Self {
            pixel_count: vec![0; num_labels + 1],
            intensity_sum: vec![0.0; num_labels + 1],
        }
    }

    #[inline]
    fn push(&mut self, label: u32, value: f64) {
        let l = label as usize;
        self.pixel_count[l] += 1;
        self.intensity_sum[l] += value;
    }

    fn merge(&mut self, other: RegionAccumulator) {
        for (acc, c) in self.pixel_count.iter_mut().zip(other.pixel_count) {
            *acc += c;
        }
        for (acc, s) in self.intensity_sum.iter_mut().zip(other.intensity_sum) {
            *acc += s;
        }
    }

    fn into_regions(self) -> Vec<Region> {
        self.pixel_count
            .into_iter()
            .zip(self.intensity_sum)
            .enumerate()
            .skip(1)
            .map(|(label, (pixel_count, intensity_sum))| Region {
                label: label as u32,
                pixel_count,
                intensity_sum,
            })
            .collect()
    }
}

/// Aggregate regions `1..=labels.num_labels()` sequentially.
pub fn aggregate(labels: &LabelMap, intensity: &Image) -> Result<Vec<Region>, SegmentationError> {
    aggregate_with(labels, intensity, false)
}

/// Aggregate regions, ordered by ascending label.
pub fn aggregate_with(
    labels: &LabelMap,
    intensity: &Image,
    parallel: bool,
) -> Result<Vec<Region>, SegmentationError> {
    if labels.dims() != intensity.dims() {
        return Err(SegmentationError::DimensionMismatch {
            expected: labels.dims(),
            found: intensity.dims(),
        });
    }
    let w = labels.width();
    let num_labels = labels.num_labels() as usize;
    let samples = intensity.samples();

    let partials = parallel::map_row_bands(labels.as_slice(), w, parallel, |y0, rows| {
        let mut acc = RegionAccumulator::new(num_labels);
        let base = y0 * w;
        for (i, &l) in rows.iter().enumerate() {
            if l != 0 {
                acc.push(l, samples.get(base + i));
            }
        }
        acc
    });

    let mut total = RegionAccumulator::new(num_labels);
    for partial in partials {
        total.merge(partial);
    }
    Ok(total.into_regions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{label, Connectivity};
    use crate::mask::BinaryMask;

    #[test]
    fn counts_and_means_per_label() {
        let mask = BinaryMask::from_fn(4, 2, |x, _| x != 2);
        let labels = label(&mask, Connectivity::Four).unwrap();
        let img = Image::from_u8(4, 2, vec![1, 3, 99, 10, 5, 7, 99, 20]).unwrap();
        let regions = aggregate(&labels, &img).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].pixel_count, 4);
        assert_eq!(regions[0].mean_intensity(), 4.0);
        assert_eq!(regions[1].pixel_count, 2);
        assert_eq!(regions[1].mean_intensity(), 15.0);
        let rows = result_rows(&regions);
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].area, 2);
    }

    #[test]
    fn mismatched_source_is_rejected() {
        let labels = label(&BinaryMask::new(3, 3), Connectivity::Four).unwrap();
        let img = Image::from_u8(3, 2, vec![0; 6]).unwrap();
        assert_eq!(
            aggregate(&labels, &img),
            Err(SegmentationError::DimensionMismatch {
                expected: (3, 3),
                found: (3, 2)
            })
        );
    }

    #[test]
    fn banded_sums_match_sequential_bitwise() {
        let (w, h) = (17usize, 200usize);
        let mask = BinaryMask::from_fn(w, h, |x, y| (x * 31 + y * 17) % 5 != 0);
        let labels = label(&mask, Connectivity::Eight).unwrap();
        let data: Vec<f32> = (0..w * h).map(|i| (i as f32 * 0.37).sin() * 1e3).collect();
        let img = Image::from_f32(w, h, data).unwrap();
        let seq = aggregate_with(&labels, &img, false).unwrap();
        let par = aggregate_with(&labels, &img, true).unwrap();
        assert_eq!(seq, par);
        let total: u64 = seq.iter().map(|r| r.pixel_count).sum();
        assert_eq!(total as usize, mask.count_foreground());
    }
}
