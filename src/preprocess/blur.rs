//! Separable convolution with clamp-to-edge borders.
//!
//! The horizontal pass writes a temporary buffer, the vertical pass reads it
//! back; each output row depends only on input rows, so both passes split by
//! rows without coordination.
use super::filters::SeparableFilter;
use crate::image::{ImageF32, ImageView};
use crate::parallel;

/// Blur `src` with `filter` along x, then along y.
pub fn separable_blur(src: &ImageF32, filter: &dyn SeparableFilter, parallel: bool) -> ImageF32 {
    if filter.is_identity() || src.w == 0 || src.h == 0 {
        return src.clone();
    }
    let taps = filter.taps();
    let radius = filter.radius();

    let mut horiz = ImageF32::new(src.w, src.h);
    parallel::for_each_row_mut(&mut horiz.data, src.w, parallel, |y, out| {
        filter_row(src.row(y), out, taps, radius);
    });

    let mut out = ImageF32::new(src.w, src.h);
    let h = src.h;
    parallel::for_each_row_mut(&mut out.data, src.w, parallel, |y, dst| {
        for (k, &tap) in taps.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius as isize, h);
            for (d, &s) in dst.iter_mut().zip(horiz.row(sy)) {
                *d += tap * s;
            }
        }
    });
    out
}

fn filter_row(row: &[f32], out: &mut [f32], taps: &[f32], radius: usize) {
    let len = row.len();
    for (x, dst_px) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &tap) in taps.iter().enumerate() {
            let idx = clamp_index(x as isize + k as isize - radius as isize, len);
            acc += tap * row[idx];
        }
        *dst_px = acc;
    }
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}
