//! Binary foreground/background mask.
//!
//! One byte per cell: `1` is foreground, `0` is background. The mask keeps the
//! spatial dimensions of the image it was derived from.
use crate::error::SegmentationError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl BinaryMask {
    /// All-background mask.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    /// Mask from row-major cells; `cells` must hold exactly `w * h` entries.
    pub fn from_bools(w: usize, h: usize, cells: &[bool]) -> Result<Self, SegmentationError> {
        if Some(cells.len()) != w.checked_mul(h) {
            return Err(SegmentationError::invalid(format!(
                "{w}x{h} mask needs {} cells, got {}",
                w.saturating_mul(h),
                cells.len()
            )));
        }
        Ok(Self {
            w,
            h,
            data: cells.iter().map(|&c| c as u8).collect(),
        })
    }

    /// Build a mask by evaluating `f(x, y)` for every cell.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y) as u8);
            }
        }
        Self { w, h, data }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, foreground: bool) {
        self.data[y * self.w + x] = foreground as u8;
    }

    /// Flip every cell in place.
    pub fn invert(&mut self) {
        for cell in &mut self.data {
            *cell ^= 1;
        }
    }

    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&c| c != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&c| c == 0)
    }
}

crate::image::traits::impl_dense_view!(BinaryMask, u8);
