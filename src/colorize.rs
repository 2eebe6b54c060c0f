//! Deterministic pseudo-colour rendering of a label map.
//!
//! Each label gets one ARGB colour drawn from a seeded generator in ascending
//! label order, so a seed always reproduces the same palette. Painting is an
//! independent per-pixel lookup.
use crate::image::ImageView;
use crate::label::LabelMap;
use crate::parallel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Colour of background pixels (transparent black).
pub const BACKGROUND_ARGB: u32 = 0x0000_0000;

const OPAQUE: u32 = 0xFF00_0000;

/// Label → ARGB mapping; index 0 holds the background colour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<u32>,
}

impl Palette {
    /// Draw `num_labels` opaque colours from `rng`.
    pub fn generate<R: Rng>(num_labels: u32, rng: &mut R) -> Self {
        let mut colors = Vec::with_capacity(num_labels as usize + 1);
        colors.push(BACKGROUND_ARGB);
        colors.extend((0..num_labels).map(|_| rng.gen::<u32>() | OPAQUE));
        Self { colors }
    }

    pub fn seeded(num_labels: u32, seed: u64) -> Self {
        Self::generate(num_labels, &mut StdRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn color(&self, label: u32) -> u32 {
        self.colors[label as usize]
    }

    pub fn len(&self) -> usize {
        self.colors.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// ARGB raster, one `u32` per pixel (`0xAARRGGBB`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorRaster {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u32>,
}

impl ColorRaster {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.w + x]
    }

    /// Pixels as RGBA bytes, row-major.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 4);
        for &argb in &self.data {
            let [a, r, g, b] = argb.to_be_bytes();
            out.extend_from_slice(&[r, g, b, a]);
        }
        out
    }
}

crate::image::traits::impl_dense_view!(ColorRaster, u32);

/// Paint `labels` with colours drawn from a generator seeded with `seed`.
pub fn colorize(labels: &LabelMap, seed: u64) -> ColorRaster {
    colorize_with(labels, &Palette::seeded(labels.num_labels(), seed), false)
}

/// Paint `labels` with an explicit palette.
pub fn colorize_with(labels: &LabelMap, palette: &Palette, parallel: bool) -> ColorRaster {
    debug_assert!(palette.len() >= labels.num_labels() as usize);
    let (w, h) = labels.dims();
    let mut data = vec![BACKGROUND_ARGB; w * h];
    parallel::for_each_row_mut(&mut data, w, parallel, |y, out| {
        for (dst, &l) in out.iter_mut().zip(labels.row(y)) {
            *dst = palette.color(l);
        }
    });
    ColorRaster { w, h, data }
}
