//! Connected-component labeling of a binary mask.
//!
//! Two-pass union-find labeling:
//!
//! - First pass: raster scan; every foreground pixel looks at its already
//!   visited neighbours (4-connected: left, up; 8-connected: left, up-left,
//!   up, up-right). Without a labeled neighbour it gets a fresh provisional
//!   label, otherwise the smallest neighbour label, and all neighbour labels
//!   are unioned.
//! - Resolution: every provisional label is mapped to its root.
//! - Second pass: roots are renumbered densely `1..=num_labels` in order of
//!   their first row-major occurrence and written back.
//!
//! With the parallel backend the first pass runs independently on bands of
//! rows; band tables are concatenated and the equivalences across each band
//! boundary are merged single-threaded before resolution. A component's first
//! row-major pixel always receives the smallest provisional label of its set,
//! so renumbering roots by ascending provisional label reproduces the
//! first-occurrence order on both paths and the label map is identical.
//!
//! Background stays `0` and never takes part in a union.

mod union_find;


use crate::error::SegmentationError;
use crate::image::ImageView;
use crate::mask::BinaryMask;
use crate::parallel;
use log::debug;
use serde::{Deserialize, Serialize};
use union_find::UnionFind;

/// Largest number of provisional labels a labeling may allocate (2³¹ − 1).
pub const LABEL_LIMIT: u32 = i32::MAX as u32;

/// Neighbour rule used to connect foreground pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Edge-adjacent neighbours only.
    Four,
    /// Edge- and corner-adjacent neighbours.
    Eight,
}

impl Connectivity {
    /// Neighbour offsets `(dx, dy)` already visited by a raster scan.
    fn causal_offsets(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &[(-1, 0), (0, -1)],
            Connectivity::Eight => &[(-1, 0), (-1, -1), (0, -1), (1, -1)],
        }
    }
}

/// Per-pixel component ids; `0` is background.
///
/// Read-only outside this module: every stored id is in `0..=num_labels`.
/// Use [`ImageView`] (`row`, `as_slice`, `dims`) to read it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMap {
    w: usize,
    h: usize,
    data: Vec<u32>,
    num_labels: u32,
}

impl LabelMap {
    /// Number of components; labels run `1..=num_labels`.
    pub fn num_labels(&self) -> u32 {
        self.num_labels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.w + x]
    }

    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&l| l != 0).count()
    }
}

crate::image::traits::impl_dense_view!(LabelMap, u32);

/// Label `mask` sequentially.
pub fn label(mask: &BinaryMask, connectivity: Connectivity) -> Result<LabelMap, SegmentationError> {
    label_with(mask, connectivity, false)
}

/// Label `mask`, splitting the first pass into row bands when `parallel`.
pub fn label_with(
    mask: &BinaryMask,
    connectivity: Connectivity,
    parallel: bool,
) -> Result<LabelMap, SegmentationError> {
    label_with_limit(mask, connectivity, parallel, LABEL_LIMIT)
}

pub(crate) fn label_with_limit(
    mask: &BinaryMask,
    connectivity: Connectivity,
    parallel: bool,
    limit: u32,
) -> Result<LabelMap, SegmentationError> {
    let (w, h) = mask.dims();
    if w == 0 || h == 0 {
        return Err(SegmentationError::invalid(format!(
            "zero-area mask ({w}x{h})"
        )));
    }

    let rows_per_band = if parallel && parallel::available() {
        parallel::ROWS_PER_PARTITION
    } else {
        h
    };

    let mut provisional = vec![0u32; w * h];
    let band_tables = parallel::map_bands_mut(&mut provisional, w, rows_per_band, parallel, |y0, rows| {
        scan_band(mask, y0, rows, connectivity, limit)
    });

    let mut uf = UnionFind::new();
    let mut offsets = Vec::with_capacity(band_tables.len());
    for table in band_tables {
        let table = table?;
        if uf.len() as u64 + table.len() as u64 > limit as u64 {
            return Err(SegmentationError::LabelOverflow { limit });
        }
        offsets.push(uf.append(&table));
    }

    if offsets.len() > 1 {
        parallel::map_bands_mut(&mut provisional, w, rows_per_band, parallel, |y0, rows| {
            let offset = offsets[y0 / rows_per_band];
            for p in rows.iter_mut().filter(|p| **p != 0) {
                *p += offset;
            }
        });
        for y0 in (rows_per_band..h).step_by(rows_per_band) {
            merge_band_boundary(&provisional, w, y0, connectivity, &mut uf);
        }
    }

    let dense = renumber(&mut uf);
    let num_labels = dense.iter().copied().max().unwrap_or(0);
    parallel::for_each_row_mut(&mut provisional, w, parallel, |_, row| {
        for p in row.iter_mut() {
            *p = dense[*p as usize];
        }
    });

    debug!(
        "label w={} h={} connectivity={:?} provisional={} bands={} regions={}",
        w,
        h,
        connectivity,
        uf.len(),
        offsets.len(),
        num_labels
    );

    Ok(LabelMap {
        w,
        h,
        data: provisional,
        num_labels,
    })
}

/// First pass over rows `y0..y0 + rows.len() / w`, ignoring anything above
/// the band. Labels in `rows` are local to the returned table.
fn scan_band(
    mask: &BinaryMask,
    y0: usize,
    rows: &mut [u32],
    connectivity: Connectivity,
    limit: u32,
) -> Result<UnionFind, SegmentationError> {
    let w = mask.w;
    let band_h = rows.len() / w;
    let mut uf = UnionFind::new();
    let mut neighbours = [0u32; 4];

    for ry in 0..band_h {
        let src = mask.row(y0 + ry);
        for x in 0..w {
            if src[x] == 0 {
                continue;
            }
            let mut n = 0;
            for &(dx, dy) in connectivity.causal_offsets() {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), ry.checked_add_signed(dy))
                else {
                    continue;
                };
                if nx >= w {
                    continue;
                }
                let l = rows[ny * w + nx];
                if l != 0 {
                    neighbours[n] = l;
                    n += 1;
                }
            }
            let assigned = match neighbours[..n].iter().copied().min() {
                None => uf.make_set(limit)?,
                Some(smallest) => {
                    for &l in &neighbours[..n] {
                        uf.union(smallest, l);
                    }
                    smallest
                }
            };
            rows[ry * w + x] = assigned;
        }
    }
    Ok(uf)
}

/// Union the first row of a band with the last row of the band above.
fn merge_band_boundary(
    provisional: &[u32],
    w: usize,
    y0: usize,
    connectivity: Connectivity,
    uf: &mut UnionFind,
) {
    let row = &provisional[y0 * w..(y0 + 1) * w];
    let above = &provisional[(y0 - 1) * w..y0 * w];
    for (x, &p) in row.iter().enumerate() {
        if p == 0 {
            continue;
        }
        for &(dx, dy) in connectivity.causal_offsets() {
            if dy != -1 {
                continue;
            }
            let Some(nx) = x.checked_add_signed(dx) else {
                continue;
            };
            if nx >= w {
                continue;
            }
            let q = above[nx];
            if q != 0 {
                uf.union(p, q);
            }
        }
    }
}

/// Dense id per provisional label. Roots are numbered in ascending order of
/// the smallest provisional label in their set, which is the label of the
/// set's first row-major pixel.
fn renumber(uf: &mut UnionFind) -> Vec<u32> {
    let total = uf.len();
    let mut root_id = vec![0u32; total as usize + 1];
    let mut dense = vec![0u32; total as usize + 1];
    let mut next = 0u32;
    for l in 1..=total {
        let root = uf.find(l) as usize;
        if root_id[root] == 0 {
            next += 1;
            root_id[root] = next;
        }
        dense[l as usize] = root_id[root];
    }
    dense
}
