//! Data-parallel helpers with a sequential fallback.
//!
//! Work is always split into the same partitions whether or not rayon runs
//! them, and partial results come back in partition order. Reductions over
//! floating-point sums therefore produce identical bits on both paths.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Rows grouped into one partition for reductions.
pub(crate) const ROWS_PER_PARTITION: usize = 64;

/// True when the data-parallel backend was compiled in.
pub const fn available() -> bool {
    cfg!(feature = "parallel")
}

/// Apply `f(y, row)` to every `width`-long row of `data`.
pub(crate) fn for_each_row_mut<T, F>(data: &mut [T], width: usize, parallel: bool, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if width == 0 {
        return;
    }
    #[cfg(feature = "parallel")]
    {
        if parallel {
            data.par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
            return;
        }
    }
    let _ = parallel;
    data.chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Map `f(first_row, rows)` over bands of [`ROWS_PER_PARTITION`] rows and
/// return the partial results in band order.
pub(crate) fn map_row_bands<T, R, F>(data: &[T], width: usize, parallel: bool, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &[T]) -> R + Sync + Send,
{
    if width == 0 || data.is_empty() {
        return Vec::new();
    }
    let band = width * ROWS_PER_PARTITION;
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return data
                .par_chunks(band)
                .enumerate()
                .map(|(i, rows)| f(i * ROWS_PER_PARTITION, rows))
                .collect();
        }
    }
    let _ = parallel;
    data.chunks(band)
        .enumerate()
        .map(|(i, rows)| f(i * ROWS_PER_PARTITION, rows))
        .collect()
}

/// Map `f(first_row, rows)` over mutable bands of `rows_per_band` rows and
/// return the results in band order.
pub(crate) fn map_bands_mut<T, R, F>(
    data: &mut [T],
    width: usize,
    rows_per_band: usize,
    parallel: bool,
    f: F,
) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(usize, &mut [T]) -> R + Sync + Send,
{
    if width == 0 || data.is_empty() {
        return Vec::new();
    }
    let rows_per_band = rows_per_band.max(1);
    let band = width * rows_per_band;
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return data
                .par_chunks_mut(band)
                .enumerate()
                .map(|(i, rows)| f(i * rows_per_band, rows))
                .collect();
        }
    }
    let _ = parallel;
    data.chunks_mut(band)
        .enumerate()
        .map(|(i, rows)| f(i * rows_per_band, rows))
        .collect()
}
