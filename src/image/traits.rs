//! Row-oriented access shared by every raster in the crate.
//!
//! Intensity buffers, binary masks, label maps and colour rasters all store
//! their samples row-major; stages walk them row by row through [`ImageView`]
//! so that the partitioned (parallel) and sequential paths see the same rows.

pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    /// All samples, row-major.
    fn as_slice(&self) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.image.height().saturating_sub(self.y);
        (left, Some(left))
    }
}

/// Implements [`ImageView`] for a dense `w × h` raster with `w`, `h` and
/// `data: Vec<Pixel>` fields.
macro_rules! impl_dense_view {
    ($ty:ty, $pixel:ty) => {
        impl $crate::image::traits::ImageView for $ty {
            type Pixel = $pixel;

            #[inline]
            fn width(&self) -> usize {
                self.w
            }
            #[inline]
            fn height(&self) -> usize {
                self.h
            }
            #[inline]
            fn row(&self, y: usize) -> &[$pixel] {
                let start = y * self.w;
                &self.data[start..start + self.w]
            }
            #[inline]
            fn as_slice(&self) -> &[$pixel] {
                &self.data
            }
        }
    };
}

pub(crate) use impl_dense_view;
