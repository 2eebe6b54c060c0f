//! File I/O around the segmentation core.
//!
//! - `load_image`: read a PNG/TIFF/etc. into a single-plane [`Image`],
//!   keeping 16-bit and float precision when the file has it.
//! - `save_mask_png`: write a binary mask as an 8-bit PNG (0 / 255).
//! - `save_color_raster_png`: write an ARGB label rendering as RGBA PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Image, ImageView};
use crate::colorize::ColorRaster;
use crate::error::IoError;
use crate::mask::BinaryMask;
use image::{DynamicImage, GrayImage, RgbaImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and reduce it to one grayscale plane.
pub fn load_image(path: &Path) -> Result<Image, IoError> {
    let decoded = image::open(path).map_err(|source| IoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let (w, h) = (decoded.width() as usize, decoded.height() as usize);
    let image = match decoded {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => Image::from_u16(w, h, decoded.into_luma16().into_raw()),
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            Image::from_f32(w, h, decoded.to_luma32f().into_raw())
        }
        other => Image::from_u8(w, h, other.into_luma8().into_raw()),
    };
    image.map_err(|source| IoError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a binary mask as an 8-bit grayscale PNG.
pub fn save_mask_png(mask: &BinaryMask, path: &Path) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.w as u32, mask.h as u32);
    for (y, row) in mask.rows().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, image::Luma([cell * 255]));
        }
    }
    out.save(path).map_err(|source| IoError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Save an ARGB raster as an RGBA PNG.
pub fn save_color_raster_png(raster: &ColorRaster, path: &Path) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    let out = RgbaImage::from_raw(raster.w as u32, raster.h as u32, raster.to_rgba_bytes())
        .ok_or_else(|| IoError::Malformed {
            path: path.to_path_buf(),
            source: crate::error::SegmentationError::invalid("raster buffer too small"),
        })?;
    out.save(path).map_err(|source| IoError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| IoError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
