//! Consumers of the pipeline outputs.
//!
//! The core hands its measurement table to a [`ResultSink`] and its colour
//! rendering to a [`RasterSink`]; what happens next (a CSV file, a viewer, a
//! test buffer) is up to the implementation.
use crate::colorize::ColorRaster;
use crate::error::IoError;
use crate::image::io::{ensure_parent_dir, save_color_raster_png};
use crate::regions::ResultRow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Column headers of the measurement table.
pub const TABLE_HEADER: [&str; 3] = ["Index", "Area in pixels", "Mean intensity"];

pub trait ResultSink {
    /// Receive the rows of one run, ordered by ascending label.
    fn consume(&mut self, rows: &[ResultRow]) -> Result<(), IoError>;
}

pub trait RasterSink {
    fn consume(&mut self, raster: &ColorRaster) -> Result<(), IoError>;
}

/// Write the table as comma-separated text with a header line.
pub fn write_table<W: Write>(mut writer: W, rows: &[ResultRow]) -> io::Result<()> {
    writeln!(writer, "{}", TABLE_HEADER.join(","))?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{:.6}",
            row.index, row.area, row.mean_intensity
        )?;
    }
    writer.flush()
}

/// CSV table exporter.
pub struct CsvTableSink<W: Write> {
    writer: W,
    path: PathBuf,
}

impl CsvTableSink<BufWriter<File>> {
    /// Create (or truncate) `path`, creating parent directories.
    pub fn create(path: &Path) -> Result<Self, IoError> {
        ensure_parent_dir(path)?;
        let file = File::create(path).map_err(|source| IoError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }
}

impl<W: Write> CsvTableSink<W> {
    /// Wrap an arbitrary writer; `name` is used in error messages.
    pub fn new(writer: W, name: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            path: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for CsvTableSink<W> {
    fn consume(&mut self, rows: &[ResultRow]) -> Result<(), IoError> {
        write_table(&mut self.writer, rows).map_err(|source| IoError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Keeps the rows in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<ResultRow>,
}

impl ResultSink for MemorySink {
    fn consume(&mut self, rows: &[ResultRow]) -> Result<(), IoError> {
        self.rows.extend_from_slice(rows);
        Ok(())
    }
}

/// Writes each raster to a fixed PNG path.
#[derive(Clone, Debug)]
pub struct PngRasterSink {
    path: PathBuf,
}

impl PngRasterSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RasterSink for PngRasterSink {
    fn consume(&mut self, raster: &ColorRaster) -> Result<(), IoError> {
        save_color_raster_png(raster, &self.path)
    }
}
