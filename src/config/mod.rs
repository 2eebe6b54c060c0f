//! JSON configuration of the `cell_counter` command-line tool.
//!
//! ```json
//! {
//!   "input": "cells.png",
//!   "pipeline": { "connectivity": "four", "polarity": "bright", "invertMask": true, "exportTable": true },
//!   "output": { "tableCsv": "out/cells.csv", "labelsPng": "out/labels.png" }
//! }
//! ```
use crate::error::IoError;
use crate::pipeline::PipelineConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct CellCountToolConfig {
    pub input: PathBuf,
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the tool writes its outputs. Every entry is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    /// Measurement table; written only when `exportTable` is on.
    pub table_csv: Option<PathBuf>,
    /// Colour rendering of the label map.
    pub labels_png: Option<PathBuf>,
    /// Binary mask after thresholding (and inversion).
    pub mask_png: Option<PathBuf>,
    /// Run summary with threshold, regions and timings.
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<CellCountToolConfig, IoError> {
    let data = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&data).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_config(data: &str) -> Result<CellCountToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Connectivity;

    #[test]
    fn outputs_are_optional() {
        let cfg = parse_config(
            r#"{ "input": "a.png", "pipeline": { "connectivity": "eight" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.input, PathBuf::from("a.png"));
        assert_eq!(cfg.pipeline.connectivity, Connectivity::Eight);
        assert!(cfg.output.table_csv.is_none());
        assert!(cfg.output.report_json.is_none());
    }

    #[test]
    fn reads_output_paths() {
        let cfg = parse_config(
            r#"{
                "input": "a.png",
                "pipeline": { "connectivity": "four", "exportTable": true },
                "output": { "tableCsv": "out/t.csv", "maskPng": "out/m.png" }
            }"#,
        )
        .unwrap();
        assert!(cfg.pipeline.export_table);
        assert_eq!(cfg.output.table_csv, Some(PathBuf::from("out/t.csv")));
        assert_eq!(cfg.output.mask_png, Some(PathBuf::from("out/m.png")));
    }

    #[test]
    fn output_keys_share_the_pipeline_casing() {
        let cfg = parse_config(
            r#"{
                "input": "a.png",
                "pipeline": { "connectivity": "four" },
                "output": { "labelsPng": "l.png", "reportJson": "r.json", "table_csv": "ignored.csv" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.output.labels_png, Some(PathBuf::from("l.png")));
        assert_eq!(cfg.output.report_json, Some(PathBuf::from("r.json")));
        assert!(cfg.output.table_csv.is_none());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_config(Path::new("/nonexistent/cell_counter.json")).unwrap_err();
        assert!(matches!(err, IoError::Read { .. }));
    }
}
