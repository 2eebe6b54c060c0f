use crate::label::Connectivity;
use crate::parallel;
use crate::preprocess::{Polarity, PreprocessOptions, ThresholdMethod};
use log::warn;
use serde::{Deserialize, Serialize};

/// Pipeline-wide configuration.
///
/// `connectivity` has no default: it must be chosen explicitly, also when
/// the record is read from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Gaussian sigma in pixels (`>= 0`, `0` disables the blur).
    #[serde(default = "default_blur_sigma")]
    pub blur_sigma: f32,
    pub connectivity: Connectivity,
    #[serde(default)]
    pub threshold_method: ThresholdMethod,
    /// Side of the threshold that is foreground before inversion.
    #[serde(default)]
    pub polarity: Polarity,
    /// Flip the mask after thresholding.
    #[serde(default)]
    pub invert_mask: bool,
    /// Seed of the label palette.
    #[serde(default)]
    pub color_seed: u64,
    /// Run stages on the data-parallel backend. Outputs are identical.
    #[serde(default)]
    pub gpu_offload: bool,
    /// Hand the measurement table to the table sink.
    #[serde(default)]
    pub export_table: bool,
}

fn default_blur_sigma() -> f32 {
    2.0
}

impl PipelineConfig {
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            blur_sigma: default_blur_sigma(),
            connectivity,
            threshold_method: ThresholdMethod::Otsu,
            polarity: Polarity::Dark,
            invert_mask: false,
            color_seed: 0,
            gpu_offload: false,
            export_table: false,
        }
    }

    /// Classic cell-counting setup: sigma 2 blur, Otsu, bright class
    /// thresholded and then inverted so dark cells become foreground, table
    /// export enabled.
    pub fn cell_counting(connectivity: Connectivity) -> Self {
        Self {
            polarity: Polarity::Bright,
            invert_mask: true,
            export_table: true,
            ..Self::new(connectivity)
        }
    }

    pub fn with_blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_invert_mask(mut self, invert: bool) -> Self {
        self.invert_mask = invert;
        self
    }

    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = seed;
        self
    }

    pub fn with_gpu_offload(mut self, enabled: bool) -> Self {
        self.gpu_offload = enabled;
        self
    }

    pub fn with_export_table(mut self, enabled: bool) -> Self {
        self.export_table = enabled;
        self
    }

    /// Whether stages actually run data-parallel.
    pub fn use_parallel(&self) -> bool {
        if self.gpu_offload && !parallel::available() {
            warn!("gpu_offload requested but the `parallel` feature is disabled; running sequentially");
        }
        self.gpu_offload && parallel::available()
    }

    pub fn preprocess_options(&self, parallel: bool) -> PreprocessOptions {
        PreprocessOptions {
            sigma: self.blur_sigma,
            method: self.threshold_method,
            polarity: self.polarity,
            invert: self.invert_mask,
            parallel,
        }
    }
}
