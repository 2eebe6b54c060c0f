use super::threshold::{Polarity, ThresholdMethod};
use crate::error::SegmentationError;
use serde::{Deserialize, Serialize};

/// Options controlling blur, threshold and mask polarity.
///
/// - `sigma`: Gaussian standard deviation in pixels; `0` skips the blur.
/// - `polarity`: which side of the threshold becomes foreground.
/// - `invert`: flip the finished mask.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreprocessOptions {
    pub sigma: f32,
    pub method: ThresholdMethod,
    pub polarity: Polarity,
    pub invert: bool,
    /// Run blur and histogram on the data-parallel backend.
    #[serde(skip)]
    pub parallel: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            sigma: 2.0,
            method: ThresholdMethod::Otsu,
            polarity: Polarity::Dark,
            invert: false,
            parallel: false,
        }
    }
}

impl PreprocessOptions {
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn validate(&self) -> Result<(), SegmentationError> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(SegmentationError::InvalidParameter {
                name: "sigma",
                reason: format!("must be finite and >= 0, got {}", self.sigma),
            });
        }
        Ok(())
    }
}
