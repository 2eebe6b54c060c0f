/// Trait implemented by separable 1D filters used by the blur stage.
pub trait SeparableFilter: Sync {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];

    fn radius(&self) -> usize {
        self.taps().len() / 2
    }

    /// A single unit tap leaves the image untouched.
    fn is_identity(&self) -> bool {
        matches!(self.taps(), [t] if *t == 1.0)
    }
}

/// Sampled Gaussian truncated at `ceil(3σ)` and normalised to unit sum.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    sigma: f32,
    taps: Vec<f32>,
}

/// Number of standard deviations covered on each side of the centre tap.
const TRUNCATE_SIGMAS: f32 = 3.0;

impl GaussianKernel {
    /// `sigma == 0` yields the identity kernel `[1.0]`.
    pub fn new(sigma: f32) -> Self {
        debug_assert!(sigma.is_finite() && sigma >= 0.0);
        if sigma <= 0.0 {
            return Self {
                sigma: 0.0,
                taps: vec![1.0],
            };
        }
        let radius = ((TRUNCATE_SIGMAS * sigma).ceil() as usize).max(1);
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (0..=2 * radius)
            .map(|i| {
                let d = i as f32 - radius as f32;
                (-(d * d) / denom).exp()
            })
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { sigma, taps }
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sigma_is_identity() {
        let k = GaussianKernel::new(0.0);
        assert!(k.is_identity());
        assert_eq!(k.radius(), 0);
    }

    #[test]
    fn taps_are_normalised_and_symmetric() {
        let k = GaussianKernel::new(2.0);
        assert_eq!(k.radius(), 6);
        let sum: f32 = k.taps().iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "sum={sum}");
        let taps = k.taps();
        for i in 0..taps.len() / 2 {
            assert!((taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-7);
        }
        assert!(taps[k.radius()] > taps[0]);
    }
}
