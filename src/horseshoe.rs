use rand::Rng;
use rand_distr::{Cauchy, Distribution, StandardNormal};

use crate::prior::{
    check_positive, entropy_rng, DefaultRng, Prior, PriorError, Result, Theta, GRADIENT_FLOOR,
    VERY_SMALL_NUMBER,
};

/// Settings for the horseshoe prior
#[derive(Debug, Clone, Copy)]
pub struct HorseshoeSettings {
    pub scale: f64,
}

impl Default for HorseshoeSettings {
    fn default() -> HorseshoeSettings {
        HorseshoeSettings { scale: 0.1 }
    }
}

impl HorseshoeSettings {
    pub fn build(self) -> Result<HorseshoePrior> {
        HorseshoePrior::new(self.scale)
    }

    pub fn build_with_rng<R: Rng>(self, rng: R) -> Result<HorseshoePrior<R>> {
        HorseshoePrior::with_rng(self.scale, rng)
    }
}

/// Horseshoe prior as used in spearmint.
///
/// There is no closed form for the horseshoe density, but Carvalho, Polson and
/// Scott (2010) bound it between `K/2 log(1 + 4/x²)` and `K log(1 + 2/x²)`. We
/// use the midpoint `log(1 + 3 scale²/x²)` without the constant `K`.
///
/// Evaluation happens on the linear scale, so callers pass log values through
/// the default `log_probability` and `gradient` wrappers.
#[derive(Debug, Clone)]
pub struct HorseshoePrior<R = DefaultRng> {
    scale: f64,
    scale_square: f64,
    /// Cauchy with the prior's scale, so `|draw| = lambda * scale`.
    local: Cauchy<f64>,
    rng: R,
}

impl HorseshoePrior {
    pub fn new(scale: f64) -> Result<Self> {
        Self::with_rng(scale, entropy_rng())
    }
}

impl<R: Rng> HorseshoePrior<R> {
    pub fn with_rng(scale: f64, rng: R) -> Result<Self> {
        check_positive("scale", scale)?;
        let local = Cauchy::new(0., scale)
            .map_err(|_| PriorError::NonPositiveParameter { name: "scale", value: scale })?;
        trace_debug!(scale, "created horseshoe prior");
        Ok(HorseshoePrior {
            scale,
            scale_square: scale * scale,
            local,
            rng,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Prior for HorseshoePrior<R> {
    fn ln_prob_linear(&self, theta: Theta) -> Result<f64> {
        let theta = theta.scalar()?;
        if theta == 0. {
            // The spike at the origin
            return Ok(f64::INFINITY);
        }
        let a = (1. + 3. * self.scale_square / (theta * theta)).ln();
        Ok((a + VERY_SMALL_NUMBER).ln())
    }

    fn gradient_linear(&self, theta: Theta) -> Result<f64> {
        let theta = theta.scalar()?;
        if theta == 0. {
            return Ok(f64::INFINITY);
        }
        let a = -6. * self.scale_square;
        let theta_sq = theta * theta;
        let b = (3. * self.scale_square + theta_sq) * (3. * self.scale_square / theta_sq + 1.).ln();
        Ok(a / b.max(GRADIENT_FLOOR))
    }

    fn sample_linear(&mut self, n_samples: usize) -> Result<Vec<f64>> {
        let scaled_lambda: Vec<f64> = (0..n_samples)
            .map(|_| self.local.sample(&mut self.rng).abs())
            .collect();
        // A single normal draw scales the whole batch of local shrinkage values.
        let normal: f64 = self.rng.sample(StandardNormal);
        Ok(scaled_lambda
            .into_iter()
            .map(|val| (normal * val).abs())
            .collect())
    }
}
