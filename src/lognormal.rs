use std::f64::consts::PI;

use rand::Rng;
use rand_distr::{Distribution, LogNormal};

use crate::prior::{check_positive, entropy_rng, DefaultRng, Prior, PriorError, Result, Theta};

/// Returned instead of negative infinity for values at or below the mean.
pub const LOGNORMAL_INFEASIBLE: f64 = -1e25;

/// Settings for the log-normal prior
#[derive(Debug, Clone, Copy)]
pub struct LognormalSettings {
    /// Standard deviation of the underlying normal distribution
    pub sigma: f64,
    /// Mean of the underlying normal distribution. Only 0 is supported.
    pub mean: f64,
}

impl Default for LognormalSettings {
    fn default() -> LognormalSettings {
        LognormalSettings {
            sigma: 1.,
            mean: 0.,
        }
    }
}

impl LognormalSettings {
    pub fn build(self) -> Result<LognormalPrior> {
        LognormalPrior::new(self.sigma, self.mean)
    }

    pub fn build_with_rng<R: Rng>(self, rng: R) -> Result<LognormalPrior<R>> {
        LognormalPrior::with_rng(self.sigma, self.mean, rng)
    }
}

#[derive(Debug, Clone)]
pub struct LognormalPrior<R = DefaultRng> {
    sigma: f64,
    sigma_square: f64,
    mean: f64,
    sqrt_2_pi: f64,
    dist: LogNormal<f64>,
    rng: R,
}

impl LognormalPrior {
    pub fn new(sigma: f64, mean: f64) -> Result<Self> {
        Self::with_rng(sigma, mean, entropy_rng())
    }
}

impl<R: Rng> LognormalPrior<R> {
    pub fn with_rng(sigma: f64, mean: f64, rng: R) -> Result<Self> {
        if mean != 0. {
            return Err(PriorError::UnsupportedMean(mean));
        }
        check_positive("sigma", sigma)?;
        let dist = LogNormal::new(mean, sigma)
            .map_err(|_| PriorError::NonPositiveParameter { name: "sigma", value: sigma })?;
        trace_debug!(sigma, mean, "created log-normal prior");
        Ok(LognormalPrior {
            sigma,
            sigma_square: sigma * sigma,
            mean,
            sqrt_2_pi: (2. * PI).sqrt(),
            dist,
            rng,
        })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Prior for LognormalPrior<R> {
    fn ln_prob_linear(&self, theta: Theta) -> Result<f64> {
        let theta = theta.scalar()?;
        if theta <= self.mean {
            return Ok(LOGNORMAL_INFEASIBLE);
        }
        let diff = theta.ln() - self.mean;
        Ok(-diff * diff / (2. * self.sigma_square) - (self.sqrt_2_pi * self.sigma * theta).ln())
    }

    fn gradient_linear(&self, theta: Theta) -> Result<f64> {
        let theta = theta.scalar()?;
        if theta <= 0. {
            return Ok(0.);
        }
        // Derivative of the log density without the mean, times theta for the
        // log transformation.
        Ok(-(self.sigma_square + theta.ln()) / (self.sigma_square * theta) * theta)
    }

    fn sample_linear(&mut self, n_samples: usize) -> Result<Vec<f64>> {
        Ok((0..n_samples)
            .map(|_| self.dist.sample(&mut self.rng))
            .collect())
    }
}
