use rand::{distr::Uniform, Rng};

use crate::prior::{
    check_sample_count, entropy_rng, uniform_between, DefaultRng, Prior, Result, Theta,
};

#[derive(Debug, Clone, Copy)]
pub struct TophatSettings {
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl TophatSettings {
    pub fn build(self) -> Result<TophatPrior> {
        TophatPrior::new(self.lower_bound, self.upper_bound)
    }

    pub fn build_with_rng<R: Rng>(self, rng: R) -> Result<TophatPrior<R>> {
        TophatPrior::with_rng(self.lower_bound, self.upper_bound, rng)
    }
}

/// Tophat prior as used in the original spearmint code.
///
/// The bounds are on the caller's scale: `log_probability` and `gradient` do
/// not exponentiate their input and `sample` does not take the log of its
/// draws.
#[derive(Debug, Clone)]
pub struct TophatPrior<R = DefaultRng> {
    min: f64,
    max: f64,
    draws: Uniform<f64>,
    rng: R,
}

impl TophatPrior {
    pub fn new(lower_bound: f64, upper_bound: f64) -> Result<Self> {
        Self::with_rng(lower_bound, upper_bound, entropy_rng())
    }
}

impl<R: Rng> TophatPrior<R> {
    pub fn with_rng(lower_bound: f64, upper_bound: f64, rng: R) -> Result<Self> {
        let draws = uniform_between(lower_bound, upper_bound)?;
        trace_debug!(lower_bound, upper_bound, "created tophat prior");
        Ok(TophatPrior {
            min: lower_bound,
            max: upper_bound,
            draws,
            rng,
        })
    }

    pub fn lower_bound(&self) -> f64 {
        self.min
    }

    pub fn upper_bound(&self) -> f64 {
        self.max
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Prior for TophatPrior<R> {
    fn log_probability(&self, theta: Theta) -> Result<f64> {
        let theta = theta.scalar()?;
        if theta < self.min || theta > self.max {
            Ok(f64::NEG_INFINITY)
        } else {
            Ok(0.)
        }
    }

    fn gradient(&self, theta: Theta) -> Result<f64> {
        theta.scalar()?;
        Ok(0.)
    }

    fn sample(&mut self, n_samples: usize) -> Result<Vec<f64>> {
        check_sample_count(n_samples)?;
        trace_debug!(n_samples, "sampling from tophat prior");
        Ok((0..n_samples)
            .map(|_| self.rng.sample(&self.draws))
            .collect())
    }
}
