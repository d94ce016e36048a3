use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::Continuous;

use crate::prior::{check_positive, entropy_rng, DefaultRng, Prior, PriorError, Result, Theta};

/// Settings for the gamma prior
#[derive(Debug, Clone, Copy)]
pub struct GammaSettings {
    /// Shape parameter
    pub a: f64,
    /// Scale parameter, the inverse of the rate
    pub scale: f64,
    /// Shift of the support
    pub loc: f64,
}

impl Default for GammaSettings {
    fn default() -> GammaSettings {
        GammaSettings {
            a: 1.,
            scale: 1.,
            loc: 0.,
        }
    }
}

impl GammaSettings {
    pub fn build(self) -> Result<GammaPrior> {
        GammaPrior::new(self.a, self.scale, self.loc)
    }

    pub fn build_with_rng<R: Rng>(self, rng: R) -> Result<GammaPrior<R>> {
        GammaPrior::with_rng(self.a, self.scale, self.loc, rng)
    }
}

/// Gamma prior with density
///
/// `f(x) = (x - loc)^(a - 1) exp(-(x - loc) / scale) / (scale^a Γ(a))`
///
/// The density is evaluated with `statrs`, sampling uses `rand_distr`. The
/// location only shifts the density; gradient and sampling ignore it.
#[derive(Debug, Clone)]
pub struct GammaPrior<R = DefaultRng> {
    a: f64,
    scale: f64,
    loc: f64,
    density: statrs::distribution::Gamma,
    sampler: rand_distr::Gamma<f64>,
    rng: R,
}

impl GammaPrior {
    pub fn new(a: f64, scale: f64, loc: f64) -> Result<Self> {
        Self::with_rng(a, scale, loc, entropy_rng())
    }
}

impl<R: Rng> GammaPrior<R> {
    pub fn with_rng(a: f64, scale: f64, loc: f64, rng: R) -> Result<Self> {
        check_positive("a", a)?;
        check_positive("scale", scale)?;
        // statrs parametrizes by rate
        let density = statrs::distribution::Gamma::new(a, 1. / scale)
            .map_err(|_| PriorError::NonPositiveParameter { name: "scale", value: scale })?;
        let sampler = rand_distr::Gamma::new(a, scale)
            .map_err(|_| PriorError::NonPositiveParameter { name: "a", value: a })?;
        trace_debug!(a, scale, loc, "created gamma prior");
        Ok(GammaPrior {
            a,
            scale,
            loc,
            density,
            sampler,
            rng,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn loc(&self) -> f64 {
        self.loc
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Prior for GammaPrior<R> {
    fn ln_prob_linear(&self, theta: Theta) -> Result<f64> {
        let theta = theta.scalar()?;
        let x = theta - self.loc;
        if x < 0. {
            return Ok(f64::NEG_INFINITY);
        }
        Ok(self.density.ln_pdf(x))
    }

    fn gradient_linear(&self, theta: Theta) -> Result<f64> {
        let theta = theta.scalar()?;
        if theta == 0. {
            // Limit of the expression below as theta goes to 0
            return Ok(self.a - 1.);
        }
        // Multiplied by theta for the chain rule of the log transformation
        Ok(((self.a - 1.) / theta - 1. / self.scale) * theta)
    }

    fn sample_linear(&mut self, n_samples: usize) -> Result<Vec<f64>> {
        Ok((0..n_samples)
            .map(|_| self.sampler.sample(&mut self.rng))
            .collect())
    }
}
