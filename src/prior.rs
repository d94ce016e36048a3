//! The `Prior` trait and the types shared by all concrete priors.
//!
//! Callers of a prior work in log space: `log_probability` and `gradient` take
//! the log of a hyperparameter value and `sample` returns log values. Most
//! priors are naturally defined on the linear scale, so the default
//! implementations of the public methods convert between the two and delegate
//! to the `*_linear` hooks. Priors that are already defined on the caller's
//! scale override the public methods instead.

use itertools::Itertools;
use rand::{distr::Uniform, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Floor added inside a logarithm whose argument can underflow to zero.
pub const VERY_SMALL_NUMBER: f64 = 1e-10;

/// Lower bound for denominators in closed-form gradients.
pub const GRADIENT_FLOOR: f64 = 1e-14;

/// Generator used by priors that are not handed one explicitly.
pub type DefaultRng = ChaCha8Rng;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriorError {
    #[error("upper bound {upper} must be greater than the lower bound {lower}")]
    InvalidBounds { lower: f64, upper: f64 },
    #[error("bounds [{lower}, {upper}] do not span a finite range")]
    NonFiniteRange { lower: f64, upper: f64 },
    #[error("parameter `{name}` must be positive (is {value})")]
    NonPositiveParameter { name: &'static str, value: f64 },
    #[error("only a mean of 0 is supported (is {0})")]
    UnsupportedMean(f64),
    #[error("argument n_samples needs to be positive (is {0})")]
    InvalidSampleCount(usize),
    #[error("only scalar input is supported, got an array of length {len}")]
    UnsupportedShape { len: usize },
    #[error("`{0}` is not implemented for this prior")]
    NotImplemented(&'static str),
}

impl PriorError {
    /// Whether the error signals a capability gap rather than an invalid argument.
    pub fn is_not_implemented(&self) -> bool {
        matches!(
            self,
            PriorError::UnsupportedMean(_)
                | PriorError::UnsupportedShape { .. }
                | PriorError::NotImplemented(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PriorError>;

/// A hyperparameter value handed to a prior.
///
/// All priors only evaluate scalars. Arrays are representable so that the
/// dimensionality check is explicit and reported as
/// [`PriorError::UnsupportedShape`] instead of being broadcast.
#[derive(Debug, Clone, PartialEq)]
pub enum Theta {
    Scalar(f64),
    Array(Vec<f64>),
}

impl Theta {
    /// Number of values carried. Scalars have length 1.
    pub fn len(&self) -> usize {
        match self {
            Theta::Scalar(_) => 1,
            Theta::Array(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element-wise exponential, keeping the shape.
    pub fn exp(self) -> Theta {
        match self {
            Theta::Scalar(value) => Theta::Scalar(value.exp()),
            Theta::Array(mut values) => {
                values.iter_mut().for_each(|val| *val = val.exp());
                Theta::Array(values)
            }
        }
    }

    /// The scalar value, or an error for any array input.
    pub fn scalar(&self) -> Result<f64> {
        match self {
            Theta::Scalar(value) => Ok(*value),
            Theta::Array(values) => Err(PriorError::UnsupportedShape { len: values.len() }),
        }
    }

    /// Like [`Theta::scalar`], but also accepts arrays holding exactly one value.
    pub fn scalar_or_singleton(&self) -> Result<f64> {
        match self {
            Theta::Scalar(value) => Ok(*value),
            Theta::Array(values) => values
                .iter()
                .copied()
                .exactly_one()
                .map_err(|_| PriorError::UnsupportedShape { len: values.len() }),
        }
    }
}

impl From<f64> for Theta {
    fn from(value: f64) -> Self {
        Theta::Scalar(value)
    }
}

impl From<Vec<f64>> for Theta {
    fn from(values: Vec<f64>) -> Self {
        Theta::Array(values)
    }
}

impl From<&[f64]> for Theta {
    fn from(values: &[f64]) -> Self {
        Theta::Array(values.to_vec())
    }
}

/// Reject sample counts before any random draw happens.
pub(crate) fn check_sample_count(n_samples: usize) -> Result<()> {
    if n_samples == 0 {
        return Err(PriorError::InvalidSampleCount(n_samples));
    }
    Ok(())
}

/// Check that a distribution parameter is strictly positive. NaN is rejected.
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if !(value > 0.) {
        return Err(PriorError::NonPositiveParameter { name, value });
    }
    Ok(())
}

pub(crate) fn check_bounds(lower: f64, upper: f64) -> Result<()> {
    if !(upper > lower) {
        return Err(PriorError::InvalidBounds { lower, upper });
    }
    if !(upper - lower).is_finite() {
        return Err(PriorError::NonFiniteRange { lower, upper });
    }
    Ok(())
}

/// Uniform distribution over `[lower, upper]` for bounded priors.
pub(crate) fn uniform_between(lower: f64, upper: f64) -> Result<Uniform<f64>> {
    check_bounds(lower, upper)?;
    Uniform::new_inclusive(lower, upper).map_err(|_| PriorError::NonFiniteRange { lower, upper })
}

/// Seed a fresh generator from the thread-local entropy source.
pub(crate) fn entropy_rng() -> DefaultRng {
    DefaultRng::from_rng(&mut rand::rng())
}

/// A prior over a single surrogate-model hyperparameter.
///
/// The public methods take and return values in log space. The `*_linear`
/// hooks see the exponentiated value; implementations that do not provide a
/// hook report [`PriorError::NotImplemented`].
pub trait Prior {
    /// Log probability of `theta` on the linear scale.
    fn ln_prob_linear(&self, _theta: Theta) -> Result<f64> {
        Err(PriorError::NotImplemented("ln_prob_linear"))
    }

    /// Derivative of the log probability at `theta` on the linear scale,
    /// including the chain-rule factor of the log transformation.
    fn gradient_linear(&self, _theta: Theta) -> Result<f64> {
        Err(PriorError::NotImplemented("gradient_linear"))
    }

    /// Draw `n_samples` values on the linear scale. The count is already validated.
    fn sample_linear(&mut self, _n_samples: usize) -> Result<Vec<f64>> {
        Err(PriorError::NotImplemented("sample_linear"))
    }

    /// Log probability of a hyperparameter value given in log space.
    fn log_probability(&self, theta: Theta) -> Result<f64> {
        self.ln_prob_linear(theta.exp())
    }

    /// Gradient of the log probability with respect to a value in log space.
    fn gradient(&self, theta: Theta) -> Result<f64> {
        self.gradient_linear(theta.exp())
    }

    /// Draw `n_samples` values from the prior, returned in log space.
    fn sample(&mut self, n_samples: usize) -> Result<Vec<f64>> {
        check_sample_count(n_samples)?;
        trace_debug!(n_samples, "sampling from prior");
        let draws = self.sample_linear(n_samples)?;
        Ok(draws.into_iter().map(f64::ln).collect())
    }
}

impl<P: Prior + ?Sized> Prior for Box<P> {
    fn ln_prob_linear(&self, theta: Theta) -> Result<f64> {
        (**self).ln_prob_linear(theta)
    }

    fn gradient_linear(&self, theta: Theta) -> Result<f64> {
        (**self).gradient_linear(theta)
    }

    fn sample_linear(&mut self, n_samples: usize) -> Result<Vec<f64>> {
        (**self).sample_linear(n_samples)
    }

    fn log_probability(&self, theta: Theta) -> Result<f64> {
        (**self).log_probability(theta)
    }

    fn gradient(&self, theta: Theta) -> Result<f64> {
        (**self).gradient(theta)
    }

    fn sample(&mut self, n_samples: usize) -> Result<Vec<f64>> {
        (**self).sample(n_samples)
    }
}
