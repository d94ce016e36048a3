//! Priors over the hyperparameters of a Gaussian-process surrogate model.
//!
//! Each prior answers three questions about a hyperparameter value given in
//! log space: its log probability, the gradient of that log probability, and
//! how to draw random values from the prior. See [`Prior`] for how log-space
//! input is mapped to the linear scale the distributions are defined on.
//!
//! ```
//! use gp_priors::{HorseshoePrior, Prior};
//!
//! let mut prior = HorseshoePrior::new(0.1).unwrap();
//! let draws = prior.sample(10).unwrap();
//! let logp = prior.log_probability(draws[0].into()).unwrap();
//! assert!(!logp.is_nan());
//! ```
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `tracing` | Debug events via [`tracing`](https://docs.rs/tracing) when priors are created and sampled | off |

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub(crate) mod gamma;
pub(crate) mod horseshoe;
pub(crate) mod lognormal;
pub(crate) mod prior;
pub(crate) mod settings;
pub(crate) mod soft_tophat;
pub(crate) mod tophat;

pub use gamma::{GammaPrior, GammaSettings};
pub use horseshoe::{HorseshoePrior, HorseshoeSettings};
pub use lognormal::{LognormalPrior, LognormalSettings, LOGNORMAL_INFEASIBLE};
pub use prior::{
    DefaultRng, Prior, PriorError, Result, Theta, GRADIENT_FLOOR, VERY_SMALL_NUMBER,
};
pub use settings::PriorSettings;
pub use soft_tophat::{SoftTopHatPrior, SoftTopHatSettings};
pub use tophat::{TophatPrior, TophatSettings};
