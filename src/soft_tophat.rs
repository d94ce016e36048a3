use rand::{distr::Uniform, Rng};

use crate::prior::{
    check_positive, check_sample_count, entropy_rng, uniform_between, DefaultRng, Prior, Result,
    Theta,
};

/// Settings for the soft tophat prior
#[derive(Debug, Clone, Copy)]
pub struct SoftTopHatSettings {
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Degree of the penalty outside of the bounds
    pub exponent: f64,
}

impl Default for SoftTopHatSettings {
    fn default() -> SoftTopHatSettings {
        SoftTopHatSettings {
            lower_bound: -10.,
            upper_bound: 10.,
            exponent: 2.,
        }
    }
}

impl SoftTopHatSettings {
    pub fn build(self) -> Result<SoftTopHatPrior> {
        SoftTopHatPrior::new(self.lower_bound, self.upper_bound, self.exponent)
    }

    pub fn build_with_rng<R: Rng>(self, rng: R) -> Result<SoftTopHatPrior<R>> {
        SoftTopHatPrior::with_rng(self.lower_bound, self.upper_bound, self.exponent, rng)
    }
}

/// A tophat whose walls are replaced by a polynomial penalty.
///
/// Inside `[lower_bound, upper_bound]` the log probability is 0. Outside it
/// falls off as `-distance^exponent`, where `distance` is measured to the
/// violated bound. Like [`TophatPrior`](crate::TophatPrior), values are taken
/// and returned on the caller's scale.
#[derive(Debug, Clone)]
pub struct SoftTopHatPrior<R = DefaultRng> {
    lower_bound: f64,
    upper_bound: f64,
    exponent: f64,
    draws: Uniform<f64>,
    rng: R,
}

impl SoftTopHatPrior {
    pub fn new(lower_bound: f64, upper_bound: f64, exponent: f64) -> Result<Self> {
        Self::with_rng(lower_bound, upper_bound, exponent, entropy_rng())
    }
}

impl<R: Rng> SoftTopHatPrior<R> {
    pub fn with_rng(lower_bound: f64, upper_bound: f64, exponent: f64, rng: R) -> Result<Self> {
        check_positive("exponent", exponent)?;
        let draws = uniform_between(lower_bound, upper_bound)?;
        trace_debug!(lower_bound, upper_bound, exponent, "created soft tophat prior");
        Ok(SoftTopHatPrior {
            lower_bound,
            upper_bound,
            exponent,
            draws,
            rng,
        })
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Prior for SoftTopHatPrior<R> {
    fn log_probability(&self, theta: Theta) -> Result<f64> {
        let theta = theta.scalar_or_singleton()?;
        if theta < self.lower_bound {
            Ok(-(self.lower_bound - theta).powf(self.exponent))
        } else if theta > self.upper_bound {
            Ok(-(theta - self.upper_bound).powf(self.exponent))
        } else {
            Ok(0.)
        }
    }

    fn gradient(&self, theta: Theta) -> Result<f64> {
        let theta = theta.scalar_or_singleton()?;
        if theta < self.lower_bound {
            Ok(self.exponent * (self.lower_bound - theta))
        } else if theta > self.upper_bound {
            Ok(self.exponent * (self.upper_bound - theta))
        } else {
            Ok(0.)
        }
    }

    fn sample(&mut self, n_samples: usize) -> Result<Vec<f64>> {
        check_sample_count(n_samples)?;
        trace_debug!(n_samples, "sampling from soft tophat prior");
        Ok((0..n_samples)
            .map(|_| self.rng.sample(&self.draws))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prior::PriorError;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn prior(lower: f64, upper: f64, exponent: f64) -> SoftTopHatPrior {
        SoftTopHatPrior::with_rng(lower, upper, exponent, DefaultRng::seed_from_u64(11)).unwrap()
    }

    #[test]
    fn zero_exponent_rejected() {
        assert_eq!(
            SoftTopHatPrior::new(-1., 1., 0.).unwrap_err(),
            PriorError::NonPositiveParameter {
                name: "exponent",
                value: 0.
            }
        );
        assert!(SoftTopHatPrior::new(-1., 1., -2.).is_err());
        assert!(SoftTopHatPrior::new(1., -1., 2.).is_err());
    }

    #[test]
    fn quadratic_penalty() {
        let prior = SoftTopHatSettings::default().build().unwrap();
        assert_eq!(prior.log_probability(0f64.into()), Ok(0.));
        assert_eq!(prior.log_probability((-10f64).into()), Ok(0.));
        assert_eq!(prior.log_probability((-12f64).into()), Ok(-4.));
        assert_eq!(prior.log_probability(13f64.into()), Ok(-9.));
    }

    #[test]
    fn penalty_grows_with_distance() {
        let prior = prior(0., 1., 1.5);
        let near = prior.log_probability(1.5f64.into()).unwrap();
        let far = prior.log_probability(3f64.into()).unwrap();
        assert!(far < near);
        assert!(near < 0.);
        assert_relative_eq!(far, -(2f64.powf(1.5)), max_relative = 1e-12);
        assert!(prior.log_probability((-1f64).into()).unwrap() < 0.);
    }

    #[test]
    fn gradient_points_back_into_bounds() {
        let prior = prior(-1., 1., 2.);
        assert_eq!(prior.gradient((-3f64).into()), Ok(4.));
        assert_eq!(prior.gradient(4f64.into()), Ok(-6.));
        assert_eq!(prior.gradient(1f64.into()), Ok(0.));
    }

    #[test]
    fn accepts_singletons_only() {
        let prior = prior(-1., 1., 2.);
        assert_eq!(prior.log_probability(vec![2.].into()), Ok(-1.));
        assert_eq!(prior.gradient(vec![2.].into()), Ok(-2.));
        assert_eq!(
            prior.log_probability(vec![2., 3.].into()),
            Err(PriorError::UnsupportedShape { len: 2 })
        );
        assert!(prior
            .gradient(Vec::<f64>::new().into())
            .unwrap_err()
            .is_not_implemented());
    }

    #[test]
    fn wide_bounds_stay_in_support() {
        assert!(matches!(
            SoftTopHatPrior::new(-1e308, 1e308, 2.),
            Err(PriorError::NonFiniteRange { .. })
        ));
        let mut prior = prior(-1e300, 1e300, 2.);
        let draws = prior.sample(50).unwrap();
        assert!(draws.iter().all(|draw| draw.is_finite()));
        assert!(draws
            .iter()
            .all(|&draw| prior.log_probability(draw.into()) == Ok(0.)));
    }

    #[test]
    fn rejects_empty_sample() {
        let mut prior = prior(-1., 1., 2.);
        assert_eq!(prior.sample(0), Err(PriorError::InvalidSampleCount(0)));
    }

    proptest! {
        #[test]
        fn flat_inside_bounds(lower in -20f64..20., width in 0.1f64..10., frac in 0.001f64..0.999) {
            let prior = prior(lower, lower + width, 2.);
            let theta = lower + frac * width;
            prop_assert_eq!(prior.gradient(theta.into()).unwrap(), 0.);
            prop_assert_eq!(prior.log_probability(theta.into()).unwrap(), 0.);
        }

        #[test]
        fn samples_in_bounds(seed in any::<u64>(), n in 1usize..64) {
            let mut prior = SoftTopHatPrior::with_rng(-3., 2., 2., DefaultRng::seed_from_u64(seed)).unwrap();
            let draws = prior.sample(n).unwrap();
            prop_assert_eq!(draws.len(), n);
            for draw in draws {
                prop_assert_eq!(prior.log_probability(draw.into()).unwrap(), 0.);
            }
        }
    }
}
