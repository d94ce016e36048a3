use rand::Rng;

use crate::{
    gamma::GammaSettings, horseshoe::HorseshoeSettings, lognormal::LognormalSettings,
    prior::Prior, prior::Result, soft_tophat::SoftTopHatSettings, tophat::TophatSettings,
};

/// Choose a prior and its parameters without naming the concrete type.
#[derive(Debug, Clone, Copy)]
pub enum PriorSettings {
    Tophat(TophatSettings),
    Horseshoe(HorseshoeSettings),
    Lognormal(LognormalSettings),
    SoftTopHat(SoftTopHatSettings),
    Gamma(GammaSettings),
}

impl Default for PriorSettings {
    fn default() -> Self {
        PriorSettings::Horseshoe(HorseshoeSettings::default())
    }
}

impl PriorSettings {
    /// Build the prior with a generator seeded from the thread-local entropy source.
    pub fn build(self) -> Result<Box<dyn Prior + Send>> {
        Ok(match self {
            PriorSettings::Tophat(settings) => Box::new(settings.build()?),
            PriorSettings::Horseshoe(settings) => Box::new(settings.build()?),
            PriorSettings::Lognormal(settings) => Box::new(settings.build()?),
            PriorSettings::SoftTopHat(settings) => Box::new(settings.build()?),
            PriorSettings::Gamma(settings) => Box::new(settings.build()?),
        })
    }

    /// Build the prior around an explicit generator.
    pub fn build_with_rng<R: Rng + Send + 'static>(self, rng: R) -> Result<Box<dyn Prior + Send>> {
        Ok(match self {
            PriorSettings::Tophat(settings) => Box::new(settings.build_with_rng(rng)?),
            PriorSettings::Horseshoe(settings) => Box::new(settings.build_with_rng(rng)?),
            PriorSettings::Lognormal(settings) => Box::new(settings.build_with_rng(rng)?),
            PriorSettings::SoftTopHat(settings) => Box::new(settings.build_with_rng(rng)?),
            PriorSettings::Gamma(settings) => Box::new(settings.build_with_rng(rng)?),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            PriorSettings::Tophat(_) => "tophat",
            PriorSettings::Horseshoe(_) => "horseshoe",
            PriorSettings::Lognormal(_) => "lognormal",
            PriorSettings::SoftTopHat(_) => "soft_tophat",
            PriorSettings::Gamma(_) => "gamma",
        }
    }
}

impl From<TophatSettings> for PriorSettings {
    fn from(settings: TophatSettings) -> Self {
        PriorSettings::Tophat(settings)
    }
}

impl From<HorseshoeSettings> for PriorSettings {
    fn from(settings: HorseshoeSettings) -> Self {
        PriorSettings::Horseshoe(settings)
    }
}

impl From<LognormalSettings> for PriorSettings {
    fn from(settings: LognormalSettings) -> Self {
        PriorSettings::Lognormal(settings)
    }
}

impl From<SoftTopHatSettings> for PriorSettings {
    fn from(settings: SoftTopHatSettings) -> Self {
        PriorSettings::SoftTopHat(settings)
    }
}

impl From<GammaSettings> for PriorSettings {
    fn from(settings: GammaSettings) -> Self {
        PriorSettings::Gamma(settings)
    }
}
