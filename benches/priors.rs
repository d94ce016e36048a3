use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use gp_priors::{
    GammaSettings, HorseshoeSettings, LognormalSettings, Prior, PriorSettings, SoftTopHatSettings,
    TophatSettings,
};
use rand::SeedableRng;

fn all_settings() -> [PriorSettings; 5] {
    [
        TophatSettings {
            lower_bound: -1.,
            upper_bound: 1.,
        }
        .into(),
        HorseshoeSettings::default().into(),
        LognormalSettings::default().into(),
        SoftTopHatSettings::default().into(),
        GammaSettings {
            a: 2.,
            scale: 1.,
            loc: 0.,
        }
        .into(),
    ]
}

fn criterion_benchmark(c: &mut Criterion) {
    for settings in all_settings() {
        let prior = settings.build().unwrap();
        c.bench_function(&format!("{} log_probability", settings.name()), |b| {
            b.iter(|| prior.log_probability(black_box(0.3f64).into()).unwrap())
        });
        c.bench_function(&format!("{} gradient", settings.name()), |b| {
            b.iter(|| prior.gradient(black_box(0.3f64).into()).unwrap())
        });

        c.bench_function(&format!("{} sample 1000", settings.name()), |b| {
            b.iter_batched(
                || {
                    settings
                        .build_with_rng(rand::rngs::StdRng::seed_from_u64(42))
                        .unwrap()
                },
                |mut prior| prior.sample(black_box(1000)).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
