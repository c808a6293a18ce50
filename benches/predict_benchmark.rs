use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ndarray::Array2;
use prognos::bundle::PosteriorBundle;
use prognos::covariates::{BaseInput, PredictionInput};
use prognos::predictor::Predictor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

fn synthetic_bundle(n_draws: usize) -> PosteriorBundle {
    let mut rng = StdRng::seed_from_u64(0x5EED_D1CE + n_draws as u64);
    let mu0_dist = Normal::new(10.0, 2.0).unwrap();
    let mu1_dist = Normal::new(50.0, 5.0).unwrap();
    let beta_dist = Normal::new(0.0, 0.3).unwrap();
    let mut flat = Vec::with_capacity(n_draws * 8);
    for _ in 0..n_draws {
        flat.extend_from_slice(&[
            rng.gen_range(0.2..0.4),
            rng.gen_range(0.6..0.8),
            rng.sample(mu0_dist),
            rng.sample(mu1_dist),
            rng.gen_range(3.0..8.0),
            rng.gen_range(8.0..14.0),
            rng.sample(beta_dist),
            rng.sample(beta_dist),
        ]);
    }
    PosteriorBundle {
        cap_minutes: 240.0,
        age_mean: 60.0,
        age_std: 15.0,
        param_names: [
            "rho0", "rho1", "mu0", "mu1", "sigma0", "sigma1", "beta_age", "beta_sex",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        draws: Array2::from_shape_vec((n_draws, 8), flat).unwrap(),
    }
}

fn benchmark_predict(c: &mut Criterion) {
    let draw_counts = [1_000_usize, 4_000, 16_000];
    let engines: Vec<_> = draw_counts
        .iter()
        .map(|&n| (n, Predictor::new(synthetic_bundle(n)).unwrap()))
        .collect();

    let input = PredictionInput {
        age: Some(67.0),
        sex: 1.0,
        time_minutes: Some(45.0),
        use_time: true,
    };

    let mut group = c.benchmark_group("predict");
    for (n_draws, engine) in engines.iter() {
        group.throughput(Throughput::Elements(*n_draws as u64));
        group.bench_with_input(BenchmarkId::new("time_branch", n_draws), engine, |b, e| {
            b.iter(|| {
                let result = e.predict(black_box(&input)).unwrap();
                black_box(result);
            });
        });
    }
    group.finish();
}

fn benchmark_curve(c: &mut Criterion) {
    let engine = Predictor::new(synthetic_bundle(4_000)).unwrap();
    let base = BaseInput {
        age: Some(67.0),
        sex: 1.0,
    };

    let mut group = c.benchmark_group("curve");
    for points in [31_usize, 61] {
        group.bench_with_input(BenchmarkId::new("grid", points), &points, |b, &n| {
            b.iter(|| {
                let curve = engine.curve(black_box(&base), n).unwrap();
                black_box(curve);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_predict, benchmark_curve);
criterion_main!(benches);
