use criterion::{black_box, criterion_group, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use qarith::discretize::{discretize as discretize_weights, Precision};

criterion_group!(discretize, build, sample);

fn make_weights(len: usize) -> Vec<f64> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(1234);
    (0..len).map(|_| rng.gen::<f64>() - 0.5).collect()
}

fn build(c: &mut Criterion) {
    let mut group = c.benchmark_group("discretize");
    for len in [16usize, 256, 4096, 65536] {
        let weights = make_weights(len);
        for bits in [8u32, 24] {
            let precision = Precision::new(bits).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("{bits}_bits"), len),
                &weights,
                |b, weights| b.iter(|| discretize_weights(precision, black_box(weights)).unwrap()),
            );
        }
    }
    group.finish();
}

fn sample(c: &mut Criterion) {
    let weights = make_weights(4096);
    let histogram = discretize_weights(Precision::new(16).unwrap(), &weights).unwrap();
    let mut rng = Xoshiro256StarStar::seed_from_u64(5678);

    c.bench_function("resolve_4096", |b| {
        b.iter(|| {
            let slot = rng.gen_range(0..histogram.len());
            let level = rng.gen_range(0..=histogram.bar_height());
            black_box(histogram.resolve(slot, level))
        })
    });
}
