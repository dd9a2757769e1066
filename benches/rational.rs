use criterion::{black_box, criterion_group, Criterion};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use qarith::{
    continued_fraction::{continued_fraction_convergent, Fraction},
    rational::{exp_mod, extended_gcd, inverse_mod},
};

criterion_group!(rational, gcd, modular, convergent);

fn make_pairs(amt: usize) -> Vec<(i64, i64)> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(42);
    (0..amt)
        .map(|_| (rng.gen_range(1..i64::MAX), rng.gen_range(2..i64::MAX)))
        .collect()
}

fn gcd(c: &mut Criterion) {
    let pairs = make_pairs(1000);
    c.bench_function("extended_gcd_i64", |b| {
        b.iter(|| {
            for &(a, m) in &pairs {
                black_box(extended_gcd(black_box(a), black_box(m)));
            }
        })
    });
}

fn modular(c: &mut Criterion) {
    let pairs = make_pairs(1000);
    c.bench_function("exp_mod_i64", |b| {
        b.iter(|| {
            for &(a, m) in &pairs {
                black_box(exp_mod(black_box(a), black_box(a), black_box(m)).unwrap());
            }
        })
    });
    c.bench_function("inverse_mod_i64", |b| {
        b.iter(|| {
            for &(a, m) in &pairs {
                let _ = black_box(inverse_mod(black_box(a), black_box(m)));
            }
        })
    });
}

fn convergent(c: &mut Criterion) {
    let pairs = make_pairs(1000);
    c.bench_function("continued_fraction_convergent_i64", |b| {
        b.iter(|| {
            for &(a, m) in &pairs {
                let fraction = Fraction::new(a, m);
                black_box(continued_fraction_convergent(fraction, black_box(1 << 20)).unwrap());
            }
        })
    });
}
