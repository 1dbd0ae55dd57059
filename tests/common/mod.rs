#![allow(dead_code)]

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Install a fmt subscriber for the current test thread only.
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    let fmt_layer = fmt::layer().with_target(true).with_test_writer();

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .set_default()
}

/// Random dense `n x n` matrix, row-major.
pub fn random_dense(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n * n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

pub fn random_vector(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Dense matrix with every entry outside `[-kl, ku]` cleared.
pub fn band_only(dense: &[f64], n: usize, ku: usize, kl: usize) -> Vec<f64> {
    (0..n * n)
        .map(|i| {
            let (r, c) = (i / n, i % n);
            let inside = c <= r + ku && r <= c + kl;
            if inside {
                dense[i]
            } else {
                0.0
            }
        })
        .collect()
}

/// Mirror the upper triangle onto the lower one.
pub fn symmetrize(dense: &[f64], n: usize) -> Vec<f64> {
    (0..n * n)
        .map(|i| {
            let (r, c) = (i / n, i % n);
            dense[r.min(c) * n + r.max(c)]
        })
        .collect()
}

/// Dense reference `y = A x`.
pub fn dense_matvec(a: &[f64], x: &[f64]) -> Vec<f64> {
    let n = x.len();
    (0..n)
        .map(|r| (0..n).map(|c| a[r * n + c] * x[c]).sum())
        .collect()
}
