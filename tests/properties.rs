mod common;

use approx::assert_relative_eq;
use banded_mover::{
    general_operands, general_to_stream, pack, symmetric_operands, triangular_operands,
    vector_general_to_stream, vector_triangular_to_stream, Diagonal, GeneralBanded, Operands,
    PipelineConfig, RowAligned, SymmetricBanded, Triangle, TriangularBanded,
};
use common::{band_only, dense_matvec, init_test_subscriber, random_dense, random_vector, symmetrize};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Dense matrix whose entries are all non-zero, so every zero lane in the
/// output is padding.
fn nonzero_dense(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n * n).map(|_| rng.gen_range(1.0..2.0)).collect()
}

/// Consume a lock-step pair the way a banded matvec kernel would.
fn lockstep_matvec<const W: usize>(ops: &Operands<f64, W>) -> Vec<f64> {
    let per = ops.matrix().blocks_per_diagonal();
    let mut y = vec![0.0; per * W];
    for (j, (a, v)) in ops.lockstep().enumerate() {
        let base = (j % per) * W;
        for lane in 0..W {
            y[base + lane] += a[lane] * v[lane];
        }
    }
    y
}

#[test]
fn test_output_length_and_padding() {
    let _guard = init_test_subscriber();
    let mut rng = StdRng::seed_from_u64(42);
    for trial in 0..12 {
        let n = 4 * rng.gen_range(1..9);
        let ku = rng.gen_range(0..n);
        let kl = rng.gen_range(0..n);
        let dense = nonzero_dense(n, trial);
        let data = pack::pack_general(&dense, n, ku, kl).unwrap();
        let matrix = GeneralBanded::new(&data, n, ku, kl).unwrap();
        let out: RowAligned<f64, 4> =
            general_to_stream(&matrix, &PipelineConfig::default()).unwrap();
        assert_eq!(out.len(), (n / 4) * (ku + kl + 1));

        for diag in out.layout() {
            let lanes = out.lanes(diag).unwrap();
            let (head, tail) = match diag {
                Diagonal::Super(i) => (0, i),
                Diagonal::Main => (0, 0),
                Diagonal::Sub(i) => (i, 0),
            };
            let zeros = lanes.iter().filter(|&&v| v == 0.0).count();
            assert_eq!(zeros, head + tail, "n={n} {diag:?}");
            assert!(lanes[..head].iter().all(|&v| v == 0.0));
            assert!(lanes[n - tail..].iter().all(|&v| v == 0.0));

            // the partially filled block carries exactly i mod W zeros
            let run = out.run(diag).unwrap();
            let partial = match diag {
                Diagonal::Super(i) => run.get(n / 4 - 1 - i / 4),
                Diagonal::Sub(i) => run.get(i / 4),
                Diagonal::Main => None,
            };
            if let (Some(block), Diagonal::Super(i) | Diagonal::Sub(i)) = (partial, diag) {
                assert_eq!(block.count_zeros(), i % 4, "n={n} {diag:?}");
            }
        }
    }
}

#[test]
fn test_vector_stream_lines_up_with_matrix() {
    let config = PipelineConfig::default();
    for (n, ku, kl) in [(8, 2, 1), (16, 0, 3), (16, 7, 7), (32, 12, 0)] {
        let dense = random_dense(n, n as u64);
        let data = pack::pack_general(&dense, n, ku, kl).unwrap();
        let matrix = GeneralBanded::new(&data, n, ku, kl).unwrap();
        let a: RowAligned<f64, 4> = general_to_stream(&matrix, &config).unwrap();
        let x = random_vector(n, 7);
        let v: RowAligned<f64, 4> = vector_general_to_stream(&x, ku, kl, &config).unwrap();
        assert_eq!(a.len(), v.len());
        assert_eq!(
            a.diagonal_starts().collect::<Vec<_>>(),
            v.diagonal_starts().collect::<Vec<_>>()
        );
        assert_eq!(v.lanes(Diagonal::Main).unwrap(), x);
    }

    let x = random_vector(8, 8);
    let v: RowAligned<f64, 2> =
        vector_triangular_to_stream(&x, 3, Triangle::Lower, &config).unwrap();
    assert_eq!(v.len(), 16);
    assert_eq!(v.lanes(Diagonal::Sub(3)).unwrap()[3..], x[..5]);
}

#[test]
fn test_general_lockstep_matvec() {
    let _guard = init_test_subscriber();
    for (n, ku, kl, mode) in [
        (16, 2, 3, PipelineConfig::threaded()),
        (24, 5, 0, PipelineConfig::sequential()),
        (32, 31, 31, PipelineConfig::default()),
    ] {
        let dense = random_dense(n, 100 + n as u64);
        let data = pack::pack_general(&dense, n, ku, kl).unwrap();
        let matrix = GeneralBanded::new(&data, n, ku, kl).unwrap();
        let x = random_vector(n, 200 + n as u64);
        let ops = general_operands::<f64, 4>(&matrix, &x, &mode).unwrap();
        let y = lockstep_matvec(&ops);
        let expected = dense_matvec(&band_only(&dense, n, ku, kl), &x);
        for (got, want) in y.iter().zip(&expected) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_symmetric_lockstep_matvec() {
    let n = 16;
    let k = 4;
    let full = symmetrize(&random_dense(n, 300), n);
    let x = random_vector(n, 301);
    let expected = dense_matvec(&band_only(&full, n, k, k), &x);
    for triangle in [Triangle::Upper, Triangle::Lower] {
        let data = pack::pack_triangle(&full, n, k, triangle).unwrap();
        let matrix = SymmetricBanded::new(&data, n, k, triangle).unwrap();
        let ops = symmetric_operands::<f64, 8>(&matrix, &x, &PipelineConfig::threaded()).unwrap();
        let y = lockstep_matvec(&ops);
        for (got, want) in y.iter().zip(&expected) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_triangular_lockstep_matvec() {
    let n = 12;
    let dense = random_dense(n, 400);
    let x = random_vector(n, 401);
    for (triangle, ku, kl) in [(Triangle::Upper, 5, 0), (Triangle::Lower, 0, 5)] {
        let data = pack::pack_triangle(&dense, n, 5, triangle).unwrap();
        let matrix = TriangularBanded::new(&data, n, 5, triangle).unwrap();
        let ops = triangular_operands::<f64, 4>(&matrix, &x, &PipelineConfig::default()).unwrap();
        let y = lockstep_matvec(&ops);
        let expected = dense_matvec(&band_only(&dense, n, ku, kl), &x);
        for (got, want) in y.iter().zip(&expected) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12, max_relative = 1e-12);
        }
    }
}
