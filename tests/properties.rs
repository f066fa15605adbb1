use numrec::fft::{fft, ifft, radix2_fft, Direction, PowerSpectrum, SpectrumSettings};
use numrec::{Complex64, Matrix, RealMatrix};
use proptest::prelude::*;

/// Square matrices with a dominant diagonal, hence invertible.
fn arb_dominant(max_n: usize) -> impl Strategy<Value = RealMatrix> {
    (1..=max_n).prop_flat_map(|n| {
        prop::collection::vec(-1.0..1.0_f64, n * n).prop_map(move |vals| {
            Matrix::from_fn(n, n, |i, j| {
                let v = vals[i * n + j];
                if i == j {
                    v + n as f64 + 1.0
                } else {
                    v
                }
            })
        })
    })
}

fn arb_symmetric(max_n: usize) -> impl Strategy<Value = RealMatrix> {
    (1..=max_n).prop_flat_map(|n| {
        prop::collection::vec(-5.0..5.0_f64, n * n)
            .prop_map(move |vals| Matrix::from_fn(n, n, |i, j| vals[i * n + j] + vals[j * n + i]))
    })
}

fn arb_signal() -> impl Strategy<Value = Vec<Complex64>> {
    (0u32..=8).prop_flat_map(|k| {
        prop::collection::vec((-10.0..10.0_f64, -10.0..10.0_f64), 1usize << k)
            .prop_map(|v| v.into_iter().map(|(re, im)| Complex64::new(re, im)).collect())
    })
}

fn max_abs_diff(a: &RealMatrix, b: &RealMatrix) -> f64 {
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .fold(0.0, |m, (x, y)| m.max((x - y).abs()))
}

proptest! {
    #[test]
    fn inverse_roundtrip(a in arb_dominant(6)) {
        let inv = a.inverse().unwrap();
        let n = a.nrows();
        prop_assert!(max_abs_diff(&(&a * &inv), &Matrix::identity(n)) < 1e-9);
        prop_assert!(max_abs_diff(&(&inv * &a), &Matrix::identity(n)) < 1e-9);
    }

    #[test]
    fn solve_satisfies_system(a in arb_dominant(6), seed in -3.0..3.0_f64) {
        let n = a.nrows();
        let b: Vec<f64> = (0..n).map(|i| seed + i as f64).collect();
        let x = a.solve(&b).unwrap();
        let ax = a.mul_vector(&x).unwrap();
        for (l, r) in ax.iter().zip(&b) {
            prop_assert!((l - r).abs() < 1e-9, "{} vs {}", l, r);
        }
    }

    #[test]
    fn determinant_is_parity_times_pivot_product(a in arb_dominant(6)) {
        let lu = a.lu().unwrap();
        let diag_product: f64 = lu.packed().diagonal().iter().product();
        let det = a.det().unwrap();
        prop_assert!((det - lu.row_swap_parity() * diag_product).abs() <= 1e-9 * det.abs().max(1.0));

        // det(A) det(A^-1) = 1
        let det_inv = a.inverse().unwrap().det().unwrap();
        prop_assert!((det * det_inv - 1.0).abs() < 1e-9);

        let ld = a.log_det().unwrap();
        prop_assert!((ld.value() - det).abs() <= 1e-9 * det.abs().max(1.0));
    }

    #[test]
    fn permuted_factors_reproduce_input(a in arb_dominant(6)) {
        let lu = a.lu().unwrap();
        let (l, u) = lu.lu_factors();
        let product = &l * &u;
        let perm = lu.permutation();
        let permuted = Matrix::from_fn(a.nrows(), a.ncols(), |i, j| a[(perm[i], j)]);
        prop_assert!(max_abs_diff(&product, &permuted) < 1e-9);
        prop_assert!(l.is_lower_triangular());
        prop_assert!(u.is_upper_triangular());
    }

    #[test]
    fn jacobi_reconstructs_symmetric_input(s in arb_symmetric(6)) {
        let eig = s.symmetric_eigen().unwrap();
        prop_assert!(eig.converged());
        prop_assert!(max_abs_diff(&eig.reconstruct(), &s) < 1e-8);

        let v = eig.eigenvectors();
        let vtv = &v.transpose() * v;
        prop_assert!(max_abs_diff(&vtv, &Matrix::identity(s.nrows())) < 1e-9);

        let values = eig.eigenvalues();
        prop_assert!(values.windows(2).all(|w| w[0] >= w[1]));
        let sum: f64 = values.iter().sum();
        prop_assert!((sum - s.trace()).abs() < 1e-8);
    }

    #[test]
    fn sorted_eigenvalues_index_unsorted(s in arb_symmetric(5)) {
        let eig = s.symmetric_eigen().unwrap();
        for (k, &idx) in eig.eigenvalue_indices().iter().enumerate() {
            prop_assert_eq!(eig.eigenvalues()[k], eig.unsorted_eigenvalues()[idx]);
        }
    }

    #[test]
    fn rref_is_idempotent(vals in prop::collection::vec(-4i32..4, 12)) {
        let a = Matrix::from_fn(3, 4, |i, j| vals[i * 4 + j] as f64);
        let r = a.reduced_row_echelon();
        prop_assert!(a.rank() <= 3);
        prop_assert_eq!(r.reduced_row_echelon().rank(), a.rank());
        prop_assert!(max_abs_diff(&r.reduced_row_echelon(), &r) < 1e-12);
    }

    #[test]
    fn fft_roundtrip(x in arb_signal()) {
        let back = ifft(&fft(&x).unwrap()).unwrap();
        for (a, b) in x.iter().zip(&back) {
            prop_assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn interleaved_roundtrip_scales_by_length(x in arb_signal()) {
        let n = x.len() as f64;
        let mut buf: Vec<f64> = x.iter().flat_map(|z| [z.re, z.im]).collect();
        let original = buf.clone();
        radix2_fft(&mut buf, Direction::Forward).unwrap();
        radix2_fft(&mut buf, Direction::Inverse).unwrap();
        for (a, b) in buf.iter().zip(&original) {
            prop_assert!((a / n - b).abs() < 1e-9);
        }
    }

    #[test]
    fn parseval(x in arb_signal()) {
        let n = x.len() as f64;
        let time: f64 = x.iter().map(|z| z.norm_sqr()).sum();
        let freq: f64 = fft(&x).unwrap().iter().map(|z| z.norm_sqr()).sum::<f64>() / n;
        prop_assert!((time - freq).abs() <= 1e-9 * time.max(1.0));

        // One-sided PSD over a single unwindowed block sums to the mean square.
        let ps = PowerSpectrum::from_complex(&x, &SpectrumSettings::default()).unwrap();
        prop_assert!((ps.total_power() - time / n).abs() <= 1e-9 * (time / n).max(1.0));
    }
}
