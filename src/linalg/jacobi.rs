use core::cmp::Ordering;

use num_traits::NumCast;

use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};
use crate::{Matrix, Warning};

/// Iteration control for the Jacobi eigensolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JacobiSettings {
    /// Maximum number of full sweeps over the upper triangle.
    pub max_iterations: usize,
}

impl Default for JacobiSettings {
    fn default() -> Self {
        Self { max_iterations: 100 }
    }
}

/// Counters reported by [`jacobi_eigen`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobiOutcome<T> {
    pub rotations: usize,
    pub sweeps: usize,
    pub converged: bool,
    /// Sum of `|a_pq|` over the strict upper triangle when iteration stopped.
    pub off_diagonal_sum: T,
}

#[inline]
fn rotate<T: FloatScalar>(a: &mut impl MatrixMut<T>, s: T, tau: T, (i, j): (usize, usize), (k, l): (usize, usize)) {
    let g = *a.get(i, j);
    let h = *a.get(k, l);
    *a.get_mut(i, j) = g - s * (h + g * tau);
    *a.get_mut(k, l) = h + s * (g - h * tau);
}

fn off_diagonal_sum<T: FloatScalar>(a: &impl MatrixRef<T>) -> T {
    let n = a.nrows();
    let mut sm = T::zero();
    for p in 0..n {
        for q in (p + 1)..n {
            sm = sm + a.get(p, q).abs();
        }
    }
    sm
}

/// Cyclic Jacobi eigen-decomposition of a real symmetric matrix, in place.
///
/// The strict upper triangle of `a` is destroyed. `d` receives the
/// (unsorted) eigenvalues and the columns of `v` the matching normalised
/// eigenvectors. Rotations use the half-angle form of `tan θ`. During the
/// first three sweeps only elements above `0.2 * sum / n²` are rotated;
/// after the fourth, elements negligible against both diagonal entries are
/// zeroed outright.
///
/// Iteration stops when the sum of off-diagonal magnitudes is exactly zero
/// or after `max_sweeps` sweeps, whichever comes first.
pub fn jacobi_eigen<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    d: &mut [T],
    max_sweeps: usize,
) -> JacobiOutcome<T> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "jacobi requires a square matrix");
    assert_eq!(d.len(), n);

    let two = T::one() + T::one();
    let half = T::one() / two;
    let hundred = <T as NumCast>::from(100.0).unwrap_or_else(T::max_value);
    let fifth = <T as NumCast>::from(0.2).unwrap_or_else(T::zero);
    let n_sq = <T as NumCast>::from(n * n).unwrap_or_else(T::one);

    for i in 0..n {
        for j in 0..n {
            *v.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
        }
        d[i] = *a.get(i, i);
    }
    let mut b = d.to_vec();
    let mut z = vec![T::zero(); n];

    let mut rotations = 0;
    let mut sweeps = 0;

    for sweep in 1..=max_sweeps {
        let sm = off_diagonal_sum(&*a);
        if sm == T::zero() {
            return JacobiOutcome {
                rotations,
                sweeps,
                converged: true,
                off_diagonal_sum: sm,
            };
        }
        sweeps = sweep;

        let tresh = if sweep < 4 { fifth * sm / n_sq } else { T::zero() };

        for ip in 0..n.saturating_sub(1) {
            for iq in (ip + 1)..n {
                let apq = *a.get(ip, iq);
                let g = hundred * apq.abs();
                if sweep > 4 && d[ip].abs() + g == d[ip].abs() && d[iq].abs() + g == d[iq].abs() {
                    *a.get_mut(ip, iq) = T::zero();
                } else if apq.abs() > tresh {
                    let mut h = d[iq] - d[ip];
                    let t = if h.abs() + g == h.abs() {
                        apq / h
                    } else {
                        let theta = half * h / apq;
                        let t = T::one() / (theta.abs() + (T::one() + theta * theta).sqrt());
                        if theta < T::zero() {
                            -t
                        } else {
                            t
                        }
                    };
                    let c = T::one() / (T::one() + t * t).sqrt();
                    let s = t * c;
                    let tau = s / (T::one() + c);
                    h = t * apq;
                    z[ip] = z[ip] - h;
                    z[iq] = z[iq] + h;
                    d[ip] = d[ip] - h;
                    d[iq] = d[iq] + h;
                    *a.get_mut(ip, iq) = T::zero();

                    for j in 0..ip {
                        rotate(a, s, tau, (j, ip), (j, iq));
                    }
                    for j in (ip + 1)..iq {
                        rotate(a, s, tau, (ip, j), (j, iq));
                    }
                    for j in (iq + 1)..n {
                        rotate(a, s, tau, (ip, j), (iq, j));
                    }
                    for j in 0..n {
                        rotate(v, s, tau, (j, ip), (j, iq));
                    }
                    rotations += 1;
                }
            }
        }

        for ip in 0..n {
            b[ip] = b[ip] + z[ip];
            d[ip] = b[ip];
            z[ip] = T::zero();
        }
    }

    let sm = off_diagonal_sum(&*a);
    JacobiOutcome {
        rotations,
        sweeps,
        converged: sm == T::zero(),
        off_diagonal_sum: sm,
    }
}

/// Eigen-decomposition of a real symmetric matrix.
///
/// Eigenvalues are sorted in descending order, with eigenvectors stored as
/// the matching columns. The order produced by the rotations is kept too,
/// along with the mapping between the two.
///
/// # Example
///
/// ```
/// use numrec::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
/// let eig = a.symmetric_eigen().unwrap();
/// assert!(eig.converged());
/// assert!((eig.eigenvalues()[0] - 3.0).abs() < 1e-12);
/// assert!((eig.eigenvalues()[1] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricEigen<T> {
    eigenvalues: Vec<T>,
    eigenvectors: Matrix<T>,
    indices: Vec<usize>,
    unsorted_eigenvalues: Vec<T>,
    unsorted_eigenvectors: Matrix<T>,
    rotations: usize,
    sweeps: usize,
    converged: bool,
    warnings: Vec<Warning>,
}

impl<T: FloatScalar> SymmetricEigen<T> {
    /// Decompose with [`JacobiSettings::default`].
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        Self::with_settings(a, &JacobiSettings::default())
    }

    pub fn with_settings(a: &Matrix<T>, settings: &JacobiSettings) -> Result<Self, LinalgError> {
        a.check_square()?;
        if !a.is_symmetric() {
            return Err(LinalgError::NotSymmetric);
        }
        let n = a.nrows();
        let mut work = a.clone();
        let mut v = Matrix::zeros(n, n);
        let mut d = vec![T::zero(); n];
        let outcome = jacobi_eigen(&mut work, &mut v, &mut d, settings.max_iterations);

        let mut warnings = Vec::new();
        if outcome.converged {
            tracing::debug!(
                n,
                rotations = outcome.rotations,
                sweeps = outcome.sweeps,
                "jacobi eigen-decomposition converged"
            );
        } else {
            let residual = outcome.off_diagonal_sum.to_f64().unwrap_or(f64::NAN);
            tracing::warn!(
                n,
                max_iterations = settings.max_iterations,
                off_diagonal_sum = residual,
                "jacobi iteration limit reached; returning best estimate"
            );
            warnings.push(Warning::IterationLimit {
                max_iterations: settings.max_iterations,
                off_diagonal_sum: residual,
            });
        }

        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&i, &j| d[j].partial_cmp(&d[i]).unwrap_or(Ordering::Equal));

        let eigenvalues = indices.iter().map(|&k| d[k]).collect();
        let eigenvectors = Matrix::from_fn(n, n, |i, j| v[(i, indices[j])]);

        Ok(Self {
            eigenvalues,
            eigenvectors,
            indices,
            unsorted_eigenvalues: d,
            unsorted_eigenvectors: v,
            rotations: outcome.rotations,
            sweeps: outcome.sweeps,
            converged: outcome.converged,
            warnings,
        })
    }

    /// Eigenvalues in descending order.
    #[inline]
    pub fn eigenvalues(&self) -> &[T] {
        &self.eigenvalues
    }

    /// Eigenvectors as columns, matching [`Self::eigenvalues`].
    #[inline]
    pub fn eigenvectors(&self) -> &Matrix<T> {
        &self.eigenvectors
    }

    /// Eigenvectors as rows, matching [`Self::eigenvalues`].
    pub fn eigenvector_rows(&self) -> Matrix<T> {
        self.eigenvectors.transpose()
    }

    /// `indices()[k]` is the position of the `k`-th sorted eigenvalue in the
    /// unsorted output.
    #[inline]
    pub fn eigenvalue_indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn unsorted_eigenvalues(&self) -> &[T] {
        &self.unsorted_eigenvalues
    }

    #[inline]
    pub fn unsorted_eigenvectors(&self) -> &Matrix<T> {
        &self.unsorted_eigenvectors
    }

    /// Number of Jacobi rotations applied.
    #[inline]
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    /// Number of sweeps that applied or considered rotations.
    #[inline]
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// `false` when the sweep limit was reached first.
    #[inline]
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// `V diag(λ) V^T`.
    pub fn reconstruct(&self) -> Matrix<T> {
        let v = &self.eigenvectors;
        let d = Matrix::from_diagonal(&self.eigenvalues);
        &(v * &d) * &v.transpose()
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Jacobi eigen-decomposition of a symmetric matrix.
    ///
    /// Fails with `NotSymmetric` unless the matrix equals its transpose
    /// exactly.
    pub fn symmetric_eigen(&self) -> Result<SymmetricEigen<T>, LinalgError> {
        SymmetricEigen::new(self)
    }

    /// Jacobi eigen-decomposition with explicit iteration control.
    pub fn symmetric_eigen_with(&self, settings: &JacobiSettings) -> Result<SymmetricEigen<T>, LinalgError> {
        SymmetricEigen::with_settings(self, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_orthonormal(v: &Matrix<f64>) {
        let vtv = &v.transpose() * v;
        for i in 0..v.ncols() {
            for j in 0..v.ncols() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((vtv[(i, j)] - expected).abs() < TOL, "VtV[({},{})] = {}", i, j, vtv[(i, j)]);
            }
        }
    }

    #[test]
    fn identity_needs_no_rotations() {
        for n in [1, 2, 5] {
            let eig = Matrix::<f64>::identity(n).symmetric_eigen().unwrap();
            assert_eq!(eig.rotations(), 0);
            assert!(eig.converged());
            assert!(eig.eigenvalues().iter().all(|&x| x == 1.0));
            assert!(eig.eigenvectors().is_identity());
        }
    }

    #[test]
    fn sorted_descending_with_indices() {
        let a = Matrix::from_rows(3, 3, &[1.0_f64, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 3.0]);
        let eig = a.symmetric_eigen().unwrap();
        assert_eq!(eig.eigenvalues(), &[5.0, 3.0, 1.0]);
        assert_eq!(eig.eigenvalue_indices(), &[1, 2, 0]);
        assert_eq!(eig.unsorted_eigenvalues(), &[1.0, 5.0, 3.0]);
        assert_eq!(eig.eigenvectors()[(1, 0)], 1.0);
    }

    #[test]
    fn reconstructs_symmetric_4x4() {
        let a = Matrix::from_rows(
            4,
            4,
            &[
                4.0_f64, -30.0, 60.0, -35.0, -30.0, 300.0, -675.0, 420.0, 60.0, -675.0, 1620.0, -1050.0,
                -35.0, 420.0, -1050.0, 700.0,
            ],
        );
        let eig = a.symmetric_eigen().unwrap();
        assert!(eig.converged());
        assert!(eig.rotations() > 0);
        assert_orthonormal(eig.eigenvectors());

        let back = eig.reconstruct();
        for i in 0..4 {
            for j in 0..4 {
                assert!((back[(i, j)] - a[(i, j)]).abs() < 1e-8);
            }
        }

        let vals = eig.eigenvalues();
        assert!(vals.windows(2).all(|w| w[0] >= w[1]));
        let trace: f64 = vals.iter().sum();
        assert!((trace - a.trace()).abs() < 1e-8);
    }

    #[test]
    fn eigenpairs_satisfy_definition() {
        let a = Matrix::from_rows(3, 3, &[2.0_f64, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
        let eig = a.symmetric_eigen().unwrap();
        for k in 0..3 {
            let v = eig.eigenvectors().column(k);
            let av = a.mul_vector(&v).unwrap();
            for i in 0..3 {
                assert!((av[i] - eig.eigenvalues()[k] * v[i]).abs() < TOL);
            }
        }
        let expected = [2.0 + 2.0_f64.sqrt(), 2.0, 2.0 - 2.0_f64.sqrt()];
        for (got, want) in eig.eigenvalues().iter().zip(expected) {
            assert!((got - want).abs() < TOL);
        }
    }

    #[test]
    fn iteration_limit_is_a_warning() {
        let a = Matrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 2.0, 4.0, 5.0, 3.0, 5.0, 6.0]);
        let eig = a.symmetric_eigen_with(&JacobiSettings { max_iterations: 1 }).unwrap();
        assert!(!eig.converged());
        assert!(matches!(eig.warnings()[0], Warning::IterationLimit { max_iterations: 1, .. }));
        assert_eq!(eig.eigenvalues().len(), 3);
    }

    #[test]
    fn rejects_non_symmetric() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        assert_eq!(a.symmetric_eigen().unwrap_err(), LinalgError::NotSymmetric);
        let r = Matrix::<f64>::zeros(2, 3);
        assert_eq!(r.symmetric_eigen().unwrap_err(), LinalgError::NotSquare { rows: 2, cols: 3 });
    }

    #[test]
    fn default_settings() {
        assert_eq!(JacobiSettings::default().max_iterations, 100);
    }
}
