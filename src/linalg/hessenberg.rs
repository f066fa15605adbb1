use num_traits::Zero;

use crate::linalg::LinalgError;
use crate::traits::{LinalgScalar, MatrixMut};
use crate::Matrix;

/// Reduce a square matrix to upper Hessenberg form via Householder similarity
/// transforms: `Q^H A Q = H`.
///
/// On return:
/// - `a` is overwritten with the upper Hessenberg matrix H
/// - `q` accumulates the orthogonal/unitary transform Q
///
/// The result satisfies `A = Q H Q^H` (or `Q H Q^T` for real matrices).
pub fn hessenberg<T: LinalgScalar>(a: &mut impl MatrixMut<T>, q: &mut impl MatrixMut<T>) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "hessenberg requires a square matrix");
    assert_eq!(q.nrows(), n);
    assert_eq!(q.ncols(), n);

    for i in 0..n {
        for j in 0..n {
            *q.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
        }
    }

    for k in 0..n.saturating_sub(2) {
        // Householder vector from a[k+1.., k]
        let mut norm_sq = T::Real::zero();
        for i in (k + 1)..n {
            let v = *a.get(i, k);
            norm_sq = norm_sq + (v * v.conj()).re();
        }
        if norm_sq <= T::lepsilon() * T::lepsilon() {
            continue;
        }

        let norm = norm_sq.lsqrt();
        let head = *a.get(k + 1, k);
        let alpha = head.modulus();
        let sigma = if alpha < T::lepsilon() {
            T::from_real(norm)
        } else {
            T::from_real(norm) * head.ldiv(T::from_real(alpha))
        };
        let v0 = head + sigma;

        // v = [1, a[k+2,k]/v0, ...], tail stored below the sub-diagonal
        for i in (k + 2)..n {
            let x = a.get(i, k).ldiv(v0);
            *a.get_mut(i, k) = x;
        }
        let tau = v0.ldiv(sigma);

        // Left: A[k+1.., j] -= tau v (v^H A[k+1.., j])
        for j in (k + 1)..n {
            let mut dot = *a.get(k + 1, j);
            for i in (k + 2)..n {
                dot = dot + a.get(i, k).conj() * *a.get(i, j);
            }
            dot = dot * tau;
            *a.get_mut(k + 1, j) = *a.get(k + 1, j) - dot;
            for i in (k + 2)..n {
                let updated = *a.get(i, j) - dot * *a.get(i, k);
                *a.get_mut(i, j) = updated;
            }
        }

        // Right: A (I - tau v v^H), then Q (I - tau v v^H)
        let mut v = Vec::with_capacity(n - k - 1);
        v.push(T::one());
        v.extend(((k + 2)..n).map(|i| *a.get(i, k)));
        reflect_right(a, k + 1, tau, &v);
        reflect_right(q, k + 1, tau, &v);

        *a.get_mut(k + 1, k) = T::zero() - sigma;
        for i in (k + 2)..n {
            *a.get_mut(i, k) = T::zero();
        }
    }
}

/// `M[.., off..] -= tau (M[.., off..] v) v^H` for every row of `m`.
fn reflect_right<T: LinalgScalar>(m: &mut impl MatrixMut<T>, off: usize, tau: T, v: &[T]) {
    for i in 0..m.nrows() {
        let mut dot = T::zero();
        for (jj, &vj) in v.iter().enumerate() {
            dot = dot + *m.get(i, off + jj) * vj;
        }
        dot = dot * tau;
        for (jj, &vj) in v.iter().enumerate() {
            let updated = *m.get(i, off + jj) - dot * vj.conj();
            *m.get_mut(i, off + jj) = updated;
        }
    }
}

/// Upper Hessenberg form `H` with the unitary `Q` such that `A = Q H Q^H`.
#[derive(Debug, Clone)]
pub struct HessenbergDecomposition<T> {
    h: Matrix<T>,
    q: Matrix<T>,
}

impl<T: LinalgScalar> HessenbergDecomposition<T> {
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        a.check_square()?;
        let n = a.nrows();
        let mut h = a.clone();
        let mut q = Matrix::zeros(n, n);
        hessenberg(&mut h, &mut q);
        Ok(Self { h, q })
    }

    /// The upper Hessenberg matrix.
    #[inline]
    pub fn h(&self) -> &Matrix<T> {
        &self.h
    }

    /// The accumulated unitary transform.
    #[inline]
    pub fn q(&self) -> &Matrix<T> {
        &self.q
    }

    /// `Q H Q^H`, equal to the input up to rounding.
    pub fn reconstruct(&self) -> Matrix<T> {
        let qh = self.q.map(|x| x.conj()).transpose();
        &(&self.q * &self.h) * &qh
    }

    /// Consume into `(H, Q)`.
    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>) {
        (self.h, self.q)
    }
}

impl<T: LinalgScalar> Matrix<T> {
    /// Householder reduction to upper Hessenberg form.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let a = Matrix::from_rows(3, 3, &[4.0_f64, 1.0, -2.0, 1.0, 2.0, 0.0, -2.0, 0.0, 3.0]);
    /// let hess = a.hessenberg().unwrap();
    /// assert!(hess.h().is_upper_hessenberg());
    /// ```
    pub fn hessenberg(&self) -> Result<HessenbergDecomposition<T>, LinalgError> {
        HessenbergDecomposition::new(self)
    }
}
