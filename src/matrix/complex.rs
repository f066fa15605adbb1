use num_complex::Complex;

use crate::complex::{from_polar, scaled_abs};
use crate::linalg::LinalgError;
use crate::traits::FloatScalar;

use super::Matrix;

/// Helpers specific to complex matrices: conjugation, polar form and
/// splitting into real/imaginary parts.
///
/// ```
/// use numrec::{Complex64, Matrix};
///
/// let m = Matrix::from_rows(1, 2, &[Complex64::new(0.0, 2.0), Complex64::new(-1.0, 0.0)]);
/// let r = m.moduli();
/// assert_eq!(r.as_slice(), &[2.0, 1.0]);
///
/// let back = Matrix::from_polar(&r, &m.arguments()).unwrap();
/// assert!((back[(0, 1)].re + 1.0).abs() < 1e-15);
/// ```
impl<T: FloatScalar> Matrix<Complex<T>> {
    /// Element-wise complex conjugate.
    pub fn conjugate(&self) -> Self {
        self.map(|z| z.conj())
    }

    /// Conjugate transpose `A^H`.
    pub fn hermitian(&self) -> Self {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)].conj())
    }

    /// Element-wise modulus.
    pub fn moduli(&self) -> Matrix<T> {
        self.map(scaled_abs)
    }

    /// Element-wise argument in `(-π, π]`.
    pub fn arguments(&self) -> Matrix<T> {
        self.map(|z| z.im.atan2(z.re))
    }

    /// Real parts.
    pub fn real_part(&self) -> Matrix<T> {
        self.map(|z| z.re)
    }

    /// Imaginary parts.
    pub fn imag_part(&self) -> Matrix<T> {
        self.map(|z| z.im)
    }

    /// Combine real and imaginary parts of equal shape.
    pub fn from_parts(re: &Matrix<T>, im: &Matrix<T>) -> Result<Self, LinalgError> {
        re.check_same_shape(im)?;
        Ok(Matrix::from_fn(re.nrows, re.ncols, |i, j| {
            Complex::new(re[(i, j)], im[(i, j)])
        }))
    }

    /// Build from element-wise moduli and arguments of equal shape.
    pub fn from_polar(moduli: &Matrix<T>, arguments: &Matrix<T>) -> Result<Self, LinalgError> {
        moduli.check_same_shape(arguments)?;
        Ok(Matrix::from_fn(moduli.nrows, moduli.ncols, |i, j| {
            from_polar(moduli[(i, j)], arguments[(i, j)])
        }))
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Promote a real matrix to a complex one with zero imaginary parts.
    pub fn to_complex(&self) -> Matrix<Complex<T>> {
        self.map(|x| Complex::new(x, T::zero()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Complex64;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn hermitian_transpose() {
        let m = Matrix::from_rows(1, 2, &[c(1.0, 2.0), c(3.0, -4.0)]);
        let h = m.hermitian();
        assert_eq!(h.shape(), (2, 1));
        assert_eq!(h[(0, 0)], c(1.0, -2.0));
        assert_eq!(h[(1, 0)], c(3.0, 4.0));
        assert_eq!(m.conjugate()[(0, 1)], c(3.0, 4.0));
    }

    #[test]
    fn parts_round_trip() {
        let m = Matrix::from_rows(2, 1, &[c(1.0, 2.0), c(-3.0, 0.5)]);
        let back = Matrix::from_parts(&m.real_part(), &m.imag_part()).unwrap();
        assert_eq!(back, m);
        assert!(Matrix::from_parts(&Matrix::<f64>::zeros(1, 2), &Matrix::zeros(2, 1)).is_err());
    }

    #[test]
    fn polar_round_trip() {
        let m = Matrix::from_rows(2, 2, &[c(1.0, 1.0), c(0.0, -2.0), c(-3.0, 0.0), c(0.5, 0.25)]);
        let back = Matrix::from_polar(&m.moduli(), &m.arguments()).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert!((back[(i, j)] - m[(i, j)]).norm() < 1e-14);
            }
        }
    }

    #[test]
    fn real_to_complex() {
        let m = Matrix::from_rows(1, 2, &[1.0, -2.0]);
        assert_eq!(m.to_complex()[(0, 1)], c(-2.0, 0.0));
    }
}
