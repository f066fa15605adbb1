use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::linalg::LinalgError;
use crate::traits::Scalar;

use super::Matrix;

// ── Checked arithmetic ──────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    fn zip_map(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Element-wise sum, or `DimensionMismatch` if the shapes differ.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let a = Matrix::from_rows(1, 2, &[1.0, 2.0]);
    /// let b = Matrix::from_rows(1, 2, &[3.0, 4.0]);
    /// assert_eq!(a.try_add(&b).unwrap()[(0, 1)], 6.0);
    /// assert!(a.try_add(&Matrix::zeros(2, 1)).is_err());
    /// ```
    pub fn try_add(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.check_same_shape(rhs)?;
        Ok(self.zip_map(rhs, |a, b| a + b))
    }

    /// Element-wise difference, or `DimensionMismatch` if the shapes differ.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.check_same_shape(rhs)?;
        Ok(self.zip_map(rhs, |a, b| a - b))
    }

    /// Element-wise (Hadamard) product.
    pub fn hadamard(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.check_same_shape(rhs)?;
        Ok(self.zip_map(rhs, |a, b| a * b))
    }

    /// Matrix product, or `DimensionMismatch` if `self.ncols != rhs.nrows`.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let b = Matrix::from_rows(3, 1, &[1.0, 0.0, -1.0]);
    /// let c = a.try_mul(&b).unwrap();
    /// assert_eq!(c.shape(), (2, 1));
    /// assert_eq!(c[(1, 0)], -2.0);
    /// ```
    pub fn try_mul(&self, rhs: &Self) -> Result<Self, LinalgError> {
        if self.ncols != rhs.nrows {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.ncols, rhs.ncols),
                got: rhs.shape(),
            });
        }
        let (m, n, p) = (self.nrows, self.ncols, rhs.ncols);
        let mut out = Matrix::zeros(m, p);
        for j in 0..p {
            for k in 0..n {
                let b_kj = rhs.data[j * n + k];
                if b_kj == T::zero() {
                    continue;
                }
                for i in 0..m {
                    out.data[j * m + i] = out.data[j * m + i] + self.data[k * m + i] * b_kj;
                }
            }
        }
        Ok(out)
    }

    /// Matrix-vector product `A x`.
    pub fn mul_vector(&self, x: &[T]) -> Result<Vec<T>, LinalgError> {
        if x.len() != self.ncols {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.ncols, 1),
                got: (x.len(), 1),
            });
        }
        let mut y = vec![T::zero(); self.nrows];
        for (j, &xj) in x.iter().enumerate() {
            for (i, yi) in y.iter_mut().enumerate() {
                *yi = *yi + self.data[j * self.nrows + i] * xj;
            }
        }
        Ok(y)
    }

    /// Multiply every element by `s`, producing a new matrix.
    pub fn scale(&self, s: T) -> Self {
        self.map(|x| x * s)
    }

    /// In-place element-wise sum.
    pub fn try_add_in_place(&mut self, rhs: &Self) -> Result<(), LinalgError> {
        self.check_same_shape(rhs)?;
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a + b;
        }
        Ok(())
    }

    /// In-place element-wise difference.
    pub fn try_sub_in_place(&mut self, rhs: &Self) -> Result<(), LinalgError> {
        self.check_same_shape(rhs)?;
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a - b;
        }
        Ok(())
    }

    /// In-place multiplication by a scalar.
    pub fn scale_in_place(&mut self, s: T) {
        for a in self.data.iter_mut() {
            *a = *a * s;
        }
    }
}

// ── Operators ───────────────────────────────────────────────────────
//
// Operators panic on a shape mismatch, like slice indexing; use the
// `try_*` methods to get a `DimensionMismatch` instead.

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl<T: Scalar> $trait<&Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                match self.$checked(rhs) {
                    Ok(m) => m,
                    Err(e) => panic!("{}", e),
                }
            }
        }

        impl<T: Scalar> $trait<Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                (&self).$method(&rhs)
            }
        }

        impl<T: Scalar> $trait<&Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                (&self).$method(rhs)
            }
        }

        impl<T: Scalar> $trait<Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                self.$method(&rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, try_add);
impl_binary_op!(Sub, sub, try_sub);
impl_binary_op!(Mul, mul, try_mul);

impl<T: Scalar> AddAssign<&Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &Matrix<T>) {
        if let Err(e) = self.try_add_in_place(rhs) {
            panic!("{}", e);
        }
    }
}

impl<T: Scalar> SubAssign<&Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        if let Err(e) = self.try_sub_in_place(rhs) {
            panic!("{}", e);
        }
    }
}

impl<T: Scalar> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, s: T) {
        self.scale_in_place(s);
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &Matrix<T> {
    type Output = Matrix<T>;
    fn neg(self) -> Matrix<T> {
        self.map(|x| -x)
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for Matrix<T> {
    type Output = Matrix<T>;
    fn neg(self) -> Matrix<T> {
        -&self
    }
}
