use num_traits::Zero;

use crate::traits::LinalgScalar;

use super::Matrix;

impl<T: LinalgScalar> Matrix<T> {
    /// Frobenius norm (square root of sum of squared moduli).
    ///
    /// ```
    /// use numrec::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T::Real {
        let mut sum = <T::Real as Zero>::zero();
        for &x in &self.data {
            let m = x.modulus();
            sum = sum + m * m;
        }
        sum.lsqrt()
    }

    /// One norm (maximum column sum of moduli).
    pub fn norm_one(&self) -> T::Real {
        let mut max = <T::Real as Zero>::zero();
        for j in 0..self.ncols {
            let mut sum = <T::Real as Zero>::zero();
            for i in 0..self.nrows {
                sum = sum + self[(i, j)].modulus();
            }
            if sum > max {
                max = sum;
            }
        }
        max
    }

    /// Infinity norm (maximum row sum of moduli).
    ///
    /// ```
    /// use numrec::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, -2.0, 3.0, 4.0]);
    /// assert!((m.norm_inf() - 7.0).abs() < 1e-12);
    /// ```
    pub fn norm_inf(&self) -> T::Real {
        let mut max = <T::Real as Zero>::zero();
        for i in 0..self.nrows {
            let mut sum = <T::Real as Zero>::zero();
            for j in 0..self.ncols {
                sum = sum + self[(i, j)].modulus();
            }
            if sum > max {
                max = sum;
            }
        }
        max
    }

    /// Largest element modulus, `None` for an empty matrix.
    pub fn max_modulus(&self) -> Option<T::Real> {
        self.data
            .iter()
            .map(|x| x.modulus())
            .reduce(|a, b| if b > a { b } else { a })
    }

    /// Smallest element modulus, `None` for an empty matrix.
    pub fn min_modulus(&self) -> Option<T::Real> {
        self.data
            .iter()
            .map(|x| x.modulus())
            .reduce(|a, b| if b < a { b } else { a })
    }
}
