use crate::traits::{LinalgScalar, Scalar};

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Sum of diagonal elements.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        let n = self.nrows.min(self.ncols);
        let mut sum = T::zero();
        for i in 0..n {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Copy of the main diagonal.
    pub fn diagonal(&self) -> Vec<T> {
        let n = self.nrows.min(self.ncols);
        (0..n).map(|i| self[(i, i)]).collect()
    }

    /// Exact symmetry check (`A == A^T`). Non-square matrices are not symmetric.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let sym = Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 3.0]);
    /// assert!(sym.is_symmetric());
    /// ```
    pub fn is_symmetric(&self) -> bool {
        self.is_square() && self.all_off_diagonal_pairs(|a, b| a == b)
    }

    /// Whether every off-diagonal element is zero.
    pub fn is_diagonal(&self) -> bool {
        self.is_square() && self.all_where(|i, j| i == j)
    }

    /// Whether every element below the diagonal is zero.
    pub fn is_upper_triangular(&self) -> bool {
        self.is_square() && self.all_where(|i, j| i <= j)
    }

    /// Whether every element above the diagonal is zero.
    pub fn is_lower_triangular(&self) -> bool {
        self.is_square() && self.all_where(|i, j| i >= j)
    }

    /// Whether every element below the first sub-diagonal is zero.
    pub fn is_upper_hessenberg(&self) -> bool {
        self.is_square() && self.all_where(|i, j| i <= j + 1)
    }

    /// Whether this is the identity matrix.
    pub fn is_identity(&self) -> bool {
        self.is_diagonal() && (0..self.nrows).all(|i| self[(i, i)] == T::one())
    }

    /// Whether every element is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&x| x == T::zero())
    }

    /// True when every element outside the region selected by `keep` is zero.
    fn all_where(&self, keep: impl Fn(usize, usize) -> bool) -> bool {
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                if !keep(i, j) && self[(i, j)] != T::zero() {
                    return false;
                }
            }
        }
        true
    }

    fn all_off_diagonal_pairs(&self, f: impl Fn(T, T) -> bool) -> bool {
        let n = self.nrows;
        for i in 0..n {
            for j in (i + 1)..n {
                if !f(self[(i, j)], self[(j, i)]) {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: LinalgScalar> Matrix<T> {
    /// Symmetry check with a tolerance on `|a_ij - a_ji|`.
    pub fn is_nearly_symmetric(&self, tol: T::Real) -> bool {
        self.is_square() && self.all_off_diagonal_pairs(|a, b| (a - b).modulus() <= tol)
    }

    /// Hermitian check (`A == A^H`); equivalent to `is_symmetric` for reals.
    pub fn is_hermitian(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            if self[(i, i)] != self[(i, i)].conj() {
                return false;
            }
            for j in (i + 1)..n {
                if self[(i, j)] != self[(j, i)].conj() {
                    return false;
                }
            }
        }
        true
    }
}
