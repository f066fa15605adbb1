use core::fmt;

use num_traits::NumCast;

use crate::linalg::LinalgError;
use crate::traits::{LinalgScalar, Scalar};

use super::Matrix;

// ── Map / transpose ─────────────────────────────────────────────────

impl<T: Copy> Matrix<T> {
    /// Apply a function to every element, producing a new matrix.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, 4.0, 9.0, 16.0]);
    /// let r = m.map(|x: f64| x.sqrt());
    /// assert_eq!(r[(0, 1)], 2.0);
    /// assert_eq!(r[(1, 1)], 4.0);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Transpose, producing a new `ncols x nrows` matrix.
    pub fn transpose(&self) -> Self {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    /// Swap two rows in place.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let mut m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// assert_eq!(m[(1, 0)], 1.0);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        assert!(a < self.nrows && b < self.nrows, "row index out of bounds");
        if a != b {
            for j in 0..self.ncols {
                self.data.swap(j * self.nrows + a, j * self.nrows + b);
            }
        }
    }

    /// Swap two columns in place.
    pub fn swap_columns(&mut self, a: usize, b: usize) {
        assert!(a < self.ncols && b < self.ncols, "column index out of bounds");
        if a != b {
            for i in 0..self.nrows {
                self.data.swap(a * self.nrows + i, b * self.nrows + i);
            }
        }
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> Vec<T> {
        (0..self.ncols).map(|j| self[(i, j)]).collect()
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Vec<T> {
        let start = j * self.nrows;
        self.data[start..start + self.nrows].to_vec()
    }

    /// Deep copy of the contents as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.nrows).map(|i| self.row(i)).collect()
    }

    /// Copy of rows `r0..=r1` and columns `c0..=c1` (inclusive bounds).
    pub fn submatrix(&self, r0: usize, r1: usize, c0: usize, c1: usize) -> Result<Self, LinalgError> {
        if r0 > r1 || c0 > c1 || r1 >= self.nrows || c1 >= self.ncols {
            return Err(LinalgError::DimensionMismatch {
                expected: self.shape(),
                got: (r1 + 1, c1 + 1),
            });
        }
        Ok(Matrix::from_fn(r1 - r0 + 1, c1 - c0 + 1, |i, j| {
            self[(r0 + i, c0 + j)]
        }))
    }

    /// Overwrite the block whose top-left corner is `(r0, c0)` with `block`.
    pub fn set_submatrix(&mut self, r0: usize, c0: usize, block: &Self) -> Result<(), LinalgError> {
        if r0 + block.nrows > self.nrows || c0 + block.ncols > self.ncols {
            return Err(LinalgError::DimensionMismatch {
                expected: self.shape(),
                got: (r0 + block.nrows, c0 + block.ncols),
            });
        }
        for j in 0..block.ncols {
            for i in 0..block.nrows {
                self[(r0 + i, c0 + j)] = block[(i, j)];
            }
        }
        Ok(())
    }
}

// ── Aggregation ─────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc + x)
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<T> {
        (0..self.nrows)
            .map(|i| (0..self.ncols).fold(T::zero(), |acc, j| acc + self[(i, j)]))
            .collect()
    }

    /// Sum of each column.
    pub fn column_sums(&self) -> Vec<T> {
        self.data
            .chunks(self.nrows.max(1))
            .take(self.ncols)
            .map(|col| col.iter().fold(T::zero(), |acc, &x| acc + x))
            .collect()
    }
}

impl<T: LinalgScalar> Matrix<T> {
    /// Arithmetic mean of all elements, `None` for an empty matrix.
    pub fn mean(&self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let count = <T::Real as NumCast>::from(self.data.len())?;
        Some(self.sum().ldiv(T::from_real(count)))
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                if j > 0 {
                    f.write_str("  ")?;
                }
                fmt::Display::fmt(&self[(i, j)], f)?;
            }
            if i + 1 < self.nrows {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
