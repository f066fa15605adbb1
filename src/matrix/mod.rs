mod complex;
mod norm;
mod ops;
mod square;
mod util;

use core::ops::{Index, IndexMut};

use crate::linalg::LinalgError;
use crate::traits::{MatrixMut, MatrixRef, Scalar};
use crate::Complex64;

/// Real double-precision matrix.
pub type RealMatrix = Matrix<f64>;
/// Complex double-precision matrix.
pub type ComplexMatrix = Matrix<Complex64>;

/// Dense heap-allocated matrix with runtime dimensions.
///
/// Column-major `Vec<T>` storage. The matrix exclusively owns its storage:
/// `clone()` and every constructor taking a slice perform a deep copy, and
/// no public method hands out a mutable reference to the backing store.
/// [`Matrix::as_slice`] is the only borrowed view, and it is read-only.
///
/// The same type serves real (`Matrix<f64>`) and complex
/// (`Matrix<Complex64>`) elements; the decompositions in
/// [`crate::linalg`] are shared through [`crate::traits::LinalgScalar`].
///
/// # Examples
///
/// ```
/// use numrec::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let b = Matrix::<f64>::identity(3);
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::filled(nrows, ncols, T::zero())
    }

    /// Create a matrix with every element set to `value`.
    pub fn filled(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self::from_fn(nrows, ncols, |i, j| row_major[i * ncols + j])
    }

    /// Create a matrix from a flat slice in column-major order.
    ///
    /// Panics if `slice.len() != nrows * ncols`.
    pub fn from_slice(nrows: usize, ncols: usize, slice: &[T]) -> Self {
        assert_eq!(
            slice.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            slice.len(),
            nrows,
            ncols,
        );
        Self {
            data: slice.to_vec(),
            nrows,
            ncols,
        }
    }

    /// Create a matrix from a list of rows, deep-copying every element.
    ///
    /// All rows must have the same length.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let m = Matrix::from_row_vecs(&[vec![4.0, 3.0], vec![6.0, 3.0]]).unwrap();
    /// assert_eq!(m[(1, 0)], 6.0);
    ///
    /// assert!(Matrix::from_row_vecs(&[vec![1.0, 2.0], vec![3.0]]).is_err());
    /// ```
    pub fn from_row_vecs(rows: &[Vec<T>]) -> Result<Self, LinalgError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        for row in rows {
            if row.len() != ncols {
                return Err(LinalgError::DimensionMismatch {
                    expected: (nrows, ncols),
                    got: (nrows, row.len()),
                });
            }
        }
        Ok(Self::from_fn(nrows, ncols, |i, j| rows[i][j]))
    }

    /// Create a square diagonal matrix from a slice.
    pub fn from_diagonal(diag: &[T]) -> Self {
        let n = diag.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diag.iter().enumerate() {
            m[(i, i)] = d;
        }
        m
    }

    /// A `1 x n` matrix holding `values`.
    pub fn row_vector(values: &[T]) -> Self {
        Self::from_rows(1, values.len(), values)
    }

    /// An `n x 1` matrix holding `values`.
    pub fn column_vector(values: &[T]) -> Self {
        Self::from_slice(values.len(), 1, values)
    }
}

impl<T> Matrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
    /// assert_eq!(m[(1, 1)], 4.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Borrowed read-only view of the column-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Bounds-checked copy of one element.
    #[inline]
    pub fn get_element(&self, row: usize, col: usize) -> Option<T>
    where
        T: Copy,
    {
        if row < self.nrows && col < self.ncols {
            Some(self.data[col * self.nrows + row])
        } else {
            None
        }
    }

    /// Bounds-checked element assignment. Returns `false` when out of range.
    #[inline]
    pub fn set_element(&mut self, row: usize, col: usize, value: T) -> bool {
        if row < self.nrows && col < self.ncols {
            self.data[col * self.nrows + row] = value;
            true
        } else {
            false
        }
    }

    pub(crate) fn check_square(&self) -> Result<(), LinalgError> {
        if self.is_square() {
            Ok(())
        } else {
            Err(LinalgError::NotSquare {
                rows: self.nrows,
                cols: self.ncols,
            })
        }
    }

    pub(crate) fn check_same_shape(&self, rhs: &Self) -> Result<(), LinalgError> {
        if self.shape() == rhs.shape() {
            Ok(())
        } else {
            Err(LinalgError::DimensionMismatch {
                expected: self.shape(),
                got: rhs.shape(),
            })
        }
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for Matrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col * self.nrows + row]
    }
}

impl<T> MatrixMut<T> for Matrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.nrows && col < self.ncols, "index ({}, {}) out of bounds", row, col);
        &self.data[col * self.nrows + row]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(row < self.nrows && col < self.ncols, "index ({}, {}) out of bounds", row, col);
        &mut self.data[col * self.nrows + row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros() {
        let m = Matrix::<f64>::zeros(3, 4);
        assert_eq!(m.shape(), (3, 4));
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn identity() {
        let m = Matrix::<f64>::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(m[(i, j)], expected);
            }
        }
    }

    #[test]
    fn from_rows_is_row_major() {
        let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m[(1, 2)], 6.0);
        // column-major storage
        assert_eq!(m.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    #[should_panic(expected = "slice length")]
    fn from_rows_wrong_length() {
        let _ = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn from_row_vecs_ragged() {
        let err = Matrix::from_row_vecs(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            LinalgError::DimensionMismatch {
                expected: (2, 2),
                got: (2, 1)
            }
        );
    }

    #[test]
    fn clone_is_deep() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut b = a.clone();
        b[(0, 0)] = 10.0;
        assert_eq!(a[(0, 0)], 1.0);
        assert_eq!(b[(0, 0)], 10.0);
    }

    #[test]
    fn checked_access() {
        let mut m = Matrix::<f64>::zeros(2, 2);
        assert!(m.set_element(1, 1, 5.0));
        assert!(!m.set_element(2, 0, 5.0));
        assert_eq!(m.get_element(1, 1), Some(5.0));
        assert_eq!(m.get_element(0, 2), None);
    }

    #[test]
    fn vectors() {
        let r = Matrix::row_vector(&[1.0, 2.0, 3.0]);
        assert_eq!(r.shape(), (1, 3));
        let c = Matrix::column_vector(&[1.0, 2.0, 3.0]);
        assert_eq!(c.shape(), (3, 1));
        assert_eq!(c[(2, 0)], 3.0);
    }

    #[test]
    fn matrix_mut_swap_rows() {
        let mut m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        MatrixMut::swap_rows(&mut m, 0, 1);
        assert_eq!(m[(0, 0)], 3.0);
        assert_eq!(m[(1, 1)], 2.0);
    }
}
