use crate::traits::{LinalgScalar, MatrixMut};
use crate::Matrix;

/// Gauss-Jordan reduction to reduced row-echelon form, in place.
///
/// For each column, the first row at or below the current one holding an
/// exactly nonzero entry becomes the pivot row. It is swapped up, scaled so
/// the pivot is one, and the column is eliminated from every other row.
/// Columns without a candidate are skipped. Stops once rows or columns run
/// out. Signed zeros are normalised to `+0` on return.
///
/// Returns the number of pivots found.
pub fn reduced_row_echelon_in_place<T: LinalgScalar>(a: &mut impl MatrixMut<T>) -> usize {
    let (rows, cols) = (a.nrows(), a.ncols());
    let mut row = 0;
    let mut lead = 0;

    while row < rows && lead < cols {
        let Some(p) = (row..rows).find(|&i| *a.get(i, lead) != T::zero()) else {
            lead += 1;
            continue;
        };
        a.swap_rows(p, row);

        let pivot = *a.get(row, lead);
        for j in 0..cols {
            let x = a.get(row, j).ldiv(pivot);
            *a.get_mut(row, j) = x;
        }
        *a.get_mut(row, lead) = T::one();

        for i in 0..rows {
            if i == row {
                continue;
            }
            let factor = *a.get(i, lead);
            if factor == T::zero() {
                continue;
            }
            for j in 0..cols {
                let x = *a.get(i, j) - factor * *a.get(row, j);
                *a.get_mut(i, j) = x;
            }
            *a.get_mut(i, lead) = T::zero();
        }

        row += 1;
        lead += 1;
    }

    for i in 0..rows {
        for j in 0..cols {
            let x = a.get(i, j).clean_zero();
            *a.get_mut(i, j) = x;
        }
    }
    row
}

impl<T: LinalgScalar> Matrix<T> {
    /// Reduced row-echelon form of a copy of this matrix.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 2.0, 4.0, 7.0]);
    /// let r = a.reduced_row_echelon();
    /// assert_eq!(r.row(0), vec![1.0, 2.0, 0.0]);
    /// assert_eq!(r.row(1), vec![0.0, 0.0, 1.0]);
    /// ```
    pub fn reduced_row_echelon(&self) -> Self {
        let mut r = self.clone();
        reduced_row_echelon_in_place(&mut r);
        r
    }

    /// Number of pivots found by row reduction.
    ///
    /// Pivots are detected by exact comparison with zero, so rounding noise
    /// in nearly dependent rows counts towards the rank.
    pub fn rank(&self) -> usize {
        let mut r = self.clone();
        reduced_row_echelon_in_place(&mut r)
    }
}
