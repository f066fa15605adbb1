use num_traits::{Float, NumCast, One, Zero};

use crate::linalg::LinalgError;
use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};
use crate::{Matrix, Warning};

/// Replacement for an exactly-zero pivot met during elimination.
///
/// Keeps the factorization going for matrices that are singular only to
/// working precision. It is not an invertibility guarantee: a result
/// built on a substituted pivot carries a
/// [`Warning::NearSingularPivot`].
pub const TINY: f64 = 1.0e-30;

fn tiny<T: LinalgScalar>() -> T {
    let t = <T::Real as NumCast>::from(TINY).unwrap_or_else(<T::Real as Float>::min_positive_value);
    T::from_real(t)
}

/// Bookkeeping produced by [`lu_in_place`].
#[derive(Debug, Clone, PartialEq)]
pub struct LuPivoting {
    /// `true` if the number of row interchanges was even.
    pub even: bool,
    /// Columns whose zero pivot was replaced by [`TINY`].
    pub substituted: Vec<usize>,
}

/// Crout LU decomposition with implicit-scaling partial pivoting, in place.
///
/// On return, `a` contains both factors packed together:
/// - Upper triangle (including diagonal): U
/// - Lower triangle (excluding diagonal): L (diagonal of L is implicitly 1)
///
/// `pivots[j]` records the row that was interchanged with row `j` while
/// processing column `j` (equal to `j` when no interchange happened).
/// The pivot row is the candidate maximising `|partial sum|` divided by the
/// largest modulus of its original row.
///
/// Returns `Err(Singular)` when a whole row or a whole column of the input
/// is zero. An isolated zero pivot is replaced by [`TINY`] and reported in
/// [`LuPivoting::substituted`].
pub fn lu_in_place<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    pivots: &mut [usize],
) -> Result<LuPivoting, LinalgError> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "LU decomposition requires a square matrix");
    assert_eq!(n, pivots.len(), "pivot slice length must match matrix size");

    let zero = <T::Real as Zero>::zero();
    let one = <T::Real as One>::one();

    // Implicit scaling: reciprocal of the largest modulus in each row.
    let mut scale = vec![zero; n];
    for (i, s) in scale.iter_mut().enumerate() {
        let mut big = zero;
        for j in 0..n {
            let m = a.get(i, j).modulus();
            if m > big {
                big = m;
            }
        }
        if big == zero {
            return Err(LinalgError::Singular);
        }
        *s = one / big;
    }
    for j in 0..n {
        if (0..n).all(|i| a.get(i, j).modulus() == zero) {
            return Err(LinalgError::Singular);
        }
    }

    let mut even = true;
    let mut substituted = Vec::new();

    for j in 0..n {
        // U entries above the diagonal
        for i in 0..j {
            let mut sum = *a.get(i, j);
            for k in 0..i {
                sum = sum - *a.get(i, k) * *a.get(k, j);
            }
            *a.get_mut(i, j) = sum;
        }

        // Diagonal and below; pick the scaled-largest candidate
        let mut big = zero;
        let mut imax = j;
        for i in j..n {
            let mut sum = *a.get(i, j);
            for k in 0..j {
                sum = sum - *a.get(i, k) * *a.get(k, j);
            }
            *a.get_mut(i, j) = sum;
            let dum = scale[i] * sum.modulus();
            if dum >= big {
                big = dum;
                imax = i;
            }
        }

        if imax != j {
            a.swap_rows(imax, j);
            even = !even;
            scale[imax] = scale[j];
        }
        pivots[j] = imax;

        if *a.get(j, j) == T::zero() {
            tracing::warn!(column = j, "zero pivot replaced by TINY in LU decomposition");
            *a.get_mut(j, j) = tiny::<T>();
            substituted.push(j);
        }

        if j + 1 < n {
            let pivot = *a.get(j, j);
            for i in (j + 1)..n {
                let v = a.get(i, j).ldiv(pivot);
                *a.get_mut(i, j) = v;
            }
        }
    }

    Ok(LuPivoting { even, substituted })
}

/// Solve `A x = b` in place given the packed factors from [`lu_in_place`].
///
/// Forward substitution unscrambles `b` with the interchange record,
/// skipping the leading zero entries of the right-hand side; back
/// substitution then uses the upper triangle. On return `b` holds `x`.
pub fn lu_solve<T: LinalgScalar>(lu: &impl MatrixRef<T>, pivots: &[usize], b: &mut [T]) {
    let n = lu.nrows();
    debug_assert_eq!(b.len(), n);

    let mut first_nonzero: Option<usize> = None;
    for i in 0..n {
        let ip = pivots[i];
        let mut sum = b[ip];
        b[ip] = b[i];
        if let Some(start) = first_nonzero {
            for j in start..i {
                sum = sum - *lu.get(i, j) * b[j];
            }
        } else if sum != T::zero() {
            first_nonzero = Some(i);
        }
        b[i] = sum;
    }

    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum = sum - *lu.get(i, j) * b[j];
        }
        b[i] = sum.ldiv(*lu.get(i, i));
    }
}

/// Log-determinant as a `(sign, ln|det|)` pair.
///
/// `sign` has unit modulus: `±1` for real matrices, `e^{iθ}` for complex
/// ones. The pair stays finite for any non-singular matrix regardless of
/// the number of row interchanges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogDeterminant<T: LinalgScalar> {
    pub sign: T,
    pub ln_abs: T::Real,
}

impl<T: LinalgScalar> LogDeterminant<T> {
    /// Recombine into `sign * exp(ln_abs)`.
    pub fn value(&self) -> T {
        self.sign * T::from_real(self.ln_abs.exp())
    }
}

/// LU decomposition of a square matrix.
///
/// A distinct result type: the packed factors, interchange record and
/// swap parity live here and never on the original matrix.
///
/// # Example
///
/// ```
/// use numrec::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
/// let lu = a.lu().unwrap();
/// assert!((lu.det() - (-6.0)).abs() < 1e-12);
/// assert_eq!(lu.row_swap_parity(), -1.0);
///
/// let x = lu.solve(&[10.0, 12.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    lu: Matrix<T>,
    pivots: Vec<usize>,
    even: bool,
    warnings: Vec<Warning>,
}

impl<T: LinalgScalar> LuDecomposition<T> {
    /// Decompose a square matrix.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        a.check_square()?;
        let mut lu = a.clone();
        let mut pivots = vec![0usize; a.nrows()];
        let pivoting = lu_in_place(&mut lu, &mut pivots)?;
        let warnings = pivoting
            .substituted
            .iter()
            .map(|&column| Warning::NearSingularPivot { column })
            .collect();
        Ok(Self {
            lu,
            pivots,
            even: pivoting.even,
            warnings,
        })
    }

    /// Dimension of the decomposed matrix.
    #[inline]
    pub fn dim(&self) -> usize {
        self.lu.nrows()
    }

    /// Packed L/U factors.
    #[inline]
    pub fn packed(&self) -> &Matrix<T> {
        &self.lu
    }

    /// Interchange record: row `pivots[j]` was swapped with row `j` at step `j`.
    #[inline]
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Full row permutation `p` such that row `k` of `L U` is row `p[k]` of `A`.
    pub fn permutation(&self) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..self.dim()).collect();
        for (j, &p) in self.pivots.iter().enumerate() {
            perm.swap(j, p);
        }
        perm
    }

    /// `+1` for an even number of row interchanges, `-1` for odd.
    pub fn row_swap_parity(&self) -> T::Real {
        let one = <T::Real as One>::one();
        if self.even {
            one
        } else {
            -one
        }
    }

    /// Separate unit-lower-triangular `L` and upper-triangular `U`.
    pub fn lu_factors(&self) -> (Matrix<T>, Matrix<T>) {
        let n = self.dim();
        let l = Matrix::from_fn(n, n, |i, j| {
            if i == j {
                T::one()
            } else if i > j {
                self.lu[(i, j)]
            } else {
                T::zero()
            }
        });
        let u = Matrix::from_fn(n, n, |i, j| if i <= j { self.lu[(i, j)] } else { T::zero() });
        (l, u)
    }

    /// Columns whose zero pivot was replaced by [`TINY`].
    pub fn near_singular_columns(&self) -> Vec<usize> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                Warning::NearSingularPivot { column } => Some(*column),
                _ => None,
            })
            .collect()
    }

    /// Non-fatal conditions met during the decomposition.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Solve `A x = b`.
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        let n = self.dim();
        if b.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: (n, 1),
                got: (b.len(), 1),
            });
        }
        let mut x = b.to_vec();
        lu_solve(&self.lu, &self.pivots, &mut x);
        Ok(x)
    }

    /// Solve `A X = B` column by column.
    pub fn solve_matrix(&self, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        let n = self.dim();
        if b.nrows() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: (n, b.ncols()),
                got: b.shape(),
            });
        }
        let mut out = Matrix::zeros(n, b.ncols());
        let mut col = vec![T::zero(); n];
        for j in 0..b.ncols() {
            for (i, c) in col.iter_mut().enumerate() {
                *c = b[(i, j)];
            }
            lu_solve(&self.lu, &self.pivots, &mut col);
            for (i, &c) in col.iter().enumerate() {
                out[(i, j)] = c;
            }
        }
        Ok(out)
    }

    /// Matrix inverse by solving `A X = I` column by column.
    pub fn inverse(&self) -> Matrix<T> {
        let n = self.dim();
        let mut inv = Matrix::zeros(n, n);
        let mut e = vec![T::zero(); n];
        for col in 0..n {
            e.iter_mut().for_each(|x| *x = T::zero());
            e[col] = T::one();
            lu_solve(&self.lu, &self.pivots, &mut e);
            for (row, &v) in e.iter().enumerate() {
                inv[(row, col)] = v;
            }
        }
        inv
    }

    /// Determinant: `row_swap_parity * product(diag(U))`.
    pub fn det(&self) -> T {
        let mut d = T::from_real(self.row_swap_parity());
        for i in 0..self.dim() {
            d = d * self.lu[(i, i)];
        }
        d
    }

    /// Log-determinant as a `(sign, ln|det|)` pair.
    pub fn log_det(&self) -> LogDeterminant<T> {
        let mut sign = T::from_real(self.row_swap_parity());
        let mut ln_abs = <T::Real as Zero>::zero();
        for i in 0..self.dim() {
            let u = self.lu[(i, i)];
            let m = u.modulus();
            sign = sign * u.ldiv(T::from_real(m));
            ln_abs = ln_abs + m.ln();
        }
        LogDeterminant { sign, ln_abs }
    }
}

/// Convenience methods on square matrices.
impl<T: LinalgScalar> Matrix<T> {
    /// LU decomposition with implicit-scaling partial pivoting.
    pub fn lu(&self) -> Result<LuDecomposition<T>, LinalgError> {
        LuDecomposition::new(self)
    }

    /// Solve `A x = b` for `x` via LU decomposition.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let a = Matrix::from_rows(3, 3, &[
    ///     2.0_f64, 1.0, -1.0,
    ///     -3.0, -1.0, 2.0,
    ///     -2.0, 1.0, 2.0,
    /// ]);
    /// let x = a.solve(&[8.0, -11.0, -3.0]).unwrap();
    /// assert!((x[0] - 2.0).abs() < 1e-12);
    /// assert!((x[1] - 3.0).abs() < 1e-12);
    /// assert!((x[2] - (-1.0)).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        self.lu()?.solve(b)
    }

    /// Solve `A X = B` for a matrix of right-hand sides.
    pub fn solve_matrix(&self, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        self.lu()?.solve_matrix(b)
    }

    /// Matrix inverse.
    ///
    /// 1x1 and 2x2 matrices use the reciprocal and Cramer's rule; larger
    /// matrices go through LU decomposition. An exactly zero divisor in the
    /// closed forms is reported as `Singular`.
    ///
    /// ```
    /// use numrec::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
    /// let id = &a * &a.inverse().unwrap();
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!(id[(0, 1)].abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<Self, LinalgError> {
        self.check_square()?;
        match self.nrows() {
            0 => Ok(Matrix::zeros(0, 0)),
            1 => {
                let a = self[(0, 0)];
                if a == T::zero() {
                    return Err(LinalgError::Singular);
                }
                Ok(Matrix::filled(1, 1, T::one().ldiv(a)))
            }
            2 => {
                let (a, b) = (self[(0, 0)], self[(0, 1)]);
                let (c, d) = (self[(1, 0)], self[(1, 1)]);
                let det = a * d - b * c;
                if det == T::zero() {
                    return Err(LinalgError::Singular);
                }
                Ok(Matrix::from_rows(
                    2,
                    2,
                    &[
                        d.ldiv(det),
                        (T::zero() - b).ldiv(det),
                        (T::zero() - c).ldiv(det),
                        a.ldiv(det),
                    ],
                ))
            }
            _ => Ok(self.lu()?.inverse()),
        }
    }

    /// Determinant via LU decomposition.
    pub fn det(&self) -> Result<T, LinalgError> {
        self.check_square()?;
        if self.nrows() == 0 {
            return Ok(T::one());
        }
        Ok(self.lu()?.det())
    }

    /// Log-determinant as a `(sign, ln|det|)` pair.
    pub fn log_det(&self) -> Result<LogDeterminant<T>, LinalgError> {
        Ok(self.lu()?.log_det())
    }

    /// One-norm condition number `‖A‖₁ ‖A⁻¹‖₁`.
    pub fn condition_number(&self) -> Result<T::Real, LinalgError> {
        Ok(self.norm_one() * self.inverse()?.norm_one())
    }
}
