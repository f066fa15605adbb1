pub(crate) mod hessenberg;
pub(crate) mod jacobi;
pub(crate) mod lu;
pub(crate) mod rref;

pub use hessenberg::{hessenberg, HessenbergDecomposition};
pub use jacobi::{jacobi_eigen, JacobiOutcome, JacobiSettings, SymmetricEigen};
pub use lu::{lu_in_place, lu_solve, LogDeterminant, LuDecomposition, LuPivoting, TINY};
pub use rref::reduced_row_echelon_in_place;

use thiserror::Error;

/// Errors from matrix operations and decompositions.
///
/// Structural problems (shapes, squareness, symmetry) are reported
/// immediately. A genuinely zero row or column is reported as
/// [`LinalgError::Singular`]; an isolated zero pivot met during
/// elimination is patched with [`TINY`] instead and surfaces as a
/// [`crate::Warning::NearSingularPivot`].
///
/// ```
/// use numrec::Matrix;
/// use numrec::linalg::LinalgError;
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 0.0, 0.0]);
/// assert_eq!(a.lu().unwrap_err(), LinalgError::Singular);
///
/// let r = Matrix::<f64>::zeros(2, 3);
/// assert_eq!(r.det().unwrap_err(), LinalgError::NotSquare { rows: 2, cols: 3 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinalgError {
    /// Operand shapes are incompatible.
    #[error("dimension mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, got.0, got.1)]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// The operation requires a square matrix.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    /// The eigensolver requires a symmetric matrix.
    #[error("matrix is not symmetric")]
    NotSymmetric,
    /// A row or column is entirely zero, or a closed-form divisor is zero.
    #[error("matrix is singular")]
    Singular,
}
