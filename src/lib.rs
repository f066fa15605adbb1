//! # numrec
//!
//! Dense real and complex matrices with pivoted LU, inverse, determinant,
//! row reduction, Jacobi eigen-decomposition and Hessenberg reduction,
//! plus a radix-2 FFT engine for windowed, segmented power-spectrum
//! estimation, correlation and convolution.
//!
//! ## Quick start
//!
//! ```
//! use numrec::Matrix;
//!
//! // Solve a linear system Ax = b
//! let a = Matrix::from_rows(3, 3, &[
//!     2.0_f64, 1.0, -1.0,
//!     -3.0, -1.0, 2.0,
//!     -2.0, 1.0, 2.0,
//! ]);
//! let x = a.solve(&[8.0, -11.0, -3.0]).unwrap(); // x = [2, 3, -1]
//! assert!((x[1] - 3.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: Heap-allocated `Matrix<T>` with runtime dimensions and
//!   column-major `Vec<T>` storage. Arithmetic, norms, structural
//!   predicates, sub-matrix access and complex helpers. [`RealMatrix`] and
//!   [`ComplexMatrix`] are the `f64` / `Complex64` aliases.
//!
//! - [`linalg`]: Crout LU with implicit-scaling partial pivoting
//!   ([`linalg::LuDecomposition`]), inverse, determinant and
//!   log-determinant, reduced row-echelon form, Jacobi symmetric
//!   eigensolver ([`linalg::SymmetricEigen`]) and Householder Hessenberg
//!   reduction. Free functions operate on `&mut impl MatrixMut<T>` for
//!   in-place use; result structs offer the higher-level API, and
//!   convenience methods sit on `Matrix`: `a.solve(&b)`, `a.inverse()`,
//!   `a.det()`, `a.symmetric_eigen()`.
//!
//! - [`fft`]: Radix-2 transform over interleaved buffers, windows,
//!   [`fft::FourierTransform`] engine, power spectra over single,
//!   segmented or overlapped records, correlation, convolution and
//!   short-time spectra.
//!
//! - [`complex`]: Overflow-safe complex division and modulus used by the
//!   decompositions.
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats, used by the eigensolver
//!   - [`LinalgScalar`]: real floats and complex numbers, used by decompositions and norms
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for algorithms
//!
//! ## Errors and warnings
//!
//! Structural problems (shape mismatch, non-square, non-symmetric,
//! non-power-of-two) are returned as [`linalg::LinalgError`] or
//! [`fft::FftError`]. Recoverable numerical conditions (a patched zero
//! pivot, an exhausted sweep budget, an adjusted segmentation) produce a
//! best-effort result carrying [`Warning`]s, and are also logged through
//! `tracing`.
//!
//! ## Cargo features
//!
//! | Feature    | Default | Description |
//! |------------|---------|-------------|
//! | `parallel` | no      | Transform spectral segments and frames on the `rayon` pool |
//! | `serde`    | no      | Serialize settings types and `Complex` |

pub mod complex;
pub mod fft;
pub mod linalg;
pub mod matrix;
pub mod traits;
mod warning;

pub use matrix::{ComplexMatrix, Matrix, RealMatrix};
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};
pub use warning::Warning;

pub use num_complex::{Complex, Complex32, Complex64};
