//! Radix-2 Fourier analysis: transform kernel, windows, power spectra,
//! correlation and convolution.
//!
//! All routines work on `f64` samples. The kernel operates on an
//! interleaved `[re0, im0, re1, im1, ...]` buffer whose complex length is a
//! power of two; the higher-level entry points pad with zeros as needed.
//!
//! # Sign convention
//!
//! [`Direction::Forward`] computes `X_k = Σ x_j e^{-2πi jk/N}`,
//! [`Direction::Inverse`] uses `e^{+2πi jk/N}`. Neither normalises; [`ifft`]
//! and [`FourierTransform::inverse`] divide by `N`.
//!
//! ```
//! use numrec::fft::{fft, ifft};
//! use numrec::Complex64;
//!
//! let x = [
//!     Complex64::new(1.0, 0.0),
//!     Complex64::new(0.0, 0.0),
//!     Complex64::new(0.0, 0.0),
//!     Complex64::new(0.0, 0.0),
//! ];
//! let spectrum = fft(&x).unwrap();
//! assert!(spectrum.iter().all(|z| (z.re - 1.0).abs() < 1e-15 && z.im.abs() < 1e-15));
//!
//! let back = ifft(&spectrum).unwrap();
//! assert!((back[0].re - 1.0).abs() < 1e-15);
//! ```

mod correlate;
mod radix2;
mod segment;
mod settings;
mod spectrum;
mod stft;
mod transform;
mod window;

pub use correlate::{convolve, convolve_linear, correlate, Correlation};
pub use radix2::radix2_fft;
pub use settings::{Segmentation, SpectrumSettings};
pub use spectrum::PowerSpectrum;
pub use stft::TimeFrequency;
pub use transform::FourierTransform;
pub use window::{bessel_i0, Window};

use thiserror::Error;

use crate::Complex64;

/// Errors from the Fourier routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FftError {
    /// A length that must be a power of two (or otherwise constrained) is not.
    #[error("invalid length {len}: {reason}")]
    InvalidLength { len: usize, reason: &'static str },
    /// Two inputs that must have equal length do not.
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    /// Settings that cannot be reconciled with the data.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// No samples were supplied.
    #[error("no samples supplied")]
    Empty,
}

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `e^{-2πi jk/N}` kernel.
    Forward,
    /// `e^{+2πi jk/N}` kernel, unnormalised.
    Inverse,
}

impl Direction {
    /// Sign of the exponent.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => -1.0,
            Direction::Inverse => 1.0,
        }
    }
}

/// `true` for 1, 2, 4, 8, ...; `false` for zero.
#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n.is_power_of_two()
}

/// Smallest power of two `>= n` (1 for `n == 0`).
#[inline]
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// One-sided frequency axis for an `n`-point transform: `i / (n Δt)` for
/// `i = 0..=n/2`.
pub fn frequencies(n: usize, sample_interval: f64) -> Vec<f64> {
    let span = n as f64 * sample_interval;
    (0..=n / 2).map(|i| i as f64 / span).collect()
}

pub(crate) fn check_power_of_two(len: usize) -> Result<(), FftError> {
    if len == 0 {
        return Err(FftError::Empty);
    }
    if !is_power_of_two(len) {
        return Err(FftError::InvalidLength {
            len,
            reason: "length must be a power of two",
        });
    }
    Ok(())
}

pub(crate) fn interleave(data: &[Complex64]) -> Vec<f64> {
    data.iter().flat_map(|z| [z.re, z.im]).collect()
}

pub(crate) fn deinterleave(data: &[f64]) -> Vec<Complex64> {
    data.chunks_exact(2).map(|p| Complex64::new(p[0], p[1])).collect()
}

fn transform_complex(x: &[Complex64], direction: Direction) -> Result<Vec<Complex64>, FftError> {
    check_power_of_two(x.len())?;
    let mut buf = interleave(x);
    radix2::radix2_unchecked(&mut buf, x.len(), direction);
    Ok(deinterleave(&buf))
}

/// Forward transform of a power-of-two-length sequence.
pub fn fft(x: &[Complex64]) -> Result<Vec<Complex64>, FftError> {
    transform_complex(x, Direction::Forward)
}

/// Inverse transform of a power-of-two-length spectrum, divided by `N`.
pub fn ifft(x: &[Complex64]) -> Result<Vec<Complex64>, FftError> {
    let scale = 1.0 / x.len() as f64;
    let mut out = transform_complex(x, Direction::Inverse)?;
    out.iter_mut().for_each(|z| *z = *z * scale);
    Ok(out)
}

/// Forward transform of a power-of-two-length real sequence.
pub fn fft_real(x: &[f64]) -> Result<Vec<Complex64>, FftError> {
    check_power_of_two(x.len())?;
    let mut buf: Vec<f64> = x.iter().flat_map(|&r| [r, 0.0]).collect();
    radix2::radix2_unchecked(&mut buf, x.len(), Direction::Forward);
    Ok(deinterleave(&buf))
}
