use super::radix2::radix2_unchecked;
use super::spectrum::{check_sample_interval, windowed_block};
use super::window::Window;
use super::{check_power_of_two, next_power_of_two, Direction, FftError};
use crate::Complex64;

/// Circular cross-correlation re-centred so that zero lag sits in the
/// middle: `values[j]` belongs to lag `(j - n/2) Δt`.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    lags: Vec<f64>,
    values: Vec<f64>,
}

impl Correlation {
    /// Lags from `-n/2 Δt` to `(n/2 - 1) Δt`.
    #[inline]
    pub fn lags(&self) -> &[f64] {
        &self.lags
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Lag of the largest correlation value.
    pub fn peak_lag(&self) -> Option<f64> {
        let mut best: Option<usize> = None;
        for (j, &v) in self.values.iter().enumerate() {
            if best.map_or(true, |b| v > self.values[b]) {
                best = Some(j);
            }
        }
        best.map(|j| self.lags[j])
    }
}

/// Cross-correlation of two equal, power-of-two length real records.
///
/// Both records are windowed, transformed, multiplied as `X · conj(Y)` and
/// transformed back (divided by `n`), so zero lag holds `Σ a_i b_i`.
///
/// ```
/// use numrec::fft::{correlate, Window};
///
/// let x = [0.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0, 0.0];
/// let c = correlate(&x, &x, Window::None, 1.0).unwrap();
/// assert_eq!(c.peak_lag(), Some(0.0));
/// assert_eq!(c.lags()[4], 0.0);
/// ```
pub fn correlate(a: &[f64], b: &[f64], window: Window, sample_interval: f64) -> Result<Correlation, FftError> {
    let to_complex = |x: &[f64]| x.iter().map(|&r| Complex64::new(r, 0.0)).collect::<Vec<_>>();
    correlate_samples(&to_complex(a), &to_complex(b), window, sample_interval)
}

pub(crate) fn correlate_samples(
    a: &[Complex64],
    b: &[Complex64],
    window: Window,
    sample_interval: f64,
) -> Result<Correlation, FftError> {
    if a.len() != b.len() {
        return Err(FftError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    check_power_of_two(a.len())?;
    check_sample_interval(sample_interval)?;

    let n = a.len();
    let weights = window.weights(n);
    let mut x = windowed_block(a, 0, &weights);
    let mut y = windowed_block(b, 0, &weights);
    radix2_unchecked(&mut x, n, Direction::Forward);
    radix2_unchecked(&mut y, n, Direction::Forward);

    // X · conj(Y), in place in x
    for k in 0..n {
        let (xr, xi) = (x[2 * k], x[2 * k + 1]);
        let (yr, yi) = (y[2 * k], y[2 * k + 1]);
        x[2 * k] = xr * yr + xi * yi;
        x[2 * k + 1] = xi * yr - xr * yi;
    }
    radix2_unchecked(&mut x, n, Direction::Inverse);

    let half = n / 2;
    let scale = 1.0 / n as f64;
    let values = (0..n).map(|j| x[2 * ((j + half) % n)] * scale).collect();
    let lags = (0..n).map(|j| (j as f64 - half as f64) * sample_interval).collect();
    Ok(Correlation { lags, values })
}

fn multiply_spectra(a: &[f64], b: &[f64], n: usize) -> Vec<f64> {
    let mut x = vec![0.0; 2 * n];
    let mut y = vec![0.0; 2 * n];
    for (i, &v) in a.iter().enumerate() {
        x[2 * i] = v;
    }
    for (i, &v) in b.iter().enumerate() {
        y[2 * i] = v;
    }
    radix2_unchecked(&mut x, n, Direction::Forward);
    radix2_unchecked(&mut y, n, Direction::Forward);
    for k in 0..n {
        let (xr, xi) = (x[2 * k], x[2 * k + 1]);
        let (yr, yi) = (y[2 * k], y[2 * k + 1]);
        x[2 * k] = xr * yr - xi * yi;
        x[2 * k + 1] = xr * yi + xi * yr;
    }
    radix2_unchecked(&mut x, n, Direction::Inverse);
    let scale = 1.0 / n as f64;
    (0..n).map(|i| x[2 * i] * scale).collect()
}

/// Circular convolution of the two records, each zero-padded to the
/// smallest power of two that holds the longer one.
///
/// ```
/// use numrec::fft::convolve;
///
/// let c = convolve(&[1.0, 2.0, 3.0, 4.0], &[0.0, 1.0]).unwrap();
/// let expected = [4.0, 1.0, 2.0, 3.0];
/// for (a, b) in c.iter().zip(expected) {
///     assert!((a - b).abs() < 1e-12);
/// }
/// ```
pub fn convolve(a: &[f64], b: &[f64]) -> Result<Vec<f64>, FftError> {
    if a.is_empty() || b.is_empty() {
        return Err(FftError::Empty);
    }
    let n = next_power_of_two(a.len().max(b.len()));
    Ok(multiply_spectra(a, b, n))
}

/// Linear convolution, `a.len() + b.len() - 1` samples long.
pub fn convolve_linear(a: &[f64], b: &[f64]) -> Result<Vec<f64>, FftError> {
    if a.is_empty() || b.is_empty() {
        return Err(FftError::Empty);
    }
    let len = a.len() + b.len() - 1;
    let mut out = multiply_spectra(a, b, next_power_of_two(len));
    out.truncate(len);
    Ok(out)
}
