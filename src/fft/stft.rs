#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::spectrum::{check_sample_interval, periodogram, window_for};
use super::window::Window;
use super::{frequencies, is_power_of_two, FftError};
use crate::{Complex64, Matrix};

/// Short-time power spectra: one one-sided periodogram per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeFrequency {
    times: Vec<f64>,
    frequencies: Vec<f64>,
    power: Vec<Vec<f64>>,
}

impl TimeFrequency {
    /// Frame centres in time.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[inline]
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// `power()[frame][bin]`.
    #[inline]
    pub fn power(&self) -> &[Vec<f64>] {
        &self.power
    }

    /// Power as a `frames x bins` matrix.
    pub fn power_matrix(&self) -> Matrix<f64> {
        let rows = self.power.len();
        let cols = self.frequencies.len();
        Matrix::from_fn(rows, cols, |i, j| self.power[i][j])
    }
}

/// Slide a `frame`-sample window along `samples` in steps of `hop`.
pub(crate) fn short_time(
    samples: &[Complex64],
    frame: usize,
    hop: usize,
    window: Window,
    sample_interval: f64,
) -> Result<TimeFrequency, FftError> {
    if frame < 2 || !is_power_of_two(frame) {
        return Err(FftError::InvalidLength {
            len: frame,
            reason: "frame length must be a power of two of at least 2",
        });
    }
    if hop == 0 {
        return Err(FftError::Configuration("hop must be at least one sample".into()));
    }
    if samples.len() < frame {
        return Err(FftError::InvalidLength {
            len: samples.len(),
            reason: "record is shorter than one frame",
        });
    }
    check_sample_interval(sample_interval)?;

    let (weights, energy) = window_for(window, frame)?;
    let count = 1 + (samples.len() - frame) / hop;
    let one = |k: usize| periodogram(samples, k * hop, &weights, energy);

    #[cfg(feature = "parallel")]
    let power: Vec<Vec<f64>> = (0..count).into_par_iter().map(one).collect();
    #[cfg(not(feature = "parallel"))]
    let power: Vec<Vec<f64>> = (0..count).map(one).collect();

    let times = (0..count)
        .map(|k| (k * hop) as f64 * sample_interval + 0.5 * frame as f64 * sample_interval)
        .collect();

    tracing::debug!(frames = count, frame, hop, "short-time transform");
    Ok(TimeFrequency {
        times,
        frequencies: frequencies(frame, sample_interval),
        power,
    })
}
