#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::radix2::radix2_unchecked;
use super::segment::{self, SegmentPlan};
use super::settings::SpectrumSettings;
use super::window::Window;
use super::{frequencies, Direction, FftError};
use crate::{Complex64, Warning};

/// One-sided power spectral density estimate.
///
/// Bins run from DC to Nyquist (`L/2 + 1` values for segment length `L`).
/// Interior bins fold in the mirrored negative frequency. Each segment's
/// periodogram is normalised by `L Σw²` and the segments are averaged.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSpectrum {
    frequencies: Vec<f64>,
    psd: Vec<f64>,
    segment_length: usize,
    segment_count: usize,
    overlap: bool,
    warnings: Vec<Warning>,
}

impl PowerSpectrum {
    /// Estimate from samples with the given settings.
    ///
    /// ```
    /// use numrec::fft::{PowerSpectrum, SpectrumSettings};
    ///
    /// let dt = 1.0 / 64.0;
    /// let x: Vec<f64> = (0..64)
    ///     .map(|i| (2.0 * std::f64::consts::PI * 8.0 * i as f64 * dt).sin())
    ///     .collect();
    /// let settings = SpectrumSettings { sample_interval: dt, ..Default::default() };
    /// let ps = PowerSpectrum::from_real(&x, &settings).unwrap();
    /// let (f, _) = ps.peak().unwrap();
    /// assert!((f - 8.0).abs() < 1e-12);
    /// ```
    pub fn from_real(samples: &[f64], settings: &SpectrumSettings) -> Result<Self, FftError> {
        let data: Vec<Complex64> = samples.iter().map(|&r| Complex64::new(r, 0.0)).collect();
        estimate(&data, settings)
    }

    pub fn from_complex(samples: &[Complex64], settings: &SpectrumSettings) -> Result<Self, FftError> {
        estimate(samples, settings)
    }

    #[inline]
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    #[inline]
    pub fn psd(&self) -> &[f64] {
        &self.psd
    }

    #[inline]
    pub fn segment_length(&self) -> usize {
        self.segment_length
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    #[inline]
    pub fn overlap(&self) -> bool {
        self.overlap
    }

    /// Adjustments made while resolving the segmentation.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// `(frequency, power)` of the largest bin.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.psd
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((i, p)),
            })
            .map(|(i, p)| (self.frequencies[i], p))
    }

    /// Total power `Σ psd`.
    pub fn total_power(&self) -> f64 {
        self.psd.iter().sum()
    }
}

pub(crate) fn check_sample_interval(dt: f64) -> Result<(), FftError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(FftError::Configuration(format!(
            "sample interval must be positive and finite, got {}",
            dt
        )))
    }
}

/// Windowed weights for blocks of `length` and their energy, rejecting
/// windows that vanish on every sample.
pub(crate) fn window_for(window: Window, length: usize) -> Result<(Vec<f64>, f64), FftError> {
    let weights = window.weights(length);
    let energy: f64 = weights.iter().map(|w| w * w).sum();
    if energy == 0.0 {
        return Err(FftError::Configuration(format!(
            "{} window is zero on every sample of a {}-point block",
            window, length
        )));
    }
    Ok((weights, energy))
}

/// Copy of `samples[start..start + weights.len()]`, zero-filled past the
/// end of the record, windowed and interleaved.
pub(crate) fn windowed_block(samples: &[Complex64], start: usize, weights: &[f64]) -> Vec<f64> {
    let mut buf = vec![0.0; 2 * weights.len()];
    for (k, &w) in weights.iter().enumerate() {
        if let Some(z) = samples.get(start + k) {
            buf[2 * k] = z.re * w;
            buf[2 * k + 1] = z.im * w;
        }
    }
    buf
}

/// One-sided periodogram of one block, `L/2 + 1` bins.
pub(crate) fn periodogram(samples: &[Complex64], start: usize, weights: &[f64], energy: f64) -> Vec<f64> {
    let l = weights.len();
    let mut buf = windowed_block(samples, start, weights);
    radix2_unchecked(&mut buf, l, Direction::Forward);

    let power = |k: usize| buf[2 * k] * buf[2 * k] + buf[2 * k + 1] * buf[2 * k + 1];
    let norm = l as f64 * energy;
    let half = l / 2;
    let mut psd = vec![0.0; half + 1];
    psd[0] = power(0) / norm;
    for (i, p) in psd.iter_mut().enumerate().take(half).skip(1) {
        *p = (power(i) + power(l - i)) / norm;
    }
    if half > 0 {
        psd[half] = power(half) / norm;
    }
    psd
}

fn average_segments(samples: &[Complex64], plan: &SegmentPlan, weights: &[f64], energy: f64) -> Vec<f64> {
    let one = |s: usize| periodogram(samples, s * plan.step(), weights, energy);

    #[cfg(feature = "parallel")]
    let blocks: Vec<Vec<f64>> = (0..plan.count).into_par_iter().map(one).collect();
    #[cfg(not(feature = "parallel"))]
    let blocks: Vec<Vec<f64>> = (0..plan.count).map(one).collect();

    let mut psd = vec![0.0; plan.length / 2 + 1];
    for block in &blocks {
        for (acc, v) in psd.iter_mut().zip(block) {
            *acc += v;
        }
    }
    let k = plan.count as f64;
    psd.iter_mut().for_each(|p| *p /= k);
    psd
}

pub(crate) fn estimate(samples: &[Complex64], settings: &SpectrumSettings) -> Result<PowerSpectrum, FftError> {
    check_sample_interval(settings.sample_interval)?;
    let mut warnings = Vec::new();
    let plan = segment::plan(samples.len(), settings.segmentation, settings.overlap, &mut warnings)?;
    let (weights, energy) = window_for(settings.window, plan.length)?;
    let psd = average_segments(samples, &plan, &weights, energy);

    Ok(PowerSpectrum {
        frequencies: frequencies(plan.length, settings.sample_interval),
        psd,
        segment_length: plan.length,
        segment_count: plan.count,
        overlap: plan.overlap,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::{Segmentation, Window};
    use core::f64::consts::PI;

    const TOL: f64 = 1e-10;

    fn tone(n: usize, cycles_per_sample: f64) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * cycles_per_sample * i as f64).cos()).collect()
    }

    #[test]
    fn bin_count_and_axis() {
        let settings = SpectrumSettings {
            sample_interval: 0.01,
            ..Default::default()
        };
        let ps = PowerSpectrum::from_real(&tone(100, 0.1), &settings).unwrap();
        assert_eq!(ps.segment_length(), 128);
        assert_eq!(ps.psd().len(), 65);
        assert!((ps.frequencies()[64] - 50.0).abs() < TOL);
    }

    #[test]
    fn parseval_without_window() {
        // Σ psd = Σ |X_k|² / (N · N) = Σ x² / N
        let x: Vec<f64> = (0..64).map(|i| ((i * 13) % 7) as f64 - 3.0).collect();
        let ps = PowerSpectrum::from_real(&x, &SpectrumSettings::default()).unwrap();
        let mean_square = x.iter().map(|v| v * v).sum::<f64>() / 64.0;
        assert!((ps.total_power() - mean_square).abs() < TOL);
    }

    #[test]
    fn tone_peaks_at_its_frequency() {
        let x = tone(256, 0.125);
        let settings = SpectrumSettings {
            window: Window::Hann,
            segmentation: Segmentation::Length(64),
            overlap: true,
            ..Default::default()
        };
        let ps = PowerSpectrum::from_real(&x, &settings).unwrap();
        assert_eq!(ps.segment_count(), 7);
        assert!(ps.overlap());
        let (f, _) = ps.peak().unwrap();
        assert!((f - 0.125).abs() < TOL);
    }

    #[test]
    fn segment_average_of_stationary_signal() {
        // A periodic record: every segment sees the same block.
        let x = tone(512, 0.25);
        let single = PowerSpectrum::from_real(
            &x[..128],
            &SpectrumSettings::default(),
        )
        .unwrap();
        let settings = SpectrumSettings {
            segmentation: Segmentation::Count(4),
            ..Default::default()
        };
        let averaged = PowerSpectrum::from_real(&x, &settings).unwrap();
        assert_eq!(averaged.segment_count(), 4);
        for (a, b) in averaged.psd().iter().zip(single.psd()) {
            assert!((a - b).abs() < TOL);
        }
    }

    #[test]
    fn degenerate_window_rejected() {
        let settings = SpectrumSettings {
            window: Window::Bartlett,
            ..Default::default()
        };
        assert!(matches!(
            PowerSpectrum::from_real(&[1.0, 2.0], &settings).unwrap_err(),
            FftError::Configuration(_)
        ));
    }

    #[test]
    fn bad_sample_interval() {
        let settings = SpectrumSettings {
            sample_interval: 0.0,
            ..Default::default()
        };
        assert!(PowerSpectrum::from_real(&[1.0; 8], &settings).is_err());
    }

    #[test]
    fn single_sample() {
        let ps = PowerSpectrum::from_real(&[3.0], &SpectrumSettings::default()).unwrap();
        assert_eq!(ps.psd(), &[9.0]);
    }
}
