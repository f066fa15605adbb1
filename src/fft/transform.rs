use super::correlate::{correlate_samples, Correlation};
use super::radix2::radix2_unchecked;
use super::settings::{Segmentation, SpectrumSettings};
use super::spectrum::{self, check_sample_interval, windowed_block, PowerSpectrum};
use super::stft::{self, TimeFrequency};
use super::window::Window;
use super::{deinterleave, interleave, next_power_of_two, Direction, FftError};
use crate::Complex64;

/// Fourier analysis engine for one record of samples.
///
/// The record is kept as supplied; the working length is the next power
/// of two, with zeros appended. Forward transforms are windowed and
/// cached until a setting changes. Each engine owns its buffers, so
/// separate threads should use separate engines.
///
/// # Example
///
/// ```
/// use numrec::fft::{FourierTransform, Window};
///
/// let samples: Vec<f64> = (0..100).map(|i| (i as f64 * 0.3).sin()).collect();
/// let mut ft = FourierTransform::from_real(&samples).unwrap();
/// assert_eq!(ft.original_length(), 100);
/// assert_eq!(ft.padded_length(), 128);
///
/// ft.set_window(Window::Hann);
/// let spectrum = ft.transform().to_vec();
/// assert_eq!(spectrum.len(), 128);
/// ```
#[derive(Debug, Clone)]
pub struct FourierTransform {
    samples: Vec<Complex64>,
    padded_length: usize,
    settings: SpectrumSettings,
    spectrum: Option<Vec<Complex64>>,
}

impl FourierTransform {
    /// Engine over a real record.
    pub fn from_real(samples: &[f64]) -> Result<Self, FftError> {
        let data: Vec<Complex64> = samples.iter().map(|&r| Complex64::new(r, 0.0)).collect();
        Self::from_complex(&data)
    }

    /// Engine over a complex record.
    pub fn from_complex(samples: &[Complex64]) -> Result<Self, FftError> {
        if samples.is_empty() {
            return Err(FftError::Empty);
        }
        let padded_length = next_power_of_two(samples.len());
        tracing::debug!(
            original = samples.len(),
            padded = padded_length,
            "fourier transform record"
        );
        Ok(Self {
            samples: samples.to_vec(),
            padded_length,
            settings: SpectrumSettings::default(),
            spectrum: None,
        })
    }

    /// Replace all settings at once.
    pub fn with_settings(mut self, settings: SpectrumSettings) -> Result<Self, FftError> {
        check_sample_interval(settings.sample_interval)?;
        self.settings = settings;
        self.spectrum = None;
        Ok(self)
    }

    #[inline]
    pub fn settings(&self) -> &SpectrumSettings {
        &self.settings
    }

    pub fn set_window(&mut self, window: Window) {
        self.settings.window = window;
        self.spectrum = None;
    }

    pub fn set_sample_interval(&mut self, sample_interval: f64) -> Result<(), FftError> {
        check_sample_interval(sample_interval)?;
        self.settings.sample_interval = sample_interval;
        Ok(())
    }

    pub fn set_segmentation(&mut self, segmentation: Segmentation, overlap: bool) {
        self.settings.segmentation = segmentation;
        self.settings.overlap = overlap;
    }

    /// Number of samples supplied.
    #[inline]
    pub fn original_length(&self) -> usize {
        self.samples.len()
    }

    /// Power-of-two working length.
    #[inline]
    pub fn padded_length(&self) -> usize {
        self.padded_length
    }

    /// The record as supplied, without padding.
    #[inline]
    pub fn samples(&self) -> &[Complex64] {
        &self.samples
    }

    /// The record zero-padded to [`Self::padded_length`].
    pub fn padded_samples(&self) -> Vec<Complex64> {
        let mut out = self.samples.clone();
        out.resize(self.padded_length, Complex64::new(0.0, 0.0));
        out
    }

    /// Window weights over the padded length.
    pub fn window_weights(&self) -> Vec<f64> {
        self.settings.window.weights(self.padded_length)
    }

    /// `Σ w²` over the padded length.
    pub fn sum_of_squared_weights(&self) -> f64 {
        self.settings.window.sum_of_squared_weights(self.padded_length)
    }

    /// Windowed forward transform of the padded record.
    pub fn transform(&mut self) -> &[Complex64] {
        let n = self.padded_length;
        let (samples, window) = (&self.samples, self.settings.window);
        let spectrum = self.spectrum.get_or_insert_with(|| {
            let mut buf = windowed_block(samples, 0, &window.weights(n));
            radix2_unchecked(&mut buf, n, Direction::Forward);
            deinterleave(&buf)
        });
        spectrum.as_slice()
    }

    /// Cached forward transform, if computed since the last settings change.
    #[inline]
    pub fn transformed(&self) -> Option<&[Complex64]> {
        self.spectrum.as_deref()
    }

    /// Cached forward transform as `[re0, im0, re1, im1, ...]`.
    pub fn transformed_interleaved(&self) -> Option<Vec<f64>> {
        self.spectrum.as_deref().map(interleave)
    }

    /// Inverse transform of the forward spectrum, divided by the padded
    /// length. Recovers the windowed, padded record.
    pub fn inverse(&mut self) -> Vec<Complex64> {
        let n = self.padded_length;
        let mut buf = interleave(self.transform());
        radix2_unchecked(&mut buf, n, Direction::Inverse);
        let scale = 1.0 / n as f64;
        buf.iter_mut().for_each(|v| *v *= scale);
        deinterleave(&buf)
    }

    /// Power spectral density using the current settings.
    pub fn power_spectrum(&self) -> Result<PowerSpectrum, FftError> {
        spectrum::estimate(&self.samples, &self.settings)
    }

    /// Cross-correlation against another record of the same length, using
    /// this engine's window and sample interval.
    pub fn correlate_with(&self, other: &FourierTransform) -> Result<Correlation, FftError> {
        correlate_samples(
            &self.samples,
            &other.samples,
            self.settings.window,
            self.settings.sample_interval,
        )
    }

    /// Short-time power spectra over frames of `frame` samples, `hop` apart.
    pub fn short_time(&self, frame: usize, hop: usize) -> Result<TimeFrequency, FftError> {
        stft::short_time(
            &self.samples,
            frame,
            hop,
            self.settings.window,
            self.settings.sample_interval,
        )
    }
}
