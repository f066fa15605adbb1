use approx::assert_relative_eq;
use numrec::fft::{
    convolve_linear, correlate, fft, fft_real, frequencies, ifft, radix2_fft, Direction, FftError,
    FourierTransform, PowerSpectrum, Segmentation, SpectrumSettings, Window,
};
use numrec::{Complex64, Warning};
use std::f64::consts::PI;

const TOL: f64 = 1e-10;

fn sine(n: usize, freq: f64, dt: f64) -> Vec<f64> {
    (0..n).map(|i| (2.0 * PI * freq * i as f64 * dt).sin()).collect()
}

// ── Kernel ──────────────────────────────────────────────────────────

#[test]
fn impulse_has_flat_spectrum() {
    let mut x = vec![Complex64::new(0.0, 0.0); 16];
    x[0] = Complex64::new(1.0, 0.0);
    for z in fft(&x).unwrap() {
        assert_relative_eq!(z.re, 1.0, epsilon = TOL);
        assert_relative_eq!(z.im, 0.0, epsilon = TOL);
    }
}

#[test]
fn interleaved_kernel_single_bin() {
    // x_j = e^{2πi j/8} lands entirely in bin 1 under the forward kernel.
    let n = 8;
    let mut buf: Vec<f64> = (0..n)
        .flat_map(|j| {
            let phase = 2.0 * PI * j as f64 / n as f64;
            [phase.cos(), phase.sin()]
        })
        .collect();
    radix2_fft(&mut buf, Direction::Forward).unwrap();
    for k in 0..n {
        let expected = if k == 1 { n as f64 } else { 0.0 };
        assert_relative_eq!(buf[2 * k], expected, epsilon = TOL);
        assert_relative_eq!(buf[2 * k + 1], 0.0, epsilon = TOL);
    }
}

#[test]
fn kernel_rejects_bad_buffers() {
    let mut odd = vec![0.0; 7];
    assert!(radix2_fft(&mut odd, Direction::Forward).is_err());
    let mut six = vec![0.0; 12];
    assert!(matches!(
        radix2_fft(&mut six, Direction::Inverse).unwrap_err(),
        FftError::InvalidLength { len: 6, .. }
    ));
}

#[test]
fn forward_then_inverse_restores_record() {
    let x: Vec<Complex64> = (0..64)
        .map(|i| Complex64::new((i as f64 * 0.37).sin(), (i as f64 * 0.11).cos()))
        .collect();
    let back = ifft(&fft(&x).unwrap()).unwrap();
    for (a, b) in x.iter().zip(&back) {
        assert_relative_eq!(a.re, b.re, epsilon = TOL);
        assert_relative_eq!(a.im, b.im, epsilon = TOL);
    }
}

#[test]
fn real_input_has_hermitian_spectrum() {
    let x: Vec<f64> = (0..32).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
    let s = fft_real(&x).unwrap();
    for k in 1..32 {
        assert_relative_eq!(s[k].re, s[32 - k].re, epsilon = 1e-9);
        assert_relative_eq!(s[k].im, -s[32 - k].im, epsilon = 1e-9);
    }
}

#[test]
fn frequency_axis() {
    let f = frequencies(8, 0.125);
    assert_eq!(f, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}

// ── Engine ──────────────────────────────────────────────────────────

#[test]
fn engine_pads_and_inverts() {
    let x = sine(100, 3.0, 0.01);
    let mut ft = FourierTransform::from_real(&x).unwrap();
    assert_eq!(ft.padded_length(), 128);
    let back = ft.inverse();
    assert_eq!(back.len(), 128);
    for (i, z) in back.iter().enumerate() {
        let expected = x.get(i).copied().unwrap_or(0.0);
        assert_relative_eq!(z.re, expected, epsilon = TOL);
    }
}

#[test]
fn engine_windowed_inverse_is_windowed_record() {
    let x = vec![1.0; 16];
    let mut ft = FourierTransform::from_real(&x).unwrap();
    ft.set_window(Window::Hamming);
    let back = ft.inverse();
    let w = Window::Hamming.weights(16);
    for (z, wi) in back.iter().zip(&w) {
        assert_relative_eq!(z.re, *wi, epsilon = TOL);
    }
    assert_relative_eq!(w[0], 1.0, epsilon = TOL);
    assert_relative_eq!(w[15], 1.0, epsilon = TOL);
}

// ── Power spectrum ──────────────────────────────────────────────────

#[test]
fn tone_located_with_every_window() {
    let dt = 1.0 / 256.0;
    let x = sine(1024, 32.0, dt);
    for window in [
        Window::None,
        Window::Bartlett,
        Window::Welch,
        Window::Hann,
        Window::Hamming,
        Window::Kaiser(6.0),
        Window::Gaussian(0.4),
    ] {
        let settings = SpectrumSettings {
            sample_interval: dt,
            window,
            segmentation: Segmentation::Length(256),
            overlap: true,
        };
        let ps = PowerSpectrum::from_real(&x, &settings).unwrap();
        assert_eq!(ps.segment_count(), 7, "{}", window);
        assert!(ps.warnings().is_empty());
        let (f, _) = ps.peak().unwrap();
        assert_relative_eq!(f, 32.0, epsilon = TOL);
    }
}

#[test]
fn discarded_samples_reported() {
    let x = sine(100, 5.0, 0.01);
    let settings = SpectrumSettings {
        sample_interval: 0.01,
        segmentation: Segmentation::Length(32),
        overlap: true,
        ..Default::default()
    };
    let ps = PowerSpectrum::from_real(&x, &settings).unwrap();
    assert_eq!(ps.segment_count(), 5);
    assert_eq!(ps.warnings(), &[Warning::SamplesDiscarded { count: 4 }]);
}

#[test]
fn short_record_zero_padded_to_segment() {
    let settings = SpectrumSettings {
        segmentation: Segmentation::Length(64),
        ..Default::default()
    };
    let ps = PowerSpectrum::from_real(&[1.0; 40], &settings).unwrap();
    assert_eq!(ps.segment_length(), 64);
    assert_eq!(ps.psd().len(), 33);
    assert_eq!(ps.warnings(), &[Warning::ZeroPadded { count: 24 }]);
}

#[test]
fn count_applies_to_padded_record() {
    // 1000 samples zero-filled to 1024 split into four blocks of 256.
    let dt = 1.0 / 256.0;
    let x = sine(1000, 32.0, dt);
    let settings = SpectrumSettings {
        sample_interval: dt,
        segmentation: Segmentation::Count(4),
        ..Default::default()
    };
    let ps = PowerSpectrum::from_real(&x, &settings).unwrap();
    assert_eq!(ps.segment_length(), 256);
    assert_eq!(ps.segment_count(), 4);
    assert!(!ps.overlap());
    assert!(ps.warnings().is_empty());
    let (f, _) = ps.peak().unwrap();
    assert_relative_eq!(f, 32.0, epsilon = TOL);
}

#[test]
fn auto_segmentation_of_uneven_records() {
    let settings = SpectrumSettings {
        segmentation: Segmentation::Auto,
        ..Default::default()
    };
    let ps = PowerSpectrum::from_real(&sine(1000, 0.1, 1.0), &settings).unwrap();
    assert_eq!((ps.segment_length(), ps.segment_count()), (512, 2));
    assert!(ps.warnings().is_empty());

    let ps = PowerSpectrum::from_real(&sine(3000, 0.1, 1.0), &settings).unwrap();
    assert_eq!((ps.segment_length(), ps.segment_count()), (1024, 2));
    assert_eq!(ps.warnings(), &[Warning::SamplesDiscarded { count: 952 }]);
}

#[test]
fn unwindowed_tone_peak_is_mean_square() {
    // Bins are scaled by 1/(L Σw²) with the negative frequency folded in, so
    // a cosine of amplitude A on bin k reads A²/2.
    let amplitude = 2.0;
    let x: Vec<f64> = (0..64)
        .map(|i| amplitude * (2.0 * PI * 8.0 * i as f64 / 64.0).cos())
        .collect();
    for window in [Window::None, Window::Rectangular] {
        let settings = SpectrumSettings {
            window,
            ..Default::default()
        };
        let ps = PowerSpectrum::from_real(&x, &settings).unwrap();
        let (f, p) = ps.peak().unwrap();
        assert_relative_eq!(f, 0.125, epsilon = TOL);
        assert_relative_eq!(p, amplitude * amplitude / 2.0, epsilon = TOL);
    }
}

#[test]
fn inexact_count_is_adjusted() {
    let settings = SpectrumSettings {
        segmentation: Segmentation::Count(3),
        ..Default::default()
    };
    let ps = PowerSpectrum::from_real(&[0.5; 64], &settings).unwrap();
    assert!(matches!(ps.warnings()[0], Warning::SegmentationAdjusted { .. }));
}

#[test]
fn exact_overlapping_count() {
    // Three half-overlapped segments of 32 tile 64 samples.
    let x = sine(64, 0.125, 1.0);
    let settings = SpectrumSettings {
        segmentation: Segmentation::Count(3),
        overlap: true,
        ..Default::default()
    };
    let ps = PowerSpectrum::from_real(&x, &settings).unwrap();
    assert_eq!(ps.segment_length(), 32);
    assert_eq!(ps.segment_count(), 3);
    assert!(ps.overlap());
    assert!(ps.warnings().is_empty());
}

#[test]
fn complex_record_spectrum() {
    let x: Vec<Complex64> = (0..64)
        .map(|i| Complex64::from_polar(1.0, 2.0 * PI * 4.0 * i as f64 / 64.0))
        .collect();
    let ps = PowerSpectrum::from_complex(&x, &SpectrumSettings::default()).unwrap();
    // Unit-modulus record: mean square is one.
    assert_relative_eq!(ps.total_power(), 1.0, epsilon = TOL);
    assert_eq!(ps.peak().unwrap().0, 4.0 / 64.0);
}

// ── Correlation and convolution ─────────────────────────────────────

#[test]
fn autocorrelation_centred_on_zero_lag() {
    let x = sine(64, 1.0, 1.0 / 64.0);
    let c = correlate(&x, &x, Window::None, 1.0 / 64.0).unwrap();
    assert_eq!(c.lags().len(), 64);
    assert_eq!(c.lags()[32], 0.0);
    let energy: f64 = x.iter().map(|v| v * v).sum();
    assert_relative_eq!(c.values()[32], energy, epsilon = 1e-9);
    assert_eq!(c.peak_lag(), Some(0.0));
}

#[test]
fn convolution_of_boxes_is_triangle() {
    let c = convolve_linear(&[1.0; 4], &[1.0; 4]).unwrap();
    let expected = [1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0];
    assert_eq!(c.len(), expected.len());
    for (a, b) in c.iter().zip(expected) {
        assert_relative_eq!(*a, b, epsilon = TOL);
    }
}

// ── Short-time spectra ──────────────────────────────────────────────

#[test]
fn short_time_frames() {
    let x = sine(256, 0.125, 1.0);
    let mut ft = FourierTransform::from_real(&x).unwrap();
    ft.set_window(Window::Hann);
    let tf = ft.short_time(64, 32).unwrap();
    assert_eq!(tf.times().len(), 7);
    assert_eq!(tf.frequencies().len(), 33);
    for row in tf.power() {
        let peak = row
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) })
            .0;
        assert_eq!(peak, 8);
    }
}
