use core::fmt;

use super::window::Window;

/// How the data are split into blocks for power-spectrum estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segmentation {
    /// One transform over the whole record, zero-padded to a power of two.
    #[default]
    Single,
    /// Split the record zero-filled to the next power of two, or truncated
    /// to the power of two below, whichever wastes fewer samples.
    Auto,
    /// Exactly this many segments over the record zero-filled to the next
    /// power of two; falls back to [`Segmentation::Auto`] when that length
    /// does not divide into power-of-two segments.
    Count(usize),
    /// Segments of this power-of-two length; trailing samples that do not
    /// fill a segment are dropped.
    Length(usize),
}

impl fmt::Display for Segmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segmentation::Single => f.write_str("single"),
            Segmentation::Auto => f.write_str("auto"),
            Segmentation::Count(k) => write!(f, "{} segments", k),
            Segmentation::Length(l) => write!(f, "segments of length {}", l),
        }
    }
}

/// Spectral-estimation settings.
///
/// ```
/// use numrec::fft::{Segmentation, SpectrumSettings, Window};
///
/// let settings = SpectrumSettings {
///     sample_interval: 1e-3,
///     window: Window::Hann,
///     segmentation: Segmentation::Length(256),
///     overlap: true,
/// };
/// assert_eq!(SpectrumSettings::default().sample_interval, 1.0);
/// # let _ = settings;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpectrumSettings {
    /// Time between consecutive samples (Δt).
    pub sample_interval: f64,
    pub window: Window,
    pub segmentation: Segmentation,
    /// Overlap consecutive segments by half a segment.
    pub overlap: bool,
}

impl Default for SpectrumSettings {
    fn default() -> Self {
        Self {
            sample_interval: 1.0,
            window: Window::None,
            segmentation: Segmentation::Single,
            overlap: false,
        }
    }
}
