//! Tapering windows for spectral estimation.
//!
//! For a block of `points` samples the formulas below use `n = points - 1`,
//! so that sample `0` and sample `n` sit at the two ends of the taper.
//!
//! | Window      | Weight `w_i`                                  |
//! |-------------|-----------------------------------------------|
//! | None        | 1                                             |
//! | Rectangular | 1                                             |
//! | Bartlett    | `1 - |(i - n/2) / (n/2)|`                     |
//! | Welch       | `1 - ((i - n/2) / (n/2))²`                    |
//! | Hann        | `(1 - cos(2πi/n)) / 2`                        |
//! | Hamming     | `0.54 + 0.46 cos(2πi/n)`                      |
//! | Kaiser(α)   | `I0(απ √(1 - (2i/n - 1)²)) / I0(απ)`          |
//! | Gaussian(α) | `exp(-½ (α (2i - n) / n)²)`                   |

use core::f64::consts::PI;

/// Window applied to each block before transforming.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Window {
    /// No windowing.
    #[default]
    None,
    Rectangular,
    Bartlett,
    Welch,
    Hann,
    Hamming,
    /// Kaiser window with shape parameter α.
    Kaiser(f64),
    /// Gaussian window with shape parameter α.
    Gaussian(f64),
}

impl Window {
    /// Weight of sample `i` for taper parameter `n = points - 1`.
    pub fn weight(&self, i: usize, n: f64) -> f64 {
        let x = i as f64;
        match *self {
            Window::None | Window::Rectangular => 1.0,
            Window::Bartlett => 1.0 - ((x - n / 2.0) / (n / 2.0)).abs(),
            Window::Welch => {
                let r = (x - n / 2.0) / (n / 2.0);
                1.0 - r * r
            }
            Window::Hann => 0.5 * (1.0 - (2.0 * PI * x / n).cos()),
            Window::Hamming => 0.54 + 0.46 * (2.0 * PI * x / n).cos(),
            Window::Kaiser(alpha) => {
                let r = 2.0 * x / n - 1.0;
                let arg = alpha * PI * (1.0 - r * r).max(0.0).sqrt();
                bessel_i0(arg) / bessel_i0(alpha * PI)
            }
            Window::Gaussian(alpha) => {
                let r = alpha * (2.0 * x - n) / n;
                (-0.5 * r * r).exp()
            }
        }
    }

    /// Weights for a block of `len` samples.
    ///
    /// ```
    /// use numrec::fft::Window;
    /// let w = Window::Hann.weights(5);
    /// assert_eq!(w[0], 0.0);
    /// assert!((w[2] - 1.0).abs() < 1e-15);
    /// ```
    pub fn weights(&self, len: usize) -> Vec<f64> {
        match len {
            0 => Vec::new(),
            1 => vec![1.0],
            _ => {
                let n = (len - 1) as f64;
                (0..len).map(|i| self.weight(i, n)).collect()
            }
        }
    }

    /// `Σ w_i²` over a block of `len` samples.
    pub fn sum_of_squared_weights(&self, len: usize) -> f64 {
        match self {
            Window::None | Window::Rectangular => len as f64,
            _ => self.weights(len).iter().map(|w| w * w).sum(),
        }
    }

    /// Whether the weights differ from all-ones.
    pub fn is_tapered(&self) -> bool {
        !matches!(self, Window::None | Window::Rectangular)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Window::None => "none",
            Window::Rectangular => "rectangular",
            Window::Bartlett => "bartlett",
            Window::Welch => "welch",
            Window::Hann => "hann",
            Window::Hamming => "hamming",
            Window::Kaiser(_) => "kaiser",
            Window::Gaussian(_) => "gaussian",
        }
    }
}

impl core::fmt::Display for Window {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Window::Kaiser(a) | Window::Gaussian(a) => write!(f, "{}({})", self.name(), a),
            _ => f.write_str(self.name()),
        }
    }
}

/// Modified Bessel function of the first kind, order zero.
///
/// Abramowitz & Stegun 9.8.1 / 9.8.2 polynomial approximations, switching
/// at `|x| = 3.75`. Relative error below `2e-7`.
pub fn bessel_i0(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 3.75 {
        let y = (x / 3.75) * (x / 3.75);
        1.0 + y
            * (3.5156229
                + y * (3.0899424 + y * (1.2067492 + y * (0.2659732 + y * (0.0360768 + y * 0.0045813)))))
    } else {
        let y = 3.75 / ax;
        (ax.exp() / ax.sqrt())
            * (0.39894228
                + y * (0.01328592
                    + y * (0.00225319
                        + y * (-0.00157565
                            + y * (0.00916281
                                + y * (-0.02057706 + y * (0.02635537 + y * (-0.01647633 + y * 0.00392377))))))))
    }
}
