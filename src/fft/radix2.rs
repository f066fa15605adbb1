use core::f64::consts::PI;

use super::{Direction, FftError};

/// In-place radix-2 transform of an interleaved `[re, im, ...]` buffer.
///
/// `data.len()` must be `2 n` with `n` a power of two. The result is not
/// normalised: a forward pass followed by an inverse pass scales the input
/// by `n`.
///
/// ```
/// use numrec::fft::{radix2_fft, Direction};
///
/// let mut buf = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
/// radix2_fft(&mut buf, Direction::Forward).unwrap();
/// assert_eq!(buf, [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
/// ```
pub fn radix2_fft(data: &mut [f64], direction: Direction) -> Result<(), FftError> {
    if data.len() % 2 != 0 {
        return Err(FftError::InvalidLength {
            len: data.len(),
            reason: "interleaved buffer must have even length",
        });
    }
    let n = data.len() / 2;
    super::check_power_of_two(n)?;
    radix2_unchecked(data, n, direction);
    Ok(())
}

/// Kernel behind [`radix2_fft`]; `n` complex points, not re-validated.
pub(crate) fn radix2_unchecked(data: &mut [f64], n: usize, direction: Direction) {
    debug_assert_eq!(data.len(), 2 * n);
    debug_assert!(n.is_power_of_two());
    if n < 2 {
        return;
    }

    // Bit-reversal permutation
    let mut j = 0;
    for i in 1..n {
        let mut k = n >> 1;
        while j >= k {
            j -= k;
            k >>= 1;
        }
        j += k;
        if i < j {
            data.swap(2 * i, 2 * j);
            data.swap(2 * i + 1, 2 * j + 1);
        }
    }

    // Butterflies; twiddles advance by the trigonometric recurrence
    let sign = direction.sign();
    let mut mmax = 1;
    while mmax < n {
        let istep = mmax << 1;
        let theta = sign * PI / mmax as f64;
        let wtemp = (0.5 * theta).sin();
        let wpr = -2.0 * wtemp * wtemp;
        let wpi = theta.sin();
        let (mut wr, mut wi) = (1.0, 0.0);
        for m in 0..mmax {
            let mut i = m;
            while i < n {
                let (ir, jr) = (2 * i, 2 * (i + mmax));
                let tempr = wr * data[jr] - wi * data[jr + 1];
                let tempi = wr * data[jr + 1] + wi * data[jr];
                data[jr] = data[ir] - tempr;
                data[jr + 1] = data[ir + 1] - tempi;
                data[ir] += tempr;
                data[ir + 1] += tempi;
                i += istep;
            }
            let wt = wr;
            wr = wr * wpr - wi * wpi + wr;
            wi = wi * wpr + wt * wpi + wi;
        }
        mmax = istep;
    }
}
