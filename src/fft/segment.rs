use super::settings::Segmentation;
use super::{is_power_of_two, next_power_of_two, FftError};
use crate::Warning;

/// Resolved block layout for spectral estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SegmentPlan {
    /// Power-of-two block length.
    pub length: usize,
    pub count: usize,
    pub overlap: bool,
}

impl SegmentPlan {
    fn single(length: usize) -> Self {
        Self {
            length,
            count: 1,
            overlap: false,
        }
    }

    /// Distance between the starts of consecutive segments.
    pub fn step(&self) -> usize {
        if self.overlap {
            self.length / 2
        } else {
            self.length
        }
    }

    /// Samples spanned by all segments: `(K+1)L/2` overlapped, `K L` otherwise.
    pub fn span(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            (self.count - 1) * self.step() + self.length
        }
    }

    fn describe(&self) -> String {
        if self.count == 1 {
            format!("single block of {}", self.length)
        } else {
            format!(
                "{} {}segments of length {}",
                self.count,
                if self.overlap { "overlapping " } else { "" },
                self.length
            )
        }
    }
}

/// Resolve the requested segmentation against a record of `n` samples.
///
/// `Count` and `Auto` lay segments over the record zero-filled to the next
/// power of two, the same working length `Single` uses, so that padding
/// alone never raises a warning. Non-fatal adjustments are appended to
/// `warnings`.
pub(crate) fn plan(
    n: usize,
    segmentation: Segmentation,
    overlap: bool,
    warnings: &mut Vec<Warning>,
) -> Result<SegmentPlan, FftError> {
    if n == 0 {
        return Err(FftError::Empty);
    }
    let plan = match segmentation {
        Segmentation::Single => SegmentPlan::single(next_power_of_two(n)),
        Segmentation::Length(length) => by_length(n, length, overlap, warnings)?,
        Segmentation::Count(0) => {
            return Err(FftError::Configuration("segment count must be at least one".into()));
        }
        Segmentation::Count(count) => match exact_count(next_power_of_two(n), count, overlap) {
            Some(p) => p,
            None => {
                let p = auto(n, warnings)?;
                Warning::SegmentationAdjusted {
                    requested: format!(
                        "{}{}",
                        segmentation,
                        if overlap { " (overlapping)" } else { "" }
                    ),
                    chosen: p.describe(),
                }
                .raise(warnings);
                p
            }
        },
        Segmentation::Auto => auto(n, warnings)?,
    };
    tracing::debug!(
        samples = n,
        segment_length = plan.length,
        segment_count = plan.count,
        overlap = plan.overlap,
        "segmentation resolved"
    );
    Ok(plan)
}

fn by_length(
    n: usize,
    length: usize,
    overlap: bool,
    warnings: &mut Vec<Warning>,
) -> Result<SegmentPlan, FftError> {
    if length < 2 || !is_power_of_two(length) {
        return Err(FftError::InvalidLength {
            len: length,
            reason: "segment length must be a power of two of at least 2",
        });
    }
    if n < length {
        Warning::ZeroPadded { count: length - n }.raise(warnings);
        return Ok(SegmentPlan::single(length));
    }
    let count = if overlap { 2 * n / length - 1 } else { n / length };
    let p = SegmentPlan {
        length,
        count,
        overlap: overlap && count > 1,
    };
    let discarded = n - p.span();
    if discarded > 0 {
        Warning::SamplesDiscarded { count: discarded }.raise(warnings);
    }
    Ok(p)
}

/// `Some` when `count` segments tile `len` samples exactly with a
/// power-of-two segment length: `len % (K+1) == 0` and `L = 2 len/(K+1)`
/// with overlap, `len % K == 0` and `L = len/K` without.
fn exact_count(len: usize, count: usize, overlap: bool) -> Option<SegmentPlan> {
    let overlap = overlap && count > 1;
    let (divisor, length) = if overlap {
        (count + 1, 2 * len / (count + 1))
    } else {
        (count, len / count)
    };
    let usable = is_power_of_two(length) && (length >= 2 || count == 1);
    (len % divisor == 0 && usable).then_some(SegmentPlan {
        length,
        count,
        overlap,
    })
}

/// First exact layout of `span` samples over counts `2, 3, ...`, trying
/// each count without overlap before with.
fn split(span: usize) -> Option<SegmentPlan> {
    (2..=span / 2).find_map(|count| {
        exact_count(span, count, false).or_else(|| exact_count(span, count, true))
    })
}

/// Chooses between zero-filling the record to the next power of two and
/// truncating it to the power of two below, whichever wastes fewer samples.
/// Zero-filling wins a tie. The chosen span is
/// then split by [`split`], or kept as one block when too short to split.
fn auto(n: usize, warnings: &mut Vec<Warning>) -> Result<SegmentPlan, FftError> {
    if n < 2 {
        return Err(FftError::Configuration(format!(
            "cannot segment a record of {} sample(s)",
            n
        )));
    }

    let padded = next_power_of_two(n);
    let truncated = padded / 2;
    let span = if n - truncated < padded - n {
        truncated
    } else {
        padded
    };
    if span < n {
        Warning::SamplesDiscarded { count: n - span }.raise(warnings);
    }
    Ok(split(span).unwrap_or_else(|| SegmentPlan::single(span)))
}
