/// Non-fatal conditions attached to best-effort results.
///
/// Every warning is also emitted through `tracing::warn!` at the point it
/// is raised; the copy stored on the result lets callers inspect it
/// without a subscriber.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Warning {
    /// Jacobi iteration stopped at the sweep limit before the
    /// off-diagonal sum reached zero.
    IterationLimit {
        max_iterations: usize,
        off_diagonal_sum: f64,
    },
    /// A zero pivot in this column was replaced by a tiny constant
    /// during LU decomposition.
    NearSingularPivot { column: usize },
    /// The requested segmentation could not be honoured and another one
    /// was chosen.
    SegmentationAdjusted { requested: String, chosen: String },
    /// Trailing samples that did not fit into whole segments were dropped.
    SamplesDiscarded { count: usize },
    /// Zeros were appended to reach a power-of-two length.
    ZeroPadded { count: usize },
}

impl core::fmt::Display for Warning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Warning::IterationLimit {
                max_iterations,
                off_diagonal_sum,
            } => write!(
                f,
                "iteration limit of {} reached, off-diagonal sum {:e}",
                max_iterations, off_diagonal_sum
            ),
            Warning::NearSingularPivot { column } => {
                write!(f, "zero pivot in column {} replaced by tiny value", column)
            }
            Warning::SegmentationAdjusted { requested, chosen } => {
                write!(f, "segmentation {} replaced by {}", requested, chosen)
            }
            Warning::SamplesDiscarded { count } => write!(f, "{} samples discarded", count),
            Warning::ZeroPadded { count } => write!(f, "{} zeros appended", count),
        }
    }
}

impl Warning {
    /// Log through `tracing` and append to `sink`.
    pub(crate) fn raise(self, sink: &mut Vec<Warning>) {
        tracing::warn!("{}", self);
        sink.push(self);
    }
}
