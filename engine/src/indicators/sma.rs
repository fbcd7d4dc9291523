// Simple Moving Average (SMA) over a whole closing-price window
use crate::error::{EngineError, Result};

/// Minimum window length; the previous-window mean divides by `n - 1`.
pub const MIN_SAMPLES: usize = 2;

/// Returns `(sma, previous_sma)` for `series`.
///
/// `sma` is the mean of every sample, summed in index order. `previous_sma` is
/// the mean of the window without its last sample, derived from the same sum as
/// `(sum - last) / (n - 1)` rather than by summing again.
pub fn simple_moving_average(series: &[f64]) -> Result<(f64, f64)> {
    let n = series.len();
    if n < MIN_SAMPLES {
        return Err(EngineError::InsufficientData {
            indicator: "SMA",
            required: MIN_SAMPLES,
            actual: n,
        });
    }

    let sum: f64 = series.iter().sum();
    let last = series[n - 1];
    let sma = sum / n as f64;
    let previous_sma = (sum - last) / (n - 1) as f64;

    tracing::debug!(samples = n, sma, previous_sma, "Computed SMA");
    Ok((sma, previous_sma))
}
