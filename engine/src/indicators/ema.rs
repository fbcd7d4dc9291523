// Exponential Moving Average (EMA) indicator implementation
use super::sma::{simple_moving_average, MIN_SAMPLES};
use crate::error::{EngineError, Result};

/// Smoothing multiplier for a window of `n` samples: `2 / (n + 1)`.
pub fn multiplier(n: usize) -> f64 {
    2.0 / (n as f64 + 1.0)
}

/// Smooths the latest close against the mean of the preceding window.
///
/// `ema = last * k + previous_sma * (1 - k)` with `k = 2 / (n + 1)`. The seed is
/// the previous-window SMA, not a prior EMA, so this is not the usual recursive
/// EMA and the two give different numbers.
pub fn exponential_moving_average(series: &[f64]) -> Result<f64> {
    let n = series.len();
    if n < MIN_SAMPLES {
        return Err(EngineError::InsufficientData {
            indicator: "EMA",
            required: MIN_SAMPLES,
            actual: n,
        });
    }

    let (_, previous_sma) = simple_moving_average(series)?;
    Ok(smooth(series[n - 1], previous_sma, n))
}

/// Applies the smoothing step once `previous_sma` is known.
pub(crate) fn smooth(last: f64, previous_sma: f64, n: usize) -> f64 {
    let k = multiplier(n);
    let ema = last * k + previous_sma * (1.0 - k);
    tracing::debug!(samples = n, k, ema, "Computed EMA");
    ema
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_ema_calculation() {
        // k = 2/5, previous SMA over [2, 4, 6] = 4
        let ema = exponential_moving_average(&[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert_close(ema, 8.0 * 0.4 + 4.0 * 0.6);
        assert_close(ema, 5.6);
    }

    #[test]
    fn test_ema_differs_from_recursive_ema() {
        let series = [10.0, 11.0, 12.0, 13.0, 14.0];
        let k = multiplier(series.len());
        let mut recursive = series[0];
        for v in &series[1..] {
            recursive = v * k + recursive * (1.0 - k);
        }
        let ema = exponential_moving_average(&series).unwrap();
        // previous SMA = 11.5, k = 1/3
        assert_close(ema, 14.0 / 3.0 + 11.5 * 2.0 / 3.0);
        assert!((ema - recursive).abs() > 1e-6);
    }

    #[test]
    fn test_ema_constant_series() {
        let ema = exponential_moving_average(&[42.25; 5]).unwrap();
        assert_close(ema, 42.25);
    }

    #[test]
    fn test_ema_insufficient_data() {
        let err = exponential_moving_average(&[7.0]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientData { indicator: "EMA", required: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_multiplier() {
        assert_close(multiplier(4), 0.4);
        assert_close(multiplier(1), 1.0);
    }
}
