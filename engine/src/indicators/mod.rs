// Technical indicators module
pub mod ema;
pub mod slope;
pub mod sma;

pub use ema::exponential_moving_average;
pub use slope::slope;
pub use sma::simple_moving_average;

use crate::error::Result;
use shared::models::IndicatorResult;

/// Computes SMA, previous SMA and EMA over one closing-price window.
///
/// Either every value is produced or the call fails with
/// [`EngineError::InsufficientData`](crate::error::EngineError::InsufficientData).
pub fn calculate(closes: &[f64]) -> Result<IndicatorResult> {
    let (sma, previous_sma) = simple_moving_average(closes)?;
    let ema = ema::smooth(closes[closes.len() - 1], previous_sma, closes.len());
    Ok(IndicatorResult { sma, previous_sma, ema })
}
