// Builds the display record for the most recent bar of a symbol
use crate::config::EngineSettings;
use crate::error::{EngineError, Result};
use crate::indicators::{self, slope};
use shared::models::{self, Candle, StockSnapshot};
use shared::utils::price_change;

/// Attaches moving averages, the previous close and the short-term price and
/// volume slopes to the latest bar in `candles`.
///
/// Averages run over every close in `candles`; slopes only over the trailing
/// `settings.slope_window` samples. Fewer than two bars is an error.
pub fn build_snapshot(candles: &[Candle], settings: &EngineSettings) -> Result<StockSnapshot> {
    let [.., previous, latest] = candles else {
        return Err(EngineError::InsufficientData {
            indicator: "snapshot",
            required: 2,
            actual: candles.len(),
        });
    };

    let closes = models::closes(candles);
    let volumes = models::volumes(candles);
    let averages = indicators::calculate(&closes)?;

    let price_slope = slope(models::tail(&closes, settings.slope_window), settings.x_step);
    let volume_slope = slope(models::tail(&volumes, settings.slope_window), settings.x_step);

    tracing::debug!(
        symbol = %latest.symbol,
        bars = candles.len(),
        sma = averages.sma,
        ema = averages.ema,
        price_slope,
        volume_slope,
        "Built stock snapshot"
    );

    Ok(StockSnapshot {
        symbol: latest.symbol.clone(),
        timestamp: latest.timestamp,
        open: latest.open,
        high: latest.high,
        low: latest.low,
        close: latest.close,
        volume: latest.volume,
        sma: averages.sma,
        previous_sma: averages.previous_sma,
        ema: averages.ema,
        previous_price: previous.close,
        price_change: price_change(latest.close, previous.close),
        price_slope,
        volume_slope,
    })
}
