use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One bar of historical quotes. Dividend and split columns are not carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Moving averages computed over one closing-price window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub sma: f64,
    pub previous_sma: f64,
    pub ema: f64,
}

/// The display record for the latest bar of a symbol, with its indicators attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub sma: f64,
    pub previous_sma: f64,
    pub ema: f64,
    pub previous_price: f64,
    // None when the previous close is zero
    pub price_change: Option<f64>,
    pub price_slope: f64,
    pub volume_slope: f64,
}

/// Closing prices in bar order.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Volumes in bar order.
pub fn volumes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.volume).collect()
}

/// The last `n` samples of `series`, or the whole series when it is shorter.
pub fn tail<T>(series: &[T], n: usize) -> &[T] {
    &series[series.len().saturating_sub(n)..]
}
