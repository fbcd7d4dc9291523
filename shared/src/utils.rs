// Small sequence helpers shared by the engine and its callers.

/// Splits `array` into at most `k` contiguous chunks of `ceil(len / k)` elements.
///
/// Order is preserved and the last chunk may be shorter. An empty input or
/// `k == 0` yields no chunks.
pub fn partition<T: Clone>(array: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 || array.is_empty() {
        return Vec::new();
    }
    let chunk_size = array.len().div_ceil(k);
    array.chunks(chunk_size).map(<[T]>::to_vec).collect()
}

/// Relative change from `original` to `final_price`, e.g. `0.05` for +5%.
///
/// Returns `None` when `original` is zero.
pub fn price_change(final_price: f64, original: f64) -> Option<f64> {
    if original == 0.0 {
        return None;
    }
    Some((final_price - original) / original)
}
