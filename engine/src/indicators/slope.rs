// Linear-trend slope of a series against its sample index
//
// The slope is derived from the Pearson correlation of (index, value) scaled by
// the ratio of standard deviations, which equals the ordinary least-squares
// slope. Degenerate input (fewer than two samples, zero variance, or anything
// that would divide by zero) reports no trend as 0.0 instead of failing.

/// Slope of `values` in value units per sample, multiplied by `x_step`.
///
/// Never fails: callers treat `0.0` as "no trend".
pub fn slope(values: &[f64], x_step: f64) -> f64 {
    match pearson_slope(values) {
        Some(per_sample) => {
            let scaled = per_sample * x_step;
            if scaled.is_finite() {
                scaled
            } else {
                tracing::warn!(
                    samples = values.len(),
                    x_step,
                    "Slope overflowed; reporting no trend"
                );
                0.0
            }
        }
        None => {
            tracing::debug!(samples = values.len(), "Degenerate series; reporting no trend");
            0.0
        }
    }
}

/// Per-sample slope, or `None` when the trend is undefined.
fn pearson_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    // A flat window has no trend; its float mean may not equal the value exactly
    if values.iter().all(|v| *v == values[0]) {
        return None;
    }
    let dof = (n - 1) as f64;

    let x_mean = dof / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;

    let x_ss: f64 = (0..n).map(|i| (i as f64 - x_mean).powi(2)).sum();
    let y_ss: f64 = values.iter().map(|v| (v - y_mean).powi(2)).sum();

    let x_std = (x_ss / dof).sqrt();
    let y_std = (y_ss / dof).sqrt();
    if x_std == 0.0 || y_std == 0.0 || !x_std.is_finite() || !y_std.is_finite() {
        return None;
    }

    let products: f64 = values
        .iter()
        .enumerate()
        .map(|(i, v)| ((i as f64 - x_mean) / x_std) * ((v - y_mean) / y_std))
        .sum();
    let correlation = products / dof;
    let slope = correlation * (y_std / x_std);

    tracing::debug!(samples = n, correlation, slope, "Computed trend slope");
    slope.is_finite().then_some(slope)
}
