//! Robust location and spread estimators.

/// Median of `data`, `None` when empty.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

/// `(center, spread)`: the median and the median absolute deviation.
///
/// Sparse series (most days identical) have a MAD of zero; the spread then
/// falls back to the mean absolute deviation from the median.
pub fn robust_spread(data: &[f64]) -> Option<(f64, f64)> {
    let center = median(data)?;
    let deviations: Vec<f64> = data.iter().map(|x| (x - center).abs()).collect();
    let mad = median(&deviations)?;
    if mad > f64::EPSILON {
        return Some((center, mad));
    }
    let mean_dev = deviations.iter().sum::<f64>() / deviations.len() as f64;
    Some((center, mean_dev))
}
