/// Computes the arithmetic mean of a slice of values. Returns `None` for empty
/// input.
///
/// Values are summed in ascending order so the result does not depend on the
/// order the series was filled in.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(sorted.iter().sum::<f64>() / sorted.len() as f64)
}

/// Mean of integer scores.
pub fn mean_i32(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: i64 = values.iter().map(|&v| i64::from(v)).sum();
    Some(total as f64 / values.len() as f64)
}

/// `value - nominal` when a value exists.
pub fn versus(value: Option<f64>, nominal: f64) -> Option<f64> {
    value.map(|v| v - nominal)
}
