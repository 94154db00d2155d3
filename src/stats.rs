//! Average temperature curve statistics

/// Samples after this time [s] are considered at steady state
pub const STEADY_STATE_THRESHOLD: f64 = 200.;

/// Arithmetic mean of the finite values, `None` if there is none
pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, n) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0f64, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}
/// Maximum of the finite values, `None` if there is none
pub fn maximum(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .cloned()
        .filter(|v| v.is_finite())
        .reduce(f64::max)
}
/// Mean across columns for each row
///
/// Missing (NaN) readings are left out of the row average,
/// a row without any reading averages to NaN.
pub fn row_mean(columns: &[&[f64]]) -> Vec<f64> {
    let n_row = columns.iter().map(|c| c.len()).min().unwrap_or(0);
    (0..n_row)
        .map(|i| {
            let row: Vec<f64> = columns.iter().map(|c| c[i]).collect();
            mean(&row).unwrap_or(f64::NAN)
        })
        .collect()
}
/// Mean of the values which timestamp is strictly greater than `threshold`
pub fn steady_state_mean(time: &[f64], values: &[f64], threshold: f64) -> Option<f64> {
    let after: Vec<f64> = time
        .iter()
        .zip(values.iter())
        .filter(|&(&t, _)| t > threshold)
        .map(|(_, &v)| v)
        .collect();
    mean(&after)
}

/// Steady state average and maximum of a curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteadyState {
    pub mean: Option<f64>,
    pub max: Option<f64>,
}
impl SteadyState {
    pub fn new(time: &[f64], values: &[f64]) -> Self {
        Self {
            mean: steady_state_mean(time, values, STEADY_STATE_THRESHOLD),
            max: maximum(values),
        }
    }
}
