use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One output of a rolling computation, stamped with the date its window ends on.
///
/// `value` is NaN when the window hit a zero or undefined denominator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// The ordered output of a rolling computation.
///
/// Element `k` belongs to the window ending at day `k + window_size - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingResult {
    pub window_size: usize,
    pub points: Vec<RollingPoint>,
}

impl RollingResult {
    pub fn new(window_size: usize, points: Vec<RollingPoint>) -> Self {
        Self {
            window_size,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The bare values, in window order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Number of windows that produced NaN.
    pub fn nan_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_nan()).count()
    }

    pub fn into_pairs(self) -> Vec<(NaiveDate, f64)> {
        self.points.into_iter().map(|p| (p.date, p.value)).collect()
    }
}
