use core_types::{CoreError, MetricId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Window size must be at least 1, got {0}")]
    InvalidWindow(usize),

    #[error("Unknown metric: '{0}'")]
    UnknownMetric(String),

    #[error("Metric '{0}' needs a comparison series")]
    MissingComparison(MetricId),

    #[error("Degenerate result for metric '{metric}': {reason}")]
    DegenerateScalar { metric: MetricId, reason: &'static str },

    #[error("Invalid series: {0}")]
    InvalidSeries(String),
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownMetric(name) => AnalyticsError::UnknownMetric(name),
            other => AnalyticsError::InvalidSeries(other.to_string()),
        }
    }
}
