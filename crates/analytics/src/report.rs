use chrono::NaiveDate;
use core_types::MetricId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whole-curve headline figures for one series.
///
/// This struct is the output of `AnalyticsEngine::summarize` and is meant to be
/// handed straight to a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub trading_days: usize,
    pub risk_free_rate: f64,
    /// Name of the comparison series, when dual-series metrics were computed.
    pub comparison: Option<String>,
    /// `None` marks a metric whose whole-curve value is undefined
    /// (e.g. Sharpe on a flat curve).
    pub metrics: BTreeMap<MetricId, Option<f64>>,
}

impl PerformanceReport {
    pub fn get(&self, id: MetricId) -> Option<f64> {
        self.metrics.get(&id).copied().flatten()
    }

    /// Number of metrics that could not be computed on the whole curve.
    pub fn undefined_count(&self) -> usize {
        self.metrics.values().filter(|v| v.is_none()).count()
    }
}
