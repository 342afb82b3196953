use crate::error::AnalyticsError;
use crate::params::MetricParams;
use crate::registry::{self, MetricEntry, MetricFn};
use crate::report::PerformanceReport;
use crate::stats::DegeneratePolicy;
use crate::window::{PairedWindows, WindowSlicer};
use chrono::NaiveDate;
use core_types::{MetricId, MetricKind, RollingPoint, RollingResult, Series, SeriesView};
use std::collections::BTreeMap;

/// Window counts at or above this are evaluated on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

/// A stateless dispatcher that turns a metric identifier and a series into
/// scalar or rolling results.
///
/// The engine holds no per-call state, so a single instance can be shared
/// across threads and called concurrently on the same `Series`.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    parallel_threshold: usize,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_THRESHOLD)
    }
}

/// The primary series and, for dual-series metrics, the comparison, both
/// truncated to their common trailing length.
struct Aligned<'a> {
    primary: SeriesView<'a>,
    comparison: Option<SeriesView<'a>>,
}

impl AnalyticsEngine {
    /// `parallel_threshold` is the number of windows from which per-window
    /// evaluation is spread over the rayon pool. Use `usize::MAX` to stay
    /// single-threaded.
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Rolling evaluation of `metric`. `window_size = None` uses the full
    /// (aligned) length and yields a single-element result.
    ///
    /// Degenerate windows are reported as NaN; only structural problems
    /// (unknown metric, missing comparison, too little data) are errors.
    #[tracing::instrument(name = "compute", skip(self, series, params), fields(series = series.name()))]
    pub fn compute(
        &self,
        metric: &str,
        series: &Series,
        window_size: Option<usize>,
        params: &MetricParams<'_>,
    ) -> Result<RollingResult, AnalyticsError> {
        let entry = registry::lookup(metric)?;
        self.rolling(entry, series, window_size, params)
    }

    /// Rolling evaluation as `(window end date, value)` pairs.
    pub fn compute_rolling(
        &self,
        metric: &str,
        series: &Series,
        window_size: usize,
        params: &MetricParams<'_>,
    ) -> Result<Vec<(NaiveDate, f64)>, AnalyticsError> {
        Ok(self
            .compute(metric, series, Some(window_size), params)?
            .into_pairs())
    }

    /// Whole-series value of `metric`.
    ///
    /// Unlike the rolling methods, a zero or undefined denominator is an error
    /// here (`DegenerateScalar`): a lone scalar has no way to say "partially
    /// computed".
    #[tracing::instrument(name = "compute_scalar", skip(self, series, params), fields(series = series.name()))]
    pub fn compute_scalar(
        &self,
        metric: &str,
        series: &Series,
        params: &MetricParams<'_>,
    ) -> Result<f64, AnalyticsError> {
        let entry = registry::lookup(metric)?;
        self.scalar(entry, series, params)
    }

    /// Every metric defined at `window_size`, rolled over the series.
    ///
    /// Dual-series metrics are included only when `params` carries a
    /// comparison series. Metrics that need a wider window than requested are
    /// skipped.
    pub fn compute_all(
        &self,
        series: &Series,
        window_size: usize,
        params: &MetricParams<'_>,
    ) -> Result<BTreeMap<MetricId, RollingResult>, AnalyticsError> {
        if window_size == 0 {
            return Err(AnalyticsError::InvalidWindow(window_size));
        }
        let mut results = BTreeMap::new();
        for entry in applicable(params.comparison.is_some()) {
            if window_size < entry.min_window {
                tracing::debug!(metric = %entry.id, window_size, "Skipping metric undefined at this window size.");
                continue;
            }
            let result = self.rolling(entry, series, Some(window_size), params)?;
            results.insert(entry.id, result);
        }
        Ok(results)
    }

    /// Whole-series figures for every applicable metric. Degenerate metrics
    /// are recorded as `None` rather than failing the report.
    pub fn summarize(
        &self,
        series: &Series,
        params: &MetricParams<'_>,
    ) -> Result<PerformanceReport, AnalyticsError> {
        let (Some(&start), Some(&end)) = (series.dates().first(), series.dates().last()) else {
            return Err(AnalyticsError::InsufficientData {
                required: 1,
                available: 0,
            });
        };

        let mut metrics = BTreeMap::new();
        for entry in applicable(params.comparison.is_some()) {
            let value = match self.scalar(entry, series, params) {
                Ok(v) => Some(v),
                Err(AnalyticsError::DegenerateScalar { .. }) => None,
                // A one-point curve has no daily returns; report those as undefined too.
                Err(AnalyticsError::InsufficientData { .. }) if series.len() < entry.min_window => None,
                Err(e) => return Err(e),
            };
            metrics.insert(entry.id, value);
        }

        Ok(PerformanceReport {
            name: series.name().to_string(),
            start,
            end,
            trading_days: series.len(),
            risk_free_rate: params.risk_free_rate,
            comparison: params.comparison.map(|c| c.name().to_string()),
            metrics,
        })
    }

    fn rolling(
        &self,
        entry: &MetricEntry,
        series: &Series,
        window_size: Option<usize>,
        params: &MetricParams<'_>,
    ) -> Result<RollingResult, AnalyticsError> {
        let aligned = align(entry, series, params.comparison)?;
        let window = window_size.unwrap_or(aligned.primary.len());
        self.evaluate(entry, &aligned, window, params, DegeneratePolicy::Nan)
    }

    fn scalar(
        &self,
        entry: &MetricEntry,
        series: &Series,
        params: &MetricParams<'_>,
    ) -> Result<f64, AnalyticsError> {
        let aligned = align(entry, series, params.comparison)?;
        let window = aligned.primary.len();
        let result = self.evaluate(entry, &aligned, window, params, DegeneratePolicy::Raise)?;
        Ok(result.points[0].value)
    }

    fn evaluate(
        &self,
        entry: &MetricEntry,
        aligned: &Aligned<'_>,
        window: usize,
        params: &MetricParams<'_>,
        policy: DegeneratePolicy,
    ) -> Result<RollingResult, AnalyticsError> {
        let available = aligned.primary.len();
        if window == 0 && available > 0 {
            return Err(AnalyticsError::InvalidWindow(window));
        }
        let required = window.max(entry.min_window);
        if available < required {
            return Err(AnalyticsError::InsufficientData {
                required,
                available,
            });
        }
        if window < entry.min_window {
            return Err(AnalyticsError::InsufficientData {
                required: entry.min_window,
                available: window,
            });
        }

        let raw = match entry.func {
            MetricFn::Single(f) => {
                let slicer = WindowSlicer::new(aligned.primary.values(), window)?;
                let parallel = slicer.len() >= self.parallel_threshold;
                tracing::debug!(metric = %entry.id, window, windows = slicer.len(), parallel, "Evaluating metric.");
                slicer.map(parallel, |w| f(w, params))
            }
            MetricFn::Dual(f) => {
                let comparison = aligned
                    .comparison
                    .ok_or(AnalyticsError::MissingComparison(entry.id))?;
                let paired = PairedWindows::new(aligned.primary.values(), comparison.values(), window)?;
                let parallel = paired.window_count() >= self.parallel_threshold;
                tracing::debug!(metric = %entry.id, window, windows = paired.window_count(), parallel, "Evaluating metric.");
                paired.map(parallel, |a, b| f(a, b, params))
            }
        };

        let dates = &aligned.primary.dates()[window - 1..];
        let points = raw
            .into_iter()
            .zip(dates)
            .map(|(value, &date)| {
                Ok(RollingPoint {
                    date,
                    value: policy.resolve(entry.id, value)?,
                })
            })
            .collect::<Result<Vec<_>, AnalyticsError>>()?;

        Ok(RollingResult::new(window, points))
    }
}

/// Registry entries usable with or without a comparison series.
fn applicable(has_comparison: bool) -> impl Iterator<Item = &'static MetricEntry> {
    registry::entries()
        .iter()
        .filter(move |e| has_comparison || e.kind() == MetricKind::SingleSeries)
}

/// Truncates both series of a dual-series metric to their shorter trailing
/// length so that window `k` of each ends on the same offset.
fn align<'a>(
    entry: &MetricEntry,
    series: &'a Series,
    comparison: Option<&'a Series>,
) -> Result<Aligned<'a>, AnalyticsError> {
    if entry.kind() == MetricKind::SingleSeries {
        return Ok(Aligned {
            primary: series.view(),
            comparison: None,
        });
    }

    let comparison = comparison.ok_or(AnalyticsError::MissingComparison(entry.id))?;
    let common = series.len().min(comparison.len());
    let primary = series.trailing(common);
    let other = comparison.trailing(common);

    if primary.dates().last() != other.dates().last() {
        tracing::warn!(
            primary = series.name(),
            comparison = comparison.name(),
            "Series end on different dates; windows are aligned by position only."
        );
    }

    Ok(Aligned {
        primary,
        comparison: Some(other),
    })
}
