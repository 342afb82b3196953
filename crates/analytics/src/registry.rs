use crate::dual;
use crate::error::AnalyticsError;
use crate::params::MetricParams;
use crate::single;
use crate::stats::MetricValue;
use core_types::{MetricId, MetricKind};
use serde::Serialize;

pub type SingleFn = fn(&[f64], &MetricParams<'_>) -> MetricValue;
pub type DualFn = fn(&[f64], &[f64], &MetricParams<'_>) -> MetricValue;

/// A statically known metric implementation.
#[derive(Clone, Copy)]
pub enum MetricFn {
    Single(SingleFn),
    Dual(DualFn),
}

/// How a metric's output should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    Percent,
    Ratio,
    Count,
}

/// One row of the registry.
#[derive(Clone, Copy)]
pub struct MetricEntry {
    pub id: MetricId,
    pub func: MetricFn,
    /// Smallest window the metric is defined on: 1 for level metrics, 2 for
    /// anything built from day-to-day changes, 3 for higher moments.
    pub min_window: usize,
    pub unit: Unit,
}

impl MetricEntry {
    pub fn kind(&self) -> MetricKind {
        match self.func {
            MetricFn::Single(_) => MetricKind::SingleSeries,
            MetricFn::Dual(_) => MetricKind::DualSeries,
        }
    }
}

impl std::fmt::Debug for MetricEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricEntry")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("min_window", &self.min_window)
            .field("unit", &self.unit)
            .finish()
    }
}

const fn single_entry(id: MetricId, func: SingleFn, min_window: usize, unit: Unit) -> MetricEntry {
    MetricEntry {
        id,
        func: MetricFn::Single(func),
        min_window,
        unit,
    }
}

const fn dual_entry(id: MetricId, func: DualFn, unit: Unit) -> MetricEntry {
    MetricEntry {
        id,
        func: MetricFn::Dual(func),
        min_window: 2,
        unit,
    }
}

static REGISTRY: [MetricEntry; 41] = [
    single_entry(MetricId::CumulativeReturn, single::cumulative_return, 1, Unit::Percent),
    single_entry(MetricId::AnnualReturn, single::annual_return, 1, Unit::Percent),
    single_entry(MetricId::Cagr, single::cagr, 1, Unit::Percent),
    single_entry(MetricId::DailyWinRate, single::daily_win_rate, 2, Unit::Percent),
    single_entry(MetricId::MaxDrawdown, single::max_drawdown, 1, Unit::Percent),
    single_entry(MetricId::Volatility, single::volatility, 2, Unit::Percent),
    single_entry(MetricId::SharpeRatio, single::sharpe_ratio, 2, Unit::Ratio),
    single_entry(MetricId::SortinoRatio, single::sortino_ratio, 2, Unit::Ratio),
    single_entry(MetricId::SortinoSquared, single::sortino_squared, 2, Unit::Ratio),
    single_entry(MetricId::UpsideDeviation, single::upside_deviation, 2, Unit::Percent),
    single_entry(MetricId::DownsideDeviation, single::downside_deviation, 2, Unit::Percent),
    single_entry(MetricId::CalmarRatio, single::calmar_ratio, 2, Unit::Ratio),
    single_entry(MetricId::UlcerIndex, single::ulcer_index, 1, Unit::Percent),
    single_entry(MetricId::UlcerPerformanceIndex, single::ulcer_performance_index, 1, Unit::Ratio),
    single_entry(MetricId::GainToPainRatio, single::gain_to_pain_ratio, 2, Unit::Ratio),
    single_entry(MetricId::AvgReturn, single::avg_return, 2, Unit::Percent),
    single_entry(MetricId::AvgWin, single::avg_win, 2, Unit::Percent),
    single_entry(MetricId::AvgLoss, single::avg_loss, 2, Unit::Percent),
    single_entry(MetricId::BestDay, single::best_day, 2, Unit::Percent),
    single_entry(MetricId::WorstDay, single::worst_day, 2, Unit::Percent),
    single_entry(MetricId::ProfitFactor, single::profit_factor, 2, Unit::Ratio),
    single_entry(MetricId::ConsecutiveWins, single::consecutive_wins, 2, Unit::Count),
    single_entry(MetricId::ConsecutiveLosses, single::consecutive_losses, 2, Unit::Count),
    single_entry(MetricId::Skew, single::skew, 3, Unit::Ratio),
    single_entry(MetricId::Kurtosis, single::kurtosis, 3, Unit::Ratio),
    single_entry(MetricId::TailRatio, single::tail_ratio, 2, Unit::Ratio),
    single_entry(MetricId::PayoffRatio, single::payoff_ratio, 2, Unit::Ratio),
    single_entry(MetricId::ExpectedReturn, single::expected_return, 2, Unit::Percent),
    single_entry(MetricId::KellyCriterion, single::kelly_criterion, 2, Unit::Percent),
    single_entry(MetricId::CommonSenseRatio, single::common_sense_ratio, 2, Unit::Ratio),
    single_entry(MetricId::RecoveryFactor, single::recovery_factor, 2, Unit::Ratio),
    single_entry(MetricId::RiskOfRuin, single::risk_of_ruin, 2, Unit::Percent),
    single_entry(MetricId::OutlierWinRatio, single::outlier_win_ratio, 2, Unit::Ratio),
    single_entry(MetricId::OutlierLossRatio, single::outlier_loss_ratio, 2, Unit::Ratio),
    single_entry(MetricId::Exposure, single::exposure, 2, Unit::Percent),
    single_entry(MetricId::CpcIndex, single::cpc_index, 2, Unit::Ratio),
    single_entry(MetricId::AdjustedSortino, single::adjusted_sortino, 2, Unit::Ratio),
    dual_entry(MetricId::RollingCorrelation, dual::rolling_correlation, Unit::Ratio),
    dual_entry(MetricId::Beta, dual::beta, Unit::Ratio),
    dual_entry(MetricId::Carp, dual::carp, Unit::Ratio),
    dual_entry(MetricId::SmartCarp, dual::smart_carp, Unit::Ratio),
];

/// Every registered metric, in display order.
pub fn entries() -> &'static [MetricEntry] {
    &REGISTRY
}

pub fn entry(id: MetricId) -> &'static MetricEntry {
    // The table is laid out in `MetricId::ALL` order; the unit test below pins that.
    &REGISTRY[id as usize]
}

/// Resolves a user-supplied identifier, failing before any computation is attempted.
pub fn lookup(name: &str) -> Result<&'static MetricEntry, AnalyticsError> {
    let id: MetricId = name.parse()?;
    Ok(entry(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_follows_metric_order() {
        assert_eq!(entries().len(), MetricId::ALL.len());
        for (row, id) in entries().iter().zip(MetricId::ALL) {
            assert_eq!(row.id, id);
            assert_eq!(entry(id).id, id);
            assert_eq!(row.kind(), id.kind());
        }
    }

    #[test]
    fn test_lookup_unknown_metric() {
        assert_eq!(
            lookup("omega").unwrap_err(),
            AnalyticsError::UnknownMetric("omega".to_string())
        );
        assert_eq!(lookup("Sharpe Ratio").unwrap().id, MetricId::SharpeRatio);
    }

    #[test]
    fn test_percentage_metrics_are_tagged_as_percent() {
        for id in [MetricId::UlcerIndex, MetricId::MaxDrawdown, MetricId::Exposure] {
            assert_eq!(entry(id).unit, Unit::Percent);
        }
        assert_eq!(entry(MetricId::UlcerPerformanceIndex).unit, Unit::Ratio);
        assert_eq!(entry(MetricId::Skew).min_window, 3);
    }
}
