use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one registered metric.
///
/// This is a closed set: adding a metric means adding a variant here and an
/// entry in the analytics registry. The compiler then flags every `match`
/// that needs updating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    CumulativeReturn,
    AnnualReturn,
    Cagr,
    DailyWinRate,
    MaxDrawdown,
    Volatility,
    SharpeRatio,
    SortinoRatio,
    SortinoSquared,
    UpsideDeviation,
    DownsideDeviation,
    CalmarRatio,
    UlcerIndex,
    UlcerPerformanceIndex,
    GainToPainRatio,
    AvgReturn,
    AvgWin,
    AvgLoss,
    BestDay,
    WorstDay,
    ProfitFactor,
    ConsecutiveWins,
    ConsecutiveLosses,
    Skew,
    Kurtosis,
    TailRatio,
    PayoffRatio,
    ExpectedReturn,
    KellyCriterion,
    CommonSenseRatio,
    RecoveryFactor,
    RiskOfRuin,
    OutlierWinRatio,
    OutlierLossRatio,
    Exposure,
    CpcIndex,
    AdjustedSortino,
    RollingCorrelation,
    Beta,
    Carp,
    SmartCarp,
}

/// Whether a metric reads one series or a pair of aligned series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    SingleSeries,
    DualSeries,
}

impl MetricId {
    /// Every metric, in the order a selection UI should list them.
    pub const ALL: [MetricId; 41] = [
        MetricId::CumulativeReturn,
        MetricId::AnnualReturn,
        MetricId::Cagr,
        MetricId::DailyWinRate,
        MetricId::MaxDrawdown,
        MetricId::Volatility,
        MetricId::SharpeRatio,
        MetricId::SortinoRatio,
        MetricId::SortinoSquared,
        MetricId::UpsideDeviation,
        MetricId::DownsideDeviation,
        MetricId::CalmarRatio,
        MetricId::UlcerIndex,
        MetricId::UlcerPerformanceIndex,
        MetricId::GainToPainRatio,
        MetricId::AvgReturn,
        MetricId::AvgWin,
        MetricId::AvgLoss,
        MetricId::BestDay,
        MetricId::WorstDay,
        MetricId::ProfitFactor,
        MetricId::ConsecutiveWins,
        MetricId::ConsecutiveLosses,
        MetricId::Skew,
        MetricId::Kurtosis,
        MetricId::TailRatio,
        MetricId::PayoffRatio,
        MetricId::ExpectedReturn,
        MetricId::KellyCriterion,
        MetricId::CommonSenseRatio,
        MetricId::RecoveryFactor,
        MetricId::RiskOfRuin,
        MetricId::OutlierWinRatio,
        MetricId::OutlierLossRatio,
        MetricId::Exposure,
        MetricId::CpcIndex,
        MetricId::AdjustedSortino,
        MetricId::RollingCorrelation,
        MetricId::Beta,
        MetricId::Carp,
        MetricId::SmartCarp,
    ];

    /// The stable identifier used on the command line and in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::CumulativeReturn => "cumulative_return",
            MetricId::AnnualReturn => "annual_return",
            MetricId::Cagr => "cagr",
            MetricId::DailyWinRate => "daily_win_rate",
            MetricId::MaxDrawdown => "max_drawdown",
            MetricId::Volatility => "volatility",
            MetricId::SharpeRatio => "sharpe_ratio",
            MetricId::SortinoRatio => "sortino_ratio",
            MetricId::SortinoSquared => "sortino_squared",
            MetricId::UpsideDeviation => "upside_deviation",
            MetricId::DownsideDeviation => "downside_deviation",
            MetricId::CalmarRatio => "calmar_ratio",
            MetricId::UlcerIndex => "ulcer_index",
            MetricId::UlcerPerformanceIndex => "ulcer_performance_index",
            MetricId::GainToPainRatio => "gain_to_pain_ratio",
            MetricId::AvgReturn => "avg_return",
            MetricId::AvgWin => "avg_win",
            MetricId::AvgLoss => "avg_loss",
            MetricId::BestDay => "best_day",
            MetricId::WorstDay => "worst_day",
            MetricId::ProfitFactor => "profit_factor",
            MetricId::ConsecutiveWins => "consecutive_wins",
            MetricId::ConsecutiveLosses => "consecutive_losses",
            MetricId::Skew => "skew",
            MetricId::Kurtosis => "kurtosis",
            MetricId::TailRatio => "tail_ratio",
            MetricId::PayoffRatio => "payoff_ratio",
            MetricId::ExpectedReturn => "expected_return",
            MetricId::KellyCriterion => "kelly_criterion",
            MetricId::CommonSenseRatio => "common_sense_ratio",
            MetricId::RecoveryFactor => "recovery_factor",
            MetricId::RiskOfRuin => "risk_of_ruin",
            MetricId::OutlierWinRatio => "outlier_win_ratio",
            MetricId::OutlierLossRatio => "outlier_loss_ratio",
            MetricId::Exposure => "exposure",
            MetricId::CpcIndex => "cpc_index",
            MetricId::AdjustedSortino => "adjusted_sortino",
            MetricId::RollingCorrelation => "rolling_correlation",
            MetricId::Beta => "beta",
            MetricId::Carp => "carp",
            MetricId::SmartCarp => "smart_carp",
        }
    }

    /// Human-readable label, e.g. for chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            MetricId::CumulativeReturn => "Cumulative Return",
            MetricId::AnnualReturn => "Annual Return",
            MetricId::Cagr => "CAGR",
            MetricId::DailyWinRate => "Daily Win Rate",
            MetricId::MaxDrawdown => "Max Drawdown",
            MetricId::Volatility => "Volatility",
            MetricId::SharpeRatio => "Sharpe Ratio",
            MetricId::SortinoRatio => "Sortino Ratio",
            MetricId::SortinoSquared => "Sortino Squared",
            MetricId::UpsideDeviation => "Upside Deviation",
            MetricId::DownsideDeviation => "Downside Deviation",
            MetricId::CalmarRatio => "Calmar Ratio",
            MetricId::UlcerIndex => "Ulcer Index",
            MetricId::UlcerPerformanceIndex => "Ulcer Performance Index",
            MetricId::GainToPainRatio => "Gain to Pain Ratio",
            MetricId::AvgReturn => "Avg Return",
            MetricId::AvgWin => "Avg Win",
            MetricId::AvgLoss => "Avg Loss",
            MetricId::BestDay => "Best Day",
            MetricId::WorstDay => "Worst Day",
            MetricId::ProfitFactor => "Profit Factor",
            MetricId::ConsecutiveWins => "Consecutive Wins",
            MetricId::ConsecutiveLosses => "Consecutive Losses",
            MetricId::Skew => "Skew",
            MetricId::Kurtosis => "Kurtosis",
            MetricId::TailRatio => "Tail Ratio",
            MetricId::PayoffRatio => "Payoff Ratio",
            MetricId::ExpectedReturn => "Expected Return",
            MetricId::KellyCriterion => "Kelly Criterion",
            MetricId::CommonSenseRatio => "Common Sense Ratio",
            MetricId::RecoveryFactor => "Recovery Factor",
            MetricId::RiskOfRuin => "Risk of Ruin",
            MetricId::OutlierWinRatio => "Outlier Win Ratio",
            MetricId::OutlierLossRatio => "Outlier Loss Ratio",
            MetricId::Exposure => "Exposure",
            MetricId::CpcIndex => "CPC Index",
            MetricId::AdjustedSortino => "Adjusted Sortino",
            MetricId::RollingCorrelation => "Rolling Correlation",
            MetricId::Beta => "Beta",
            MetricId::Carp => "CARP",
            MetricId::SmartCarp => "Smart CARP",
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            MetricId::RollingCorrelation | MetricId::Beta | MetricId::Carp | MetricId::SmartCarp => {
                MetricKind::DualSeries
            }
            _ => MetricKind::SingleSeries,
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricId {
    type Err = CoreError;

    /// Accepts the identifier, the label (case-insensitive), or one of the
    /// short aliases users tend to type (`sharpe`, `calmar`, `upi`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        let alias = match needle.to_ascii_lowercase().as_str() {
            "sharpe" => Some(MetricId::SharpeRatio),
            "sortino" => Some(MetricId::SortinoRatio),
            "calmar" | "mar" | "mar_ratio" => Some(MetricId::CalmarRatio),
            "upi" => Some(MetricId::UlcerPerformanceIndex),
            "win_rate" => Some(MetricId::DailyWinRate),
            "correlation" => Some(MetricId::RollingCorrelation),
            "std_dev" | "stdev" => Some(MetricId::Volatility),
            "win_loss_ratio" => Some(MetricId::PayoffRatio),
            "geometric_mean" | "ghpr" => Some(MetricId::ExpectedReturn),
            "kelly" => Some(MetricId::KellyCriterion),
            "ror" => Some(MetricId::RiskOfRuin),
            "cpc" => Some(MetricId::CpcIndex),
            "best" => Some(MetricId::BestDay),
            "worst" => Some(MetricId::WorstDay),
            _ => None,
        };
        if let Some(id) = alias {
            return Ok(id);
        }

        MetricId::ALL
            .into_iter()
            .find(|id| id.as_str() == needle || id.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::UnknownMetric(s.to_string()))
    }
}
