//! Numeric building blocks shared by every metric, plus the single place where
//! a zero or undefined denominator is turned into either NaN or an error.

use crate::error::AnalyticsError;
use core_types::{MetricId, TRADING_DAYS_PER_YEAR};
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

/// Raised by a metric when a denominator is zero or undefined.
///
/// Metrics never decide what this means for the caller; `DegeneratePolicy` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Degenerate {
    pub reason: &'static str,
}

/// What a metric evaluation produces before the policy is applied.
pub type MetricValue = Result<f64, Degenerate>;

/// How a degenerate evaluation is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Whole-series mode: a single scalar cannot be partially computed.
    Raise,
    /// Rolling mode: the window reports NaN and the sweep continues.
    Nan,
}

impl DegeneratePolicy {
    pub fn resolve(self, metric: MetricId, value: MetricValue) -> Result<f64, AnalyticsError> {
        match (self, value) {
            (_, Ok(v)) => Ok(v),
            (DegeneratePolicy::Nan, Err(d)) => {
                tracing::trace!(%metric, reason = d.reason, "Degenerate window reported as NaN.");
                Ok(f64::NAN)
            }
            (DegeneratePolicy::Raise, Err(d)) => Err(AnalyticsError::DegenerateScalar {
                metric,
                reason: d.reason,
            }),
        }
    }
}

/// Divides, reporting a zero or non-finite denominator as degenerate.
pub fn safe_div(numerator: f64, denominator: f64, reason: &'static str) -> MetricValue {
    if numerator.is_nan() {
        return Err(Degenerate {
            reason: "numerator is undefined",
        });
    }
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(Degenerate { reason });
    }
    Ok(numerator / denominator)
}

/// Lifts a NaN component (e.g. an undefined correlation) into a degenerate result.
pub fn finite(value: f64, reason: &'static str) -> MetricValue {
    if value.is_nan() {
        Err(Degenerate { reason })
    } else {
        Ok(value)
    }
}

pub fn annualization() -> f64 {
    TRADING_DAYS_PER_YEAR as f64
}

pub fn sqrt_annualization() -> f64 {
    annualization().sqrt()
}

/// Daily simple returns, `r[t] = v[t] / v[t-1] - 1`.
pub fn simple_returns(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample covariance (n - 1). Fewer than two observations yield 0.
pub fn covariance(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let (mx, my) = (mean(&xs[..n]), mean(&ys[..n]));
    let sum: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    sum / (n - 1) as f64
}

/// Sample variance (n - 1). Fewer than two observations yield 0.
pub fn variance(xs: &[f64]) -> f64 {
    covariance(xs, xs)
}

/// Sample standard deviation. Fewer than two observations yield 0.
pub fn std_dev(xs: &[f64]) -> f64 {
    variance(xs).sqrt()
}

/// Sample standard deviation of the elements matching `keep`. An empty
/// subset has deviation 0.
pub fn subset_std_dev(xs: &[f64], keep: impl Fn(f64) -> bool) -> f64 {
    let subset: Vec<f64> = xs.iter().copied().filter(|x| keep(*x)).collect();
    std_dev(&subset)
}

/// Pearson correlation coefficient; NaN if either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let denom = (variance(xs) * variance(ys)).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return f64::NAN;
    }
    covariance(xs, ys) / denom
}

/// Fractional drawdown from the running peak at each point.
///
/// The curve must start above zero; a drawdown from a non-positive peak has no meaning.
pub fn drawdowns(values: &[f64]) -> Result<Vec<f64>, Degenerate> {
    let Some(&first) = values.first() else {
        return Ok(Vec::new());
    };
    if first <= 0.0 {
        return Err(Degenerate {
            reason: "first value is not positive",
        });
    }
    let mut peak = first;
    values
        .iter()
        .map(|&v| {
            if v > peak {
                peak = v;
            }
            safe_div(peak - v, peak, "running peak is zero")
        })
        .collect()
}

/// Sample quantile with linear interpolation between closest ranks.
/// `None` for an empty input.
pub fn quantile(xs: &[f64], q: f64) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let (lo, hi) = (pos.floor() as usize, pos.ceil() as usize);
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

/// Length of the longest run of consecutive elements matching `pred`.
pub fn longest_streak(xs: &[f64], pred: impl Fn(f64) -> bool) -> usize {
    let (mut best, mut current) = (0, 0);
    for &x in xs {
        if pred(x) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

/// Rounds to two decimals on the decimal representation of `x`, half to even.
/// Non-finite values pass through untouched.
pub fn round2(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    match Decimal::from_f64(x) {
        Some(d) => d
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
            .to_f64()
            .unwrap_or(x),
        // Outside Decimal's range; two decimals are meaningless there anyway.
        None => x,
    }
}

pub fn pct(x: f64) -> f64 {
    round2(x * 100.0)
}
