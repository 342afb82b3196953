//! Metrics over a single window of portfolio values.
//!
//! Every function takes the raw values of one window (or the whole curve) and
//! returns the figure as reported: percentages are scaled by 100, and both
//! percentages and ratios are rounded to two decimals. Composite metrics
//! (Calmar, UPI, Sortino Squared, ...) divide the unrounded components and
//! round once at the end, so a tiny but non-zero denominator stays finite.

use crate::params::MetricParams;
use crate::stats::{
    Degenerate, MetricValue, annualization, drawdowns, longest_streak, mean, pct, quantile,
    round2, safe_div, simple_returns, sqrt_annualization, std_dev, subset_std_dev,
};

/// `last / first`, defined only for curves that start above zero and do not
/// cross it.
fn growth(window: &[f64]) -> MetricValue {
    let (Some(&first), Some(&last)) = (window.first(), window.last()) else {
        return Err(Degenerate { reason: "empty window" });
    };
    if first <= 0.0 {
        return Err(Degenerate {
            reason: "first value is not positive",
        });
    }
    if last < 0.0 {
        return Err(Degenerate {
            reason: "curve changes sign",
        });
    }
    Ok(last / first)
}

fn no_returns() -> Degenerate {
    Degenerate {
        reason: "no daily returns",
    }
}

// --- Unrounded components ---

/// Annualized growth as a fraction.
pub(crate) fn annual_growth(window: &[f64]) -> MetricValue {
    let exponent = annualization() / window.len() as f64;
    Ok(growth(window)?.powf(exponent) - 1.0)
}

/// Annualized standard deviation of daily returns as a fraction.
pub(crate) fn annualized_volatility(window: &[f64]) -> f64 {
    std_dev(&simple_returns(window)) * sqrt_annualization()
}

fn worst_drawdown(window: &[f64]) -> MetricValue {
    Ok(drawdowns(window)?.into_iter().fold(0.0_f64, f64::max))
}

fn excess_annual_mean(returns: &[f64], params: &MetricParams<'_>) -> f64 {
    mean(returns) * annualization() - params.risk_free_rate
}

fn raw_sortino(window: &[f64], params: &MetricParams<'_>) -> MetricValue {
    let returns = simple_returns(window);
    let downside = subset_std_dev(&returns, |r| r < 0.0) * sqrt_annualization();
    safe_div(
        excess_annual_mean(&returns, params),
        downside,
        "downside deviation is zero",
    )
}

/// Ulcer index in percentage points.
fn raw_ulcer(window: &[f64]) -> MetricValue {
    let squares: Vec<f64> = drawdowns(window)?
        .into_iter()
        .map(|dd| (dd * 100.0).powi(2))
        .collect();
    Ok(mean(&squares).sqrt())
}

/// Sum of positive returns and absolute sum of negative returns.
fn gains_and_losses(returns: &[f64]) -> (f64, f64) {
    returns.iter().fold((0.0, 0.0), |(gains, losses), &r| {
        if r > 0.0 {
            (gains + r, losses)
        } else {
            (gains, losses + r.min(0.0).abs())
        }
    })
}

fn raw_profit_factor(returns: &[f64]) -> MetricValue {
    let (gains, losses) = gains_and_losses(returns);
    safe_div(gains, losses, "no losing days")
}

fn conditional_mean(returns: &[f64], keep: impl Fn(f64) -> bool, reason: &'static str) -> MetricValue {
    let selected: Vec<f64> = returns.iter().copied().filter(|r| keep(*r)).collect();
    if selected.is_empty() {
        return Err(Degenerate { reason });
    }
    Ok(mean(&selected))
}

/// Average winning return over the magnitude of the average losing return.
fn raw_payoff(returns: &[f64]) -> MetricValue {
    let win = conditional_mean(returns, |r| r > 0.0, "no winning days")?;
    let loss = conditional_mean(returns, |r| r < 0.0, "no losing days")?;
    safe_div(win, loss.abs(), "average loss is zero")
}

/// Share of winning days among days that moved.
fn active_win_rate(returns: &[f64]) -> MetricValue {
    let active = returns.iter().filter(|r| **r != 0.0).count();
    let wins = returns.iter().filter(|r| **r > 0.0).count();
    safe_div(wins as f64, active as f64, "no non-zero returns")
}

fn raw_tail_ratio(returns: &[f64]) -> MetricValue {
    let upper = quantile(returns, 0.95).ok_or_else(no_returns)?;
    let lower = quantile(returns, 0.05).ok_or_else(no_returns)?;
    Ok(safe_div(upper, lower, "lower tail is zero")?.abs())
}

/// Population third and fourth central moments, scaled by the sample deviation.
fn standardized_moments(window: &[f64]) -> Result<(f64, f64), Degenerate> {
    let returns = simple_returns(window);
    let sd = std_dev(&returns);
    if sd == 0.0 {
        return Err(Degenerate {
            reason: "standard deviation of returns is zero",
        });
    }
    let m = mean(&returns);
    let n = returns.len() as f64;
    let (m3, m4) = returns.iter().fold((0.0, 0.0), |(m3, m4), r| {
        let d = r - m;
        (m3 + d.powi(3), m4 + d.powi(4))
    });
    Ok((m3 / n / sd.powi(3), m4 / n / sd.powi(4)))
}

// --- Reported metrics ---

pub fn cumulative_return(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(pct(growth(window)? - 1.0))
}

/// Growth over the window extrapolated to `TRADING_DAYS_PER_YEAR` days.
pub fn annual_return(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(pct(annual_growth(window)?))
}

/// Same quantity as `annual_return`, phrased through elapsed years.
pub fn cagr(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let years = window.len() as f64 / annualization();
    Ok(pct(growth(window)?.powf(1.0 / years) - 1.0))
}

pub fn daily_win_rate(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let comparisons = window.len().saturating_sub(1);
    let wins = window.windows(2).filter(|w| w[1] > w[0]).count();
    Ok(pct(safe_div(wins as f64, comparisons as f64, "no day-to-day comparisons")?))
}

pub fn max_drawdown(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(pct(worst_drawdown(window)?))
}

/// Annualized standard deviation of daily returns.
pub fn volatility(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(pct(annualized_volatility(window)))
}

pub fn sharpe_ratio(window: &[f64], params: &MetricParams<'_>) -> MetricValue {
    let returns = simple_returns(window);
    let risk = std_dev(&returns) * sqrt_annualization();
    Ok(round2(safe_div(
        excess_annual_mean(&returns, params),
        risk,
        "standard deviation of returns is zero",
    )?))
}

/// Sharpe with only the losing days in the denominator.
pub fn sortino_ratio(window: &[f64], params: &MetricParams<'_>) -> MetricValue {
    Ok(round2(raw_sortino(window, params)?))
}

pub fn sortino_squared(window: &[f64], params: &MetricParams<'_>) -> MetricValue {
    let sortino = raw_sortino(window, params)?;
    Ok(round2(sortino * sortino))
}

/// Sortino scaled by `1/sqrt(2)` to be comparable with Sharpe.
pub fn adjusted_sortino(window: &[f64], params: &MetricParams<'_>) -> MetricValue {
    Ok(round2(raw_sortino(window, params)? / std::f64::consts::SQRT_2))
}

pub fn upside_deviation(window: &[f64], params: &MetricParams<'_>) -> MetricValue {
    let target = params.target_return;
    let returns = simple_returns(window);
    Ok(pct(subset_std_dev(&returns, |r| r > target) * sqrt_annualization()))
}

pub fn downside_deviation(window: &[f64], params: &MetricParams<'_>) -> MetricValue {
    let target = params.target_return;
    let returns = simple_returns(window);
    Ok(pct(subset_std_dev(&returns, |r| r < target) * sqrt_annualization()))
}

/// Also known as the MAR ratio.
pub fn calmar_ratio(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let annual = annual_growth(window)?;
    let drawdown = worst_drawdown(window)?;
    Ok(round2(safe_div(annual, drawdown, "max drawdown is zero")?))
}

/// Root mean square of percentage drawdowns.
pub fn ulcer_index(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(round2(raw_ulcer(window)?))
}

pub fn ulcer_performance_index(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let annual = annual_growth(window)? * 100.0;
    let ulcer = raw_ulcer(window)?;
    Ok(round2(safe_div(annual, ulcer, "ulcer index is zero")?))
}

/// Total return relative to the deepest drawdown.
pub fn recovery_factor(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let total = growth(window)? - 1.0;
    let drawdown = worst_drawdown(window)?;
    Ok(round2(safe_div(total.abs(), drawdown, "max drawdown is zero")?))
}

pub fn gain_to_pain_ratio(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let (gains, losses) = gains_and_losses(&simple_returns(window));
    Ok(round2(safe_div(gains, losses, "no losing days")? - 1.0))
}

pub fn profit_factor(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(round2(raw_profit_factor(&simple_returns(window))?))
}

pub fn payoff_ratio(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(round2(raw_payoff(&simple_returns(window))?))
}

/// 95th percentile return over the magnitude of the 5th.
pub fn tail_ratio(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(round2(raw_tail_ratio(&simple_returns(window))?))
}

pub fn common_sense_ratio(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let returns = simple_returns(window);
    Ok(round2(raw_profit_factor(&returns)? * raw_tail_ratio(&returns)?))
}

/// Profit factor times win rate times payoff ratio.
pub fn cpc_index(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let returns = simple_returns(window);
    let pf = raw_profit_factor(&returns)?;
    let win_rate = active_win_rate(&returns)?;
    let payoff = raw_payoff(&returns)?;
    Ok(round2(pf * win_rate * payoff))
}

/// Optimal fraction of capital to stake, from win rate and payoff.
pub fn kelly_criterion(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let returns = simple_returns(window);
    let payoff = raw_payoff(&returns)?;
    let win_rate = active_win_rate(&returns)?;
    Ok(pct(safe_div(
        payoff * win_rate - (1.0 - win_rate),
        payoff,
        "payoff ratio is zero",
    )?))
}

/// `((1 - p) / (1 + p))^n` with `p` the win rate over days that moved.
pub fn risk_of_ruin(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let returns = simple_returns(window);
    let p = active_win_rate(&returns)?;
    Ok(pct(((1.0 - p) / (1.0 + p)).powi(returns.len() as i32)))
}

/// Geometric mean daily return.
pub fn expected_return(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let days = window.len().saturating_sub(1);
    if days == 0 {
        return Err(no_returns());
    }
    Ok(pct(growth(window)?.powf(1.0 / days as f64) - 1.0))
}

pub fn skew(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let (skew, _) = standardized_moments(window)?;
    Ok(round2(skew))
}

/// Excess kurtosis: 0 for normally distributed returns.
pub fn kurtosis(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let (_, kurt) = standardized_moments(window)?;
    Ok(round2(kurt - 3.0))
}

/// 99th percentile return over the average non-negative return.
pub fn outlier_win_ratio(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let returns = simple_returns(window);
    let outlier = quantile(&returns, 0.99).ok_or_else(no_returns)?;
    let typical = conditional_mean(&returns, |r| r >= 0.0, "no non-negative days")?;
    Ok(round2(safe_div(outlier, typical, "average win is zero")?))
}

/// 1st percentile return over the average losing return.
pub fn outlier_loss_ratio(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let returns = simple_returns(window);
    let outlier = quantile(&returns, 0.01).ok_or_else(no_returns)?;
    let typical = conditional_mean(&returns, |r| r < 0.0, "no losing days")?;
    Ok(round2(safe_div(outlier, typical, "average loss is zero")?))
}

/// Share of days with a non-zero return, rounded up to a whole percent.
pub fn exposure(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let returns = simple_returns(window);
    if returns.is_empty() {
        return Err(no_returns());
    }
    let active = returns.iter().filter(|r| **r != 0.0).count();
    Ok(((active * 100) as f64 / returns.len() as f64).ceil())
}

pub fn avg_return(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let returns = simple_returns(window);
    if returns.is_empty() {
        return Err(no_returns());
    }
    Ok(pct(mean(&returns)))
}

pub fn avg_win(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(pct(conditional_mean(&simple_returns(window), |r| r > 0.0, "no winning days")?))
}

pub fn avg_loss(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(pct(conditional_mean(&simple_returns(window), |r| r < 0.0, "no losing days")?))
}

pub fn best_day(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    simple_returns(window)
        .into_iter()
        .reduce(f64::max)
        .map(pct)
        .ok_or_else(no_returns)
}

pub fn worst_day(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    simple_returns(window)
        .into_iter()
        .reduce(f64::min)
        .map(pct)
        .ok_or_else(no_returns)
}

pub fn consecutive_wins(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(longest_streak(&simple_returns(window), |r| r > 0.0) as f64)
}

pub fn consecutive_losses(window: &[f64], _: &MetricParams<'_>) -> MetricValue {
    Ok(longest_streak(&simple_returns(window), |r| r < 0.0) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVE: [f64; 5] = [100.0, 110.0, 121.0, 90.0, 120.0];
    // Daily returns +2%, -1%, +3%, -2%, +1%, -1%, +4%.
    const MIXED: [f64; 8] = [
        100.0, 102.0, 100.98, 104.0094, 101.929212, 102.94850412, 101.9190190788, 105.995779841952,
    ];

    fn p() -> MetricParams<'static> {
        MetricParams::default()
    }

    #[test]
    fn test_worked_example() {
        assert_eq!(cumulative_return(&CURVE, &p()), Ok(20.0));
        assert_eq!(max_drawdown(&CURVE, &p()), Ok(25.62));
        assert_eq!(daily_win_rate(&CURVE, &p()), Ok(75.0));
    }

    #[test]
    fn test_annual_return_matches_cagr() {
        let curve = [100.0, 100.5, 101.0, 100.8, 101.2, 101.9];
        let annual = annual_return(&curve, &p()).unwrap();
        let compound = cagr(&curve, &p()).unwrap();
        assert_eq!(annual, compound);
        // A full trading year of growth annualizes to itself.
        let mut year = vec![100.0; 252];
        year[251] = 110.0;
        assert_eq!(annual_return(&year, &p()), Ok(10.0));
    }

    #[test]
    fn test_non_positive_or_sign_changing_curves_are_degenerate() {
        assert!(cumulative_return(&[0.0, 1.0], &p()).is_err());
        assert!(annual_return(&[0.0, 1.0], &p()).is_err());
        assert!(cumulative_return(&[-100.0, -50.0], &p()).is_err());
        assert!(max_drawdown(&[-100.0, -50.0], &p()).is_err());

        let crossing = [100.0, 90.0, 80.0, 60.0, -50.0];
        assert_eq!(
            annual_return(&crossing, &p()),
            Err(Degenerate {
                reason: "curve changes sign"
            })
        );
        assert_eq!(
            calmar_ratio(&crossing, &p()),
            Err(Degenerate {
                reason: "curve changes sign"
            })
        );
        // Ending exactly at zero is a total loss, not a sign change.
        assert_eq!(cumulative_return(&[100.0, 50.0, 0.0], &p()), Ok(-100.0));
    }

    #[test]
    fn test_constant_curve() {
        let flat = [50.0; 6];
        assert_eq!(volatility(&flat, &p()), Ok(0.0));
        assert!(sharpe_ratio(&flat, &p()).is_err());
        assert!(sortino_ratio(&flat, &p()).is_err());
        assert!(sortino_squared(&flat, &p()).is_err());
        assert!(calmar_ratio(&flat, &p()).is_err());
        assert_eq!(ulcer_index(&flat, &p()), Ok(0.0));
        assert!(ulcer_performance_index(&flat, &p()).is_err());
        assert_eq!(daily_win_rate(&flat, &p()), Ok(0.0));
        assert!(skew(&flat, &p()).is_err());
        assert_eq!(exposure(&flat, &p()), Ok(0.0));
        assert!(risk_of_ruin(&flat, &p()).is_err());
    }

    #[test]
    fn test_sharpe_known_value() {
        // Returns alternate +1% / -0.5%: mean 0.25%, sample std 0.8216%.
        let curve = [100.0, 101.0, 100.495, 101.49995, 100.99245025];
        let returns = simple_returns(&curve);
        let expected = (mean(&returns) * 252.0) / (std_dev(&returns) * 252f64.sqrt());
        assert_eq!(sharpe_ratio(&curve, &p()), Ok(round2(expected)));

        let with_rf = sharpe_ratio(&curve, &p().with_risk_free_rate(0.05)).unwrap();
        assert!(with_rf < round2(expected));
    }

    #[test]
    fn test_sortino_family_shares_one_unrounded_sortino() {
        let curve = [100.0, 102.0, 99.0, 101.0, 97.0, 103.0];
        let raw = raw_sortino(&curve, &p()).unwrap();
        assert_eq!(sortino_ratio(&curve, &p()), Ok(round2(raw)));
        assert_eq!(sortino_squared(&curve, &p()), Ok(round2(raw * raw)));
        assert_eq!(
            adjusted_sortino(&curve, &p()),
            Ok(round2(raw / std::f64::consts::SQRT_2))
        );
    }

    #[test]
    fn test_deviation_split_by_target() {
        let curve = [100.0, 102.0, 99.0, 101.0, 97.0, 103.0];
        let up = upside_deviation(&curve, &p()).unwrap();
        let down = downside_deviation(&curve, &p()).unwrap();
        assert!(up > 0.0 && down > 0.0);
        // A target above every return leaves the upside set empty.
        let high = p().with_target_return(1.0);
        assert_eq!(upside_deviation(&curve, &high), Ok(0.0));
    }

    #[test]
    fn test_calmar_and_upi_divide_unrounded_components() {
        let annual = annual_growth(&CURVE).unwrap();
        let drawdown = 31.0 / 121.0;
        assert_eq!(calmar_ratio(&CURVE, &p()), Ok(round2(annual / drawdown)));
        let ulcer = raw_ulcer(&CURVE).unwrap();
        assert_eq!(ulcer_performance_index(&CURVE, &p()), Ok(round2(annual * 100.0 / ulcer)));
    }

    #[test]
    fn test_tiny_drawdown_keeps_calmar_finite() {
        // A 0.001% dip reports as a 0.00% drawdown but is not zero.
        let curve = [100.0, 100.001, 100.000_000_1, 100.002];
        assert_eq!(max_drawdown(&curve, &p()), Ok(0.0));
        let calmar = calmar_ratio(&curve, &p()).unwrap();
        assert!(calmar.is_finite() && calmar > 0.0);
    }

    #[test]
    fn test_ulcer_index_worked_example() {
        // Drawdowns (pct): 0, 0, 0, 25.6198, 0.8264.
        let dd3: f64 = 31.0 / 121.0 * 100.0;
        let dd4 = 1.0 / 121.0 * 100.0;
        let expected = ((dd3 * dd3 + dd4 * dd4) / 5.0).sqrt();
        assert_eq!(ulcer_index(&CURVE, &p()), Ok(round2(expected)));
    }

    #[test]
    fn test_gain_to_pain_and_profit_factor() {
        let returns = simple_returns(&CURVE);
        let gains: f64 = returns.iter().filter(|r| **r > 0.0).sum();
        let losses: f64 = returns.iter().filter(|r| **r < 0.0).map(|r| r.abs()).sum();
        assert_eq!(gain_to_pain_ratio(&CURVE, &p()), Ok(round2(gains / losses - 1.0)));
        assert_eq!(profit_factor(&CURVE, &p()), Ok(round2(gains / losses)));

        let rising = [1.0, 2.0, 3.0];
        assert!(gain_to_pain_ratio(&rising, &p()).is_err());
    }

    #[test]
    fn test_trade_style_statistics() {
        assert_eq!(best_day(&CURVE, &p()), Ok(33.33));
        assert_eq!(worst_day(&CURVE, &p()), Ok(-25.62));
        assert_eq!(avg_win(&CURVE, &p()), Ok(round2((0.1 + 0.1 + 1.0 / 3.0) / 3.0 * 100.0)));
        assert_eq!(avg_loss(&CURVE, &p()), Ok(-25.62));
        assert_eq!(consecutive_wins(&CURVE, &p()), Ok(2.0));
        assert_eq!(consecutive_losses(&CURVE, &p()), Ok(1.0));
        assert!(avg_loss(&[1.0, 2.0], &p()).is_err());
        assert!(avg_return(&[1.0], &p()).is_err());
    }

    #[test]
    fn test_payoff_kelly_and_cpc() {
        // Wins 2%, 3%, 1%, 4% (avg 2.5%); losses 1%, 2%, 1% (avg 4/3%).
        let payoff = 2.5 / (4.0 / 3.0);
        assert_eq!(payoff_ratio(&MIXED, &p()), Ok(round2(payoff)));

        let win_rate = 4.0 / 7.0;
        let kelly = (payoff * win_rate - (1.0 - win_rate)) / payoff;
        assert_eq!(kelly_criterion(&MIXED, &p()), Ok(round2(kelly * 100.0)));

        let pf = 10.0 / 4.0;
        assert_eq!(cpc_index(&MIXED, &p()), Ok(round2(pf * win_rate * payoff)));
        assert_eq!(profit_factor(&MIXED, &p()), Ok(2.5));
    }

    #[test]
    fn test_risk_of_ruin_and_exposure() {
        let p_win: f64 = 4.0 / 7.0;
        let ruin = ((1.0 - p_win) / (1.0 + p_win)).powi(7);
        assert_eq!(risk_of_ruin(&MIXED, &p()), Ok(round2(ruin * 100.0)));
        assert_eq!(exposure(&MIXED, &p()), Ok(100.0));

        // Two of five days flat: 60% exposure.
        let idle = [100.0, 100.0, 101.0, 101.0, 102.0, 101.0];
        assert_eq!(exposure(&idle, &p()), Ok(60.0));
    }

    #[test]
    fn test_expected_return_is_geometric_mean() {
        // 120 / 100 over four days.
        let expected = 1.2f64.powf(0.25) - 1.0;
        assert_eq!(expected_return(&CURVE, &p()), Ok(round2(expected * 100.0)));
        assert!(expected_return(&[100.0], &p()).is_err());
    }

    #[test]
    fn test_tail_and_common_sense_ratio() {
        let returns = simple_returns(&MIXED);
        let upper = quantile(&returns, 0.95).unwrap();
        let lower = quantile(&returns, 0.05).unwrap();
        let tail = (upper / lower).abs();
        assert_eq!(tail_ratio(&MIXED, &p()), Ok(round2(tail)));
        assert_eq!(common_sense_ratio(&MIXED, &p()), Ok(round2(2.5 * tail)));
        assert!(tail_ratio(&[100.0], &p()).is_err());
    }

    #[test]
    fn test_recovery_factor() {
        // 20% total return against a 31/121 drawdown.
        assert_eq!(recovery_factor(&CURVE, &p()), Ok(round2(0.2 / (31.0 / 121.0))));
        assert!(recovery_factor(&[1.0, 2.0, 3.0], &p()).is_err());
    }

    #[test]
    fn test_outlier_ratios() {
        let returns = simple_returns(&MIXED);
        let wins: Vec<f64> = returns.iter().copied().filter(|r| *r >= 0.0).collect();
        let losses: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
        assert_eq!(
            outlier_win_ratio(&MIXED, &p()),
            Ok(round2(quantile(&returns, 0.99).unwrap() / mean(&wins)))
        );
        assert_eq!(
            outlier_loss_ratio(&MIXED, &p()),
            Ok(round2(quantile(&returns, 0.01).unwrap() / mean(&losses)))
        );
        assert!(outlier_loss_ratio(&[1.0, 2.0, 3.0], &p()).is_err());
    }

    #[test]
    fn test_skew_and_kurtosis() {
        // Symmetric returns have no skew.
        let symmetric = [100.0, 101.0, 100.0, 101.0, 100.0];
        let (s, _) = standardized_moments(&symmetric).unwrap();
        assert!(s.abs() < 1.0);
        assert_eq!(skew(&symmetric, &p()), Ok(round2(s)));

        // One large loss among small gains skews left.
        let crash = [100.0, 101.0, 102.0, 103.0, 80.0, 81.0];
        assert!(skew(&crash, &p()).unwrap() < 0.0);
        let (_, k) = standardized_moments(&crash).unwrap();
        assert_eq!(kurtosis(&crash, &p()), Ok(round2(k - 3.0)));
    }
}
