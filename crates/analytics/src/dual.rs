//! Metrics over a pair of aligned windows: the primary curve first, the
//! comparison curve second. Callers are responsible for truncating both
//! series to a common trailing length before windowing.

use crate::params::MetricParams;
use crate::single::{annual_growth, annualized_volatility};
use crate::stats::{
    MetricValue, covariance, finite, pearson, round2, safe_div, simple_returns, variance,
};

/// Pearson correlation of the two value windows.
pub fn rolling_correlation(primary: &[f64], comparison: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let rho = finite(pearson(primary, comparison), "correlation is undefined")?;
    Ok(round2(rho))
}

/// Sensitivity of the primary's daily returns to the comparison's.
pub fn beta(primary: &[f64], comparison: &[f64], _: &MetricParams<'_>) -> MetricValue {
    let asset = simple_returns(primary);
    let market = simple_returns(comparison);
    Ok(round2(safe_div(
        covariance(&asset, &market),
        variance(&market),
        "comparison variance is zero",
    )?))
}

/// Excess annual return over the unrounded correlation. The risk-free rate is
/// annual and fractional like `annual_growth`; the difference is scaled to percent.
fn raw_carp(primary: &[f64], comparison: &[f64], params: &MetricParams<'_>) -> MetricValue {
    let excess = (annual_growth(primary)? - params.risk_free_rate) * 100.0;
    let rho = finite(pearson(primary, comparison), "correlation is undefined")?;
    safe_div(excess, rho, "correlation is zero")
}

/// Correlation-Adjusted Return on Pain: excess annual return over correlation.
pub fn carp(primary: &[f64], comparison: &[f64], params: &MetricParams<'_>) -> MetricValue {
    Ok(round2(raw_carp(primary, comparison, params)?))
}

/// CARP per unit of (percentage) volatility of the primary window.
pub fn smart_carp(primary: &[f64], comparison: &[f64], params: &MetricParams<'_>) -> MetricValue {
    let carp = raw_carp(primary, comparison, params)?;
    let vol = annualized_volatility(primary) * 100.0;
    Ok(round2(safe_div(carp, vol, "volatility is zero")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> MetricParams<'static> {
        MetricParams::default()
    }

    #[test]
    fn test_self_correlation_is_one() {
        let curve = [100.0, 103.0, 101.0, 107.0, 104.0];
        assert_eq!(rolling_correlation(&curve, &curve, &p()), Ok(1.0));
    }

    #[test]
    fn test_correlation_of_flat_window_is_degenerate() {
        let flat = [5.0, 5.0, 5.0];
        assert!(rolling_correlation(&flat, &[1.0, 2.0, 3.0], &p()).is_err());
        assert!(carp(&flat, &[1.0, 2.0, 3.0], &p()).is_err());
    }

    #[test]
    fn test_beta_of_scaled_returns() {
        // The primary moves exactly twice as much as the comparison each day.
        let market = [100.0, 101.0, 99.0, 102.0];
        let market_returns = simple_returns(&market);
        let mut asset = vec![100.0];
        for r in &market_returns {
            let last = *asset.last().unwrap();
            asset.push(last * (1.0 + 2.0 * r));
        }
        assert_eq!(beta(&asset, &market, &p()), Ok(2.0));
        assert!(beta(&asset, &[10.0, 10.0, 10.0, 10.0], &p()).is_err());
    }

    #[test]
    fn test_carp_divides_excess_return_by_correlation() {
        let primary = [100.0, 102.0, 101.0, 104.0, 106.0];
        let comparison = [50.0, 50.5, 51.0, 50.8, 52.0];
        let annual = annual_growth(&primary).unwrap();
        let rho = pearson(&primary, &comparison);
        assert_eq!(carp(&primary, &comparison, &p()), Ok(round2(annual * 100.0 / rho)));

        let with_rf = p().with_risk_free_rate(0.03);
        assert_eq!(
            carp(&primary, &comparison, &with_rf),
            Ok(round2((annual - 0.03) * 100.0 / rho))
        );
    }

    #[test]
    fn test_smart_carp_uses_primary_volatility() {
        let primary = [100.0, 102.0, 101.0, 104.0, 106.0];
        let comparison = [50.0, 50.5, 51.0, 50.8, 52.0];
        let c = raw_carp(&primary, &comparison, &p()).unwrap();
        let vol = annualized_volatility(&primary) * 100.0;
        assert_eq!(smart_carp(&primary, &comparison, &p()), Ok(round2(c / vol)));
    }

    #[test]
    fn test_smart_carp_finite_when_volatility_rounds_to_zero() {
        // Nearly flat but not constant: reported volatility is 0.00%.
        let curve: Vec<f64> = (0..10)
            .map(|i| 100.0 + 1e-4 * f64::from(i) + if i % 2 == 1 { 4e-5 } else { 0.0 })
            .collect();
        assert_eq!(crate::single::volatility(&curve, &p()), Ok(0.0));
        let value = smart_carp(&curve, &curve, &p()).unwrap();
        assert!(value.is_finite());
    }
}
