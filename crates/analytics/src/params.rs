use core_types::Series;

/// Caller-supplied knobs for a metric computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricParams<'a> {
    /// Annual risk-free rate as a fraction (0.04 is 4%).
    pub risk_free_rate: f64,
    /// Daily return threshold separating upside from downside deviation.
    pub target_return: f64,
    /// Second series for correlation, beta and the CARP family.
    pub comparison: Option<&'a Series>,
}

impl<'a> MetricParams<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    pub fn with_target_return(mut self, target: f64) -> Self {
        self.target_return = target;
        self
    }

    pub fn with_comparison(mut self, series: &'a Series) -> Self {
        self.comparison = Some(series);
        self
    }
}
