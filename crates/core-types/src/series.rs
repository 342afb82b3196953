use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An equity curve: one portfolio value per trading day, paired 1:1 with its date.
///
/// A `Series` is immutable once constructed. The analytics engine only ever
/// borrows it, so one instance can back any number of concurrent computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct Series {
    name: String,
    values: Vec<f64>,
    dates: Vec<NaiveDate>,
}

/// Unvalidated wire shape, only used to route deserialization through `Series::new`.
#[derive(Deserialize)]
struct RawSeries {
    #[serde(default)]
    name: String,
    values: Vec<f64>,
    dates: Vec<NaiveDate>,
}

impl TryFrom<RawSeries> for Series {
    type Error = CoreError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        Series::new(raw.name, raw.values, raw.dates)
    }
}

impl Series {
    /// Builds a series, rejecting value/date sequences of different lengths.
    pub fn new(
        name: impl Into<String>,
        values: Vec<f64>,
        dates: Vec<NaiveDate>,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        if values.len() != dates.len() {
            return Err(CoreError::LengthMismatch {
                name,
                values: values.len(),
                dates: dates.len(),
            });
        }
        Ok(Self { name, values, dates })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A view over the whole series.
    pub fn view(&self) -> SeriesView<'_> {
        SeriesView {
            values: &self.values,
            dates: &self.dates,
        }
    }

    /// A view over the last `n` points. Asking for more than the series holds
    /// returns the whole series.
    pub fn trailing(&self, n: usize) -> SeriesView<'_> {
        let start = self.len().saturating_sub(n);
        SeriesView {
            values: &self.values[start..],
            dates: &self.dates[start..],
        }
    }
}

/// A borrowed, aligned slice of a `Series`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesView<'a> {
    values: &'a [f64],
    dates: &'a [NaiveDate],
}

impl<'a> SeriesView<'a> {
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    pub fn dates(&self) -> &'a [NaiveDate] {
        self.dates
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
