use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Series '{name}' has {values} values but {dates} dates")]
    LengthMismatch {
        name: String,
        values: usize,
        dates: usize,
    },

    #[error("Unknown metric identifier: '{0}'")]
    UnknownMetric(String),
}
