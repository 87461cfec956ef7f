#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a problem name does not resolve to a known benchmark.
    #[error("unknown problem '{0}'")]
    UnknownProblem(String),

    /// Returned when the generation or evaluation budget is zero.
    #[error("invalid budget: termination budget must be at least 1")]
    InvalidBudget,

    /// Returned when a builder receives a value outside its accepted range.
    #[error("invalid configuration for '{field}': {reason}")]
    InvalidConfig {
        /// The name of the offending setting.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Returned when a vector has the wrong number of components.
    #[error("dimension mismatch: expected {expected} values, got {got}")]
    DimensionMismatch {
        /// The expected length.
        expected: usize,
        /// The actual length.
        got: usize,
    },

    /// Returned when writing a chart or an export fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when the chart backend fails to render.
    #[error("plot error: {0}")]
    Plot(String),

    /// Returned when a comparison cannot be serialized.
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = Error::config("crossover.prob", "must be in [0, 1], got 1.5");
        assert_eq!(
            err.to_string(),
            "invalid configuration for 'crossover.prob': must be in [0, 1], got 1.5"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
