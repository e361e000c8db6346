//! Error types for filter operations.

use thiserror::Error;

/// Error type for filter operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// A pixel access or buffer construction failed in the core.
    #[error(transparent)]
    Core(#[from] picfx_core::Error),

    /// Invalid parameter value (zero window size, bad step count, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A filter spec named no known filter or carried malformed arguments.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}

impl OpsError {
    /// Creates an [`OpsError::InvalidParameter`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

/// Result type for filter operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through() {
        let core = picfx_core::Error::out_of_bounds(5, 5, 2, 2);
        let msg = core.to_string();
        let err: OpsError = core.into();
        assert_eq!(err.to_string(), msg);
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = OpsError::invalid("size must be > 0");
        assert_eq!(err.to_string(), "invalid parameter: size must be > 0");
    }
}
