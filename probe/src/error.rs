use thiserror::Error;

/// Unified probe error type.
///
/// Each variant maps to a distinct process exit status through
/// [`ProbeError::exit_code`], so `main` can handle every failure in one place.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Bad input shape: metric state mask or configuration file (exit 3).
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The swap query could not be run or exited non-zero (exit 30).
    #[error("unable to get memory metrics: {0}")]
    MetricsUnavailable(String),
    /// Anything else (exit 1).
    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl ProbeError {
    /// Process exit status for this failure kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            ProbeError::Configuration(_) => 3,
            ProbeError::MetricsUnavailable(_) => 30,
            ProbeError::Unexpected(_) => 1,
        }
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(e: std::io::Error) -> Self {
        ProbeError::Unexpected(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_exit_code() {
        let err = ProbeError::Configuration("invalid number of metric states".to_string());
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.to_string(),
            "configuration error: invalid number of metric states"
        );
    }

    #[test]
    fn test_metrics_unavailable_exit_code() {
        let err = ProbeError::MetricsUnavailable("sysctl exited with 1".to_string());
        assert_eq!(err.exit_code(), 30);
    }

    #[test]
    fn test_unexpected_exit_code() {
        let err = ProbeError::Unexpected(anyhow::anyhow!("something broke"));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "unexpected error: something broke");
    }

    #[test]
    fn test_io_error_is_unexpected() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ProbeError = io.into();
        assert_eq!(err.exit_code(), 1);
    }
}
