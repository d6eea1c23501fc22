//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// A severity name is not one of the six recognized levels
    #[error("invalid log level: '{level}' is none of trace, debug, info, warn, error, fatal")]
    InvalidLevel { level: String },

    /// Configuration rejected at validation time
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A correlation id contains the chain delimiter
    #[error("correlation id \"{uid}\" contains an illegal character: ':'")]
    InvalidCorrelationId { uid: String },

    /// Re-parenting a field node would make it its own ancestor
    #[error("field node re-parenting rejected: the proposed parent is a descendant of the node")]
    ParentCycle,

    /// `end()` or `error_end()` called on a scope that already ended
    #[error("the scope has already been ended; end() must not be called more than once")]
    ScopeEnded,

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sink error (generic)
    #[error("sink error: {0}")]
    Sink(String),
}

impl LogError {
    /// Create an invalid-level error
    pub fn invalid_level(level: impl Into<String>) -> Self {
        LogError::InvalidLevel {
            level: level.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(message: impl Into<String>) -> Self {
        LogError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an invalid correlation id error
    pub fn invalid_uid(uid: impl Into<String>) -> Self {
        LogError::InvalidCorrelationId { uid: uid.into() }
    }

    /// Create a sink error (generic)
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        LogError::Sink(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LogError::invalid_level("verbose");
        assert!(matches!(err, LogError::InvalidLevel { .. }));

        let err = LogError::config("dump threshold below logging level");
        assert!(matches!(err, LogError::InvalidConfiguration { .. }));

        let err = LogError::invalid_uid("a:b");
        assert!(matches!(err, LogError::InvalidCorrelationId { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LogError::invalid_level("verbose");
        assert_eq!(
            err.to_string(),
            "invalid log level: 'verbose' is none of trace, debug, info, warn, error, fatal"
        );

        let err = LogError::invalid_uid("pouet:tata");
        assert_eq!(
            err.to_string(),
            "correlation id \"pouet:tata\" contains an illegal character: ':'"
        );

        let err = LogError::ScopeEnded;
        assert!(err.to_string().contains("more than once"));
    }
}
