//! Logging macros for ergonomic message formatting.
//!
//! These macros forward to a logger's `log` method with automatic string
//! formatting, similar to `println!` and `format!`. They work with both
//! [`ModuleLogger`](crate::core::ModuleLogger) and a mutable
//! [`ScopedLogger`](crate::core::ScopedLogger).
//!
//! # Examples
//!
//! ```
//! use scopelog::prelude::*;
//! use scopelog::info;
//!
//! let logger = ModuleLogger::new("api", SharedConfig::new());
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use scopelog::prelude::*;
/// # let logger = ModuleLogger::new("api", SharedConfig::new());
/// use scopelog::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), None)
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Severity::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Severity::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Severity::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{ConfigUpdate, ModuleLogger, Severity, SharedConfig};
    use crate::sinks::MemorySink;

    fn module_with_sink(sink: &MemorySink) -> ModuleLogger {
        let config = SharedConfig::new();
        config
            .update(
                ConfigUpdate::new()
                    .level(Severity::Trace)
                    .sink(sink.clone()),
            )
            .unwrap();
        ModuleLogger::new("macros", config)
    }

    #[test]
    fn test_log_macro() {
        let sink = MemorySink::new();
        let logger = module_with_sink(&sink);
        log!(logger, Severity::Info, "Test message");
        log!(logger, Severity::Info, "Formatted: {}", 42);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.records()[1].message, "Formatted: 42");
    }

    #[test]
    fn test_level_macros() {
        let sink = MemorySink::new();
        let logger = module_with_sink(&sink);
        trace!(logger, "Trace message");
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");

        let records = sink.records();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].level, Severity::Trace);
        assert_eq!(records[5].level, Severity::Fatal);
    }

    #[test]
    fn test_macros_with_scoped_logger() {
        let sink = MemorySink::new();
        let logger = module_with_sink(&sink);
        let mut scope = logger.new_scoped().unwrap();
        info!(scope, "scoped message {}", 1);
        assert_eq!(sink.len(), 1);
        assert!(sink.records()[0].req_id.is_some());
    }
}
