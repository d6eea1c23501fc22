//! Shared logging configuration
//!
//! One explicitly-constructed, cloneable handle holds the active severity
//! floors and the sink list. Module loggers keep a handle and read it live;
//! scoped loggers snapshot the floors at creation time.

use super::error::{LogError, Result};
use super::record::Record;
use super::severity::Severity;
use super::sink::Sink;
use crate::sinks::ConsoleSink;
use parking_lot::RwLock;
use std::sync::Arc;

struct ConfigState {
    level: Severity,
    dump: Severity,
    end: Severity,
    sinks: Vec<Box<dyn Sink>>,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            level: Severity::Info,
            dump: Severity::Error,
            end: Severity::Info,
            sinks: vec![Box::new(ConsoleSink::new())],
        }
    }
}

/// Validated mutable holder for the active floors and sinks.
///
/// Cloning shares the underlying state. Updates are atomic: the prospective
/// merged values are validated before anything is committed, so a rejected
/// update leaves the configuration untouched.
///
/// # Example
///
/// ```
/// use scopelog::core::{ConfigUpdate, SharedConfig, Severity};
///
/// let config = SharedConfig::new();
/// config
///     .update(ConfigUpdate::new().level(Severity::Debug).dump(Severity::Error))
///     .unwrap();
/// assert_eq!(config.level(), Severity::Debug);
/// ```
#[derive(Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<ConfigState>>,
}

/// A partial configuration change. Omitted fields retain previous values.
#[derive(Default)]
pub struct ConfigUpdate {
    level: Option<Severity>,
    dump: Option<Severity>,
    end: Option<Severity>,
    sinks: Option<Vec<Box<dyn Sink>>>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the emission floor
    #[must_use]
    pub fn level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the dump threshold
    #[must_use]
    pub fn dump(mut self, dump: Severity) -> Self {
        self.dump = Some(dump);
        self
    }

    /// Set the level used by end-of-scope records
    #[must_use]
    pub fn end(mut self, end: Severity) -> Self {
        self.end = Some(end);
        self
    }

    /// Add a sink to the replacement sink list
    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.get_or_insert_with(Vec::new).push(Box::new(sink));
        self
    }

    /// Replace the sink list wholesale
    #[must_use]
    pub fn sinks(mut self, sinks: Vec<Box<dyn Sink>>) -> Self {
        self.sinks = Some(sinks);
        self
    }
}

impl SharedConfig {
    /// Create a configuration with the defaults: level `info`, dump
    /// threshold `error`, end level `info`, one console sink.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ConfigState::default())),
        }
    }

    /// Create a configuration and apply an initial update.
    pub fn with(update: ConfigUpdate) -> Result<Self> {
        let config = Self::new();
        config.update(update)?;
        Ok(config)
    }

    /// Apply a partial update.
    ///
    /// The `dump >= level` invariant is re-checked against the prospective
    /// merged values, and a replacement sink list must be non-empty. On any
    /// violation the whole update is rejected and nothing changes.
    pub fn update(&self, update: ConfigUpdate) -> Result<()> {
        let mut state = self.inner.write();

        let level = update.level.unwrap_or(state.level);
        let dump = update.dump.unwrap_or(state.dump);
        if !dump.should_emit(level) {
            return Err(LogError::config(format!(
                "dump threshold '{}' must be at or above logging level '{}'",
                dump, level
            )));
        }
        if let Some(sinks) = &update.sinks {
            if sinks.is_empty() {
                return Err(LogError::config("sinks must contain at least one sink"));
            }
        }

        state.level = level;
        state.dump = dump;
        if let Some(end) = update.end {
            state.end = end;
        }
        if let Some(sinks) = update.sinks {
            state.sinks = sinks;
        }
        Ok(())
    }

    /// Restore the default configuration; intended for test isolation.
    pub fn reset(&self) {
        let mut state = self.inner.write();
        *state = ConfigState::default();
    }

    /// The current emission floor
    #[must_use]
    pub fn level(&self) -> Severity {
        self.inner.read().level
    }

    /// The current dump threshold
    #[must_use]
    pub fn dump_threshold(&self) -> Severity {
        self.inner.read().dump
    }

    /// The current end-of-scope level
    #[must_use]
    pub fn end_level(&self) -> Severity {
        self.inner.read().end
    }

    /// Hand a record to every configured sink.
    ///
    /// Sink failures are reported to stderr and otherwise ignored; the
    /// core never retries and a failing sink never breaks the caller.
    pub(crate) fn write_record(&self, record: &Record) {
        let mut state = self.inner.write();
        for sink in state.sinks.iter_mut() {
            if let Err(e) = sink.append(record) {
                eprintln!("[scopelog] sink '{}' failed: {}", sink.name(), e);
            }
        }
        for sink in state.sinks.iter_mut() {
            if let Err(e) = sink.flush() {
                eprintln!("[scopelog] sink '{}' flush failed: {}", sink.name(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    #[test]
    fn test_defaults() {
        let config = SharedConfig::new();
        assert_eq!(config.level(), Severity::Info);
        assert_eq!(config.dump_threshold(), Severity::Error);
        assert_eq!(config.end_level(), Severity::Info);
    }

    #[test]
    fn test_update_levels() {
        let config = SharedConfig::new();
        config
            .update(ConfigUpdate::new().level(Severity::Debug).end(Severity::Warn))
            .unwrap();
        assert_eq!(config.level(), Severity::Debug);
        assert_eq!(config.end_level(), Severity::Warn);
        // Untouched field retains its previous value.
        assert_eq!(config.dump_threshold(), Severity::Error);
    }

    #[test]
    fn test_update_rejects_dump_below_level() {
        let config = SharedConfig::new();
        let err = config
            .update(ConfigUpdate::new().level(Severity::Fatal).dump(Severity::Debug))
            .unwrap_err();
        assert!(matches!(err, LogError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_update_checks_prospective_merged_values() {
        let config = SharedConfig::new();
        // Current dump is 'error'; raising only the level above it must fail
        // even though the update itself names a single valid field.
        let err = config
            .update(ConfigUpdate::new().level(Severity::Fatal))
            .unwrap_err();
        assert!(matches!(err, LogError::InvalidConfiguration { .. }));
        // And nothing was committed.
        assert_eq!(config.level(), Severity::Info);
    }

    #[test]
    fn test_rejected_update_commits_nothing() {
        let config = SharedConfig::new();
        let err = config
            .update(
                ConfigUpdate::new()
                    .level(Severity::Debug)
                    .dump(Severity::Trace),
            )
            .unwrap_err();
        assert!(matches!(err, LogError::InvalidConfiguration { .. }));
        assert_eq!(config.level(), Severity::Info);
        assert_eq!(config.dump_threshold(), Severity::Error);
    }

    #[test]
    fn test_update_rejects_empty_sinks() {
        let config = SharedConfig::new();
        let err = config
            .update(ConfigUpdate::new().sinks(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, LogError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_replace_sinks() {
        let sink = MemorySink::new();
        let config = SharedConfig::new();
        config
            .update(ConfigUpdate::new().sink(sink.clone()))
            .unwrap();

        let record = Record::new("test", Severity::Info, "hello");
        config.write_record(&record);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let config = SharedConfig::new();
        config
            .update(
                ConfigUpdate::new()
                    .level(Severity::Trace)
                    .dump(Severity::Fatal)
                    .end(Severity::Error),
            )
            .unwrap();
        config.reset();
        assert_eq!(config.level(), Severity::Info);
        assert_eq!(config.dump_threshold(), Severity::Error);
        assert_eq!(config.end_level(), Severity::Info);
    }
}
