//! Per-scope buffered/dump logging engine
//!
//! A `ScopedLogger` tracks the log events of one logical request. Every
//! call appends to a rolling in-memory buffer, and two independent
//! severity floors decide what reaches the sinks:
//!
//! - at or above the dump threshold, the whole buffered history is flushed
//!   in insertion order and the buffer cleared, so the events leading up
//!   to a severe entry become visible even if they were individually below
//!   the emission floor;
//! - at or above the emission floor, the single entry is written out but
//!   stays buffered, available for a later dump;
//! - below both, the entry is only retained in the buffer.

use super::config::SharedConfig;
use super::error::{LogError, Result};
use super::field_tree::{FieldTree, NodeId};
use super::fields::Fields;
use super::record::Record;
use super::severity::Severity;
use super::uid::{generate_uid, serialize_uids, validate_uid};
use serde_json::Value;
use std::time::{Duration, Instant};

/// Caller-supplied origin for a scope's correlation chain.
#[derive(Debug, Clone)]
pub enum Uids {
    /// Use this exact id as the whole chain
    Single(String),
    /// Inherit this chain and append a freshly-generated id
    Chain(Vec<String>),
}

impl From<&str> for Uids {
    fn from(uid: &str) -> Self {
        Uids::Single(uid.to_string())
    }
}

impl From<String> for Uids {
    fn from(uid: String) -> Self {
        Uids::Single(uid)
    }
}

impl From<Vec<String>> for Uids {
    fn from(uids: Vec<String>) -> Self {
        Uids::Chain(uids)
    }
}

impl From<Vec<&str>> for Uids {
    fn from(uids: Vec<&str>) -> Self {
        Uids::Chain(uids.into_iter().map(String::from).collect())
    }
}

/// Logger for one logical request.
///
/// Created through [`ModuleLogger::new_scoped`](super::module::ModuleLogger::new_scoped)
/// and its variants; the floors are snapshotted from the shared
/// configuration at creation time and never change afterwards.
pub struct ScopedLogger {
    name: String,
    uids: Vec<String>,
    emit_floor: Severity,
    dump_floor: Severity,
    end_floor: Severity,
    buffer: Vec<Record>,
    node: NodeId,
    tree: FieldTree,
    config: SharedConfig,
    start: Instant,
    elapsed: Option<Duration>,
    end_fields: Fields,
}

impl ScopedLogger {
    /// Construction fails when the dump threshold ranks below the emission
    /// floor, or when a supplied correlation id contains the chain
    /// delimiter.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        config: SharedConfig,
        tree: FieldTree,
        parent: Option<NodeId>,
        emit_floor: Severity,
        dump_floor: Severity,
        end_floor: Severity,
        uids: Option<Uids>,
    ) -> Result<Self> {
        if !dump_floor.should_emit(emit_floor) {
            return Err(LogError::config(format!(
                "dump threshold '{}' must be at or above logging level '{}'",
                dump_floor, emit_floor
            )));
        }

        let uids = match uids {
            None => vec![generate_uid()],
            Some(Uids::Single(uid)) => {
                validate_uid(&uid)?;
                vec![uid]
            }
            Some(Uids::Chain(chain)) => {
                for uid in &chain {
                    validate_uid(uid)?;
                }
                let mut chain = chain;
                chain.push(generate_uid());
                chain
            }
        };

        let node = match parent {
            Some(parent) => tree.create_child(parent),
            None => tree.create_node(),
        };

        Ok(Self {
            name,
            uids,
            emit_floor,
            dump_floor,
            end_floor,
            buffer: Vec::new(),
            node,
            tree,
            config,
            start: Instant::now(),
            elapsed: None,
            end_fields: Fields::new(),
        })
    }

    /// A copy of the correlation chain, for handing to a sub-component.
    #[must_use]
    pub fn get_uids(&self) -> Vec<String> {
        self.uids.clone()
    }

    /// The colon-joined form of the correlation chain, for transmission
    /// through any text-based protocol.
    #[must_use]
    pub fn get_serialized_uids(&self) -> String {
        serialize_uids(&self.uids)
    }

    /// Add default fields included in every record this scope emits.
    /// Returns the previous set.
    pub fn add_default_fields(&mut self, fields: Fields) -> Fields {
        self.tree.add_fields(self.node, fields)
    }

    /// Remove default fields by name. Returns the previous set.
    pub fn remove_default_fields<S: AsRef<str>>(&mut self, names: &[S]) -> Fields {
        self.tree.remove_fields(self.node, names)
    }

    /// Drop every locally-defined default field, keeping inherited ones.
    /// Returns the fields that were cleared.
    pub fn reset_default_fields(&mut self) -> Fields {
        self.tree.reset_fields(self.node)
    }

    /// Whether `end()` or `error_end()` already ran.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Duration of the scope, once ended.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Record an entry and route it through the buffer state machine.
    pub fn log(&mut self, level: Severity, message: impl Into<String>, fields: Option<Fields>) {
        self.append(level, &message.into(), fields.as_ref(), None);
    }

    /// Dynamic-fields entry point for callers holding loosely-typed data.
    ///
    /// A non-object value is API misuse: it is converted into a single
    /// fatal-level diagnostic record carrying the offending call's
    /// parameters, and the malformed call never raises.
    pub fn log_value(
        &mut self,
        level: Severity,
        message: impl Into<String>,
        fields: Option<Value>,
    ) {
        let message = message.into();
        match fields {
            None => self.log(level, message, None),
            Some(Value::Object(map)) => self.log(level, message, Some(Fields::from_map(map))),
            Some(other) => {
                let diagnostic =
                    Fields::new().with("callparams", serde_json::json!([message, other]));
                self.log(
                    Severity::Fatal,
                    "logging API misused; this development error should be fixed ASAP",
                    Some(diagnostic),
                );
            }
        }
    }

    pub fn trace(&mut self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Trace, message, fields);
    }

    pub fn debug(&mut self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Debug, message, fields);
    }

    pub fn info(&mut self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Info, message, fields);
    }

    pub fn warn(&mut self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Warn, message, fields);
    }

    pub fn error(&mut self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Error, message, fields);
    }

    pub fn fatal(&mut self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Fatal, message, fields);
    }

    /// Close the scope with a record at the configured end level, injecting
    /// the elapsed duration as `elapsed_ms`.
    ///
    /// Ending a scope twice is a contract violation and fails with
    /// `ScopeEnded`.
    pub fn end(&mut self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.log_end(self.end_floor, &message.into(), fields)
    }

    /// Close the scope with an error-level record; same one-shot contract
    /// as [`end`](Self::end).
    pub fn error_end(&mut self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.log_end(Severity::Error, &message.into(), fields)
    }

    /// Deferred form of [`end`](Self::end): returns a wrapper that logs the
    /// closing record at a level of the caller's choosing, with the
    /// accumulated elapsed time and any fields pre-registered on the
    /// wrapper via `add_default_fields`.
    pub fn end_logger(&mut self) -> EndLogger<'_> {
        EndLogger { scope: self }
    }

    fn log_end(&mut self, level: Severity, message: &str, fields: Option<Fields>) -> Result<()> {
        if self.elapsed.is_some() {
            return Err(LogError::ScopeEnded);
        }
        let elapsed = self.start.elapsed();
        self.elapsed = Some(elapsed);

        let mut merged = self.end_fields.clone();
        if let Some(extra) = fields {
            merged.merge(&extra);
        }
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        self.append(level, message, Some(&merged), Some(elapsed_ms));
        Ok(())
    }

    /// Merge, buffer, and route one entry.
    ///
    /// Merge order: the node's precomputed default fields, then call-site
    /// fields (caller wins on conflict), reserved names dropped from both;
    /// then the computed bookkeeping values.
    fn append(
        &mut self,
        level: Severity,
        message: &str,
        fields: Option<&Fields>,
        elapsed_ms: Option<f64>,
    ) {
        let mut merged = Fields::new();
        merged.merge_unreserved(&self.tree.fields(self.node));
        if let Some(extra) = fields {
            merged.merge_unreserved(extra);
        }

        let mut record = Record::new(self.name.clone(), level, message);
        record.req_id = Some(serialize_uids(&self.uids));
        record.fields = merged;
        record.elapsed_ms = elapsed_ms;
        self.buffer.push(record);

        if level.should_emit(self.dump_floor) {
            // Dump: flush the whole history in insertion order, then clear
            // it so a later dump never repeats these entries.
            for entry in self.buffer.drain(..) {
                self.config.write_record(&entry);
            }
        } else if level.should_emit(self.emit_floor) {
            // Emit the single entry; it stays buffered for a later dump.
            if let Some(entry) = self.buffer.last() {
                self.config.write_record(entry);
            }
        }
    }
}

impl Drop for ScopedLogger {
    fn drop(&mut self) {
        self.tree.release(self.node);
    }
}

/// One-shot wrapper returned by [`ScopedLogger::end_logger`].
///
/// Fields registered here persist on the scope, so they survive across
/// separate `end_logger()` calls and land on the final closing record.
pub struct EndLogger<'a> {
    scope: &'a mut ScopedLogger,
}

impl EndLogger<'_> {
    /// Pre-register fields for the closing record. Returns the previous
    /// set.
    pub fn add_default_fields(&mut self, fields: Fields) -> Fields {
        let previous = self.scope.end_fields.clone();
        self.scope.end_fields.merge(&fields);
        previous
    }

    pub fn trace(self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.scope.log_end(Severity::Trace, &message.into(), fields)
    }

    pub fn debug(self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.scope.log_end(Severity::Debug, &message.into(), fields)
    }

    pub fn info(self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.scope.log_end(Severity::Info, &message.into(), fields)
    }

    pub fn warn(self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.scope.log_end(Severity::Warn, &message.into(), fields)
    }

    pub fn error(self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.scope.log_end(Severity::Error, &message.into(), fields)
    }

    pub fn fatal(self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.scope.log_end(Severity::Fatal, &message.into(), fields)
    }
}
