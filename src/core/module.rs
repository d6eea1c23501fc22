//! Module-level logger and scoped-logger factory

use super::config::SharedConfig;
use super::error::Result;
use super::field_tree::{FieldTree, NodeId};
use super::fields::Fields;
use super::record::Record;
use super::scoped::{ScopedLogger, Uids};
use super::severity::Severity;
use super::uid::unserialize_uids;
use serde_json::Value;

/// Named logger for one module or component.
///
/// Holds a [`SharedConfig`] handle and the root of the module's default
/// field hierarchy. Scoped loggers spawned from it snapshot the config
/// floors at creation time and parent their field node under the module
/// node, so fields added at module scope later are visible to every scope,
/// while a scope's floors stay frozen.
///
/// # Example
///
/// ```
/// use scopelog::core::{Fields, ModuleLogger, SharedConfig};
///
/// let config = SharedConfig::new();
/// let logger = ModuleLogger::new("api", config);
///
/// let mut request = logger.new_scoped().unwrap();
/// request.info("request received", Some(Fields::new().with("path", "/v1")));
/// request.end("request served", None).unwrap();
/// ```
pub struct ModuleLogger {
    name: String,
    config: SharedConfig,
    tree: FieldTree,
    node: NodeId,
}

impl ModuleLogger {
    pub fn new(name: impl Into<String>, config: SharedConfig) -> Self {
        let tree = FieldTree::new();
        let node = tree.create_node();
        Self {
            name: name.into(),
            config,
            tree,
            node,
        }
    }

    /// The module name stamped on every record.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a scope with a freshly-generated correlation chain.
    pub fn new_scoped(&self) -> Result<ScopedLogger> {
        self.spawn(None)
    }

    /// Create a scope from an explicit correlation id or inherited chain.
    pub fn new_scoped_with(&self, uids: impl Into<Uids>) -> Result<ScopedLogger> {
        self.spawn(Some(uids.into()))
    }

    /// Create a scope from a serialized (colon-joined) correlation chain.
    pub fn new_scoped_from_serialized(&self, serialized: &str) -> Result<ScopedLogger> {
        self.spawn(Some(Uids::Chain(unserialize_uids(serialized))))
    }

    fn spawn(&self, uids: Option<Uids>) -> Result<ScopedLogger> {
        // Floors are snapshotted here; later config updates do not affect
        // scopes that already exist.
        ScopedLogger::new(
            self.name.clone(),
            self.config.clone(),
            self.tree.clone(),
            Some(self.node),
            self.config.level(),
            self.config.dump_threshold(),
            self.config.end_level(),
            uids,
        )
    }

    /// Add default fields visible to this module and every scope spawned
    /// from it, now and in the future. Returns the previous set.
    pub fn add_default_fields(&self, fields: Fields) -> Fields {
        self.tree.add_fields(self.node, fields)
    }

    /// Remove module-level default fields by name. Returns the previous
    /// set.
    pub fn remove_default_fields<S: AsRef<str>>(&self, names: &[S]) -> Fields {
        self.tree.remove_fields(self.node, names)
    }

    /// Drop every module-level default field. Returns the fields that were
    /// cleared.
    pub fn reset_default_fields(&self) -> Fields {
        self.tree.reset_fields(self.node)
    }

    /// Log directly at module level: no buffering, no correlation chain,
    /// and the floor is read live from the shared configuration.
    pub fn log(&self, level: Severity, message: impl Into<String>, fields: Option<Fields>) {
        if !level.should_emit(self.config.level()) {
            return;
        }
        let mut merged = Fields::new();
        merged.merge_unreserved(&self.tree.fields(self.node));
        if let Some(extra) = &fields {
            merged.merge_unreserved(extra);
        }
        let mut record = Record::new(self.name.clone(), level, message.into());
        record.fields = merged;
        self.config.write_record(&record);
    }

    /// Dynamic-fields entry point; same misuse policy as
    /// [`ScopedLogger::log_value`].
    pub fn log_value(&self, level: Severity, message: impl Into<String>, fields: Option<Value>) {
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

    pub fn trace(&self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Trace, message, fields);
    }

    pub fn debug(&self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Debug, message, fields);
    }

    pub fn info(&self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Info, message, fields);
    }

    pub fn warn(&self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Warn, message, fields);
    }

    pub fn error(&self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Error, message, fields);
    }

    pub fn fatal(&self, message: impl Into<String>, fields: Option<Fields>) {
        self.log(Severity::Fatal, message, fields);
    }
}

impl Drop for ModuleLogger {
    fn drop(&mut self) {
        self.tree.release(self.node);
    }
}
