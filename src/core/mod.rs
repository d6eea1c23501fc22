//! Core logging types: severity order, field hierarchy, scoped logging

pub mod config;
pub mod error;
pub mod field_tree;
pub mod fields;
pub mod module;
pub mod record;
pub mod scoped;
pub mod severity;
pub mod sink;
pub mod uid;

pub use config::{ConfigUpdate, SharedConfig};
pub use error::{LogError, Result};
pub use field_tree::{FieldTree, NodeId};
pub use fields::{is_reserved, Fields, RESERVED_FIELDS};
pub use module::ModuleLogger;
pub use record::Record;
pub use scoped::{EndLogger, ScopedLogger, Uids};
pub use severity::{Severity, ALL_LEVELS};
pub use sink::Sink;
pub use uid::{generate_uid, serialize_uids, unserialize_uids, validate_uid};
