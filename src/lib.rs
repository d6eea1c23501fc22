//! # Scopelog
//!
//! Request-scoped structured logging with hierarchical default fields and
//! level-triggered history dumps.
//!
//! ## Features
//!
//! - **Request correlation**: every scope carries a correlation chain,
//!   serialized as `req_id` on each record
//! - **Hierarchical default fields**: fields set on a module logger are
//!   inherited by every scope, with precomputed merges on the hot path
//! - **Buffered history dumps**: entries below the emission floor are
//!   retained, and a severe entry flushes the full recent history
//! - **Structured JSON records**: one flat JSON object per record,
//!   compatible with log aggregation tools

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ConfigUpdate, EndLogger, FieldTree, Fields, LogError, ModuleLogger, NodeId, Record,
        Result, ScopedLogger, Severity, SharedConfig, Sink, Uids,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
}

pub use crate::core::{
    ConfigUpdate, EndLogger, FieldTree, Fields, LogError, ModuleLogger, NodeId, Record, Result,
    ScopedLogger, Severity, SharedConfig, Sink, Uids,
};
pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
