//! Sink trait for log output destinations

use super::{error::Result, record::Record};

/// An output destination for merged log records.
///
/// The core hands each emitted record to every configured sink, never
/// inspects the outcome beyond reporting a failure, and never retries.
pub trait Sink: Send + Sync {
    fn append(&mut self, record: &Record) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
