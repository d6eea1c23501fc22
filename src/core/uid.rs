//! Correlation id generation and chain (de)serialization

use super::error::{LogError, Result};
use rand::Rng;

/// The delimiter used when serializing a correlation chain. Individual ids
/// must never contain it.
pub const UID_DELIMITER: char = ':';

/// Generate a correlation id: 80 bits of entropy as a 20-char hex string.
#[must_use]
pub fn generate_uid() -> String {
    let bytes: [u8; 10] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Serialize a correlation chain into its colon-joined text form, suitable
/// for any text-based protocol or header.
#[must_use]
pub fn serialize_uids(uids: &[String]) -> String {
    uids.join(":")
}

/// Split a serialized correlation chain back into its elements.
#[must_use]
pub fn unserialize_uids(data: &str) -> Vec<String> {
    data.split(UID_DELIMITER).map(String::from).collect()
}

/// Reject ids that contain the chain delimiter.
pub fn validate_uid(uid: &str) -> Result<()> {
    if uid.contains(UID_DELIMITER) {
        return Err(LogError::invalid_uid(uid));
    }
    Ok(())
}
