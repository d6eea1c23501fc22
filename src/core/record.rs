//! The merged log record handed to sinks

use super::fields::{is_reserved, Fields};
use super::severity::Severity;
use serde_json::Value;

/// A fully-merged log record.
///
/// The bookkeeping fields (`name`, `level`, `message`, `time`, `req_id`,
/// `pid`, `elapsed_ms`) are stored as typed members; everything else lives
/// in `fields`. Serialization flattens both into a single JSON object with
/// the bookkeeping members winning on any name collision.
#[derive(Debug, Clone)]
pub struct Record {
    /// Name of the module logger this record originated from
    pub name: String,
    pub level: Severity,
    pub message: String,
    /// Capture time, milliseconds since epoch
    pub time: i64,
    /// Colon-joined correlation chain; absent on module-level records
    pub req_id: Option<String>,
    pub pid: u32,
    /// Merged non-reserved fields
    pub fields: Fields,
    /// Duration of the scope in milliseconds; present only on end records
    pub elapsed_ms: Option<f64>,
}

impl Record {
    /// Sanitize a message to keep each record on one output line.
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so an attacker-controlled message cannot forge extra log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(name: impl Into<String>, level: Severity, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            message: Self::sanitize_message(&message.into()),
            time: chrono::Utc::now().timestamp_millis(),
            req_id: None,
            pid: std::process::id(),
            fields: Fields::new(),
            elapsed_ms: None,
        }
    }

    /// Flatten into the wire-format JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (key, value) in self.fields.iter() {
            if !is_reserved(key) {
                map.insert(key.clone(), value.clone());
            }
        }
        map.insert("name".to_string(), Value::from(self.name.as_str()));
        map.insert("level".to_string(), Value::from(self.level.name()));
        map.insert("message".to_string(), Value::from(self.message.as_str()));
        map.insert("time".to_string(), Value::from(self.time));
        if let Some(req_id) = &self.req_id {
            map.insert("req_id".to_string(), Value::from(req_id.as_str()));
        }
        map.insert("pid".to_string(), Value::from(self.pid));
        if let Some(elapsed_ms) = self.elapsed_ms {
            map.insert("elapsed_ms".to_string(), Value::from(elapsed_ms));
        }
        Value::Object(map)
    }

    /// Serialize to a single JSON line.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_flat_shape() {
        let mut record = Record::new("api", Severity::Info, "request served");
        record.req_id = Some("a:b:c".to_string());
        record.fields = Fields::new().with("status", 200);

        let json = record.to_json();
        assert_eq!(json["name"], "api");
        assert_eq!(json["level"], "info");
        assert_eq!(json["message"], "request served");
        assert_eq!(json["req_id"], "a:b:c");
        assert_eq!(json["status"], 200);
        assert!(json["time"].is_i64());
        assert!(json["pid"].is_u64());
        assert!(json.get("elapsed_ms").is_none());
    }

    #[test]
    fn test_elapsed_only_on_end_records() {
        let mut record = Record::new("api", Severity::Info, "done");
        record.elapsed_ms = Some(12.5);
        let json = record.to_json();
        assert_eq!(json["elapsed_ms"], 12.5);
    }

    #[test]
    fn test_reserved_fields_never_leak_from_payload() {
        let mut record = Record::new("api", Severity::Info, "msg");
        record.fields = Fields::new()
            .with("time", "forged")
            .with("req_id", "forged")
            .with("hostname", "forged")
            .with("ok", true);

        let json = record.to_json();
        assert!(json["time"].is_i64());
        assert!(json.get("req_id").is_none());
        assert!(json.get("hostname").is_none());
        assert_eq!(json["ok"], true);
    }

    #[test]
    fn test_message_sanitization() {
        let record = Record::new("api", Severity::Info, "line1\nline2\r\tend");
        assert_eq!(record.message, "line1\\nline2\\r\\tend");
        assert!(!record.to_json_string().contains('\n'));
    }

    #[test]
    fn test_timestamp_is_recent() {
        let record = Record::new("api", Severity::Info, "msg");
        let now = chrono::Utc::now().timestamp_millis();
        assert!((now - record.time).abs() < 1_000);
    }
}
