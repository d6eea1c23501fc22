//! Structured field maps attached to log records

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Field names the system always computes itself. Caller-supplied or
/// default fields under these names are silently dropped when records are
/// assembled, never treated as an error.
pub const RESERVED_FIELDS: [&str; 10] = [
    "name",
    "level",
    "time",
    "message",
    "req_id",
    "hostname",
    "elapsed_ms",
    "pid",
    "tags",
    "@timestamp",
];

/// Whether a field name is reserved for the system's own bookkeeping.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

/// A set of named JSON values carried by a log record.
///
/// Merging is key-by-key with later writes winning, which is the single
/// precedence rule used everywhere in the crate: own fields override
/// inherited ones, call-site fields override defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    map: HashMap<String, Value>,
}

impl Fields {
    /// Create an empty field set
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Build from an already-parsed JSON object
    pub fn from_map(map: serde_json::Map<String, Value>) -> Self {
        Self {
            map: map.into_iter().collect(),
        }
    }

    /// Add a field, builder style
    ///
    /// # Example
    ///
    /// ```
    /// use scopelog::core::Fields;
    ///
    /// let fields = Fields::new()
    ///     .with("user_id", 123)
    ///     .with("action", "login");
    /// assert_eq!(fields.len(), 2);
    /// ```
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.map.insert(key.into(), value.into());
        self
    }

    /// Add a field (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.map.insert(key.into(), value.into());
    }

    /// Remove a field, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.map.iter()
    }

    /// Overlay `other` onto this set; `other`'s values win on conflict.
    pub fn merge(&mut self, other: &Fields) {
        for (key, value) in other.iter() {
            self.map.insert(key.clone(), value.clone());
        }
    }

    /// Overlay `other` onto this set, silently skipping reserved names.
    ///
    /// This is the emission-boundary merge: the field hierarchy itself never
    /// filters, only record assembly does.
    pub fn merge_unreserved(&mut self, other: &Fields) {
        for (key, value) in other.iter() {
            if !is_reserved(key) {
                self.map.insert(key.clone(), value.clone());
            }
        }
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        let mut pairs: Vec<String> = self
            .map
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        pairs.sort();
        pairs.join(" ")
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl FromIterator<(String, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let fields = Fields::new()
            .with("user_id", 123)
            .with("username", "alice")
            .with("active", true);

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("user_id"), Some(&Value::from(123)));
        assert!(!fields.is_empty());
    }

    #[test]
    fn test_merge_later_write_wins() {
        let mut base = Fields::new().with("a", 1).with("b", 2);
        let overlay = Fields::new().with("b", 20).with("c", 3);

        base.merge(&overlay);

        assert_eq!(base.get("a"), Some(&Value::from(1)));
        assert_eq!(base.get("b"), Some(&Value::from(20)));
        assert_eq!(base.get("c"), Some(&Value::from(3)));
    }

    #[test]
    fn test_merge_unreserved_drops_reserved_names() {
        let mut base = Fields::new().with("a", 1);
        let overlay = Fields::new()
            .with("time", 42)
            .with("req_id", "fake")
            .with("@timestamp", "fake")
            .with("b", 2);

        base.merge_unreserved(&overlay);

        assert_eq!(base.len(), 2);
        assert!(!base.contains("time"));
        assert!(!base.contains("req_id"));
        assert!(!base.contains("@timestamp"));
        assert_eq!(base.get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn test_plain_merge_keeps_reserved_names() {
        // The hierarchy-level merge imposes no logging policy.
        let mut base = Fields::new();
        base.merge(&Fields::new().with("hostname", "h"));
        assert!(base.contains("hostname"));
    }

    #[test]
    fn test_reserved_list() {
        assert!(is_reserved("req_id"));
        assert!(is_reserved("elapsed_ms"));
        assert!(!is_reserved("request_id"));
        assert!(!is_reserved("elapsed"));
    }

    #[test]
    fn test_format_fields() {
        let fields = Fields::new().with("key1", "value1").with("key2", 42);
        let formatted = fields.format_fields();
        assert!(formatted.contains("key1=\"value1\""));
        assert!(formatted.contains("key2=42"));
    }

    #[test]
    fn test_from_map() {
        let value = serde_json::json!({"x": 1, "nested": {"y": 2}});
        if let Value::Object(map) = value {
            let fields = Fields::from_map(map);
            assert_eq!(fields.len(), 2);
            assert!(fields.get("nested").is_some());
        } else {
            unreachable!();
        }
    }
}
