//! Severity level definitions and ordering

use super::error::LogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six severity levels, ranked from least to most severe.
///
/// Comparisons always operate on the rank, never on the lexical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

/// All levels in rank order, least severe first.
pub const ALL_LEVELS: [Severity; 6] = [
    Severity::Trace,
    Severity::Debug,
    Severity::Info,
    Severity::Warn,
    Severity::Error,
    Severity::Fatal,
];

impl Severity {
    /// Integer rank of this level in the fixed order.
    #[must_use]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Whether an entry at this level passes the given floor.
    ///
    /// `floor` acts as a threshold: entries at or above it qualify.
    #[must_use]
    pub fn should_emit(self, floor: Severity) -> bool {
        self.rank() >= floor.rank()
    }

    /// The lower-case wire name of this level.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    pub fn color_code(self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Trace => BrightBlack,
            Severity::Debug => Blue,
            Severity::Info => Green,
            Severity::Warn => Yellow,
            Severity::Error => Red,
            Severity::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    /// Case-sensitive, exact-name parse. Anything but the six lower-case
    /// names is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(LogError::invalid_level(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        for pair in ALL_LEVELS.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_should_emit() {
        assert!(Severity::Warn.should_emit(Severity::Warn));
        assert!(Severity::Error.should_emit(Severity::Warn));
        assert!(!Severity::Info.should_emit(Severity::Warn));
        assert!(Severity::Fatal.should_emit(Severity::Trace));
        assert!(!Severity::Trace.should_emit(Severity::Fatal));
    }

    #[test]
    fn test_parse_exact_names() {
        for level in ALL_LEVELS {
            let parsed: Severity = level.name().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Trace".parse::<Severity>().is_err());
        assert!("INFO".parse::<Severity>().is_err());
        assert!("Warn".parse::<Severity>().is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "verbose".parse::<Severity>().unwrap_err();
        assert!(matches!(err, LogError::InvalidLevel { .. }));
        assert!("".parse::<Severity>().is_err());
        assert!("warning".parse::<Severity>().is_err());
    }

    #[test]
    fn test_display_matches_name() {
        for level in ALL_LEVELS {
            assert_eq!(format!("{}", level), level.name());
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Severity::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
        let back: Severity = serde_json::from_str("\"fatal\"").unwrap();
        assert_eq!(back, Severity::Fatal);
    }
}
