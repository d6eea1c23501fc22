//! Console sink implementation

use crate::core::{Record, Result, Severity, Sink};
use chrono::TimeZone;
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleFormat {
    /// One JSON object per line, the wire format
    #[default]
    Json,
    /// Human-readable single-line text
    Text,
}

pub struct ConsoleSink {
    format: ConsoleFormat,
    use_colors: bool,
}

impl ConsoleSink {
    /// JSON-lines console sink, the default output
    pub fn new() -> Self {
        Self {
            format: ConsoleFormat::Json,
            use_colors: false,
        }
    }

    /// Human-readable console sink with colored levels
    pub fn text() -> Self {
        Self {
            format: ConsoleFormat::Text,
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn format_text(&self, record: &Record) -> String {
        let level_str = if self.use_colors {
            format!("{:5}", record.level.name().to_uppercase())
                .color(record.level.color_code())
                .to_string()
        } else {
            format!("{:5}", record.level.name().to_uppercase())
        };

        let timestamp = chrono::Utc
            .timestamp_millis_opt(record.time)
            .single()
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
            .unwrap_or_else(|| record.time.to_string());

        let mut line = format!(
            "[{}] [{}] {}: {}",
            timestamp, level_str, record.name, record.message
        );
        if let Some(req_id) = &record.req_id {
            line.push_str(&format!(" req_id={}", req_id));
        }
        if let Some(elapsed_ms) = record.elapsed_ms {
            line.push_str(&format!(" elapsed_ms={:.3}", elapsed_ms));
        }
        if !record.fields.is_empty() {
            line.push(' ');
            line.push_str(&record.fields.format_fields());
        }
        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn append(&mut self, record: &Record) -> Result<()> {
        let line = match self.format {
            ConsoleFormat::Json => record.to_json_string(),
            ConsoleFormat::Text => self.format_text(record),
        };

        // Route error and fatal records to stderr, the rest to stdout
        match record.level {
            Severity::Error | Severity::Fatal => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
