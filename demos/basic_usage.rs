//! Basic usage: module-level logging with default fields

use scopelog::prelude::*;

fn main() {
    let config = SharedConfig::new();
    config
        .update(
            ConfigUpdate::new()
                .level(Severity::Debug)
                .sinks(vec![Box::new(ConsoleSink::text())]),
        )
        .expect("valid configuration");

    let logger = ModuleLogger::new("demo", config);
    logger.add_default_fields(Fields::new().with("version", "0.1.0"));

    logger.info("application started", None);
    logger.debug(
        "loaded configuration",
        Some(Fields::new().with("entries", 12)),
    );
    logger.warn("cache miss rate above 10%", Some(Fields::new().with("rate", 0.13)));
    logger.error("upstream unreachable", Some(Fields::new().with("upstream", "db-1")));
}
