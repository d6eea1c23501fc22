//! Request-scoped logging: correlation chains, buffering, and dumps

use scopelog::prelude::*;

fn handle_request(logger: &ModuleLogger, path: &str, fail: bool) {
    let mut request = logger.new_scoped().expect("valid scope");
    request.add_default_fields(Fields::new().with("path", path));

    request.debug("parsing request", None);
    request.debug("authenticating", None);
    request.info("handling request", None);

    if fail {
        // The error triggers a dump: the buffered debug entries above
        // become visible, giving the full history of the failed request.
        request.error("backend unavailable", Some(Fields::new().with("backend", "db-1")));
        request.error_end("request failed", None).expect("first end");
    } else {
        request
            .end("request served", Some(Fields::new().with("status", 200)))
            .expect("first end");
    }
}

fn main() {
    let config = SharedConfig::new();
    config
        .update(ConfigUpdate::new().sinks(vec![Box::new(ConsoleSink::new())]))
        .expect("valid configuration");

    let logger = ModuleLogger::new("api", config);
    logger.add_default_fields(Fields::new().with("service", "api"));

    handle_request(&logger, "/v1/users", false);
    handle_request(&logger, "/v1/orders", true);
}
