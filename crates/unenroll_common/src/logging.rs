//! Logging utilities for the Unenroll service.
//!
//! All crates log through `tracing`; the binary calls [`init`] once at startup.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level for the
/// `unenroll*` crates. `RUST_LOG` directives are honoured on top of that.
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    for directive in [format!("unenroll={}", level), "tower_http=info".to_string()] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(err) => eprintln!("Ignoring invalid log directive '{}': {}", directive, err),
        }
    }

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result, so it can sit in the middle of a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
