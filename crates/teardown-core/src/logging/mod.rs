use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log directive used when `--verbose` is not given.
pub const QUIET_DIRECTIVE: &str = "teardown=error";

/// Log directive used with `--verbose`.
pub const VERBOSE_DIRECTIVE: &str = "teardown=info";

/// Pick the filter directive for the requested verbosity.
pub fn log_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVE
    } else {
        QUIET_DIRECTIVE
    }
}

/// Initialize JSON logging on stderr.
///
/// When `verbose` is false, only error-level events are emitted (default).
/// When `verbose` is true, info-level and above events are emitted.
/// `RUST_LOG` directives are honored in both modes.
pub fn init_logging(verbose: bool) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = log_directive(verbose).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}
