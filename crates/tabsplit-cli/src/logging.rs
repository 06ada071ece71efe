use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter for a verbosity level (`-v` count).
///
/// Quiet by default so stdout carries only the report; `RUST_LOG`
/// overrides whatever is picked here.
#[must_use]
pub fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "tabsplit=warn,warn",
        1 => "tabsplit=info,warn",
        _ => "tabsplit=debug,info",
    }
}

/// Install the global subscriber. Logs go to stderr.
pub fn init(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}
