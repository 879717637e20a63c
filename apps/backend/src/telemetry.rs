use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_SERVER_FILTER: &str = "info,actix_web=info,sqlx=warn,sea_orm=warn";

/// JSON logs for the HTTP server. Events carry the enclosing `request`
/// span, so every line inside a handler has its `trace_id`.
pub fn init_json_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_SERVER_FILTER));

    let fmt_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Plain text logs on stderr for the command-line tools; quiet by default.
pub fn init_cli_tracing(verbose: bool) {
    let default = if verbose { "info,sea_orm=warn,sqlx=warn" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
