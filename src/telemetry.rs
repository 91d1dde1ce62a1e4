use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for CLI runs.
///
/// `RUST_LOG` wins when set; otherwise verbose runs log at debug and
/// normal runs at info. Logs go to stderr so stdout stays clean for the
/// scored output.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
