use tracing_subscriber::EnvFilter;

/// Initialise logging at `info` level, or `debug` when enabled from the
/// settings file. `RUST_LOG` can refine the filter only in debug mode;
/// otherwise it is ignored so a stray environment variable cannot make the
/// panel verbose.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
