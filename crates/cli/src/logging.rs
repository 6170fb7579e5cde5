use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins over `filter`.
///
/// Records from the `log` facade used by the library crates are bridged.
/// Calling this twice is harmless.
pub fn init(filter: &str) {
    let (env_filter, bad_filter) = match EnvFilter::try_from_default_env() {
        Ok(f) => (f, None),
        Err(_) => match EnvFilter::try_new(filter) {
            Ok(f) => (f, None),
            Err(e) => (EnvFilter::new("info"), Some(e)),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Some(e) = bad_filter {
        log::warn!("invalid log filter {filter:?} ({e}), using \"info\"");
    }
}
