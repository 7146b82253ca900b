use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the stderr subscriber. `RUST_LOG` wins over the default level.
pub fn init(verbose: bool) {
    let default_level = if verbose { "pulse=debug" } else { "pulse=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    // A second init (tests, embedding) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
