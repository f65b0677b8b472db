use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
pub fn init(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "warn,dashboard_core=info,weather_dashboard=info",
        _ => "info,dashboard_core=debug,weather_dashboard=debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    tracing::debug!(verbose, "logging initialized");
}
