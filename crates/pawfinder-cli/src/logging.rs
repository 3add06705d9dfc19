use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use pawfinder_core::config::LoggingSettings;

/// Filter directive override, e.g. `PAWFINDER_LOG=pawfinder_application=debug`.
pub const ENV_LOG: &str = "PAWFINDER_LOG";

/// Installs the global subscriber. Output goes to stderr so it never mixes
/// with the listings printed on stdout.
pub fn init(settings: &LoggingSettings, verbose: u8, force_json: bool) {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => settings.level.as_str(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    let registry = tracing_subscriber::registry().with(filter);
    if settings.json || force_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
