//! Tracing subscriber setup

use crate::config::LoggingSection;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Output goes to stderr so command output on stdout stays machine-readable.
/// Records emitted through the `log` facade are forwarded as well.
pub fn init_tracing(logging: &LoggingSection) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    match logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
