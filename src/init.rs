use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Configuration of the producer's own diagnostics.
///
/// Diagnostics never go to standard output, which carries only the
/// generated JSON lines and the lifecycle notices.
///
/// **Fields**
/// - `default_filter`: directive used when `RUST_LOG` is unset or
///   invalid.
/// - `ansi`: colourise the `fmt` output.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    pub default_filter: String,
    pub ansi: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            ansi: false,
        }
    }
}

/// Install a global `tracing` subscriber writing to stderr.
///
/// **Effects**
///
/// Installs a [`Registry`] combined with an [`EnvFilter`] and a
/// `tracing_subscriber::fmt` layer. If a global subscriber is already
/// set (e.g. by an embedding application or a previous call) this is a
/// no-op.
pub fn init_tracing_with_config(config: TracingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_target(false);

    let _ = Registry::default().with(filter).with(fmt_layer).try_init();
}

/// Initialize tracing with [`TracingConfig::default`].
pub fn init_tracing() {
    init_tracing_with_config(TracingConfig::default());
}
