/// Environment variable names read by the producer.
///
/// These are purely helpers; [`ProducerConfig::from_lookup`] stays
/// decoupled from environment access so it can be driven from tests.
///
/// [`ProducerConfig::from_lookup`]: crate::config::ProducerConfig::from_lookup

/// Output file path, e.g. `/logs/java-app.log`.
pub const LOG_PATH_ENV: &str = "JAVA_LOG_PATH";

/// Tick interval in (fractional) seconds.
pub const LOG_INTERVAL_SECONDS_ENV: &str = "LOG_INTERVAL_SECONDS";

/// Value written into the `app` field of every record.
pub const APP_NAME_ENV: &str = "APP_NAME";

/// Optional `u64` seed for a reproducible record sequence.
pub const LOG_RANDOM_SEED_ENV: &str = "LOG_RANDOM_SEED";

/// Read an environment variable, treating unset and non-unicode values
/// alike as absent.
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
