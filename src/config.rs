use crate::env::{
    env_var, APP_NAME_ENV, LOG_INTERVAL_SECONDS_ENV, LOG_PATH_ENV, LOG_RANDOM_SEED_ENV,
};
use crate::error::ProducerError;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_LOG_PATH: &str = "/logs/java-app.log";
pub const DEFAULT_APP_NAME: &str = "java-log-producer";

/// Default and minimum tick interval, in seconds.
pub const MIN_INTERVAL_SECONDS: f64 = 0.1;

/// Resolved producer settings.
///
/// **Fields**
/// - `log_path`: file that records are appended to.
/// - `interval_seconds`: pause between ticks, never below
///   [`MIN_INTERVAL_SECONDS`].
/// - `app_name`: value of the `app` field.
/// - `seed`: optional RNG seed for reproducible output.
/// - `mirror_stdout`: whether each line is echoed to standard output.
#[derive(Clone, Debug, PartialEq)]
pub struct ProducerConfig {
    pub log_path: PathBuf,
    pub interval_seconds: f64,
    pub app_name: String,
    pub seed: Option<u64>,
    pub mirror_stdout: bool,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            interval_seconds: MIN_INTERVAL_SECONDS,
            app_name: DEFAULT_APP_NAME.to_string(),
            seed: None,
            mirror_stdout: true,
        }
    }
}

impl ProducerConfig {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Resolve settings from an arbitrary key lookup.
    ///
    /// Bad input never fails: a missing or unparseable interval or seed
    /// silently falls back to its default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_path = lookup(LOG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));
        let app_name = lookup(APP_NAME_ENV).unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        Self {
            log_path,
            interval_seconds: parse_interval_seconds(lookup(LOG_INTERVAL_SECONDS_ENV).as_deref()),
            app_name,
            seed: lookup(LOG_RANDOM_SEED_ENV).and_then(|s| s.trim().parse().ok()),
            mirror_stdout: true,
        }
    }

    /// Pause between ticks: the interval rounded to whole milliseconds,
    /// at least one millisecond.
    pub fn tick_delay(&self) -> Duration {
        let millis = (self.interval_seconds * 1000.0).round();
        // `as` saturates, so an infinite interval becomes `u64::MAX` ms.
        Duration::from_millis((millis as u64).max(1))
    }
}

/// Parse the interval text, clamping to [`MIN_INTERVAL_SECONDS`].
pub fn parse_interval_seconds(raw: Option<&str>) -> f64 {
    match raw.map(str::trim).and_then(|s| s.parse::<f64>().ok()) {
        Some(parsed) if !parsed.is_nan() => parsed.max(MIN_INTERVAL_SECONDS),
        _ => MIN_INTERVAL_SECONDS,
    }
}

/// Create the parent directory of `log_path` and any missing ancestors.
pub async fn ensure_parent_dir(log_path: &Path) -> Result<(), ProducerError> {
    let parent = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return Ok(()),
    };

    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|source| ProducerError::DirectorySetup {
            path: log_path.to_path_buf(),
            source,
        })
}
