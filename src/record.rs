use chrono::{DateTime, FixedOffset};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed `message` carried by every record.
pub const RECORD_MESSAGE: &str = "Completed background job";

/// Fixed `tags` carried by every record, in order.
pub const RECORD_TAGS: [&str; 2] = ["example", "java"];

/// Severity of a synthetic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Debug,
    Warn,
    Error,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Info, Level::Debug, Level::Warn, Level::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform over the four levels.
impl Distribution<Level> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Level {
        Level::ALL[rng.random_range(0..Level::ALL.len())]
    }
}

/// One line of synthetic log traffic.
///
/// Field declaration order is the serialized key order, so a parsed line
/// re-serializes byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub timestamp: DateTime<FixedOffset>,
    pub level: Level,
    pub app: String,
    pub message: String,
    pub duration_ms: u32,
    pub customer_id: u32,
    pub tags: Vec<String>,
}

impl LogRecord {
    /// Serialize as a single JSON line without the trailing newline.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
