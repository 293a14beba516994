use crate::record::{Level, LogRecord, RECORD_MESSAGE, RECORD_TAGS};
use chrono::{DateTime, FixedOffset, Local};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Range of the `durationMs` field.
pub const DURATION_MS_RANGE: Range<u32> = 50..650;

/// Range of the `customerId` field.
pub const CUSTOMER_ID_RANGE: Range<u32> = 500..1000;

/// Builds fresh [`LogRecord`]s from an injected random source.
///
/// The generator is generic over [`Rng`] so tests can substitute a seeded
/// or otherwise deterministic source; the binary uses [`SmallRng`].
pub struct RecordGenerator<R> {
    app: String,
    rng: R,
}

impl<R: Rng> RecordGenerator<R> {
    pub fn new(app: impl Into<String>, rng: R) -> Self {
        Self { app: app.into(), rng }
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    /// Build a record stamped with the current local time.
    pub fn next_record(&mut self) -> LogRecord {
        self.record_at(Local::now().fixed_offset())
    }

    /// Build a record with an explicit timestamp.
    pub fn record_at(&mut self, timestamp: DateTime<FixedOffset>) -> LogRecord {
        let level: Level = self.rng.random();
        LogRecord {
            timestamp,
            level,
            app: self.app.clone(),
            message: RECORD_MESSAGE.to_string(),
            duration_ms: self.rng.random_range(DURATION_MS_RANGE),
            customer_id: self.rng.random_range(CUSTOMER_ID_RANGE),
            tags: RECORD_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl RecordGenerator<SmallRng> {
    /// Seeded from `seed` when given, otherwise from OS entropy.
    pub fn with_seed(app: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::new(app, rng)
    }
}
