use crate::sink::LogSink;
use async_trait::async_trait;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A sink that keeps every line in memory.
///
/// Clones share the same buffer, so a caller can hand one clone to the
/// producer and inspect the other afterwards. Useful for measuring the
/// producer without file I/O, and for tests.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines received so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`LogSink::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl LogSink for MemorySink {
    async fn send(&mut self, line: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.lines
            .lock()
            .map_err(|_| "memory sink lock poisoned")?
            .push(line.to_string());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
