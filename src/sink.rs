use async_trait::async_trait;
use std::error::Error;

/// Asynchronous, line-oriented destination for serialized records.
///
/// Implementations own their underlying handle exclusively. The producer
/// calls `send` once per tick from its own task and always calls `close`
/// before it returns, on the error path as well.
#[async_trait]
pub trait LogSink: Send {
    /// Append a single serialized record.
    ///
    /// **Parameters**
    /// - `line`: one JSON document without a trailing newline; the sink
    ///   adds the line terminator.
    ///
    /// **Returns**
    /// - `Ok(())` once the line has been handed to the backend.
    /// - `Err(..)` if the write failed. The producer does not retry.
    async fn send(&mut self, line: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Flush any buffered bytes.
    ///
    /// Default implementation is a no-op.
    async fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    /// Release the sink. Defaults to [`LogSink::flush`].
    async fn close(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.flush().await
    }
}
