use crate::config::{ensure_parent_dir, ProducerConfig};
use crate::error::ProducerError;
use crate::file_sink::FileSink;
use crate::generator::RecordGenerator;
use crate::shutdown::ShutdownSignal;
use crate::sink::LogSink;
use crate::stdout_sink::{print_notice, StdoutSink};
use rand::Rng;
use tokio::time::{sleep, Duration};

/// Notice printed once the loop has exited and the log file is closed.
pub const STOPPED_NOTICE: &str = "Log producer stopped.";

/// The emission loop.
///
/// Owns the primary sink (normally the log file) and an optional mirror
/// (normally standard output). Each tick builds one record, appends it
/// to the primary sink, mirrors it, then sleeps until the next tick or
/// until shutdown is requested.
pub struct LogProducer<R> {
    generator: RecordGenerator<R>,
    sink: Box<dyn LogSink>,
    mirror: Option<Box<dyn LogSink>>,
    tick_delay: Duration,
    /// Records successfully appended to the primary sink.
    emitted_records: u64,
    /// Records that could not be mirrored.
    mirror_failures: u64,
}

impl<R: Rng + Send> LogProducer<R> {
    pub fn new(generator: RecordGenerator<R>, sink: Box<dyn LogSink>, tick_delay: Duration) -> Self {
        Self {
            generator,
            sink,
            mirror: None,
            tick_delay: tick_delay.max(Duration::from_millis(1)),
            emitted_records: 0,
            mirror_failures: 0,
        }
    }

    pub fn with_mirror(mut self, mirror: Box<dyn LogSink>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Records appended to the primary sink over the producer's lifetime.
    pub fn emitted_records(&self) -> u64 {
        self.emitted_records
    }

    /// Records the mirror failed to accept.
    pub fn mirror_failures(&self) -> u64 {
        self.mirror_failures
    }

    /// Generate, serialize, append and mirror a single record.
    ///
    /// **Returns**
    /// - the serialized line that was written.
    /// - `Err(ProducerError::Write)` if the primary sink failed. Mirror
    ///   failures are logged and counted, never returned.
    pub async fn tick(&mut self) -> Result<String, ProducerError> {
        let record = self.generator.next_record();
        let line = record.to_json_line()?;

        self.sink.send(&line).await.map_err(ProducerError::Write)?;
        self.emitted_records += 1;

        if let Some(mirror) = self.mirror.as_mut() {
            if let Err(e) = mirror.send(&line).await {
                self.mirror_failures += 1;
                tracing::warn!(error = %e, "failed to mirror log entry");
            }
        }

        Ok(line)
    }

    /// Run ticks until `shutdown` is triggered or a write fails.
    ///
    /// The flag is checked at the top of every iteration, so a tick in
    /// progress always completes; the sleep between ticks is cut short by
    /// the signal. Sinks are closed on every exit path.
    ///
    /// **Returns**
    /// - number of records emitted during this run.
    pub async fn run(mut self, shutdown: ShutdownSignal) -> Result<u64, ProducerError> {
        let result = self.run_loop(&shutdown).await;
        let closed = self.close().await;

        let emitted = result?;
        closed?;
        tracing::info!(
            emitted,
            mirror_failures = self.mirror_failures(),
            "log producer loop finished"
        );
        Ok(emitted)
    }

    async fn run_loop(&mut self, shutdown: &ShutdownSignal) -> Result<u64, ProducerError> {
        let mut emitted = 0u64;

        while !shutdown.is_triggered() {
            self.tick().await?;
            emitted += 1;

            tokio::select! {
                _ = sleep(self.tick_delay) => {}
                _ = shutdown.cancelled() => {
                    tracing::debug!("sleep interrupted by shutdown");
                }
            }
        }

        Ok(emitted)
    }

    async fn close(&mut self) -> Result<(), ProducerError> {
        if let Some(mirror) = self.mirror.as_mut() {
            if let Err(e) = mirror.close().await {
                tracing::warn!(error = %e, "failed to close mirror");
            }
        }
        self.sink.close().await.map_err(ProducerError::Write)
    }
}

/// Build and run a producer from resolved configuration.
///
/// Creates the log directory, prints the startup line, opens the log
/// file in append mode and runs the loop until `shutdown` fires. The
/// stopped line is printed only on a clean exit.
pub async fn run_with_config(
    config: &ProducerConfig,
    shutdown: ShutdownSignal,
) -> Result<u64, ProducerError> {
    ensure_parent_dir(&config.log_path).await?;

    print_notice(&format!(
        "Starting log producer. Writing to {} every {:.3} seconds.",
        config.log_path.display(),
        config.interval_seconds
    ));
    tracing::info!(
        path = %config.log_path.display(),
        interval_seconds = config.interval_seconds,
        app = %config.app_name,
        seeded = config.seed.is_some(),
        "log producer configured"
    );

    let sink = FileSink::open(&config.log_path).await?;
    let generator = RecordGenerator::with_seed(config.app_name.clone(), config.seed);
    let mut producer = LogProducer::new(generator, Box::new(sink), config.tick_delay());
    if config.mirror_stdout {
        producer = producer.with_mirror(Box::new(StdoutSink::new()));
    }

    let emitted = producer.run(shutdown).await?;
    print_notice(STOPPED_NOTICE);
    Ok(emitted)
}
