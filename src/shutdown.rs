use crate::stdout_sink::write_notice;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Notice printed when a termination request arrives.
pub const STOPPING_NOTICE: &str = "Log producer stopping...";

/// Cooperative cancellation token shared between the emission loop and
/// the signal listener.
///
/// The flag is written with `Release` and read with `Acquire`; waiters
/// parked in [`ShutdownSignal::cancelled`] are woken when it flips.
#[derive(Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    triggered: AtomicBool,
    notify: Notify,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request termination. Idempotent.
    pub fn trigger(&self) {
        if !self.inner.triggered.swap(true, Ordering::AcqRel) {
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.load(Ordering::Acquire)
    }

    /// Resolves once [`ShutdownSignal::trigger`] has been called.
    pub async fn cancelled(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a trigger in between is
        // not missed.
        notified.as_mut().enable();
        if self.is_triggered() {
            return;
        }
        notified.await;
    }
}

/// Spawn a task that waits for Ctrl-C (and SIGTERM on Unix), prints the
/// stopping notice and triggers `shutdown`.
///
/// The listener owns no producer resources; closing the output is left
/// to the emission loop.
pub fn listen_for_termination(shutdown: ShutdownSignal) -> JoinHandle<()> {
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(()) => on_termination(&shutdown, std::io::stdout().lock()),
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for termination signals");
            }
        }
    })
}

/// Termination callback: write the stopping notice to `out`, then
/// trigger `shutdown`.
///
/// The notice goes first so it precedes the loop's stopped line. A
/// failed write is only logged, so it cannot prevent the trigger.
pub fn on_termination<W: Write>(shutdown: &ShutdownSignal, out: W) {
    write_notice(out, STOPPING_NOTICE);
    shutdown.trigger();
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
