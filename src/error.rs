use std::error::Error;
use std::path::PathBuf;

/// Fatal failures of the producer. None of them is retried; the process
/// is expected to be restarted by its supervisor.
#[derive(thiserror::Error, Debug)]
pub enum ProducerError {
    #[error("failed to create log directory for {}", path.display())]
    DirectorySetup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize log entry")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write log entry")]
    Write(#[source] Box<dyn Error + Send + Sync>),
}
