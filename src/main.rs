use std::error::Error;
use std::process::ExitCode;

use log_producer::config::ProducerConfig;
use log_producer::init::init_tracing;
use log_producer::producer::run_with_config;
use log_producer::shutdown::{listen_for_termination, ShutdownSignal};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = ProducerConfig::from_env();
    let shutdown = ShutdownSignal::new();
    let listener = listen_for_termination(shutdown.clone());

    let result = run_with_config(&config, shutdown).await;
    listener.abort();

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "log producer failed");
            let mut message = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                message.push_str(": ");
                message.push_str(&cause.to_string());
                source = cause.source();
            }
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
