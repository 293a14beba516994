use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use log_producer::config::{ProducerConfig, MIN_INTERVAL_SECONDS};
use log_producer::env::{APP_NAME_ENV, LOG_INTERVAL_SECONDS_ENV, LOG_PATH_ENV};
use log_producer::producer::run_with_config;
use log_producer::record::LogRecord;
use log_producer::shutdown::ShutdownSignal;

const EXPECTED_KEYS: [&str; 7] = [
    "app",
    "customerId",
    "durationMs",
    "level",
    "message",
    "tags",
    "timestamp",
];

fn quiet_config(lookup: impl Fn(&str) -> Option<String>) -> ProducerConfig {
    let mut config = ProducerConfig::from_lookup(lookup);
    config.mirror_stdout = false;
    config
}

async fn run_for(config: &ProducerConfig, duration: Duration) -> u64 {
    let shutdown = ShutdownSignal::new();
    let trigger = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            shutdown.trigger();
        })
    };

    let emitted = run_with_config(config, shutdown).await.unwrap();
    trigger.await.unwrap();
    emitted
}

#[tokio::test]
async fn creates_nested_directories_and_appends_valid_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x").join("y").join("test.log");
    let path_str = path.to_str().unwrap().to_string();

    let config = quiet_config(|key| match key {
        LOG_PATH_ENV => Some(path_str.clone()),
        APP_NAME_ENV => Some("pipeline-probe".to_string()),
        _ => None,
    });

    let emitted = run_for(&config, Duration::from_millis(350)).await;
    assert!(emitted >= 1);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len() as u64, emitted);
    assert!(contents.ends_with('\n'));

    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        let keys: BTreeSet<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        let expected: BTreeSet<&str> = EXPECTED_KEYS.into_iter().collect();
        assert_eq!(keys, expected);

        assert!(["INFO", "DEBUG", "WARN", "ERROR"].contains(&value["level"].as_str().unwrap()));
        assert_eq!(value["app"], "pipeline-probe");
        assert_eq!(value["message"], "Completed background job");
        assert_eq!(value["tags"], serde_json::json!(["example", "java"]));
        let duration = value["durationMs"].as_u64().unwrap();
        assert!((50..=649).contains(&duration));
        let customer = value["customerId"].as_u64().unwrap();
        assert!((500..=999).contains(&customer));
        assert!(value["timestamp"].is_string());

        let record: LogRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.to_json_line().unwrap(), line);
    }
}

#[tokio::test]
async fn keeps_existing_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    std::fs::write(&path, "previous run\n").unwrap();
    let path_str = path.to_str().unwrap().to_string();

    let config = quiet_config(|key| (key == LOG_PATH_ENV).then(|| path_str.clone()));
    let emitted = run_for(&config, Duration::from_millis(150)).await;

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("previous run\n"));
    assert_eq!(contents.lines().count() as u64, emitted + 1);
}

#[tokio::test]
async fn unparseable_interval_behaves_as_default() {
    let dir = tempfile::tempdir().unwrap();
    let path_str = dir.path().join("app.log").to_str().unwrap().to_string();

    let config = quiet_config(|key| match key {
        LOG_PATH_ENV => Some(path_str.clone()),
        LOG_INTERVAL_SECONDS_ENV => Some("abc".to_string()),
        _ => None,
    });

    assert_eq!(config.interval_seconds, MIN_INTERVAL_SECONDS);
    assert_eq!(config.tick_delay(), Duration::from_millis(100));
}

#[tokio::test]
async fn shutdown_during_long_interval_is_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let path_str = dir.path().join("app.log").to_str().unwrap().to_string();

    let config = quiet_config(|key| match key {
        LOG_PATH_ENV => Some(path_str.clone()),
        LOG_INTERVAL_SECONDS_ENV => Some("30".to_string()),
        _ => None,
    });

    let started = Instant::now();
    let emitted = run_for(&config, Duration::from_millis(100)).await;

    assert_eq!(emitted, 1);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn unwritable_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file").unwrap();
    let path_str = blocker.join("nested").join("app.log").to_str().unwrap().to_string();

    let config = quiet_config(|key| (key == LOG_PATH_ENV).then(|| path_str.clone()));
    let err = run_with_config(&config, ShutdownSignal::new()).await.unwrap_err();

    assert!(err.to_string().starts_with("failed to create log directory for"));
}

#[tokio::test]
async fn empty_log_path_is_fatal() {
    let config = quiet_config(|key| (key == LOG_PATH_ENV).then(String::new));
    let err = run_with_config(&config, ShutdownSignal::new()).await.unwrap_err();

    assert!(err.to_string().starts_with("failed to open log file"));
}
