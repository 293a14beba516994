pub mod config;
pub mod env;
pub mod error;
pub mod generator;
pub mod record;
pub mod shutdown;

pub mod sink;
pub mod file_sink;
pub mod memory_sink;
pub mod stdout_sink;

pub mod init;
pub mod producer;
