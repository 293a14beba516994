use crate::error::ProducerError;
use crate::sink::LogSink;
use async_trait::async_trait;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Appends newline-delimited records to a file.
///
/// The file is opened once in create+append mode and never truncated.
/// Every line is flushed before `send` returns so nothing is buffered
/// across ticks.
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ProducerError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| ProducerError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> Result<&mut File, Box<dyn Error + Send + Sync>> {
        self.file
            .as_mut()
            .ok_or_else(|| format!("log file {} is already closed", self.path.display()).into())
    }
}

#[async_trait]
impl LogSink for FileSink {
    async fn send(&mut self, line: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let file = self.file()?;
        file.write_all(buf.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        match self.file.as_mut() {
            Some(file) => Ok(file.flush().await?),
            None => Ok(()),
        }
    }

    async fn close(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
        }
        Ok(())
    }
}
