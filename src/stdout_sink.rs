use crate::sink::LogSink;
use async_trait::async_trait;
use std::error::Error;
use std::io::Write;
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};

/// Mirrors records to standard output (or any async writer), one line
/// each.
pub struct StdoutSink<W = Stdout> {
    out: W,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self::with_writer(tokio::io::stdout())
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> StdoutSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W> LogSink for StdoutSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, line: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        self.out.write_all(buf.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(self.out.flush().await?)
    }
}

/// Write a lifecycle line to `out`.
///
/// A closed or broken console must not take the producer down, so
/// failures are logged and otherwise ignored.
pub fn write_notice<W: Write>(mut out: W, notice: &str) {
    if let Err(e) = writeln!(out, "{notice}").and_then(|_| out.flush()) {
        tracing::warn!(error = %e, notice, "failed to write lifecycle notice");
    }
}

/// [`write_notice`] to standard output.
pub fn print_notice(notice: &str) {
    write_notice(std::io::stdout().lock(), notice);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io;

    /// Writer whose every operation fails like a broken pipe.
    pub(crate) struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[tokio::test]
    async fn mirrors_each_line_with_newline() {
        let mut sink = StdoutSink::with_writer(Vec::<u8>::new());
        sink.send(r#"{"n":1}"#).await.unwrap();
        sink.send(r#"{"n":2}"#).await.unwrap();
        sink.close().await.unwrap();

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "{\"n\":1}\n{\"n\":2}\n");
    }

    #[test]
    fn notice_is_written_as_one_line() {
        let mut out = Vec::new();
        write_notice(&mut out, "Log producer stopped.");
        assert_eq!(out, b"Log producer stopped.\n");
    }

    #[test]
    fn notice_on_broken_console_does_not_panic() {
        write_notice(BrokenPipe, "Log producer stopped.");
    }
}
