//! Subscriber setup

use std::io::{self, IsTerminal, Write};

use handpilot_config::AppConfig;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// `raw_terminal` is set when operator keys will put the terminal in raw mode
pub fn init_logging(config: &AppConfig, verbose: bool, raw_terminal: bool) {
    let fallback = if verbose { "debug" } else { config.logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // Raw mode turns off the tty's newline translation
    let writer = if raw_terminal && io::stderr().is_terminal() {
        BoxMakeWriter::new(|| CrlfWriter::new(io::stderr()))
    } else {
        BoxMakeWriter::new(io::stderr)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();
}

/// Writes every `\n` as `\r\n`
pub struct CrlfWriter<W> {
    inner: W,
}

impl<W: Write> CrlfWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for (i, line) in buf.split(|b| *b == b'\n').enumerate() {
            if i > 0 {
                self.inner.write_all(b"\r\n")?;
            }
            self.inner.write_all(line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
