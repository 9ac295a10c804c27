//! Landmark frame sources

use std::collections::VecDeque;

use async_trait::async_trait;
use handpilot_core::LandmarkFrame;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::trace;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read landmark stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed landmark frame on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// A stream of landmark frames; `Ok(None)` means the stream ended.
#[async_trait]
pub trait LandmarkSource: Send {
    async fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, SourceError>;

    fn name(&self) -> &str;
}

/// One JSON [`LandmarkFrame`] per line, as written by a detector process.
///
/// Blank lines are skipped. A line that does not parse ends the run with an error.
pub struct JsonLinesSource<R> {
    lines: Lines<R>,
    line: usize,
    name: String,
}

impl<R: AsyncBufRead + Unpin + Send> JsonLinesSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            name: name.into(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> LandmarkSource for JsonLinesSource<R> {
    async fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, SourceError> {
        while let Some(raw) = self.lines.next_line().await? {
            self.line += 1;
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let frame: LandmarkFrame = serde_json::from_str(raw).map_err(|source| SourceError::Malformed {
                line: self.line,
                source,
            })?;
            trace!(line = self.line, hands = frame.hands.len(), "frame read");
            return Ok(Some(frame));
        }
        Ok(None)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Fixed list of frames, for tests and demos
#[derive(Debug, Default)]
pub struct ScriptedSource {
    frames: VecDeque<LandmarkFrame>,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = LandmarkFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl LandmarkSource for ScriptedSource {
    async fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, SourceError> {
        Ok(self.frames.pop_front())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
