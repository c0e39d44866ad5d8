use std::io::Write;

use anyhow::Context as _;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::VitrineResult;
use crate::render::frame::ViewFrame;

/// Consumer of view frames.
///
/// Ordering contract: within one stage, frames arrive in increasing `FrameIndex` order, and
/// frames sharing an index arrive in mount order.
pub trait FrameSink {
    /// Apply one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &ViewFrame) -> VitrineResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    frames: Vec<(FrameIndex, ViewFrame)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, ViewFrame)] {
        &self.frames
    }

    /// Most recent frame, if any.
    pub fn last(&self) -> Option<&ViewFrame> {
        self.frames.last().map(|(_, f)| f)
    }
}

impl FrameSink for InMemorySink {
    fn push_frame(&mut self, idx: FrameIndex, frame: &ViewFrame) -> VitrineResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }
}

/// Writes one JSON object per frame, `{"frame": n, ...}`.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Flush and return the writer.
    pub fn into_inner(mut self) -> VitrineResult<W> {
        self.out.flush().context("flush frame output")?;
        Ok(self.out)
    }
}

#[derive(serde::Serialize)]
struct Line<'a> {
    frame: u64,
    #[serde(flatten)]
    body: &'a ViewFrame,
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn push_frame(&mut self, idx: FrameIndex, frame: &ViewFrame) -> VitrineResult<()> {
        serde_json::to_writer(
            &mut self.out,
            &Line {
                frame: idx.0,
                body: frame,
            },
        )?;
        self.out.write_all(b"\n").context("write frame line")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
