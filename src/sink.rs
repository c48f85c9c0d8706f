//! Channel-based stroke producer API.
//!
//! [`StrokeSink`] is a cloneable handle that feeds pointer samples into a
//! session over an mpsc channel, so tests and headless producers can drive
//! playback without the GUI capturing a pointer.

use std::sync::mpsc::{channel, Receiver, SendError, Sender};

/// One stroke-capture event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeCommand {
    /// Start a new stroke at the given time and position. Cancels any
    /// playback in progress.
    Begin { t: f64, x: f64, y: f64 },
    /// Append a sample to the stroke being captured.
    Sample { t: f64, x: f64, y: f64 },
    /// Finish the stroke and start playback.
    End,
}

/// Sending half of a stroke channel.
#[derive(Clone)]
pub struct StrokeSink {
    tx: Sender<StrokeCommand>,
}

impl StrokeSink {
    pub fn new(tx: Sender<StrokeCommand>) -> Self {
        Self { tx }
    }

    pub fn begin(&self, t: f64, x: f64, y: f64) -> Result<(), SendError<StrokeCommand>> {
        self.tx.send(StrokeCommand::Begin { t, x, y })
    }

    pub fn sample(&self, t: f64, x: f64, y: f64) -> Result<(), SendError<StrokeCommand>> {
        self.tx.send(StrokeCommand::Sample { t, x, y })
    }

    pub fn end(&self) -> Result<(), SendError<StrokeCommand>> {
        self.tx.send(StrokeCommand::End)
    }
}

/// Create a connected sink/receiver pair. Pass the receiver to
/// [`crate::run_with_strokes`] or a [`crate::StrokeSession`] and keep the
/// sink on the producing side.
pub fn channel_strokes() -> (StrokeSink, Receiver<StrokeCommand>) {
    let (tx, rx) = channel();
    (StrokeSink::new(tx), rx)
}
