//! Output sinks
//!
//! The CI consumer tails the stream live, so every message is flushed as soon
//! as it is written.

use std::io::Write;
use crate::error::ReportError;
use crate::message::ProtocolMessage;

/// Destination for rendered protocol messages
pub trait MessageSink {
    /// Write one message. Failures are not retried.
    fn emit(&mut self, message: &ProtocolMessage) -> Result<(), ReportError>;
}

/// Boxed sink
pub type BoxedSink = Box<dyn MessageSink>;

/// Sink over any [`std::io::Write`] implementor, flushed per message
pub struct StreamSink<W: Write> {
    out: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl StreamSink<std::io::Stderr> {
    /// The conventional destination for service messages
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl StreamSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> MessageSink for StreamSink<W> {
    fn emit(&mut self, message: &ProtocolMessage) -> Result<(), ReportError> {
        let text = message.to_string();
        self.out.write_all(text.as_bytes())
            .map_err(|e| ReportError::io(format!("failed to write {}: {}", message.name, e)))?;
        self.out.flush()
            .map_err(|e| ReportError::io(format!("failed to flush {}: {}", message.name, e)))?;
        Ok(())
    }
}
