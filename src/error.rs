//! Reporter errors

use std::fmt;

/// The kind of reporter error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Writing to the output sink failed
    Io,
    /// An event stream line could not be decoded
    Decode,
}

/// A reporter error with optional input-line context
#[derive(Debug)]
pub struct ReportError {
    pub kind: ErrorKind,
    pub message: String,
    pub source_name: Option<String>,
    pub line: Option<usize>,
}

impl ReportError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source_name: None,
            line: None,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, msg)
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, msg)
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn is_decode(&self) -> bool {
        self.kind == ErrorKind::Decode
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref name) = self.source_name {
            write!(f, "{}:", name)?;
        }
        if let Some(line) = self.line {
            write!(f, "{}:", line)?;
        }
        if self.source_name.is_some() || self.line.is_some() {
            write!(f, " ")?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(e: std::io::Error) -> Self {
        Self::io(e.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        Self::decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_plain() {
        let err = ReportError::io("broken pipe");
        assert_eq!(err.to_string(), "broken pipe");
    }

    #[test]
    fn test_display_with_location() {
        let err = ReportError::decode("missing field `title`")
            .with_source_name("events.jsonl")
            .with_line(3);
        assert_eq!(err.to_string(), "events.jsonl:3: missing field `title`");
        assert!(err.is_decode());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ReportError = io.into();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.message.contains("pipe closed"));
    }
}
