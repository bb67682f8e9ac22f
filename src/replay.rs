//! JSON-lines event replay
//!
//! Lets a host in another process pipe its hooks into a [`Reporter`]: one
//! JSON object per line, tagged with the hook name (see [`crate::event`]).

use std::io::BufRead;
use tracing::debug;
use crate::error::ReportError;
use crate::event::{Hook, LifecycleEvent};
use crate::reporter::Reporter;

/// Counters for one replayed stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Events decoded and handed to the reporter
    pub events: usize,
    /// Lines skipped because their hook is unknown
    pub skipped: usize,
    /// Messages written
    pub messages: usize,
}

impl ReplaySummary {
    pub fn summary(&self) -> String {
        format!(
            "{} event(s), {} skipped, {} message(s)",
            self.events, self.skipped, self.messages,
        )
    }
}

/// Decode one line. `Ok(None)` for blank lines and unknown hooks.
pub fn decode_line(line: &str) -> Result<Option<LifecycleEvent>, ReportError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value = serde_json::from_str(line)?;
    let hook = value.get("hook")
        .and_then(|h| h.as_str())
        .ok_or_else(|| ReportError::decode("missing string field `hook`"))?;
    if Hook::from_name(hook).is_none() {
        debug!(hook, "unknown hook, skipping line");
        return Ok(None);
    }
    let event = serde_json::from_value(value)?;
    Ok(Some(event))
}

/// Feed every event in `input` through `reporter`.
///
/// Stops at the first decode or sink error; `source_name` labels errors.
pub fn replay(
    input: impl BufRead,
    source_name: &str,
    reporter: &mut Reporter,
) -> Result<ReplaySummary, ReportError> {
    let mut summary = ReplaySummary::default();
    for (i, line) in input.lines().enumerate() {
        let line_number = i + 1;
        let line = line.map_err(|e| {
            ReportError::io(format!("failed to read input: {}", e))
                .with_source_name(source_name)
                .with_line(line_number)
        })?;
        let event = match decode_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => {
                if !line.trim().is_empty() {
                    summary.skipped += 1;
                }
                continue;
            }
            Err(e) => return Err(e.with_source_name(source_name).with_line(line_number)),
        };
        summary.events += 1;
        summary.messages += reporter.handle(&event)?;
    }
    Ok(summary)
}
