//! Event translator
//!
//! Maps one [`LifecycleEvent`] to the service messages it produces. The
//! translator holds no per-run state; the only side effect is the error log
//! read on failed steps.

use tracing::debug;
use crate::diagnostics::parse_failure_diagnostics;
use crate::errorlog::{BoxedTailReader, LogTailReader};
use crate::event::{LifecycleEvent, NodeEvent, StepEvent, StepResultKind, StepStartEvent};
use crate::message::{names, ProtocolMessage};

/// Translates lifecycle events into protocol messages
pub struct EventTranslator {
    error_log: BoxedTailReader,
}

impl EventTranslator {
    pub fn new(error_log: BoxedTailReader) -> Self {
        Self { error_log }
    }

    pub fn with_reader(reader: impl LogTailReader + 'static) -> Self {
        Self::new(Box::new(reader))
    }

    /// All messages for `event`, in emission order.
    pub fn translate(&self, event: &LifecycleEvent) -> Vec<ProtocolMessage> {
        let messages = match event {
            LifecycleEvent::SuiteStart(node) => vec![node_message(names::TEST_SUITE_STARTED, node)],
            LifecycleEvent::SuiteEnd(node) => vec![node_message(names::TEST_SUITE_FINISHED, node)],
            LifecycleEvent::ScenarioStart(node) => vec![
                node_message(names::TEST_STARTED, node).attr("captureStandardOutput", "true"),
            ],
            LifecycleEvent::ScenarioEnd(node) => vec![node_message(names::TEST_FINISHED, node)],
            LifecycleEvent::StepStart(step) => vec![step_start_message(step)],
            LifecycleEvent::StepResult(step) => self.step_messages(step),
        };
        debug!(hook = %event.hook(), title = event.title(), count = messages.len(), "translated event");
        messages
    }

    fn step_messages(&self, step: &StepEvent) -> Vec<ProtocolMessage> {
        let test_name = step.parent_title.as_str();
        debug!(scenario = test_name, result = %step.result, "step finished");
        match step.result {
            StepResultKind::Passed => Vec::new(),
            StepResultKind::Pending | StepResultKind::Skipped => {
                vec![ProtocolMessage::new(names::TEST_IGNORED).attr("name", test_name)]
            }
            StepResultKind::Undefined => {
                vec![ProtocolMessage::new(names::TEST_FAILED).attr("name", test_name)]
            }
            StepResultKind::Failed => {
                let mut messages = Vec::with_capacity(3);
                let mut failed = ProtocolMessage::new(names::TEST_FAILED).attr("name", test_name);

                if let Some(payload) = step.failure() {
                    let diag = parse_failure_diagnostics(payload.message);
                    // several arguments: the last one is reported
                    let argument = payload.arguments.last()
                        .map(|a| a.to_string())
                        .unwrap_or_default();
                    failed = failed
                        .attr("type", "comparisonFailure")
                        .attr("expected", format!("{} {}", payload.step_text, argument))
                        .attr("actual", diag.actual_for(payload.step_text));
                    messages.push(failed);
                    messages.push(metadata(test_name, "command", &diag.command));
                } else {
                    messages.push(failed);
                }

                messages.push(metadata(test_name, "errorLog", &self.read_error_log()));
                messages
            }
        }
    }

    fn read_error_log(&self) -> String {
        match self.error_log.last_line() {
            Ok(line) => line,
            Err(e) => {
                debug!(error = %e, "error log unreadable, reporting empty value");
                String::new()
            }
        }
    }
}

fn node_message(name: &str, node: &NodeEvent) -> ProtocolMessage {
    ProtocolMessage::new(name)
        .attr("name", &node.title)
        .attr("locationHint", node.location.hint())
}

fn step_start_message(step: &StepStartEvent) -> ProtocolMessage {
    ProtocolMessage::new(names::MESSAGE).attr("text", &step.text)
}

fn metadata(test_name: &str, name: &str, value: &str) -> ProtocolMessage {
    ProtocolMessage::new(names::TEST_METADATA)
        .attr("testName", test_name)
        .attr("name", name)
        .attr("value", value)
}
