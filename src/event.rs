//! Lifecycle events delivered by the host runner
//!
//! Each variant corresponds to one host hook. The serde representation is the
//! JSON-lines format read by [`crate::replay`]: an object tagged with
//! `"hook"`, e.g.
//!
//! ```text
//! {"hook":"beforeScenario","title":"Login works","location":{"file":"features/login.feature","line":12}}
//! {"hook":"afterStep","parent_title":"Login works","text":"I run `wp user list`","result":"failed","exception":"..."}
//! ```

use std::fmt;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Where a feature or scenario lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into(), line: None }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// `file://` URI of the file. The line is not part of the hint.
    pub fn hint(&self) -> String {
        format!("file://{}", self.file.display())
    }
}

/// A feature or scenario boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEvent {
    pub title: String,
    pub location: Location,
}

impl NodeEvent {
    pub fn new(title: impl Into<String>, location: Location) -> Self {
        Self { title: title.into(), location }
    }
}

/// Outcome of a single step as computed by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepResultKind {
    Passed,
    Failed,
    Pending,
    Skipped,
    Undefined,
}

impl StepResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepResultKind::Passed => "passed",
            StepResultKind::Failed => "failed",
            StepResultKind::Pending => "pending",
            StepResultKind::Skipped => "skipped",
            StepResultKind::Undefined => "undefined",
        }
    }
}

impl fmt::Display for StepResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured argument attached to a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepArgument {
    /// Data table, row-major
    Table(Vec<Vec<String>>),
    /// Multi-line text block
    PyString(Vec<String>),
}

impl fmt::Display for StepArgument {
    /// Host string form: tables render as padded `| a | b |` rows, text
    /// blocks as their lines joined with `\n`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepArgument::PyString(lines) => f.write_str(&lines.join("\n")),
            StepArgument::Table(rows) => {
                let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
                let mut widths = vec![0usize; columns];
                for row in rows {
                    for (i, cell) in row.iter().enumerate() {
                        widths[i] = widths[i].max(cell.chars().count());
                    }
                }
                for (n, row) in rows.iter().enumerate() {
                    if n > 0 {
                        f.write_str("\n")?;
                    }
                    f.write_str("|")?;
                    for (i, cell) in row.iter().enumerate() {
                        let pad = widths[i] - cell.chars().count();
                        write!(f, " {}{} |", cell, " ".repeat(pad))?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// A step about to run (`beforeStep`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStartEvent {
    pub parent_title: String,
    pub text: String,
}

/// A finished step (`afterStep`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    /// Title of the enclosing scenario
    pub parent_title: String,
    /// Rendered step text
    pub text: String,
    pub result: StepResultKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<StepArgument>,
    /// Raw exception message for failed steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

impl StepEvent {
    pub fn new(parent_title: impl Into<String>, text: impl Into<String>, result: StepResultKind) -> Self {
        Self {
            parent_title: parent_title.into(),
            text: text.into(),
            result,
            arguments: Vec::new(),
            exception: None,
        }
    }

    pub fn with_argument(mut self, arg: StepArgument) -> Self {
        self.arguments.push(arg);
        self
    }

    pub fn with_exception(mut self, message: impl Into<String>) -> Self {
        self.exception = Some(message.into());
        self
    }

    /// The diagnostics payload: only for failed steps carrying arguments.
    pub fn failure(&self) -> Option<FailurePayload<'_>> {
        if self.result != StepResultKind::Failed || self.arguments.is_empty() {
            return None;
        }
        Some(FailurePayload {
            message: self.exception.as_deref().unwrap_or(""),
            step_text: &self.text,
            arguments: &self.arguments,
        })
    }
}

/// Borrowed view of a failed step's diagnostics inputs
#[derive(Debug, Clone, Copy)]
pub struct FailurePayload<'a> {
    /// Raw error message, possibly multi-line
    pub message: &'a str,
    pub step_text: &'a str,
    /// Never empty
    pub arguments: &'a [StepArgument],
}

/// One host notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "hook")]
pub enum LifecycleEvent {
    #[serde(rename = "beforeFeature")]
    SuiteStart(NodeEvent),
    #[serde(rename = "afterFeature")]
    SuiteEnd(NodeEvent),
    #[serde(rename = "beforeScenario")]
    ScenarioStart(NodeEvent),
    #[serde(rename = "afterScenario")]
    ScenarioEnd(NodeEvent),
    #[serde(rename = "beforeStep")]
    StepStart(StepStartEvent),
    #[serde(rename = "afterStep")]
    StepResult(StepEvent),
}

impl LifecycleEvent {
    /// The host hook this event is delivered through
    pub fn hook(&self) -> Hook {
        match self {
            LifecycleEvent::SuiteStart(_) => Hook::BeforeFeature,
            LifecycleEvent::SuiteEnd(_) => Hook::AfterFeature,
            LifecycleEvent::ScenarioStart(_) => Hook::BeforeScenario,
            LifecycleEvent::ScenarioEnd(_) => Hook::AfterScenario,
            LifecycleEvent::StepStart(_) => Hook::BeforeStep,
            LifecycleEvent::StepResult(_) => Hook::AfterStep,
        }
    }

    /// Short label for logging
    pub fn title(&self) -> &str {
        match self {
            LifecycleEvent::SuiteStart(n)
            | LifecycleEvent::SuiteEnd(n)
            | LifecycleEvent::ScenarioStart(n)
            | LifecycleEvent::ScenarioEnd(n) => &n.title,
            LifecycleEvent::StepStart(s) => &s.text,
            LifecycleEvent::StepResult(s) => &s.text,
        }
    }
}

/// Host hook names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    BeforeFeature,
    AfterFeature,
    BeforeScenario,
    AfterScenario,
    BeforeStep,
    AfterStep,
}

impl Hook {
    pub const ALL: [Hook; 6] = [
        Hook::BeforeFeature,
        Hook::AfterFeature,
        Hook::BeforeScenario,
        Hook::AfterScenario,
        Hook::BeforeStep,
        Hook::AfterStep,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Hook::BeforeFeature => "beforeFeature",
            Hook::AfterFeature => "afterFeature",
            Hook::BeforeScenario => "beforeScenario",
            Hook::AfterScenario => "afterScenario",
            Hook::BeforeStep => "beforeStep",
            Hook::AfterStep => "afterStep",
        }
    }

    /// Parse a host hook name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Hook> {
        Hook::ALL.iter().copied().find(|h| h.name() == name)
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
