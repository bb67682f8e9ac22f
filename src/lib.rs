//! emx-teamcity: TeamCity service messages for BDD test runs
//!
//! Translates the lifecycle events of a behavioral test runner (feature,
//! scenario and step boundaries) into TeamCity service messages, written to
//! standard error where the CI agent picks them up.
//!
//! # Wire format
//!
//! ```text
//! ##teamcity[testStarted name='Login works' locationHint='file:///app/features/login.feature' captureStandardOutput='true']
//! ```
//!
//! Each message is framed by a leading and trailing newline. Values are
//! single-quoted and escaped with `|` (see [`escape`]).
//!
//! # Events
//!
//! | Hook | Message |
//! |------|---------|
//! | `beforeFeature` | `testSuiteStarted` |
//! | `afterFeature` | `testSuiteFinished` |
//! | `beforeScenario` | `testStarted` |
//! | `afterScenario` | `testFinished` |
//! | `beforeStep` | `message` (opt-in) |
//! | `afterStep` | `testFailed` / `testIgnored` / `testMetadata` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use emx_teamcity::{LifecycleEvent, Location, NodeEvent, Reporter};
//!
//! let mut reporter = Reporter::stderr();
//! let feature = NodeEvent::new("Login", Location::new("features/login.feature"));
//! reporter.handle(&LifecycleEvent::SuiteStart(feature))?;
//! ```

mod escape;
mod message;
mod sink;
mod event;
mod diagnostics;
mod errorlog;
mod translator;
mod config;
mod reporter;
mod replay;
mod error;

pub use escape::{escape, escape_opt, NULL_VALUE};
pub use message::{names, ProtocolMessage};
pub use sink::{MessageSink, BoxedSink, StreamSink};
pub use event::{
    LifecycleEvent, NodeEvent, StepEvent, StepStartEvent, StepArgument, StepResultKind,
    FailurePayload, Location, Hook,
};
pub use diagnostics::{FailureDiagnostics, parse_failure_diagnostics};
pub use errorlog::{LogTailReader, BoxedTailReader, FileTail, NoErrorLog, StaticTail, DEFAULT_ERROR_LOG};
pub use translator::EventTranslator;
pub use config::{ReporterConfig, ENV_ERROR_LOG, ENV_STEP_MESSAGES};
pub use reporter::{Reporter, ReporterBuilder, Localizer};
pub use replay::{replay, decode_line, ReplaySummary};
pub use error::{ReportError, ErrorKind};
