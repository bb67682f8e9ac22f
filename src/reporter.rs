//! Host-facing reporter
//!
//! The [`Reporter`] is what a host runner plugs in as its formatter: it
//! declares the hooks it listens to, translates each delivered event and
//! writes the resulting messages to its sink. It also answers the host's
//! generic formatter protocol (translator injection, parameters) with no-ops.

use tracing::debug;
use crate::config::ReporterConfig;
use crate::error::ReportError;
use crate::event::{Hook, LifecycleEvent};
use crate::sink::{BoxedSink, MessageSink, StreamSink};
use crate::translator::EventTranslator;

/// Hooks registered unconditionally
const BASE_HOOKS: [Hook; 5] = [
    Hook::AfterStep,
    Hook::BeforeFeature,
    Hook::AfterFeature,
    Hook::BeforeScenario,
    Hook::AfterScenario,
];

/// Localized message catalog a host may inject. The reporter emits protocol
/// text only and never consults it.
pub trait Localizer {
    fn translate(&self, id: &str) -> String;
}

/// The formatter plugged into the host runner
pub struct Reporter {
    translator: EventTranslator,
    sink: BoxedSink,
    hooks: Vec<Hook>,
    emitted: usize,
}

impl Reporter {
    /// Create a reporter writing to `sink`
    pub fn new(config: ReporterConfig, sink: BoxedSink) -> Self {
        let mut hooks = BASE_HOOKS.to_vec();
        if config.step_messages {
            hooks.push(Hook::BeforeStep);
        }
        Self {
            translator: EventTranslator::new(config.tail_reader()),
            sink,
            hooks,
            emitted: 0,
        }
    }

    /// Reporter with an explicit translator, for custom tail readers
    pub fn with_translator(translator: EventTranslator, sink: BoxedSink, step_messages: bool) -> Self {
        let mut reporter = Self::new(ReporterConfig::default().step_messages(step_messages), sink);
        reporter.translator = translator;
        reporter
    }

    /// Reporter on stderr with env-derived configuration
    pub fn stderr() -> Self {
        Self::new(ReporterConfig::from_env(), Box::new(StreamSink::stderr()))
    }

    pub fn builder() -> ReporterBuilder {
        ReporterBuilder::new()
    }

    /// Hooks this reporter wants delivered
    pub fn subscribed_hooks(&self) -> &[Hook] {
        &self.hooks
    }

    pub fn is_subscribed(&self, hook: Hook) -> bool {
        self.hooks.contains(&hook)
    }

    /// Number of messages written so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Translate `event` and write its messages.
    ///
    /// Events on unsubscribed hooks are dropped. Translation completes before
    /// the first write, so a translation never emits half of an event.
    pub fn handle(&mut self, event: &LifecycleEvent) -> Result<usize, ReportError> {
        let hook = event.hook();
        if !self.is_subscribed(hook) {
            debug!(hook = %hook, "hook not subscribed, ignoring event");
            return Ok(0);
        }
        let messages = self.translator.translate(event);
        for message in &messages {
            self.sink.emit(message)?;
            self.emitted += 1;
        }
        Ok(messages.len())
    }

    /// Entry point for hosts that deliver events by hook name.
    ///
    /// An unknown name, or one that does not match the event, is a no-op.
    pub fn dispatch(&mut self, hook_name: &str, event: &LifecycleEvent) -> Result<usize, ReportError> {
        match Hook::from_name(hook_name) {
            Some(hook) if hook == event.hook() => self.handle(event),
            _ => {
                debug!(hook = hook_name, "unknown or mismatched hook, ignoring event");
                Ok(0)
            }
        }
    }

    /// Accepted and ignored
    pub fn set_translator(&mut self, _localizer: &dyn Localizer) {}

    /// The reporter exposes no parameters
    pub fn has_parameter(&self, _name: &str) -> bool {
        false
    }

    pub fn set_parameter(&mut self, _name: &str, _value: &str) {}

    pub fn get_parameter(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Builder API for reporter construction
pub struct ReporterBuilder {
    config: ReporterConfig,
    sink: Option<BoxedSink>,
}

impl ReporterBuilder {
    pub fn new() -> Self {
        Self {
            config: ReporterConfig::default(),
            sink: None,
        }
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: ReporterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn error_log(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.config = self.config.error_log(path);
        self
    }

    pub fn no_error_log(mut self) -> Self {
        self.config = self.config.no_error_log();
        self
    }

    pub fn step_messages(mut self, enabled: bool) -> Self {
        self.config = self.config.step_messages(enabled);
        self
    }

    /// Write to `sink` instead of stderr
    pub fn sink(mut self, sink: impl MessageSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> Reporter {
        let sink = self.sink.unwrap_or_else(|| Box::new(StreamSink::stderr()));
        Reporter::new(self.config, sink)
    }
}

impl Default for ReporterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
