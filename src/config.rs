//! Reporter configuration

use std::path::PathBuf;
use crate::errorlog::{BoxedTailReader, FileTail, NoErrorLog, DEFAULT_ERROR_LOG};

/// Env var overriding the error log path; an empty value disables the read
pub const ENV_ERROR_LOG: &str = "EMX_TEAMCITY_ERROR_LOG";
/// Env var enabling `beforeStep` messages when set to `1`/`true`
pub const ENV_STEP_MESSAGES: &str = "EMX_TEAMCITY_STEP_MESSAGES";

/// Configuration for a [`crate::Reporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Host diagnostic log tailed on failed steps; `None` reports empty values
    pub error_log: Option<PathBuf>,
    /// Subscribe to `beforeStep` and emit a `message` per step
    pub step_messages: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            error_log: Some(PathBuf::from(DEFAULT_ERROR_LOG)),
            step_messages: false,
        }
    }
}

impl ReporterConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the process env in `from_env`).
    pub fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(ENV_ERROR_LOG) {
            self.error_log = if path.is_empty() { None } else { Some(PathBuf::from(path)) };
        }
        if let Some(flag) = lookup(ENV_STEP_MESSAGES) {
            self.step_messages = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        self
    }

    /// Set the error log path
    pub fn error_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.error_log = Some(path.into());
        self
    }

    /// Disable the error log read
    pub fn no_error_log(mut self) -> Self {
        self.error_log = None;
        self
    }

    /// Enable or disable `beforeStep` messages
    pub fn step_messages(mut self, enabled: bool) -> Self {
        self.step_messages = enabled;
        self
    }

    /// Build the tail reader this configuration selects
    pub fn tail_reader(&self) -> BoxedTailReader {
        match self.error_log {
            Some(ref path) => Box::new(FileTail::new(path.clone())),
            None => Box::new(NoErrorLog),
        }
    }
}
