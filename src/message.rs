//! Protocol messages
//!
//! A [`ProtocolMessage`] is one `##teamcity[...]` directive. Attributes keep
//! insertion order and hold raw values; escaping happens on render.

use std::fmt;
use crate::escape::escape;

/// Message names emitted by the translator
pub mod names {
    pub const TEST_SUITE_STARTED: &str = "testSuiteStarted";
    pub const TEST_SUITE_FINISHED: &str = "testSuiteFinished";
    pub const TEST_STARTED: &str = "testStarted";
    pub const TEST_FINISHED: &str = "testFinished";
    pub const TEST_FAILED: &str = "testFailed";
    pub const TEST_IGNORED: &str = "testIgnored";
    pub const TEST_METADATA: &str = "testMetadata";
    pub const MESSAGE: &str = "message";
}

/// A single service message: name plus ordered raw attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolMessage {
    /// Event name, e.g. `testStarted`
    pub name: String,
    /// Attributes in insertion order, unescaped
    pub attrs: Vec<(String, String)>,
}

impl ProtocolMessage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Append an attribute. Values are coerced to text here and escaped on render.
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.push((key.into(), value.to_string()));
        self
    }

    /// Look up a raw attribute value by key (first match).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute keys in order
    pub fn keys(&self) -> Vec<&str> {
        self.attrs.iter().map(|(k, _)| k.as_str()).collect()
    }
}

impl fmt::Display for ProtocolMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n##teamcity[{}", self.name)?;
        for (key, value) in &self.attrs {
            write!(f, " {}='{}'", key, escape(value))?;
        }
        write!(f, "]\n")
    }
}
