//! Failure message carving
//!
//! A failed command step reports its exception message as
//!
//! ```text
//! <command>
//! <stdout line>...
//! <stderr line>
//! <cwd>
//! <exit status>
//! ```
//!
//! Fields are taken positionally: first line from the front, then three lines
//! from the back, and whatever remains is stdout.

use std::collections::VecDeque;

/// Fields carved out of a raw failure message.
///
/// `exit_status` and `cwd` are not emitted by the translator; they are kept so
/// the back-of-message line accounting stays correct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureDiagnostics {
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    pub exit_status: String,
    pub cwd: String,
}

/// Split `raw` into diagnostics. Never fails; missing lines become empty.
pub fn parse_failure_diagnostics(raw: &str) -> FailureDiagnostics {
    let mut lines: VecDeque<&str> = raw.split('\n').collect();

    let command = lines.pop_front().unwrap_or_default().to_string();
    let exit_status = lines.pop_back().unwrap_or_default().to_string();
    let cwd = lines.pop_back().unwrap_or_default().to_string();
    // assumed to be a single line
    let stderr = lines.pop_back().unwrap_or_default().to_string();
    let stdout = lines.into_iter().collect::<Vec<_>>().join("\n");

    FailureDiagnostics {
        command,
        stdout,
        stderr,
        exit_status,
        cwd,
    }
}

impl FailureDiagnostics {
    /// Choose the `actual` value for a comparison failure based on what the
    /// step text asserts on.
    ///
    /// The combined fallback embeds the protocol's newline token `|n`
    /// literally rather than a real newline.
    pub fn actual_for(&self, step_text: &str) -> String {
        if step_text.contains("STDOUT") {
            self.stdout.clone()
        } else if step_text.contains("STDERR") {
            self.stderr.clone()
        } else {
            format!("STDOUT: {}|nSTDERR: {}", self.stdout, self.stderr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_message() {
        let d = parse_failure_diagnostics("wp option get home\nline one\nline two\nError: nope\n/tmp/wp\n1");
        assert_eq!(d.command, "wp option get home");
        assert_eq!(d.stdout, "line one\nline two");
        assert_eq!(d.stderr, "Error: nope");
        assert_eq!(d.cwd, "/tmp/wp");
        assert_eq!(d.exit_status, "1");
    }

    #[test]
    fn test_parse_four_lines_leaves_stdout_empty() {
        let d = parse_failure_diagnostics("cmd\nstdout body\nstderrline\nexit:1");
        assert_eq!(d.command, "cmd");
        assert_eq!(d.exit_status, "exit:1");
        assert_eq!(d.cwd, "stderrline");
        assert_eq!(d.stderr, "stdout body");
        assert_eq!(d.stdout, "");
    }

    #[test]
    fn test_parse_short_messages_pad_with_empty() {
        let d = parse_failure_diagnostics("");
        assert_eq!(d, FailureDiagnostics::default());

        let d = parse_failure_diagnostics("only-command");
        assert_eq!(d.command, "only-command");
        assert_eq!(d.exit_status, "");
        assert_eq!(d.stderr, "");

        let d = parse_failure_diagnostics("cmd\n0");
        assert_eq!(d.command, "cmd");
        assert_eq!(d.exit_status, "0");
        assert_eq!(d.cwd, "");
        assert_eq!(d.stderr, "");
        assert_eq!(d.stdout, "");
    }

    #[test]
    fn test_actual_selection() {
        let d = FailureDiagnostics {
            stdout: "out".into(),
            stderr: "err".into(),
            ..Default::default()
        };
        assert_eq!(d.actual_for("Then STDOUT should be:"), "out");
        assert_eq!(d.actual_for("Then STDERR should contain:"), "err");
        assert_eq!(d.actual_for("Then the return code should be 0"), "STDOUT: out|nSTDERR: err");
        // STDOUT takes precedence when both are mentioned
        assert_eq!(d.actual_for("STDERR and STDOUT"), "out");
    }
}
