//! Service-message value escaping
//!
//! TeamCity attribute values are single-quoted; the consumer's parser treats
//! `|` as its escape character. Every value written by this crate goes
//! through [`escape`].

/// Replacement table, applied in order.
const SUBSTITUTIONS: &[(char, &str)] = &[
    ('|', "||"),
    ('\'', "|'"),
    ('\n', "|n"),
    ('\r', "|r"),
    (']', "|]"),
    ('[', "|["),
];

/// Literal emitted for an empty or absent value.
pub const NULL_VALUE: &str = "null";

/// Escape a value for embedding as `key='<value>'`.
///
/// Empty input becomes `null`. Otherwise each substitution runs as its own
/// pass in table order, so `|` is doubled before any `|n`/`|'` tokens are
/// introduced and those tokens are never re-escaped.
pub fn escape(text: &str) -> String {
    if text.is_empty() {
        return NULL_VALUE.to_string();
    }
    let mut out = text.to_string();
    for (from, to) in SUBSTITUTIONS {
        if out.contains(*from) {
            out = out.replace(*from, to);
        }
    }
    out
}

/// Like [`escape`], treating `None` as empty.
pub fn escape_opt(text: Option<&str>) -> String {
    escape(text.unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_empty_is_null() {
        assert_eq!(escape(""), "null");
        assert_eq!(escape_opt(None), "null");
        assert_eq!(escape_opt(Some("")), "null");
    }

    #[test]
    fn test_escape_each_special() {
        assert_eq!(escape("a|b"), "a||b");
        assert_eq!(escape("line1\nline2"), "line1|nline2");
        assert_eq!(escape("it's"), "it|'s");
        assert_eq!(escape("[x]"), "|[x|]");
        assert_eq!(escape("a\r\nb"), "a|r|nb");
    }

    #[test]
    fn test_escape_pipe_before_newline() {
        // literal "|n" must stay distinguishable from an escaped newline
        assert_eq!(escape("|n"), "||n");
        assert_eq!(escape("\n"), "|n");
        assert_ne!(escape("|n"), escape("\n"));
    }

    #[test]
    fn test_escape_plain_text_untouched() {
        assert_eq!(escape("Given I run `wp cli info`"), "Given I run `wp cli info`");
        assert_eq!(escape("0"), "0");
    }

    #[test]
    fn test_escape_no_frame_breakers() {
        let nasty = "x']\n##teamcity[testFinished name='y'\r|";
        let out = escape(nasty);
        assert!(!out.contains('\n'));
        assert!(!out.contains('\r'));
        // every remaining quote/bracket is preceded by the escape char
        let chars: Vec<char> = out.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == '|' {
                i += 2;
                continue;
            }
            assert!(!matches!(chars[i], '\'' | '[' | ']'), "bare {:?} in {}", chars[i], out);
            i += 1;
        }
    }
}
