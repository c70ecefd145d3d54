//! Safe rendering of untrusted answer text.
//!
//! Remote answers may embed markdown-style links (`[label](url)`) but are
//! otherwise untrusted: they must never be spliced into markup verbatim.
//! The pipeline here is two-stage: [`scan`] splits the text into plain
//! and link spans, and [`render`] escapes every plain span before
//! emitting markup. Only recognized, validated link spans become
//! elements; everything else comes out inert.
//!
//! Both functions are pure: no I/O, no state, identical output for
//! identical input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Matches `[label](url)` where the label contains no `]` and the url is
/// http(s) with no whitespace or closing parenthesis.
static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").expect("valid link pattern"));

/// One span of answer text, either plain text or a recognized link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSpan<'a> {
    /// Plain text; must be escaped before reaching any markup surface.
    Text(&'a str),
    /// A recognized `[label](url)` link.
    Link { label: &'a str, url: &'a str },
}

/// Splits untrusted answer text into plain and link spans.
///
/// Text outside recognized link patterns is returned verbatim in
/// [`AnswerSpan::Text`] spans; callers decide how to neutralize it for
/// their output surface.
pub fn scan(text: &str) -> Vec<AnswerSpan<'_>> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for captures in LINK_PATTERN.captures_iter(text) {
        let whole = captures.get(0).expect("capture group 0 always present");
        if whole.start() > cursor {
            spans.push(AnswerSpan::Text(&text[cursor..whole.start()]));
        }
        spans.push(AnswerSpan::Link {
            label: captures.get(1).map(|m| m.as_str()).unwrap_or_default(),
            url: captures.get(2).map(|m| m.as_str()).unwrap_or_default(),
        });
        cursor = whole.end();
    }

    if cursor < text.len() {
        spans.push(AnswerSpan::Text(&text[cursor..]));
    }

    spans
}

/// HTML markup in which all untrusted text has been escaped.
///
/// The only way to obtain one is through [`render`], so holding a
/// `SafeMarkup` means the escaping pass has already happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeMarkup(String);

impl SafeMarkup {
    /// Returns the markup as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the markup string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders untrusted answer text as safe HTML markup.
///
/// Recognized links become anchors opened in a new browsing context with
/// `rel="noopener noreferrer"` (reverse-tabnabbing protection); all other
/// text, including the link label and url themselves, is HTML-escaped.
pub fn render(text: &str) -> SafeMarkup {
    let mut out = String::with_capacity(text.len());
    for span in scan(text) {
        match span {
            AnswerSpan::Text(plain) => out.push_str(&escape_html(plain)),
            AnswerSpan::Link { label, url } => {
                out.push_str("<a href=\"");
                out.push_str(&escape_html(url));
                out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                out.push_str(&escape_html(label));
                out.push_str("</a>");
            }
        }
    }
    SafeMarkup(out)
}

/// Escapes the markup-significant characters of HTML text and attributes.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_splits_text_and_links() {
        let spans = scan("See [docs](https://x.com/a).");
        assert_eq!(
            spans,
            vec![
                AnswerSpan::Text("See "),
                AnswerSpan::Link {
                    label: "docs",
                    url: "https://x.com/a"
                },
                AnswerSpan::Text("."),
            ]
        );
    }

    #[test]
    fn test_scan_plain_text_only() {
        let spans = scan("no links here");
        assert_eq!(spans, vec![AnswerSpan::Text("no links here")]);
    }

    #[test]
    fn test_scan_ignores_non_http_schemes() {
        let spans = scan("[bad](javascript:alert(1))");
        assert_eq!(spans, vec![AnswerSpan::Text("[bad](javascript:alert(1))")]);
    }

    #[test]
    fn test_scan_ignores_unclosed_patterns() {
        let spans = scan("[half a link](https://x.com");
        assert_eq!(spans, vec![AnswerSpan::Text("[half a link](https://x.com")]);
    }

    #[test]
    fn test_render_emits_anchor_with_tabnabbing_protection() {
        let markup = render("See [docs](https://x.com/a).");
        assert_eq!(
            markup.as_str(),
            "See <a href=\"https://x.com/a\" target=\"_blank\" \
             rel=\"noopener noreferrer\">docs</a>."
        );
    }

    #[test]
    fn test_render_escapes_script_tags() {
        let markup = render("<script>alert('x')</script>");
        assert_eq!(
            markup.as_str(),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert!(!markup.as_str().contains("<script>"));
    }

    #[test]
    fn test_render_escapes_label_and_url() {
        let markup = render("[<b>bold</b>](https://x.com/\"q\")");
        assert!(markup.as_str().contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(markup.as_str().contains("https://x.com/&quot;q&quot;"));
        assert!(!markup.as_str().contains("<b>"));
    }

    #[test]
    fn test_render_handles_multiple_links() {
        let markup = render("[a](http://a.io) and [b](http://b.io)");
        assert_eq!(markup.as_str().matches("<a href=").count(), 2);
        assert!(markup.as_str().contains("</a> and <a"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let input = "x [a](http://a.io) & <y>";
        assert_eq!(render(input), render(input));
    }

    #[test]
    fn test_render_empty_input() {
        assert_eq!(render("").as_str(), "");
    }
}
