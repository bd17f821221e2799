//! Template token scanner.
//!
//! Walks a SQL template once, left to right, splitting it into literal
//! spans and `{{key}}` token spans. Keys are restricted to alphanumeric,
//! underscore and hyphen characters; anything else that looks brace-like
//! is ordinary literal text. This permissive policy keeps free-form SQL
//! containing literal `{` or `}` (JSON literals, regex patterns) intact.

use regex::Regex;
use std::sync::LazyLock;

/// Pattern for `{{key}}` filter tokens.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_-]+)\}\}").unwrap());

/// A `{{key}}` occurrence in the template.
///
/// `start`/`end` are byte offsets of the full `{{key}}` match in the
/// template string; they feed indentation detection at substitution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateToken<'a> {
    pub key: &'a str,
    pub start: usize,
    pub end: usize,
}

/// One span of the template: either literal SQL or a filter token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Token(TemplateToken<'a>),
}

/// Split a template into an ordered sequence of segments.
///
/// The concatenation of all segment spans reproduces the input exactly.
/// A template with no tokens yields a single literal segment; an empty
/// template yields none. Empty literal spans between adjacent tokens are
/// not emitted.
pub fn scan(sql: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for caps in TOKEN_PATTERN.captures_iter(sql) {
        let m = caps.get(0).unwrap();
        if m.start() > cursor {
            segments.push(Segment::Literal(&sql[cursor..m.start()]));
        }
        segments.push(Segment::Token(TemplateToken {
            key: caps.get(1).unwrap().as_str(),
            start: m.start(),
            end: m.end(),
        }));
        cursor = m.end();
    }

    if cursor < sql.len() {
        segments.push(Segment::Literal(&sql[cursor..]));
    }
    segments
}

/// First remaining token match in a compiled string, if any.
///
/// Used by the post-substitution output invariant check: a successful
/// compile must leave no token syntax behind.
pub fn find_residual_token(sql: &str) -> Option<&str> {
    TOKEN_PATTERN.find(sql).map(|m| m.as_str())
}
