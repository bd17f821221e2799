//! Indentation preservation for substituted fragments.
//!
//! A token sitting alone on an indented line should produce fragments
//! aligned with the surrounding template, not flush-left. Before
//! substitution the compiler captures the token's leading whitespace and
//! re-applies it to every continuation line of the rendered fragment.

/// Leading whitespace of the token's line, when the token is the first
/// non-whitespace content on it.
///
/// Walks back from `token_start` to the nearest newline (or the start of
/// the string) and returns the run of spaces/tabs between line start and
/// token start. Any intervening non-whitespace character means the token
/// is mid-line and gets no indent.
pub fn leading_indent(sql: &str, token_start: usize) -> &str {
    let line_start = sql[..token_start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &sql[line_start..token_start];
    if !prefix.is_empty() && prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}

/// Prepend `indent` to every line of `fragment` after the first.
///
/// Blank lines stay blank. Single-line fragments and empty indents pass
/// through unchanged.
pub fn apply(fragment: &str, indent: &str) -> String {
    if indent.is_empty() || !fragment.contains('\n') {
        return fragment.to_string();
    }

    let mut out = String::with_capacity(fragment.len() + indent.len() * 4);
    for (i, line) in fragment.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(indent);
            }
        }
        out.push_str(line);
    }
    out
}
