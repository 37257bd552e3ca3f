//! HTML rendering of token streams.
//!
//! Token text is escaped before any markup is added, so user text can never
//! produce or break a tag. Token text is also split at newlines so no `<span>`
//! crosses a line boundary, which keeps line-by-line post-processing safe.

use std::borrow::Cow;
use std::fmt::Write;

use super::lexer::Token;
use super::theme::Theme;

/// Escapes `&`, `<`, and `>`. Borrows when nothing needs escaping.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

fn push_segment(out: &mut String, segment: &str, color: Option<&str>) {
    if segment.is_empty() {
        return;
    }
    let escaped = escape_html(segment);
    match color {
        Some(color) => {
            // Writing to a String cannot fail.
            let _ = write!(out, "<span style=\"color:{color}\">{escaped}</span>");
        }
        None => out.push_str(&escaped),
    }
}

/// Renders tokens as a sequence of colored spans. Plain tokens are emitted as
/// bare escaped text.
#[must_use]
pub fn render_tokens(tokens: &[Token<'_>], theme: &Theme) -> String {
    let mut out = String::new();
    for token in tokens {
        let color = theme.color(token.kind);
        for (i, segment) in token.text.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            push_segment(&mut out, segment, color);
        }
    }
    out
}

/// Renders the whole source as unstyled escaped text.
#[must_use]
pub fn render_plain(source: &str) -> String {
    escape_html(source).into_owned()
}

/// Prefixes every `\n`-separated line of `html` with a right-aligned line
/// number. The label width is the digit count of the last line number.
#[must_use]
pub fn add_line_numbers(html: &str, theme: &Theme) -> String {
    let total = html.split('\n').count();
    let width = total.to_string().len();
    let mut out = String::with_capacity(html.len() + total * 64);
    for (i, line) in html.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "<span class=\"line-number\" style=\"color:{}\">{:>width$}</span> {line}",
            theme.line_number,
            i + 1,
        );
    }
    out
}

/// Number of lines in rendered output.
#[must_use]
pub fn count_lines(html: &str) -> usize {
    html.split('\n').count()
}
