//! Lightweight syntax highlighting to inline-styled HTML.
//!
//! [`highlight`] never fails: highlighting is a display nicety, so any
//! internal error is logged and the escaped source is returned unstyled.
//! [`try_highlight`] exposes the error for callers that want it.
//!
//! Compiled rulesets are shared read-only across calls; nothing else
//! persists between calls, so identical arguments always produce
//! byte-identical output.

pub mod lexer;
pub mod render;
pub mod theme;

use tracing::{debug, warn};

pub use lexer::{Language, Lexer, Span, Token, TokenKind};
pub use render::{add_line_numbers, count_lines, escape_html, render_plain, render_tokens};
pub use theme::{theme_by_name, Theme, DEFAULT_THEME, THEMES};

/// Internal highlighting failures. Surfaced only by [`try_highlight`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum HighlightError {
    #[error("invalid {rule} pattern: {source}")]
    Pattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
    #[error("token boundary at byte {offset} splits a character")]
    Boundary { offset: usize },
    #[error("tokens do not reproduce the source ({covered} of {expected} bytes)")]
    Coverage { covered: usize, expected: usize },
}

/// Options for a highlight call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Language hint, e.g. `"typescript"` or `"rs"`.
    pub language: String,
    /// Theme name; unknown names use [`DEFAULT_THEME`].
    pub theme: String,
    /// Prefix each line with its number.
    pub line_numbers: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            language: "typescript".to_string(),
            theme: DEFAULT_THEME.to_string(),
            line_numbers: false,
        }
    }
}

/// Highlights `source`, degrading to escaped plain text on internal failure.
#[must_use]
pub fn highlight(source: &str, options: &HighlightOptions) -> String {
    highlight_with(source, options, Lexer::cached(Language::from_hint(&options.language)))
}

fn highlight_with(
    source: &str,
    options: &HighlightOptions,
    lexer: Result<&Lexer, HighlightError>,
) -> String {
    match lexer.and_then(|lexer| render_with(lexer, source, options)) {
        Ok(html) => html,
        Err(error) => {
            warn!(%error, language = %options.language, "highlighting failed, rendering plain text");
            render_fallback(source, options)
        }
    }
}

/// Escaped, unstyled source, numbered if requested.
fn render_fallback(source: &str, options: &HighlightOptions) -> String {
    let plain = render_plain(source);
    if options.line_numbers {
        add_line_numbers(&plain, theme_by_name(&options.theme))
    } else {
        plain
    }
}

/// Convenience form of [`highlight`] taking each option directly.
#[must_use]
pub fn highlight_code(source: &str, language: &str, theme: &str, line_numbers: bool) -> String {
    highlight(
        source,
        &HighlightOptions {
            language: language.to_string(),
            theme: theme.to_string(),
            line_numbers,
        },
    )
}

/// Highlights `source`, returning any internal error.
///
/// # Errors
///
/// Returns a [`HighlightError`] if a ruleset fails to compile or the token
/// stream does not tile the source exactly.
pub fn try_highlight(source: &str, options: &HighlightOptions) -> Result<String, HighlightError> {
    let lexer = Lexer::cached(Language::from_hint(&options.language))?;
    render_with(lexer, source, options)
}

fn render_with(lexer: &Lexer, source: &str, options: &HighlightOptions) -> Result<String, HighlightError> {
    let theme = theme_by_name(&options.theme);
    let tokens = lexer.tokenize(source)?;

    let covered: usize = tokens.iter().map(|t| t.text.len()).sum();
    if covered != source.len() {
        return Err(HighlightError::Coverage {
            covered,
            expected: source.len(),
        });
    }

    debug!(
        language = lexer.language().name(),
        theme = theme.name,
        tokens = tokens.len(),
        "highlighted source"
    );

    let html = render_tokens(&tokens, theme);
    Ok(if options.line_numbers {
        add_line_numbers(&html, theme)
    } else {
        html
    })
}
