//! Named color themes for highlighted code.

use super::lexer::TokenKind;

/// Name of the theme used when a requested name is unknown.
pub const DEFAULT_THEME: &str = "github-dark";

/// Colors for each token category plus the line-number gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub keyword: &'static str,
    pub string: &'static str,
    pub comment: &'static str,
    pub number: &'static str,
    pub identifier: &'static str,
    pub punctuation: &'static str,
    pub line_number: &'static str,
}

impl Theme {
    /// Color for `kind`, or `None` for plain text (rendered unstyled).
    #[must_use]
    pub fn color(&self, kind: TokenKind) -> Option<&'static str> {
        match kind {
            TokenKind::Keyword => Some(self.keyword),
            TokenKind::String => Some(self.string),
            TokenKind::Comment => Some(self.comment),
            TokenKind::Number => Some(self.number),
            TokenKind::Identifier => Some(self.identifier),
            TokenKind::Punctuation => Some(self.punctuation),
            TokenKind::Plain => None,
        }
    }
}

/// Built-in themes. The first entry is the default.
pub static THEMES: [Theme; 3] = [
    Theme {
        name: DEFAULT_THEME,
        keyword: "#ff7b72",
        string: "#a5d6ff",
        comment: "#8b949e",
        number: "#79c0ff",
        identifier: "#e6edf3",
        punctuation: "#c9d1d9",
        line_number: "#6e7681",
    },
    Theme {
        name: "github-light",
        keyword: "#cf222e",
        string: "#0a3069",
        comment: "#6e7781",
        number: "#0550ae",
        identifier: "#24292f",
        punctuation: "#57606a",
        line_number: "#8c959f",
    },
    Theme {
        name: "monokai",
        keyword: "#f92672",
        string: "#e6db74",
        comment: "#75715e",
        number: "#ae81ff",
        identifier: "#f8f8f2",
        punctuation: "#f8f8f2",
        line_number: "#90908a",
    },
];

/// Looks up a theme by name (case-insensitive), falling back to
/// [`DEFAULT_THEME`].
#[must_use]
pub fn theme_by_name(name: &str) -> &'static Theme {
    let wanted = name.trim();
    THEMES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(wanted))
        .unwrap_or(&THEMES[0])
}
