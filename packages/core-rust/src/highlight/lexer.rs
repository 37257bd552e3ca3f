//! Lexical approximation of a few languages for display highlighting.
//!
//! The lexer walks the source left to right. At each offset it tries an
//! ordered list of anchored regex matchers (whitespace, comment, string,
//! number, word, punctuation) and takes the first one that matches.
//! Operator alternations are ordered longest first so `===` wins over `==`
//! and `=`. A character no matcher accepts becomes a one-character
//! [`TokenKind::Plain`] token, and adjacent plain tokens are merged.
//!
//! Tokens always tile the input: contiguous, non-overlapping, and their
//! texts concatenate back to the source.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::HighlightError;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Keyword,
    String,
    Comment,
    Number,
    Identifier,
    Punctuation,
    /// Whitespace and anything no matcher recognized.
    Plain,
}

/// Byte range of a token within the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A classified slice of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

/// Language ruleset selected by a hint string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    JavaScript,
    Rust,
    Json,
    /// No highlighting: the whole source is one plain token.
    Plain,
}

impl Language {
    /// Maps a language hint (name or file extension, any case) to a ruleset.
    /// Unrecognized hints select [`Language::Plain`].
    #[must_use]
    pub fn from_hint(hint: &str) -> Self {
        match hint.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" | "tsx" => Self::TypeScript,
            "javascript" | "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "rust" | "rs" => Self::Rust,
            "json" => Self::Json,
            _ => Self::Plain,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Rust => "rust",
            Self::Json => "json",
            Self::Plain => "plain",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::TypeScript => TS_KEYWORDS,
            Self::JavaScript => JS_KEYWORDS,
            Self::Rust => RUST_KEYWORDS,
            Self::Json => JSON_KEYWORDS,
            Self::Plain => &[],
        }
    }

    fn is_keyword(self, word: &str) -> bool {
        self.keywords().contains(&word)
            || (self == Self::TypeScript && JS_KEYWORDS.contains(&word))
    }

    fn operators(self) -> &'static [&'static str] {
        match self {
            Self::TypeScript | Self::JavaScript => JS_OPERATORS,
            Self::Rust => RUST_OPERATORS,
            Self::Json => JSON_OPERATORS,
            Self::Plain => &[],
        }
    }

    fn comment_pattern(self) -> Option<&'static str> {
        match self {
            Self::TypeScript | Self::JavaScript | Self::Rust => {
                Some(r"//[^\n]*|/\*(?s:.*?)(?:\*/|\z)")
            }
            Self::Json | Self::Plain => None,
        }
    }

    fn string_pattern(self) -> Option<&'static str> {
        match self {
            // Quoted strings stop at end of line when unterminated; template
            // strings may span lines.
            Self::TypeScript | Self::JavaScript => Some(
                r#""(?:[^"\\\n]|\\(?s:.))*"?|'(?:[^'\\\n]|\\(?s:.))*'?|`(?:[^`\\]|\\(?s:.))*`?"#,
            ),
            Self::Rust => Some(
                r##"b?r#"(?s:.*?)(?:"#|\z)|b?r"[^"]*"?|b?"(?:[^"\\]|\\(?s:.))*"?|b?'(?:[^'\\\n]|\\[^\n]{1,10}?)'"##,
            ),
            Self::Json => Some(r#""(?:[^"\\\n]|\\(?s:.))*"?"#),
            Self::Plain => None,
        }
    }

    fn number_pattern(self) -> Option<&'static str> {
        match self {
            Self::TypeScript | Self::JavaScript | Self::Rust => Some(
                r"(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+|(?:\d[\d_]*)?\.?\d[\d_]*(?:[eE][+-]?\d+)?)(?:n|[iuf](?:8|16|32|64|128|size))?",
            ),
            Self::Json => Some(r"\d+(?:\.\d+)?(?:[eE][+-]?\d+)?"),
            Self::Plain => None,
        }
    }

    fn word_pattern(self) -> Option<&'static str> {
        match self {
            Self::TypeScript | Self::JavaScript => Some(r"[\p{L}_$][\p{L}\p{N}_$]*"),
            Self::Rust | Self::Json => Some(r"[\p{L}_][\p{L}\p{N}_]*"),
            Self::Plain => None,
        }
    }
}

const JS_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "false", "finally", "for", "from",
    "function", "if", "import", "in", "instanceof", "let", "new", "null", "of", "return",
    "static", "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var",
    "void", "while", "with", "yield",
];

// Checked in addition to JS_KEYWORDS.
const TS_KEYWORDS: &[&str] = &[
    "abstract", "any", "as", "asserts", "bigint", "boolean", "declare", "enum", "implements",
    "infer", "interface", "is", "keyof", "namespace", "never", "number", "object", "private",
    "protected", "public", "readonly", "satisfies", "string", "symbol", "type", "unknown",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "Some", "None", "Ok", "Err",
];

const JSON_KEYWORDS: &[&str] = &["true", "false", "null"];

const JS_OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "...", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "**", "<<", ">>", "{", "}", "(", ")", "[", "]", ";", ",", ".", "<", ">", "+",
    "-", "*", "/", "%", "&", "|", "^", "!", "~", "?", ":", "=", "@", "#",
];

const RUST_OPERATORS: &[&str] = &[
    "<<=", ">>=", "...", "..=", "::", "->", "=>", "==", "!=", "<=", ">=", "&&", "||", "+=",
    "-=", "*=", "/=", "%=", "^=", "&=", "|=", "<<", ">>", "..", "{", "}", "(", ")", "[", "]",
    ";", ",", ".", "<", ">", "+", "-", "*", "/", "%", "&", "|", "^", "!", "~", "?", ":", "=",
    "@", "#", "'", "$",
];

const JSON_OPERATORS: &[&str] = &["{", "}", "[", "]", ":", ",", "-"];

/// What a matcher produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Whitespace,
    Comment,
    String,
    Number,
    /// Identifier or keyword, decided by the language's keyword set.
    Word,
    Punctuation,
}

#[derive(Debug)]
struct Matcher {
    rule: Rule,
    regex: Regex,
}

/// A compiled ruleset for one language.
///
/// Compiled rulesets are immutable; [`Lexer::cached`] builds each one once
/// per process and shares it.
#[derive(Debug)]
pub struct Lexer {
    language: Language,
    matchers: Vec<Matcher>,
}

/// Builds the operator alternation, longest operators first so the regex
/// engine's leftmost-first alternation picks the longest match.
fn operator_pattern(operators: &[&str]) -> String {
    let mut ops: Vec<&str> = operators.to_vec();
    ops.sort_by(|a, b| b.len().cmp(&a.len()));
    ops.iter()
        .map(|op| regex::escape(op))
        .collect::<Vec<_>>()
        .join("|")
}

fn compile(rule: Rule, pattern: &str) -> Result<Matcher, HighlightError> {
    let regex = Regex::new(&format!(r"\A(?:{pattern})")).map_err(|source| HighlightError::Pattern {
        rule: format!("{rule:?}"),
        source,
    })?;
    Ok(Matcher { rule, regex })
}

impl Lexer {
    /// Compiles the matchers for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::Pattern`] if a matcher fails to compile.
    pub fn new(language: Language) -> Result<Self, HighlightError> {
        let mut matchers = Vec::new();
        if language != Language::Plain {
            matchers.push(compile(Rule::Whitespace, r"\s+")?);
        }
        let ordered = [
            (Rule::Comment, language.comment_pattern().map(str::to_string)),
            (Rule::String, language.string_pattern().map(str::to_string)),
            (Rule::Number, language.number_pattern().map(str::to_string)),
            (Rule::Word, language.word_pattern().map(str::to_string)),
            (
                Rule::Punctuation,
                Some(operator_pattern(language.operators())).filter(|p| !p.is_empty()),
            ),
        ];
        for (rule, pattern) in ordered {
            if let Some(pattern) = pattern {
                matchers.push(compile(rule, &pattern)?);
            }
        }
        Ok(Self { language, matchers })
    }

    /// The shared ruleset for `language`, compiled on first use.
    ///
    /// # Errors
    ///
    /// Returns the [`HighlightError::Pattern`] from the first build on every
    /// call if the ruleset does not compile.
    pub fn cached(language: Language) -> Result<&'static Self, HighlightError> {
        type Cached = Lazy<Result<Lexer, HighlightError>>;
        static TYPESCRIPT: Cached = Lazy::new(|| Lexer::new(Language::TypeScript));
        static JAVASCRIPT: Cached = Lazy::new(|| Lexer::new(Language::JavaScript));
        static RUST: Cached = Lazy::new(|| Lexer::new(Language::Rust));
        static JSON: Cached = Lazy::new(|| Lexer::new(Language::Json));
        static PLAIN: Cached = Lazy::new(|| Lexer::new(Language::Plain));

        let slot: &'static Cached = match language {
            Language::TypeScript => &TYPESCRIPT,
            Language::JavaScript => &JAVASCRIPT,
            Language::Rust => &RUST,
            Language::Json => &JSON,
            Language::Plain => &PLAIN,
        };
        slot.as_ref().map_err(Clone::clone)
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// First matcher that accepts a non-empty prefix of `rest`.
    fn match_prefix(&self, rest: &str) -> Option<(TokenKind, usize)> {
        self.matchers.iter().find_map(|m| {
            let found = m.regex.find(rest)?;
            if found.end() == 0 {
                return None;
            }
            let kind = match m.rule {
                Rule::Whitespace => TokenKind::Plain,
                Rule::Comment => TokenKind::Comment,
                Rule::String => TokenKind::String,
                Rule::Number => TokenKind::Number,
                Rule::Word if self.language.is_keyword(found.as_str()) => TokenKind::Keyword,
                Rule::Word => TokenKind::Identifier,
                Rule::Punctuation => TokenKind::Punctuation,
            };
            Some((kind, found.end()))
        })
    }

    /// Splits `source` into tokens covering it exactly.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::Boundary`] if a match would end inside a
    /// UTF-8 character, which no well-formed pattern produces.
    pub fn tokenize<'a>(&self, source: &'a str) -> Result<Vec<Token<'a>>, HighlightError> {
        let mut tokens: Vec<Token<'a>> = Vec::new();
        let mut pos = 0;
        while pos < source.len() {
            let rest = &source[pos..];
            let (kind, len) = self.match_prefix(rest).unwrap_or_else(|| {
                // Unmatched: pass one character through as plain text.
                (TokenKind::Plain, rest.chars().next().map_or(1, char::len_utf8))
            });
            let end = pos + len;
            if !source.is_char_boundary(end) {
                return Err(HighlightError::Boundary { offset: end });
            }
            let open_plain = tokens
                .last()
                .filter(|t| t.kind == TokenKind::Plain)
                .map(|t| t.span.start);
            match (kind, open_plain) {
                (TokenKind::Plain, Some(start)) => {
                    if let Some(last) = tokens.last_mut() {
                        last.span.end = end;
                        last.text = &source[start..end];
                    }
                }
                _ => tokens.push(Token {
                    kind,
                    text: &source[pos..end],
                    span: Span { start: pos, end },
                }),
            }
            pos = end;
        }
        Ok(tokens)
    }
}
