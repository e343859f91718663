//! Error taxonomy. One `thiserror::Error` enum per phase, matching
//! `nova-cache::CacheError`'s style: a `#[error("...")]` message per
//! variant, `Display` derived rather than hand-written.

use text_size::TextRange;

use crate::source_map::LineIndex;
use crate::version::JavaVersion;

/// Failures the lexer can report. Lexing happens once, upfront, over the
/// whole source; a lex failure always aborts the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("unterminated text block")]
    UnterminatedTextBlock,
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("empty character literal")]
    EmptyCharLiteral,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    #[error("malformed numeric literal")]
    MalformedNumericLiteral,
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("text block missing required newline after opening delimiter")]
    TextBlockMissingNewline,
}

/// Failures the parser can report. Every variant is reachable from a single
/// `ParseFailure` at the top level: one error, never a list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseFailureKind {
    #[error("lexical error: {0}")]
    Lex(#[from] LexErrorKind),
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
    },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("maximum parse nesting depth ({max_depth}) exceeded")]
    DepthExceeded { max_depth: u32 },
    #[error("`{feature}` requires Java {minimum} or later (parsing as Java {requested})")]
    FeatureNotAvailable {
        feature: &'static str,
        minimum: JavaVersion,
        requested: JavaVersion,
    },
    #[error("trailing input after compilation unit")]
    TrailingInput,
    #[error("module declaration may only appear in a module-info compilation unit")]
    ModuleDeclarationNotExpected,
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(&'static str),
}

/// A single, fatal parse error: first-failure reporting, no accumulation.
/// Carries the byte range of the offending token or construct so callers
/// can map it back to a line/column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {range:?}")]
pub struct ParseFailure {
    pub kind: ParseFailureKind,
    pub range: TextRange,
}

impl ParseFailure {
    pub fn new(kind: ParseFailureKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// The 1-based `(line, column)` of this failure's starting offset within
    /// `source`. Takes `source` rather than storing a `LineIndex` on every
    /// failure, since the overwhelmingly common case (a successful parse)
    /// never needs one.
    pub fn line_column(&self, source: &str) -> (u32, u32) {
        LineIndex::new(source).line_column_at(source, self.range.start())
    }
}
