use super::lexer::Span;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unterminated quoted literal")]
    UnterminatedQuote,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {}", .span.start)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("empty selection")]
    EmptyQuery,
    #[error("unexpected end of selection, expected {0}")]
    UnexpectedEnd(&'static str),
    #[error("expected {0}")]
    UnexpectedToken(&'static str),
    #[error("unknown keyword '{0}'")]
    UnknownKeyword(String),
    #[error("'(' is never closed")]
    UnclosedParen,
    #[error("unmatched ')'")]
    UnmatchedCloseParen,
    #[error("'{0}' requires at least one value")]
    MissingOperand(&'static str),
    #[error("invalid range {start}:{end}, start is greater than end")]
    InvalidRange { start: i64, end: i64 },
    #[error("'*' is only allowed at the end of a pattern: '{0}'")]
    InvalidWildcard(String),
    #[error("invalid secondary structure '{0}', expected helix, sheet, coil, H, S or C")]
    InvalidSecondaryStructure(String),
    #[error("invalid axis '{0}', expected x, y or z")]
    InvalidAxis(String),
    #[error("distance must not be negative, got {0}")]
    NegativeDistance(f64),
    #[error("inrect edge {0} has zero length")]
    DegenerateEdge(usize),
    #[error("unexpected input after a complete selection")]
    TrailingInput,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at position {}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Index of the offending token, equal to the token count at end of input.
    pub token_index: usize,
    pub span: Span,
    /// Source text of the offending token, `None` at end of input.
    pub found: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(e) => e.span,
            SyntaxError::Parse(e) => e.span,
        }
    }

    /// Formats the error with the source line and a caret marker under the
    /// offending substring.
    ///
    /// ```text
    /// error: unknown keyword 'foo' at position 12
    ///   name CA and foo
    ///               ^^^
    /// ```
    pub fn render(&self, source: &str) -> String {
        let span = self.span();
        let start = span.start.min(source.len());
        let end = span.end.clamp(start, source.len());
        let column = source.get(..start).map_or(0, |s| s.chars().count());
        let width = source.get(start..end).map_or(0, |s| s.chars().count()).max(1);
        format!(
            "error: {self}\n  {source}\n  {}{}",
            " ".repeat(column),
            "^".repeat(width)
        )
    }
}
