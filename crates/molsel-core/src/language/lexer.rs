use super::ast::Comparator;
use super::error::{LexError, LexErrorKind};
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// Byte range of a token in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    And,
    Or,
    Not,
    All,
    Nothing,
    ByRes,
    Same,
    Around,
    Within,
    ResId,
    ResName,
    Name,
    Type,
    AtomId,
    Chain,
    Model,
    Ss,
    Prop,
    InSphere,
    InRect,
    Protein,
    Backbone,
    Water,
    Nucleic,
    NucleicBackbone,
    NucleicBase,
    NucleicSugar,
    Ligand,
    Ions,
}

impl Keyword {
    /// Keywords are case-sensitive. `empty` is an alias of `nothing`.
    pub fn from_word(word: &str) -> Option<Self> {
        let keyword = match word {
            "and" => Self::And,
            "or" => Self::Or,
            "not" => Self::Not,
            "all" => Self::All,
            "nothing" | "empty" => Self::Nothing,
            "byres" => Self::ByRes,
            "same" => Self::Same,
            "around" => Self::Around,
            "within" => Self::Within,
            "resid" => Self::ResId,
            "resname" => Self::ResName,
            "name" => Self::Name,
            "type" => Self::Type,
            "atomid" => Self::AtomId,
            "chain" => Self::Chain,
            "model" => Self::Model,
            "ss" => Self::Ss,
            "prop" => Self::Prop,
            "insphere" => Self::InSphere,
            "inrect" => Self::InRect,
            "protein" => Self::Protein,
            "backbone" => Self::Backbone,
            "water" => Self::Water,
            "nucleic" => Self::Nucleic,
            "nucleicbackbone" => Self::NucleicBackbone,
            "nucleicbase" => Self::NucleicBase,
            "nucleicsugar" => Self::NucleicSugar,
            "ligand" => Self::Ligand,
            "ions" => Self::Ions,
            _ => return None,
        };
        Some(keyword)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    Keyword(Keyword),
    Word(String),
    Int(i64),
    Float(f64),
    Range(i64, i64),
    Cmp(Comparator),
}

impl TokenKind {
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Word(_) => "word",
            TokenKind::Int(_) => "int",
            TokenKind::Float(_) => "float",
            TokenKind::Range(_, _) => "range",
            TokenKind::Cmp(_) => "comparator",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Source text of the token, without surrounding quotes for quoted literals.
    pub text: String,
    pub quoted: bool,
}

impl Token {
    /// The numeric value of an `Int` or `Float` token.
    pub fn number(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Int(n) => Some(n as f64),
            TokenKind::Float(x) => Some(x),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} {:>3}..{:<3} {}",
            self.kind.label(),
            self.span.start,
            self.span.end,
            self.text
        )
    }
}

/// Characters that may appear in a bare word, number or range.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '\'' | '*' | '.' | ':' | '+' | '-')
}

/// True if `text` lexes back as a single unquoted word token: not a keyword,
/// not a number and not a range.
pub fn is_bare_word(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(is_word_char)
        && matches!(classify(text), TokenKind::Word(_))
}

fn classify(chunk: &str) -> TokenKind {
    if let Some(keyword) = Keyword::from_word(chunk) {
        return TokenKind::Keyword(keyword);
    }
    if let Some((start, end)) = chunk.split_once(':') {
        if let (Ok(start), Ok(end)) = (start.parse::<i64>(), end.parse::<i64>()) {
            return TokenKind::Range(start, end);
        }
        return TokenKind::Word(chunk.to_string());
    }
    if let Ok(n) = chunk.parse::<i64>() {
        return TokenKind::Int(n);
    }
    if chunk.chars().any(|c| c.is_ascii_digit()) {
        if let Ok(x) = chunk.parse::<f64>() {
            return TokenKind::Float(x);
        }
    }
    TokenKind::Word(chunk.to_string())
}

struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.source.len(), |&(i, _)| i)
    }

    fn token(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        Token {
            kind,
            span: Span::new(start, end),
            text: self.source[start..end].to_string(),
            quoted: false,
        }
    }

    fn comparator(&mut self, start: usize, first: char) -> Result<Token, LexError> {
        let has_eq = self.chars.next_if(|&(_, c)| c == '=').is_some();
        let end = self.offset();
        let symbol = match (first, has_eq) {
            ('<', false) => "<",
            ('<', true) => "<=",
            ('>', false) => ">",
            ('>', true) => ">=",
            ('=', true) => "==",
            ('!', true) => "!=",
            _ => {
                return Err(LexError {
                    kind: LexErrorKind::UnexpectedChar(first),
                    span: Span::new(start, start + first.len_utf8()),
                });
            }
        };
        let op = Comparator::from_symbol(symbol).ok_or(LexError {
            kind: LexErrorKind::UnexpectedChar(first),
            span: Span::new(start, end),
        })?;
        Ok(self.token(TokenKind::Cmp(op), start, end))
    }

    fn quoted(&mut self, start: usize) -> Result<Token, LexError> {
        let content_start = start + 1;
        for (i, c) in self.chars.by_ref() {
            if c == '"' {
                let text = self.source[content_start..i].to_string();
                return Ok(Token {
                    kind: TokenKind::Word(text.clone()),
                    span: Span::new(start, i + 1),
                    text,
                    quoted: true,
                });
            }
        }
        Err(LexError {
            kind: LexErrorKind::UnterminatedQuote,
            span: Span::new(start, self.source.len()),
        })
    }

    fn word(&mut self, start: usize) -> Token {
        while self.chars.next_if(|&(_, c)| is_word_char(c)).is_some() {}
        let end = self.offset();
        self.token(classify(&self.source[start..end]), start, end)
    }

    fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
        let &(start, c) = self.chars.peek()?;
        let result = match c {
            '(' => {
                self.chars.next();
                Ok(self.token(TokenKind::LParen, start, start + 1))
            }
            ')' => {
                self.chars.next();
                Ok(self.token(TokenKind::RParen, start, start + 1))
            }
            '<' | '>' | '=' | '!' => {
                self.chars.next();
                self.comparator(start, c)
            }
            '"' => {
                self.chars.next();
                self.quoted(start)
            }
            c if is_word_char(c) => Ok(self.word(start)),
            other => Err(LexError {
                kind: LexErrorKind::UnexpectedChar(other),
                span: Span::new(start, start + other.len_utf8()),
            }),
        };
        Some(result)
    }
}

/// Splits a selection string into tokens. Whitespace separates tokens and is
/// discarded.
///
/// # Errors
///
/// Returns a [`LexError`] for a character outside the word, number, operator
/// and parenthesis classes, or for an unterminated quoted literal.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token?);
    }
    Ok(tokens)
}
