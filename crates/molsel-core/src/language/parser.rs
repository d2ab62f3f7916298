use super::ast::{Axis, Comparator, Expr, IdRange, MacroKind, NamePattern, Predicate};
use super::error::{ParseError, ParseErrorKind, SyntaxError};
use super::lexer::{Keyword, Span, Token, TokenKind, tokenize};
use crate::core::models::residue::SecondaryStructureClass;
use crate::core::utils::geometry::Parallelepiped;
use nalgebra::{Point3, Vector3};
use std::collections::HashSet;

/// Names the parser recognises besides the built-in keywords.
///
/// Structure names take precedence over registered selection names. Both end a
/// value list the same way a keyword does.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    structure_names: HashSet<String>,
    selection_names: HashSet<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_structure(mut self, name: impl Into<String>) -> Self {
        self.structure_names.insert(name.into());
        self
    }

    pub fn with_selection(mut self, name: impl Into<String>) -> Self {
        self.selection_names.insert(name.into());
        self
    }

    pub fn add_structure(&mut self, name: impl Into<String>) {
        self.structure_names.insert(name.into());
    }

    pub fn add_selection(&mut self, name: impl Into<String>) {
        self.selection_names.insert(name.into());
    }

    pub fn is_structure(&self, name: &str) -> bool {
        self.structure_names.contains(name)
    }

    pub fn is_selection(&self, name: &str) -> bool {
        self.selection_names.contains(name)
    }

    fn is_known(&self, name: &str) -> bool {
        self.is_structure(name) || self.is_selection(name)
    }
}

/// Tokenizes and parses a selection string.
///
/// # Errors
///
/// Returns [`SyntaxError::Lex`] if tokenization fails and
/// [`SyntaxError::Parse`] if the token sequence is not a complete selection.
pub fn parse(source: &str, vocabulary: &Vocabulary) -> Result<Expr, SyntaxError> {
    let tokens = tokenize(source)?;
    let expr = Parser::new(&tokens, source.len(), vocabulary).parse()?;
    Ok(expr)
}

/// Recursive-descent parser over a token slice.
///
/// Precedence from loosest to tightest: `or`, `and`, then the prefix forms
/// `not`, `byres`, `same residue as` and `around`/`within`, whose operand is a
/// single prefix form or atom.
pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    source_len: usize,
    vocabulary: &'a Vocabulary,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], source_len: usize, vocabulary: &'a Vocabulary) -> Self {
        Self {
            tokens,
            position: 0,
            source_len,
            vocabulary,
        }
    }

    pub fn parse(mut self) -> Result<Expr, ParseError> {
        if self.tokens.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyQuery));
        }
        let expr = self.parse_or()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) if token.kind == TokenKind::RParen => {
                Err(self.error(ParseErrorKind::UnmatchedCloseParen))
            }
            Some(_) => Err(self.error(ParseErrorKind::TrailingInput)),
        }
    }

    // --- Cursor helpers ---

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    fn peek_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.peek(), Some(Token { kind: TokenKind::Keyword(k), .. }) if *k == keyword)
    }

    /// Builds an error pointing at the current token, or at the end of input.
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        match self.peek() {
            Some(token) => ParseError {
                kind,
                token_index: self.position,
                span: token.span,
                found: Some(token.text.clone()),
            },
            None => ParseError {
                kind,
                token_index: self.tokens.len(),
                span: Span::new(self.source_len, self.source_len),
                found: None,
            },
        }
    }

    fn error_at(&self, index: usize, kind: ParseErrorKind) -> ParseError {
        let token = &self.tokens[index.min(self.tokens.len().saturating_sub(1))];
        ParseError {
            kind,
            token_index: index,
            span: token.span,
            found: Some(token.text.clone()),
        }
    }

    fn expected(&self, what: &'static str) -> ParseError {
        if self.peek().is_some() {
            self.error(ParseErrorKind::UnexpectedToken(what))
        } else {
            self.error(ParseErrorKind::UnexpectedEnd(what))
        }
    }

    // --- Boolean structure ---

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.peek_keyword(Keyword::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while self.peek_keyword(Keyword::And) {
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.expected("a selection"));
        };
        match token.kind {
            TokenKind::Keyword(Keyword::Not) => {
                self.advance();
                Ok(Expr::Not(Box::new(self.parse_unary()?)))
            }
            TokenKind::Keyword(Keyword::ByRes) => {
                self.advance();
                Ok(Expr::ByRes(Box::new(self.parse_unary()?)))
            }
            TokenKind::Keyword(Keyword::Same) => {
                self.advance();
                self.expect_word("residue")?;
                self.expect_word("as")?;
                Ok(Expr::ByRes(Box::new(self.parse_unary()?)))
            }
            TokenKind::Keyword(Keyword::Around) | TokenKind::Keyword(Keyword::Within) => {
                self.advance();
                let radius = self.parse_distance()?;
                let inner = self.parse_unary()?;
                Ok(Expr::Around {
                    radius,
                    inner: Box::new(inner),
                })
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.expected("a selection"));
        };
        match &token.kind {
            TokenKind::LParen => {
                let open = self.position;
                self.advance();
                let inner = self.parse_or()?;
                match self.peek() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => {
                        self.advance();
                        Ok(inner)
                    }
                    Some(_) => Err(self.expected("')'")),
                    None => Err(self.error_at(open, ParseErrorKind::UnclosedParen)),
                }
            }
            TokenKind::Keyword(keyword) => {
                let keyword = *keyword;
                self.advance();
                self.parse_keyword(keyword).map(Expr::Predicate)
            }
            TokenKind::Word(word) => match self.known_name(word) {
                Some(predicate) => {
                    self.advance();
                    Ok(Expr::Predicate(predicate))
                }
                None => Err(self.error(ParseErrorKind::UnknownKeyword(word.clone()))),
            },
            // Names such as `1e45` or `2` lex as numbers.
            TokenKind::Int(_) | TokenKind::Float(_) | TokenKind::Range(_, _) => {
                match self.known_name(&token.text) {
                    Some(predicate) => {
                        self.advance();
                        Ok(Expr::Predicate(predicate))
                    }
                    None => Err(self.expected("a selection")),
                }
            }
            _ => Err(self.expected("a selection")),
        }
    }

    /// Structure names win over registered selections of the same name.
    fn known_name(&self, name: &str) -> Option<Predicate> {
        if self.vocabulary.is_structure(name) {
            Some(Predicate::Structure(name.to_string()))
        } else if self.vocabulary.is_selection(name) {
            Some(Predicate::NamedSelection(name.to_string()))
        } else {
            None
        }
    }

    fn parse_keyword(&mut self, keyword: Keyword) -> Result<Predicate, ParseError> {
        let predicate = match keyword {
            Keyword::All => Predicate::All,
            Keyword::Nothing => Predicate::Nothing,
            Keyword::ResId => Predicate::ResId(self.parse_id_list("resid")?),
            Keyword::AtomId => Predicate::AtomId(self.parse_id_list("atomid")?),
            Keyword::ResName => Predicate::ResName(self.parse_name_list("resname")?),
            Keyword::Name => Predicate::AtomName(self.parse_name_list("name")?),
            Keyword::Type => Predicate::AtomType(self.parse_name_list("type")?),
            Keyword::Chain => Predicate::Chain(self.parse_name_list("chain")?),
            Keyword::Model => Predicate::Model(self.parse_model_index()?),
            Keyword::Ss => Predicate::SecondaryStructure(self.parse_secondary_structure()?),
            Keyword::Prop => self.parse_property()?,
            Keyword::InSphere => {
                let [x, y, z, radius] = self.parse_numbers::<4>()?;
                if radius < 0.0 {
                    return Err(self.error_at(
                        self.position - 1,
                        ParseErrorKind::NegativeDistance(radius),
                    ));
                }
                Predicate::InSphere {
                    center: Point3::new(x, y, z),
                    radius,
                }
            }
            Keyword::InRect => self.parse_rect()?,
            Keyword::Protein => Predicate::Macro(MacroKind::Protein),
            Keyword::Backbone => Predicate::Macro(MacroKind::Backbone),
            Keyword::Water => Predicate::Macro(MacroKind::Water),
            Keyword::Nucleic => Predicate::Macro(MacroKind::Nucleic),
            Keyword::NucleicBackbone => Predicate::Macro(MacroKind::NucleicBackbone),
            Keyword::NucleicBase => Predicate::Macro(MacroKind::NucleicBase),
            Keyword::NucleicSugar => Predicate::Macro(MacroKind::NucleicSugar),
            Keyword::Ligand => Predicate::Macro(MacroKind::Ligand),
            Keyword::Ions => Predicate::Macro(MacroKind::Ions),
            Keyword::And
            | Keyword::Or
            | Keyword::Not
            | Keyword::ByRes
            | Keyword::Same
            | Keyword::Around
            | Keyword::Within => {
                self.position -= 1;
                return Err(self.expected("a selection"));
            }
        };
        Ok(predicate)
    }

    // --- Operands ---

    fn expect_word(&mut self, expected: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Word(word),
                ..
            }) if word == expected => {
                self.advance();
                Ok(())
            }
            _ => Err(self.expected(expected)),
        }
    }

    fn parse_number(&mut self) -> Result<f64, ParseError> {
        match self.peek().and_then(Token::number) {
            Some(value) => {
                self.advance();
                Ok(value)
            }
            None => Err(self.expected("a number")),
        }
    }

    fn parse_numbers<const N: usize>(&mut self) -> Result<[f64; N], ParseError> {
        let mut values = [0.0; N];
        for value in values.iter_mut() {
            *value = self.parse_number()?;
        }
        Ok(values)
    }

    fn parse_distance(&mut self) -> Result<f64, ParseError> {
        let index = self.position;
        let distance = self.parse_number()?;
        if distance < 0.0 {
            return Err(self.error_at(index, ParseErrorKind::NegativeDistance(distance)));
        }
        Ok(distance)
    }

    /// True if the current token can continue a value list.
    fn at_list_value(&self) -> bool {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Word(word),
                quoted,
                ..
            }) => *quoted || !self.vocabulary.is_known(word),
            Some(Token {
                kind: TokenKind::Int(_) | TokenKind::Float(_) | TokenKind::Range(_, _),
                ..
            }) => true,
            _ => false,
        }
    }

    fn parse_id_list(&mut self, keyword: &'static str) -> Result<Vec<IdRange>, ParseError> {
        let mut ranges = Vec::new();
        while self.at_list_value() {
            let range = match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Int(n)) => IdRange::single(*n),
                Some(&TokenKind::Range(start, end)) => {
                    if start > end {
                        return Err(self.error(ParseErrorKind::InvalidRange { start, end }));
                    }
                    IdRange { start, end }
                }
                _ => return Err(self.expected("an integer or an A:B range")),
            };
            self.advance();
            ranges.push(range);
        }
        if ranges.is_empty() {
            return Err(self.error(ParseErrorKind::MissingOperand(keyword)));
        }
        Ok(ranges)
    }

    fn parse_name_list(&mut self, keyword: &'static str) -> Result<Vec<NamePattern>, ParseError> {
        let mut patterns = Vec::new();
        while self.at_list_value() {
            let Some(token) = self.peek() else { break };
            let pattern = match token.text.strip_suffix('*') {
                Some(prefix) if !prefix.contains('*') => NamePattern::Prefix(prefix.to_string()),
                Some(_) => {
                    return Err(self.error(ParseErrorKind::InvalidWildcard(token.text.clone())));
                }
                None if token.text.contains('*') => {
                    return Err(self.error(ParseErrorKind::InvalidWildcard(token.text.clone())));
                }
                None => NamePattern::Exact(token.text.clone()),
            };
            self.advance();
            patterns.push(pattern);
        }
        if patterns.is_empty() {
            return Err(self.error(ParseErrorKind::MissingOperand(keyword)));
        }
        Ok(patterns)
    }

    fn parse_model_index(&mut self) -> Result<usize, ParseError> {
        match self.peek().map(|t| &t.kind) {
            Some(&TokenKind::Int(n)) if n >= 0 => {
                self.advance();
                Ok(n as usize)
            }
            _ => Err(self.expected("a model index")),
        }
    }

    fn parse_secondary_structure(&mut self) -> Result<SecondaryStructureClass, ParseError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Word(word),
                ..
            }) => {
                let class = word.parse().map_err(|_| {
                    self.error(ParseErrorKind::InvalidSecondaryStructure(word.clone()))
                })?;
                self.advance();
                Ok(class)
            }
            _ => Err(self.expected("a secondary structure (helix, sheet or coil)")),
        }
    }

    fn parse_axis(&mut self) -> Result<Axis, ParseError> {
        let axis = match self.peek() {
            Some(Token {
                kind: TokenKind::Word(word),
                ..
            }) => match word.as_str() {
                "x" => Axis::X,
                "y" => Axis::Y,
                "z" => Axis::Z,
                other => return Err(self.error(ParseErrorKind::InvalidAxis(other.to_string()))),
            },
            _ => return Err(self.expected("an axis (x, y or z)")),
        };
        self.advance();
        Ok(axis)
    }

    fn parse_comparator(&mut self) -> Result<Comparator, ParseError> {
        match self.peek().map(|t| &t.kind) {
            Some(&TokenKind::Cmp(op)) => {
                self.advance();
                Ok(op)
            }
            _ => Err(self.expected("a comparison operator")),
        }
    }

    /// `prop AXIS OP VALUE` or the reversed `prop VALUE OP AXIS`.
    fn parse_property(&mut self) -> Result<Predicate, ParseError> {
        let reversed = self.peek().and_then(Token::number).is_some();
        if reversed {
            let value = self.parse_number()?;
            let op = self.parse_comparator()?;
            let axis = self.parse_axis()?;
            Ok(Predicate::Property {
                axis,
                op: op.flipped(),
                value,
            })
        } else {
            let axis = self.parse_axis()?;
            let op = self.parse_comparator()?;
            let value = self.parse_number()?;
            Ok(Predicate::Property { axis, op, value })
        }
    }

    /// `inrect OX OY OZ  E1X E1Y E1Z  E2X E2Y E2Z  E3X E3Y E3Z`.
    fn parse_rect(&mut self) -> Result<Predicate, ParseError> {
        let first = self.position;
        let v = self.parse_numbers::<12>()?;
        let origin = Point3::new(v[0], v[1], v[2]);
        let edges = [
            Vector3::new(v[3], v[4], v[5]),
            Vector3::new(v[6], v[7], v[8]),
            Vector3::new(v[9], v[10], v[11]),
        ];
        if let Some(i) = edges.iter().position(|e| e.norm() == 0.0) {
            return Err(self.error_at(first + 3 + 3 * i, ParseErrorKind::DegenerateEdge(i + 1)));
        }
        Ok(Predicate::InRect(Parallelepiped::new(origin, edges)))
    }
}
