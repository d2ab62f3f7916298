//! # Selection Language Module
//!
//! Turns a selection string such as `not resid 10 and around 4.5 resid 10`
//! into an expression tree the engine can evaluate.
//!
//! ## Overview
//!
//! Parsing runs in two passes. The [`lexer`] splits the string into tokens
//! carrying byte spans; the [`parser`] builds an [`ast::Expr`] by recursive
//! descent with the precedence `not` > `and` > `or`. Both passes report
//! failures as [`error::SyntaxError`], which can render a caret diagnostic
//! under the offending substring.
//!
//! ## Key Components
//!
//! - [`lexer`] - Tokens, keywords and byte spans
//! - [`ast`] - Expression tree and its canonical `Display` form
//! - [`parser`] - Recursive-descent parser and the [`parser::Vocabulary`] of known names
//! - [`error`] - Lex and parse errors

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::Expr;
pub use error::SyntaxError;
pub use parser::{Vocabulary, parse};
