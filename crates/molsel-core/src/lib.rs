//! # molsel
//!
//! A molecular selection language: parse strings such as
//! `resname GLY SER and not around 4.5 ligand` and evaluate them against an
//! in-memory molecular structure.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** The arena-backed structural model
//!   (`MolecularSystem`), static residue/atom vocabularies and the
//!   `Selection` result type.
//!
//! - **[`language`]: The Grammar.** Tokenizer, recursive-descent parser and
//!   the expression tree with its canonical string form.
//!
//! - **[`engine`]: The Evaluator.** Turns an expression tree and a candidate
//!   atom list into the ordered list of matching atoms.
//!
//! - **[`workflows`]: The Public API.** Ties parsing, evaluation and result
//!   assembly together behind [`workflows::select::select`].

pub mod core;
pub mod engine;
pub mod language;
pub mod workflows;
