//! # Engine Module
//!
//! Evaluates parsed selection expressions against the structural model.
//!
//! ## Overview
//!
//! The [`evaluate::Evaluator`] walks an expression tree over an ordered
//! candidate atom list and returns the matching atoms in candidate order. It
//! reads the [`crate::core::models::system::MolecularSystem`] without mutating
//! it and never fails for semantic reasons: unknown residues, absent chains or
//! an empty candidate list simply match fewer atoms.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Default selection name and the k-d tree threshold
//! - **Evaluation** ([`evaluate`]) - Boolean masks over the candidate list
//! - **Neighbour Search** ([`spatial`]) - Linear scan or k-d tree behind one query
//! - **Named Selections** ([`registry`]) - Caller-owned selections referenced by name
//! - **Error Handling** ([`error`]) - Engine-level errors

pub mod config;
pub mod error;
pub mod evaluate;
pub mod registry;
pub mod spatial;
