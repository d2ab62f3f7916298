//! # Core Module
//!
//! The data the selection language runs over and the result it produces.
//!
//! ## Overview
//!
//! - **Molecular Representation** ([`models`]) - Structures, models, chains, residues, atoms and bonds
//! - **Static Vocabularies and Geometry** ([`utils`]) - Residue/atom name tables and spatial primitives
//! - **Results** ([`selection`]) - The [`selection::Selection`] type with its induced bonds and bookkeeping

pub mod models;
pub mod selection;
pub mod utils;
