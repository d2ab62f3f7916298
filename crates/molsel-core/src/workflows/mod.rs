//! # Workflows Module
//!
//! Entry points that take a selection string and hand back a
//! [`crate::core::selection::Selection`].
//!
//! - **Selection Workflow** ([`select`]) - Parse, evaluate and assemble in one call,
//!   either propagating syntax errors or logging them and returning an empty selection.

pub mod select;
