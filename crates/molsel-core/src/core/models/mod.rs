//! # Core Models Module
//!
//! The structural data model the selection engine reads from.
//!
//! ## Overview
//!
//! A [`system::MolecularSystem`] owns any number of structures. Each structure
//! is a strict tree: Structure → Model → Chain → Residue → Atom. Every level is
//! stored in a slot-map arena and refers to its parent by id, so an atom can be
//! traced back to its structure without shared ownership.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom name, element, position, serial number and ligand flag
//! - [`residue`] - Residues and their secondary structure assignment
//! - [`chain`] - Chains with residue-number lookup
//! - [`model`] - Coordinate frames owning the ordered atom list and bond table
//! - [`structure`] - Named structures with a current model
//! - [`topology`] - Bonds, bond orders and per-model bond tables
//! - [`system`] - The arena holding everything
//! - [`builder`] - File-order construction by serial number
//! - [`ids`] - Arena key types
//!
//! ## Usage
//!
//! ```
//! use molsel::core::models::system::MolecularSystem;
//! use molsel::core::models::topology::BondOrder;
//! use nalgebra::Point3;
//!
//! let mut system = MolecularSystem::new();
//! let mut builder = system.build_structure("1crn");
//! builder
//!     .start_model()
//!     .start_chain("A")?
//!     .start_residue(1, "THR")?
//!     .add_atom(1, "N", "N", Point3::new(17.0, 14.1, 3.6))?
//!     .add_atom(2, "CA", "C", Point3::new(16.9, 12.8, 4.4))?
//!     .add_bond(1, 2, BondOrder::Single)?;
//! let structure_id = builder.finish();
//! assert_eq!(system.current_atoms(structure_id).map(|a| a.len()), Some(2));
//! # Ok::<(), molsel::core::models::builder::BuildError>(())
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod ids;
pub mod model;
pub mod residue;
pub mod structure;
pub mod system;
pub mod topology;
