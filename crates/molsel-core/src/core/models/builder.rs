use super::atom::Atom;
use super::ids::{AtomId, ChainId, ModelId, ResidueId, StructureId};
use super::residue::SecondaryStructure;
use super::system::MolecularSystem;
use super::topology::BondOrder;
use nalgebra::Point3;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("A model must be started before adding a chain")]
    NoModel,
    #[error("A chain must be started before adding a residue")]
    NoChain,
    #[error("A residue must be started before adding atoms or secondary structure")]
    NoResidue,
    #[error("Atom serial {0} is already used in the current model")]
    DuplicateSerial(i64),
    #[error("No atom with serial {0} in the current model")]
    UnknownSerial(i64),
    #[error("Bond between atoms {0} and {1} could not be added")]
    InvalidBond(i64, i64),
    #[error("Residue {number} is already named '{existing}', not '{requested}'")]
    ResidueNameMismatch {
        number: isize,
        existing: String,
        requested: String,
    },
}

/// Builds one structure in file order: models, then chains, residues and atoms.
///
/// Bonds are added by atom serial number and always refer to the current model.
/// Every method that needs a parent level returns a [`BuildError`] when that
/// level has not been started yet.
pub struct StructureBuilder<'a> {
    system: &'a mut MolecularSystem,
    structure_id: StructureId,

    // --- Builder cursor ---
    atom_serial_map: HashMap<i64, AtomId>,
    current_model: Option<ModelId>,
    current_chain: Option<ChainId>,
    current_residue: Option<ResidueId>,
}

impl<'a> StructureBuilder<'a> {
    pub(crate) fn new(system: &'a mut MolecularSystem, structure_id: StructureId) -> Self {
        Self {
            system,
            structure_id,
            atom_serial_map: HashMap::new(),
            current_model: None,
            current_chain: None,
            current_residue: None,
        }
    }

    pub fn structure_id(&self) -> StructureId {
        self.structure_id
    }

    /// Appends a new model to the structure and makes it the build target.
    pub fn start_model(&mut self) -> &mut Self {
        self.current_model = self.system.add_model(self.structure_id);
        self.current_chain = None;
        self.current_residue = None;
        self.atom_serial_map.clear();
        self
    }

    pub fn start_chain(&mut self, name: &str) -> Result<&mut Self, BuildError> {
        let model_id = self.current_model.ok_or(BuildError::NoModel)?;
        self.current_chain = self.system.add_chain(model_id, name);
        self.current_residue = None;
        Ok(self)
    }

    /// Starts a residue, or reopens the chain's residue with the same number.
    /// Reopening under a different name is an error.
    pub fn start_residue(&mut self, number: isize, name: &str) -> Result<&mut Self, BuildError> {
        let chain_id = self.current_chain.ok_or(BuildError::NoChain)?;
        let existing = self
            .system
            .chain(chain_id)
            .and_then(|chain| chain.residue_by_number(number))
            .and_then(|id| self.system.residue(id));
        if let Some(residue) = existing {
            if residue.name != name {
                return Err(BuildError::ResidueNameMismatch {
                    number,
                    existing: residue.name.clone(),
                    requested: name.to_string(),
                });
            }
        }
        self.current_residue = self.system.add_residue(chain_id, number, name);
        Ok(self)
    }

    pub fn secondary_structure(
        &mut self,
        ss: SecondaryStructure,
    ) -> Result<&mut Self, BuildError> {
        let residue_id = self.current_residue.ok_or(BuildError::NoResidue)?;
        let residue = self
            .system
            .residue_mut(residue_id)
            .ok_or(BuildError::NoResidue)?;
        residue.secondary_structure = Some(ss);
        Ok(self)
    }

    pub fn add_atom(
        &mut self,
        serial: i64,
        name: &str,
        element: &str,
        position: Point3<f64>,
    ) -> Result<&mut Self, BuildError> {
        self.push_atom(serial, name, element, position, false)
    }

    /// Adds an atom the reader classified as part of a ligand.
    pub fn add_ligand_atom(
        &mut self,
        serial: i64,
        name: &str,
        element: &str,
        position: Point3<f64>,
    ) -> Result<&mut Self, BuildError> {
        self.push_atom(serial, name, element, position, true)
    }

    fn push_atom(
        &mut self,
        serial: i64,
        name: &str,
        element: &str,
        position: Point3<f64>,
        is_ligand: bool,
    ) -> Result<&mut Self, BuildError> {
        let residue_id = self.current_residue.ok_or(BuildError::NoResidue)?;
        if self.atom_serial_map.contains_key(&serial) {
            return Err(BuildError::DuplicateSerial(serial));
        }

        let mut atom = Atom::new(name, residue_id, position);
        atom.element = element.to_string();
        atom.serial = Some(serial);
        atom.is_ligand = is_ligand;

        let atom_id = self
            .system
            .add_atom_to_residue(residue_id, atom)
            .ok_or(BuildError::NoResidue)?;
        self.atom_serial_map.insert(serial, atom_id);
        Ok(self)
    }

    pub fn add_bond(
        &mut self,
        serial1: i64,
        serial2: i64,
        order: BondOrder,
    ) -> Result<&mut Self, BuildError> {
        let id1 = *self
            .atom_serial_map
            .get(&serial1)
            .ok_or(BuildError::UnknownSerial(serial1))?;
        let id2 = *self
            .atom_serial_map
            .get(&serial2)
            .ok_or(BuildError::UnknownSerial(serial2))?;
        self.system
            .add_bond(id1, id2, order)
            .ok_or(BuildError::InvalidBond(serial1, serial2))?;
        Ok(self)
    }

    pub fn finish(self) -> StructureId {
        self.structure_id
    }
}
