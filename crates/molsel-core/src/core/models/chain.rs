use super::ids::{ModelId, ResidueId};
use std::collections::HashMap;

/// Chain identifier used when the source file does not specify one.
pub const UNSPECIFIED_CHAIN: &str = "_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub name: String,                          // Chain identifier (e.g., "A", "_")
    pub model_id: ModelId,                     // ID of the owning model
    pub(crate) residues: Vec<ResidueId>,       // Residues in file order
    residue_map: HashMap<isize, ResidueId>,    // Residue sequence number to residue ID
}

impl Chain {
    pub(crate) fn new(name: &str, model_id: ModelId) -> Self {
        Self {
            name: name.to_string(),
            model_id,
            residues: Vec::new(),
            residue_map: HashMap::new(),
        }
    }

    /// Registers a residue under its sequence number. The first residue
    /// registered for a number wins.
    pub(crate) fn add_residue(&mut self, residue_number: isize, residue_id: ResidueId) {
        if self.residue_map.contains_key(&residue_number) {
            return;
        }
        self.residue_map.insert(residue_number, residue_id);
        self.residues.push(residue_id);
    }

    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }

    pub fn residue_by_number(&self, residue_number: isize) -> Option<ResidueId> {
        self.residue_map.get(&residue_number).copied()
    }

    pub fn is_unspecified(&self) -> bool {
        self.name == UNSPECIFIED_CHAIN
    }
}
