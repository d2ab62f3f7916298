use super::ids::{AtomId, ChainId, StructureId};
use super::topology::BondTable;
use std::collections::HashMap;

/// One coordinate frame of a structure.
///
/// The model owns the authoritative ordered atom sequence (`all_atoms`) and
/// the bond table for its frame.
#[derive(Debug, Clone)]
pub struct Model {
    pub index: usize,                     // Position in the owning structure (0-based)
    pub structure_id: StructureId,        // ID of the owning structure
    pub(crate) chains: Vec<ChainId>,      // Chains in file order
    chain_map: HashMap<String, ChainId>,  // Chain name to chain ID
    pub(crate) all_atoms: Vec<AtomId>,    // Atoms in file order; index is `id_in_all_atoms`
    pub(crate) bonds: BondTable,
}

impl Model {
    pub(crate) fn new(index: usize, structure_id: StructureId) -> Self {
        Self {
            index,
            structure_id,
            chains: Vec::new(),
            chain_map: HashMap::new(),
            all_atoms: Vec::new(),
            bonds: BondTable::new(),
        }
    }

    /// The model name used by the `model` keyword: its index as a string.
    pub fn name(&self) -> String {
        self.index.to_string()
    }

    pub(crate) fn add_chain(&mut self, name: &str, chain_id: ChainId) {
        self.chain_map.insert(name.to_string(), chain_id);
        self.chains.push(chain_id);
    }

    pub fn chains(&self) -> &[ChainId] {
        &self.chains
    }

    pub fn chain_by_name(&self, name: &str) -> Option<ChainId> {
        self.chain_map.get(name).copied()
    }

    pub fn all_atoms(&self) -> &[AtomId] {
        &self.all_atoms
    }

    pub fn bonds(&self) -> &BondTable {
        &self.bonds
    }
}
