use super::atom::Atom;
use super::builder::StructureBuilder;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ModelId, ResidueId, StructureId};
use super::model::Model;
use super::residue::Residue;
use super::structure::Structure;
use super::topology::BondOrder;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Holds every loaded structure and its Structure → Model → Chain → Residue →
/// Atom tree.
///
/// All levels live in slot-map arenas and refer to their parent through an id,
/// so back-references never form ownership cycles. The selection engine only
/// reads from a system; construction goes through the `add_*` methods or a
/// [`StructureBuilder`].
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for structures.
    structures: SlotMap<StructureId, Structure>,
    /// Primary storage for models.
    models: SlotMap<ModelId, Model>,
    /// Primary storage for chains.
    chains: SlotMap<ChainId, Chain>,
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Lookup map for finding structures by their unique name.
    structure_name_map: HashMap<String, StructureId>,
    /// Structures in insertion order.
    structure_order: Vec<StructureId>,
}

/// Borrowed view of an atom together with every level above it.
#[derive(Debug, Clone, Copy)]
pub struct AtomView<'a> {
    pub id: AtomId,
    pub atom: &'a Atom,
    pub residue: &'a Residue,
    pub chain: &'a Chain,
    pub model: &'a Model,
    pub model_id: ModelId,
    pub structure: &'a Structure,
    pub structure_id: StructureId,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a new structure named `unique_name`.
    ///
    /// If a structure with that name already exists, the builder appends to it.
    pub fn build_structure(&mut self, unique_name: &str) -> StructureBuilder<'_> {
        let structure_id = self.add_structure(unique_name);
        StructureBuilder::new(self, structure_id)
    }

    /// Retrieves an immutable reference to a structure by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The structure ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Structure)` if the structure exists, otherwise `None`.
    pub fn structure(&self, id: StructureId) -> Option<&Structure> {
        self.structures.get(id)
    }

    pub fn structure_mut(&mut self, id: StructureId) -> Option<&mut Structure> {
        self.structures.get_mut(id)
    }

    /// Returns the structures in the order they were added.
    pub fn structures_iter(&self) -> impl Iterator<Item = (StructureId, &Structure)> {
        self.structure_order
            .iter()
            .filter_map(|&id| self.structures.get(id).map(|s| (id, s)))
    }

    /// Finds a structure ID by its unique name.
    ///
    /// # Arguments
    ///
    /// * `name` - The unique name of the structure.
    ///
    /// # Return
    ///
    /// Returns `Some(StructureId)` if the structure exists, otherwise `None`.
    pub fn find_structure_by_name(&self, name: &str) -> Option<StructureId> {
        self.structure_name_map.get(name).copied()
    }

    /// Returns the unique names of all structures, in insertion order.
    pub fn structure_names(&self) -> Vec<String> {
        self.structures_iter()
            .map(|(_, s)| s.unique_name.clone())
            .collect()
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn residue_mut(&mut self, id: ResidueId) -> Option<&mut Residue> {
        self.residues.get_mut(id)
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Resolves an atom and all of its ancestors in one lookup.
    ///
    /// # Return
    ///
    /// Returns `None` if the atom, or any level above it, is unknown to this system.
    pub fn atom_view(&self, id: AtomId) -> Option<AtomView<'_>> {
        let atom = self.atoms.get(id)?;
        let residue = self.residues.get(atom.residue_id)?;
        let chain = self.chains.get(residue.chain_id)?;
        let model = self.models.get(chain.model_id)?;
        let structure = self.structures.get(model.structure_id)?;
        Some(AtomView {
            id,
            atom,
            residue,
            chain,
            model,
            model_id: chain.model_id,
            structure,
            structure_id: model.structure_id,
        })
    }

    pub fn atom_model_id(&self, id: AtomId) -> Option<ModelId> {
        let residue = self.residues.get(self.atoms.get(id)?.residue_id)?;
        Some(self.chains.get(residue.chain_id)?.model_id)
    }

    pub fn atom_structure_id(&self, id: AtomId) -> Option<StructureId> {
        Some(self.models.get(self.atom_model_id(id)?)?.structure_id)
    }

    /// Returns the ordered atom sequence of the current model of a structure.
    pub fn current_atoms(&self, structure_id: StructureId) -> Option<&[AtomId]> {
        let model_id = self.structures.get(structure_id)?.current_model()?;
        self.models.get(model_id).map(|m| m.all_atoms())
    }

    /// Concatenates the current-model atoms of every structure, in structure
    /// insertion order.
    pub fn all_current_atoms(&self) -> Vec<AtomId> {
        self.structure_order
            .iter()
            .filter_map(|&id| self.current_atoms(id))
            .flat_map(|atoms| atoms.iter().copied())
            .collect()
    }

    /// Adds a new structure or returns the existing one with the same name.
    pub fn add_structure(&mut self, unique_name: &str) -> StructureId {
        if let Some(&id) = self.structure_name_map.get(unique_name) {
            return id;
        }
        let id = self.structures.insert(Structure::new(unique_name));
        self.structure_name_map.insert(unique_name.to_string(), id);
        self.structure_order.push(id);
        id
    }

    /// Appends a new model to a structure.
    ///
    /// # Return
    ///
    /// Returns `Some(ModelId)` if successful, otherwise `None` (the structure doesn't exist).
    pub fn add_model(&mut self, structure_id: StructureId) -> Option<ModelId> {
        let structure = self.structures.get_mut(structure_id)?;
        let index = structure.models.len();
        let model_id = self.models.insert(Model::new(index, structure_id));
        structure.models.push(model_id);
        Some(model_id)
    }

    /// Adds a new chain to a model or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given name already exists
    /// in the model, it returns the existing chain ID without creating a duplicate.
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if successful, otherwise `None` (the model doesn't exist).
    pub fn add_chain(&mut self, model_id: ModelId, name: &str) -> Option<ChainId> {
        let model = self.models.get_mut(model_id)?;
        if let Some(existing) = model.chain_by_name(name) {
            return Some(existing);
        }
        let chain_id = self.chains.insert(Chain::new(name, model_id));
        model.add_chain(name, chain_id);
        Some(chain_id)
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// This method is idempotent; if the chain already has a residue with the
    /// given number, that residue's ID is returned and `name` is ignored.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (the chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        if let Some(existing) = chain.residue_by_number(residue_number) {
            return Some(existing);
        }
        let residue_id = self
            .residues
            .insert(Residue::new(residue_number, name, chain_id));
        chain.add_residue(residue_number, residue_id);
        Some(residue_id)
    }

    /// Adds an atom to a residue and appends it to the owning model's atom sequence.
    ///
    /// The atom's `residue_id` and `id_in_all_atoms` are overwritten to match
    /// its position in the tree.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (the residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        let chain_id = self.residues.get(residue_id)?.chain_id;
        let model_id = self.chains.get(chain_id)?.model_id;
        let model = self.models.get_mut(model_id)?;

        atom.residue_id = residue_id;
        atom.id_in_all_atoms = model.all_atoms.len();
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);

        model.all_atoms.push(atom_id);
        self.residues.get_mut(residue_id)?.add_atom(&name, atom_id);
        Some(atom_id)
    }

    /// Adds a bond between two atoms of the same model.
    ///
    /// Adding an existing bond succeeds without creating a duplicate.
    ///
    /// # Return
    ///
    /// Returns `None` if either atom is unknown or the atoms belong to different models.
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Option<()> {
        let model1 = self.atom_model_id(atom1_id)?;
        let model2 = self.atom_model_id(atom2_id)?;
        if model1 != model2 {
            return None;
        }
        self.models
            .get_mut(model1)?
            .bonds
            .add(atom1_id, atom2_id, order);
        Some(())
    }

    /// Retrieves the bonded neighbors of an atom within its model.
    pub fn get_bonded_neighbors(&self, atom_id: AtomId) -> Option<&[AtomId]> {
        let model = self.models.get(self.atom_model_id(atom_id)?)?;
        Some(model.bonds.neighbors(atom_id))
    }
}
