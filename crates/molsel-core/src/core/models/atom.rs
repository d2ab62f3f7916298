use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents an atom of a loaded structure.
///
/// Atoms are created once by a reader (through the structure builder) and are
/// never mutated by the selection engine. The parent residue, chain, model and
/// structure are reached through the arena ids held by each level.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The element or force field type of the atom (e.g., "C", "N", "CA" for calcium).
    pub element: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The serial number from the source file, if the reader provided one.
    pub serial: Option<i64>,
    /// Index of this atom in the owning model's ordered atom sequence.
    pub id_in_all_atoms: usize,
    /// Whether the reader classified this atom as part of a ligand.
    pub is_ligand: bool,
}

impl Atom {
    /// Creates a new `Atom` with default values for the optional fields.
    ///
    /// The element defaults to the first character of the atom name, which is
    /// what most readers fall back to when no explicit element column exists.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element: name.chars().take(1).collect(),
            residue_id,
            position,
            serial: None,
            id_in_all_atoms: 0,
            is_ligand: false,
        }
    }

    /// The number used by `atomid` and by serialized selection commands.
    ///
    /// Falls back to the one-based position in the model when the reader did
    /// not provide a serial number.
    pub fn number(&self) -> i64 {
        self.serial.unwrap_or(self.id_in_all_atoms as i64 + 1)
    }
}
