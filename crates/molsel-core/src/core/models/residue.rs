use super::ids::{AtomId, ChainId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Secondary structure assignment of a residue, as produced by a reader or an
/// external assignment tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecondaryStructure {
    // --- Helices ---
    Helix, // Right-handed alpha helix
    HelixRightOmega,
    HelixRightPi,
    HelixRightGamma,
    Helix310,
    HelixLeftAlpha,
    HelixLeftOmega,
    HelixLeftGamma,
    Helix27,
    PolyProline,

    // --- Strands ---
    Strand,
    StrandA,

    // --- Everything else counts as coil ---
    Turn,
    Bridge,
    Bend,
    #[default]
    Coil,
}

/// The three classes the `ss` predicate distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecondaryStructureClass {
    Helix,
    Sheet,
    Coil,
}

impl SecondaryStructure {
    pub fn class(&self) -> SecondaryStructureClass {
        match self {
            Self::Helix
            | Self::HelixRightOmega
            | Self::HelixRightPi
            | Self::HelixRightGamma
            | Self::Helix310
            | Self::HelixLeftAlpha
            | Self::HelixLeftOmega
            | Self::HelixLeftGamma
            | Self::Helix27 => SecondaryStructureClass::Helix,
            Self::Strand | Self::StrandA => SecondaryStructureClass::Sheet,
            Self::PolyProline | Self::Turn | Self::Bridge | Self::Bend | Self::Coil => {
                SecondaryStructureClass::Coil
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid secondary structure tag '{0}' (expected helix, sheet, coil, H, S or C)")]
pub struct ParseSecondaryStructureClassError(pub String);

impl FromStr for SecondaryStructureClass {
    type Err = ParseSecondaryStructureClassError;

    /// Parses the tags accepted after the `ss` keyword. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "helix" | "H" => Ok(Self::Helix),
            "sheet" | "S" => Ok(Self::Sheet),
            "coil" | "C" => Ok(Self::Coil),
            _ => Err(ParseSecondaryStructureClassError(s.to_string())),
        }
    }
}

impl fmt::Display for SecondaryStructureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Helix => "helix",
                Self::Sheet => "sheet",
                Self::Coil => "coil",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub id: isize,                                    // Residue sequence number from source file
    pub name: String,                                 // Name of the residue (e.g., "ALA", "GLY")
    pub chain_id: ChainId,                            // ID of the parent chain
    pub secondary_structure: Option<SecondaryStructure>, // Assigned secondary structure, if any
    pub(crate) atoms: Vec<AtomId>,                    // Atoms in file order
    atom_name_map: HashMap<String, Vec<AtomId>>,      // Map from atom name to its IDs
}

impl Residue {
    pub(crate) fn new(id: isize, name: &str, chain_id: ChainId) -> Self {
        Self {
            id,
            name: name.to_string(),
            chain_id,
            secondary_structure: None,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map
            .entry(atom_name.to_string())
            .or_default()
            .push(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_first_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map
            .get(name)
            .and_then(|ids| ids.first())
            .copied()
    }

    pub fn get_atom_ids_by_name(&self, name: &str) -> Option<&[AtomId]> {
        self.atom_name_map.get(name).map(|ids| ids.as_slice())
    }

    /// The secondary structure class used by the selection language; residues
    /// without an assignment count as coil.
    pub fn secondary_structure_class(&self) -> SecondaryStructureClass {
        self.secondary_structure.unwrap_or_default().class()
    }
}
