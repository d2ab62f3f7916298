use super::ids::AtomId;
use slotmap::SecondaryMap;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

/// An undirected bond between two atoms of the same model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1_id: AtomId,
    pub atom2_id: AtomId,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Self {
        Self {
            atom1_id,
            atom2_id,
            order,
        }
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1_id == atom_id || self.atom2_id == atom_id
    }

    /// Returns the atom on the other end of the bond, if `atom_id` is one of its ends.
    pub fn partner(&self, atom_id: AtomId) -> Option<AtomId> {
        if self.atom1_id == atom_id {
            Some(self.atom2_id)
        } else if self.atom2_id == atom_id {
            Some(self.atom1_id)
        } else {
            None
        }
    }
}

/// The bond table of one model: bonds in insertion order plus an adjacency
/// index for neighbour queries.
#[derive(Debug, Clone, Default)]
pub struct BondTable {
    bonds: Vec<Bond>,
    adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
}

impl BondTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bond unless the two atoms are already bonded (in either
    /// direction) or the bond would be a self-loop.
    ///
    /// # Return
    ///
    /// Returns `true` if the bond was inserted.
    pub fn add(&mut self, atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> bool {
        if atom1_id == atom2_id || self.is_bonded(atom1_id, atom2_id) {
            return false;
        }
        self.bonds.push(Bond::new(atom1_id, atom2_id, order));
        self.push_neighbor(atom1_id, atom2_id);
        self.push_neighbor(atom2_id, atom1_id);
        true
    }

    fn push_neighbor(&mut self, atom_id: AtomId, neighbor: AtomId) {
        match self.adjacency.get_mut(atom_id) {
            Some(list) => list.push(neighbor),
            None => {
                self.adjacency.insert(atom_id, vec![neighbor]);
            }
        }
    }

    pub fn is_bonded(&self, atom1_id: AtomId, atom2_id: AtomId) -> bool {
        self.adjacency
            .get(atom1_id)
            .is_some_and(|neighbors| neighbors.contains(&atom2_id))
    }

    pub fn neighbors(&self, atom_id: AtomId) -> &[AtomId] {
        self.adjacency
            .get(atom_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    /// Collects, in table order, every bond whose two ends are in `atoms`.
    pub fn induced<'a>(&'a self, atoms: &'a HashSet<AtomId>) -> impl Iterator<Item = Bond> + 'a {
        self.bonds
            .iter()
            .filter(move |bond| atoms.contains(&bond.atom1_id) && atoms.contains(&bond.atom2_id))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    mod bond_order {
        use super::*;

        #[test]
        fn default_is_single() {
            assert_eq!(BondOrder::default(), BondOrder::Single);
        }
    }

    mod bond {
        use super::*;

        #[test]
        fn contains_and_partner_cover_both_ends() {
            let a1 = dummy_atom_id(10);
            let a2 = dummy_atom_id(20);
            let other = dummy_atom_id(30);
            let bond = Bond::new(a1, a2, BondOrder::Single);
            assert!(bond.contains(a1));
            assert!(bond.contains(a2));
            assert!(!bond.contains(other));
            assert_eq!(bond.partner(a1), Some(a2));
            assert_eq!(bond.partner(a2), Some(a1));
            assert_eq!(bond.partner(other), None);
        }
    }

    mod bond_table {
        use super::*;

        #[test]
        fn add_is_idempotent_in_both_directions() {
            let mut table = BondTable::new();
            let a = dummy_atom_id(1);
            let b = dummy_atom_id(2);
            assert!(table.add(a, b, BondOrder::Single));
            assert!(!table.add(a, b, BondOrder::Double));
            assert!(!table.add(b, a, BondOrder::Single));
            assert_eq!(table.len(), 1);
            assert!(table.is_bonded(a, b));
            assert!(table.is_bonded(b, a));
        }

        #[test]
        fn add_rejects_self_bond() {
            let mut table = BondTable::new();
            let a = dummy_atom_id(1);
            assert!(!table.add(a, a, BondOrder::Single));
            assert!(table.is_empty());
        }

        #[test]
        fn neighbors_lists_partners_in_insertion_order() {
            let mut table = BondTable::new();
            let center = dummy_atom_id(1);
            let n1 = dummy_atom_id(2);
            let n2 = dummy_atom_id(3);
            table.add(center, n1, BondOrder::Single);
            table.add(n2, center, BondOrder::Single);
            assert_eq!(table.neighbors(center), &[n1, n2]);
            assert_eq!(table.neighbors(n2), &[center]);
            assert!(table.neighbors(dummy_atom_id(99)).is_empty());
        }

        #[test]
        fn induced_keeps_only_bonds_with_both_ends_inside() {
            let mut table = BondTable::new();
            let (a, b, c, d) = (
                dummy_atom_id(1),
                dummy_atom_id(2),
                dummy_atom_id(3),
                dummy_atom_id(4),
            );
            table.add(a, b, BondOrder::Single);
            table.add(b, c, BondOrder::Single);
            table.add(c, d, BondOrder::Single);

            let subset: HashSet<AtomId> = [a, b, d].into_iter().collect();
            let induced: Vec<Bond> = table.induced(&subset).collect();
            assert_eq!(induced, vec![Bond::new(a, b, BondOrder::Single)]);
        }
    }
}
