use super::models::ids::{AtomId, ModelId, StructureId};
use super::models::system::MolecularSystem;
use super::models::topology::Bond;
use super::utils::geometry::{self, BoundingBox};
use crate::language::ast::Predicate;
use itertools::Itertools;
use nalgebra::Point3;
use std::collections::HashSet;
use std::fmt;

/// A named, ordered subset of atoms with an optional induced bond set.
///
/// Atom order is the order in which the atoms were supplied (or encountered
/// during evaluation). Bonds are `None` until [`Selection::fill_bonds`] runs;
/// the bounding box is computed on first access and cached until the atom list
/// is replaced.
#[derive(Debug, Clone)]
pub struct Selection {
    name: String,
    atoms: Vec<AtomId>,
    bonds: Option<Vec<Bond>>,
    source: Option<String>,
    structures: Vec<StructureId>,
    bounds: Option<BoundingBox>,
}

fn sanitize_name(name: &str) -> String {
    name.replace(' ', "_")
}

fn distinct_structures(system: &MolecularSystem, atoms: &[AtomId]) -> Vec<StructureId> {
    atoms
        .iter()
        .filter_map(|&id| system.atom_structure_id(id))
        .unique()
        .collect()
}

impl Selection {
    /// Builds a selection from an atom list; bonds are left uncomputed.
    pub fn new(system: &MolecularSystem, atoms: Vec<AtomId>, name: &str) -> Self {
        let structures = distinct_structures(system, &atoms);
        Self {
            name: sanitize_name(name),
            atoms,
            bonds: None,
            source: None,
            structures,
            bounds: None,
        }
    }

    /// Builds a selection from an atom list and a bond list. Bonds with an end
    /// outside `atoms` are dropped.
    pub fn with_bonds(
        system: &MolecularSystem,
        atoms: Vec<AtomId>,
        bonds: Vec<Bond>,
        name: &str,
    ) -> Self {
        let mut selection = Self::new(system, atoms, name);
        let members: HashSet<AtomId> = selection.atoms.iter().copied().collect();
        selection.bonds = Some(
            bonds
                .into_iter()
                .filter(|b| members.contains(&b.atom1_id) && members.contains(&b.atom2_id))
                .collect(),
        );
        selection
    }

    pub fn from_atom(system: &MolecularSystem, atom: AtomId, name: &str) -> Self {
        Self::new(system, vec![atom], name)
    }

    /// Builds a selection produced by evaluating `source` in the selection language.
    pub fn from_language(
        system: &MolecularSystem,
        atoms: Vec<AtomId>,
        name: &str,
        source: &str,
    ) -> Self {
        let mut selection = Self::new(system, atoms, name);
        selection.source = Some(source.to_string());
        selection
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = sanitize_name(name);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn contains(&self, atom: AtomId) -> bool {
        self.atoms.contains(&atom)
    }

    /// Replaces the atom list and drops every derived cache.
    pub fn set_atoms(&mut self, system: &MolecularSystem, atoms: Vec<AtomId>) {
        self.structures = distinct_structures(system, &atoms);
        self.atoms = atoms;
        self.bonds = None;
        self.bounds = None;
    }

    /// The computed bonds, or an empty slice if bonds were never computed.
    pub fn bonds(&self) -> &[Bond] {
        self.bonds.as_deref().unwrap_or(&[])
    }

    pub fn bonds_null(&self) -> bool {
        self.bonds.is_none()
    }

    /// Computes the induced bond set once: every bond of each owning model's
    /// bond table whose two ends are in this selection. Models are visited in
    /// the order their atoms first appear.
    pub fn fill_bonds(&mut self, system: &MolecularSystem) {
        if self.bonds.is_some() {
            return;
        }
        let members: HashSet<AtomId> = self.atoms.iter().copied().collect();
        let models: Vec<ModelId> = self
            .atoms
            .iter()
            .filter_map(|&id| system.atom_model_id(id))
            .unique()
            .collect();
        let bonds = models
            .into_iter()
            .filter_map(|model_id| system.model(model_id))
            .flat_map(|model| model.bonds().induced(&members).collect::<Vec<_>>())
            .collect();
        self.bonds = Some(bonds);
    }

    /// Forgets computed bonds so the next [`Selection::fill_bonds`] recomputes them.
    pub fn invalidate_bonds(&mut self) {
        self.bonds = None;
    }

    pub fn structures(&self) -> &[StructureId] {
        &self.structures
    }

    pub fn is_global_selection(&self) -> bool {
        self.structures.len() > 1
    }

    /// True when every atom belongs to the same model. An empty selection counts as same-model.
    pub fn same_model(&self, system: &MolecularSystem) -> bool {
        self.atoms
            .iter()
            .map(|&id| system.atom_model_id(id))
            .all_equal()
    }

    /// Order-independent atom set equality.
    pub fn same_atoms(&self, other: &Selection) -> bool {
        let mine: HashSet<AtomId> = self.atoms.iter().copied().collect();
        let theirs: HashSet<AtomId> = other.atoms.iter().copied().collect();
        mine == theirs
    }

    pub fn bounds(&mut self, system: &MolecularSystem) -> Option<BoundingBox> {
        if self.bounds.is_none() {
            let positions: Vec<Point3<f64>> = self.positions(system);
            self.bounds = BoundingBox::from_points(&positions);
        }
        self.bounds
    }

    pub fn min_pos(&mut self, system: &MolecularSystem) -> Option<Point3<f64>> {
        self.bounds(system).map(|b| b.min)
    }

    pub fn max_pos(&mut self, system: &MolecularSystem) -> Option<Point3<f64>> {
        self.bounds(system).map(|b| b.max)
    }

    pub fn centroid(&self, system: &MolecularSystem) -> Option<Point3<f64>> {
        geometry::centroid(&self.positions(system))
    }

    fn positions(&self, system: &MolecularSystem) -> Vec<Point3<f64>> {
        self.atoms
            .iter()
            .filter_map(|&id| system.atom(id).map(|a| a.position))
            .collect()
    }

    /// Atoms of `self` followed by the atoms of `other` not already present.
    /// The result has uncomputed bonds and keeps `self`'s name.
    pub fn union(&self, other: &Selection, system: &MolecularSystem) -> Selection {
        let atoms = self
            .atoms
            .iter()
            .chain(other.atoms.iter())
            .copied()
            .unique()
            .collect();
        Selection::new(system, atoms, &self.name)
    }

    /// Atoms of `self` that are not in `other`, in `self`'s order.
    pub fn difference(&self, other: &Selection, system: &MolecularSystem) -> Selection {
        let excluded: HashSet<AtomId> = other.atoms.iter().copied().collect();
        let atoms = self
            .atoms
            .iter()
            .copied()
            .filter(|id| !excluded.contains(id))
            .collect();
        Selection::new(system, atoms, &self.name)
    }

    pub fn is_from_selection_language(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Serializes the selection as a selection-language command.
    ///
    /// A selection built by the language returns its source string verbatim.
    /// Otherwise each structure contributes `<name> and (atomid a:b or atomid c)`
    /// built from contiguous runs of atom numbers. Atom numbers repeat across
    /// models, so every clause for a multi-model structure carries a `model N`
    /// filter. Names that would not lex as a plain word are quoted.
    /// Clauses are joined with `or` and the command ends with a space.
    pub fn to_selection_command(&self, system: &MolecularSystem) -> String {
        if let Some(source) = &self.source {
            return source.clone();
        }

        let mut clauses = Vec::new();
        for &structure_id in &self.structures {
            let Some(structure) = system.structure(structure_id) else {
                continue;
            };
            let per_model = self
                .atoms
                .iter()
                .filter_map(|&id| system.atom_view(id))
                .filter(|view| view.structure_id == structure_id)
                .map(|view| (view.model_id, view.model.index, view.atom.number()))
                .into_group_map_by(|&(model_id, _, _)| model_id);

            let mut models: Vec<(usize, Vec<i64>)> = per_model
                .into_values()
                .filter_map(|entries| {
                    let index = entries.first()?.1;
                    Some((index, entries.into_iter().map(|(_, _, n)| n).collect()))
                })
                .collect();
            models.sort_by_key(|(index, _)| *index);

            let name = Predicate::Structure(structure.unique_name.clone()).to_string();
            let multi_model = structure.models().len() > 1;
            for (index, numbers) in models {
                let ranges = format_atom_number_runs(numbers);
                if multi_model {
                    clauses.push(format!("{name} and model {index} and ({ranges})"));
                } else {
                    clauses.push(format!("{name} and ({ranges})"));
                }
            }
        }

        if clauses.is_empty() {
            return "nothing".to_string();
        }
        format!("{} ", clauses.join(" or "))
    }
}

/// `[1, 2, 3, 7]` becomes `atomid 1:3 or atomid 7`.
fn format_atom_number_runs(mut numbers: Vec<i64>) -> String {
    numbers.sort_unstable();
    numbers.dedup();

    let mut runs: Vec<(i64, i64)> = Vec::new();
    for n in numbers {
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == n => *end = n,
            _ => runs.push((n, n)),
        }
    }

    runs.into_iter()
        .map(|(start, end)| {
            if start == end {
                format!("atomid {start}")
            } else {
                format!("atomid {start}:{end}")
            }
        })
        .join(" or ")
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bonds {
            Some(bonds) => write!(
                f,
                "Selection of {} atoms / {} bonds, named '{}'",
                self.atoms.len(),
                bonds.len(),
                self.name
            ),
            None => write!(
                f,
                "Selection of {} atoms, named '{}'",
                self.atoms.len(),
                self.name
            ),
        }
    }
}
