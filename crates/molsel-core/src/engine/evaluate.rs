use super::config::EngineConfig;
use super::registry::SelectionRegistry;
use super::spatial::ReferenceSet;
use crate::core::models::ids::{AtomId, ResidueId};
use crate::core::models::system::{AtomView, MolecularSystem};
use crate::core::utils::geometry::distance_squared;
use crate::core::utils::identifiers;
use crate::language::ast::{Expr, IdRange, MacroKind, NamePattern, Predicate};
use nalgebra::Point3;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Evaluates expression trees against an ordered candidate atom list.
///
/// Every node produces one keep flag per candidate, so `not` always
/// complements against the full candidate list handed to [`Evaluator::evaluate`]
/// and the output keeps candidate order.
pub struct Evaluator<'a> {
    system: &'a MolecularSystem,
    registry: Option<&'a SelectionRegistry>,
    config: &'a EngineConfig,
}

type Mask = Vec<bool>;

fn any_range(ranges: &[IdRange], value: i64) -> bool {
    ranges.iter().any(|r| r.contains(value))
}

fn any_pattern(patterns: &[NamePattern], name: &str) -> bool {
    patterns.iter().any(|p| p.matches(name))
}

fn macro_matches(kind: MacroKind, view: &AtomView<'_>) -> bool {
    let residue = view.residue.name.as_str();
    let atom = view.atom.name.as_str();
    match kind {
        MacroKind::Protein => identifiers::is_protein_residue(residue),
        MacroKind::Backbone => identifiers::is_backbone_atom(residue, atom, &view.atom.element),
        MacroKind::Water => identifiers::is_water_residue(residue),
        MacroKind::Nucleic => identifiers::is_nucleic_residue(residue),
        MacroKind::NucleicBackbone => identifiers::is_nucleic_backbone_atom(residue, atom),
        MacroKind::NucleicBase => identifiers::is_nucleic_base_atom(residue, atom),
        MacroKind::NucleicSugar => identifiers::is_nucleic_sugar_atom(residue, atom),
        MacroKind::Ligand => view.atom.is_ligand,
        MacroKind::Ions => identifiers::is_ion(atom, residue),
    }
}

impl<'a> Evaluator<'a> {
    pub fn new(system: &'a MolecularSystem, config: &'a EngineConfig) -> Self {
        Self {
            system,
            registry: None,
            config,
        }
    }

    pub fn with_registry(mut self, registry: &'a SelectionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Returns the candidates matched by `expr`, in candidate order.
    ///
    /// Duplicate candidates are kept once, at their first position. Candidate
    /// ids the system does not know are skipped.
    #[instrument(skip_all, name = "evaluate", fields(candidates = candidates.len()))]
    pub fn evaluate(&self, expr: &Expr, candidates: &[AtomId]) -> Vec<AtomId> {
        let views = self.resolve(candidates);
        let mask = self.mask(expr, &views);
        let matched: Vec<AtomId> = views
            .iter()
            .zip(&mask)
            .filter_map(|(view, &keep)| keep.then_some(view.id))
            .collect();
        debug!(
            resolved = views.len(),
            matched = matched.len(),
            "Evaluated selection expression."
        );
        matched
    }

    fn resolve(&self, candidates: &[AtomId]) -> Vec<AtomView<'a>> {
        let mut seen = HashSet::with_capacity(candidates.len());
        let mut unknown = 0usize;
        let mut views = Vec::with_capacity(candidates.len());
        for &id in candidates {
            if !seen.insert(id) {
                continue;
            }
            match self.system.atom_view(id) {
                Some(view) => views.push(view),
                None => unknown += 1,
            }
        }
        if unknown > 0 {
            warn!(
                count = unknown,
                "Skipping candidate atoms unknown to the molecular system."
            );
        }
        views
    }

    fn mask(&self, expr: &Expr, views: &[AtomView<'a>]) -> Mask {
        match expr {
            Expr::And(left, right) => {
                let mut mask = self.mask(left, views);
                for (keep, other) in mask.iter_mut().zip(self.mask(right, views)) {
                    *keep = *keep && other;
                }
                mask
            }
            Expr::Or(left, right) => {
                let mut mask = self.mask(left, views);
                for (keep, other) in mask.iter_mut().zip(self.mask(right, views)) {
                    *keep = *keep || other;
                }
                mask
            }
            Expr::Not(inner) => self.mask(inner, views).into_iter().map(|k| !k).collect(),
            Expr::ByRes(inner) => {
                let inner = self.mask(inner, views);
                let residues: HashSet<ResidueId> = views
                    .iter()
                    .zip(&inner)
                    .filter_map(|(view, &keep)| keep.then_some(view.atom.residue_id))
                    .collect();
                views
                    .iter()
                    .map(|view| residues.contains(&view.atom.residue_id))
                    .collect()
            }
            Expr::Around { radius, inner } => self.around(*radius, inner, views),
            Expr::Predicate(predicate) => self.predicate(predicate, views),
        }
    }

    fn around(&self, radius: f64, inner: &Expr, views: &[AtomView<'a>]) -> Mask {
        let inner = self.mask(inner, views);
        let reference: Vec<Point3<f64>> = views
            .iter()
            .zip(&inner)
            .filter_map(|(view, &keep)| keep.then_some(view.atom.position))
            .collect();
        let set = ReferenceSet::new(&reference, self.config.spatial_index_threshold);
        debug!(
            references = reference.len(),
            indexed = set.is_indexed(),
            radius,
            "Running neighbour search."
        );
        let radius_sq = radius * radius;
        views
            .iter()
            .zip(&inner)
            .map(|(view, &is_reference)| {
                !is_reference && set.any_within(&view.atom.position, radius_sq)
            })
            .collect()
    }

    fn predicate(&self, predicate: &Predicate, views: &[AtomView<'a>]) -> Mask {
        let members = match predicate {
            Predicate::NamedSelection(name) => self.named_members(name),
            _ => HashSet::new(),
        };
        views
            .iter()
            .map(|view| self.matches(predicate, view, &members))
            .collect()
    }

    fn named_members(&self, name: &str) -> HashSet<AtomId> {
        match self.registry.and_then(|r| r.get(name)) {
            Some(selection) => selection.atoms().iter().copied().collect(),
            None => {
                warn!(name = %name, "Named selection is not registered; it matches nothing.");
                HashSet::new()
            }
        }
    }

    /// `members` holds the atoms of the named selection when `predicate` is one.
    fn matches(
        &self,
        predicate: &Predicate,
        view: &AtomView<'_>,
        members: &HashSet<AtomId>,
    ) -> bool {
        let atom = view.atom;
        match predicate {
            Predicate::All => true,
            Predicate::Nothing => false,
            Predicate::ResId(ranges) => any_range(ranges, view.residue.id as i64),
            Predicate::AtomId(ranges) => any_range(ranges, atom.number()),
            Predicate::ResName(patterns) => any_pattern(patterns, &view.residue.name),
            Predicate::AtomName(patterns) => any_pattern(patterns, &atom.name),
            Predicate::AtomType(patterns) => any_pattern(patterns, &atom.element),
            Predicate::Chain(patterns) => any_pattern(patterns, &view.chain.name),
            Predicate::Model(index) => view.model.index == *index,
            Predicate::SecondaryStructure(class) => {
                view.residue.secondary_structure_class() == *class
            }
            Predicate::Macro(kind) => macro_matches(*kind, view),
            Predicate::Property { axis, op, value } => {
                op.apply(axis.component(&atom.position), *value)
            }
            Predicate::InSphere { center, radius } => {
                distance_squared(&atom.position, center) <= radius * radius
            }
            Predicate::InRect(cell) => cell.contains(&atom.position),
            Predicate::Structure(name) => view.structure.unique_name == *name,
            Predicate::NamedSelection(_) => members.contains(&view.id),
        }
    }
}
