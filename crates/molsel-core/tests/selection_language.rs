mod common;

use common::{ENSEMBLE, PROTEIN, all_model_atoms, everything, universe};
use molsel::core::models::ids::AtomId;
use molsel::core::models::system::MolecularSystem;
use molsel::core::selection::Selection;
use molsel::engine::config::{EngineConfig, EngineConfigBuilder};
use molsel::engine::error::EngineError;
use molsel::engine::registry::SelectionRegistry;
use molsel::workflows::select::{select, select_all, select_or_empty};
use nalgebra::Point3;
use std::collections::HashSet;

fn run(system: &MolecularSystem, query: &str, candidates: &[AtomId]) -> Vec<AtomId> {
    select(system, query, candidates, None, &EngineConfig::default())
        .unwrap()
        .atoms()
        .to_vec()
}

fn protein_atoms(system: &MolecularSystem) -> Vec<AtomId> {
    let id = system.find_structure_by_name(PROTEIN).unwrap();
    system.current_atoms(id).unwrap().to_vec()
}

const QUERIES: &[&str] = &[
    "protein",
    "name CA CB",
    "resid 2:10",
    "chain B",
    "ss helix",
    "prop z >= 5",
    "around 3.0 resname LEU",
    "water",
    "2mdl",
];

#[test]
fn set_algebra_laws_hold_over_the_candidate_list() {
    let system = universe();
    let candidates = everything(&system);
    for a in QUERIES {
        let in_a: HashSet<AtomId> = run(&system, a, &candidates).into_iter().collect();

        let not_a = run(&system, &format!("not ({a})"), &candidates);
        let expected: Vec<AtomId> = candidates
            .iter()
            .copied()
            .filter(|id| !in_a.contains(id))
            .collect();
        assert_eq!(not_a, expected, "not ({a})");

        for b in QUERIES {
            let in_b: HashSet<AtomId> = run(&system, b, &candidates).into_iter().collect();

            let and = run(&system, &format!("({a}) and ({b})"), &candidates);
            let expected: Vec<AtomId> = candidates
                .iter()
                .copied()
                .filter(|id| in_a.contains(id) && in_b.contains(id))
                .collect();
            assert_eq!(and, expected, "({a}) and ({b})");

            let or = run(&system, &format!("({a}) or ({b})"), &candidates);
            let expected: Vec<AtomId> = candidates
                .iter()
                .copied()
                .filter(|id| in_a.contains(id) || in_b.contains(id))
                .collect();
            assert_eq!(or, expected, "({a}) or ({b})");
        }
    }
}

#[test]
fn evaluation_is_idempotent() {
    let system = universe();
    let candidates = everything(&system);
    let config = EngineConfig::default();
    for query in QUERIES {
        let mut first = select(&system, query, &candidates, None, &config).unwrap();
        let mut second = select(&system, query, &candidates, None, &config).unwrap();
        first.fill_bonds(&system);
        second.fill_bonds(&system);
        assert_eq!(first.atoms(), second.atoms(), "{query}");
        assert_eq!(first.bonds(), second.bonds(), "{query}");
    }
}

#[test]
fn residue_ranges_include_both_ends() {
    let system = universe();
    let candidates = everything(&system);
    let selected: HashSet<AtomId> = run(&system, "resid 2:10", &candidates)
        .into_iter()
        .collect();
    for &id in &candidates {
        let number = system.atom_view(id).unwrap().residue.id;
        assert_eq!(selected.contains(&id), (2..=10).contains(&number), "residue {number}");
    }
    assert!(!selected.is_empty());
}

#[test]
fn trailing_wildcard_is_a_prefix_match() {
    let system = universe();
    let candidates = everything(&system);
    let wildcard = run(&system, "resname L*", &candidates);
    assert_eq!(wildcard, run(&system, "resname LEU LYS", &candidates));
    assert_eq!(wildcard.len(), 15);
}

#[test]
fn induced_bonds_stay_inside_the_selection() {
    let system = universe();
    let candidates = everything(&system);
    let config = EngineConfig::default();
    for query in QUERIES {
        let mut selection = select(&system, query, &candidates, None, &config).unwrap();
        selection.fill_bonds(&system);
        let members: HashSet<AtomId> = selection.atoms().iter().copied().collect();
        for bond in selection.bonds() {
            assert!(members.contains(&bond.atom1_id), "{query}");
            assert!(members.contains(&bond.atom2_id), "{query}");
        }
    }
}

#[test]
fn bond_counts_follow_chain_connectivity() {
    let system = universe();
    let config = EngineConfig::default();
    let atoms = protein_atoms(&system);

    let mut protein = select(&system, "protein", &atoms, None, &config).unwrap();
    protein.fill_bonds(&system);
    assert_eq!(protein.len(), 29);
    // 6 residues x 3 backbone bonds, 5 CA-CB bonds, 4 peptide bonds.
    assert_eq!(protein.bonds().len(), 27);
    assert_eq!(
        protein.to_string(),
        "Selection of 29 atoms / 27 bonds, named 'selection'"
    );

    let mut backbone_trace = select(&system, "name N CA C", &atoms, None, &config).unwrap();
    backbone_trace.fill_bonds(&system);
    assert_eq!(backbone_trace.bonds().len(), 16);

    let mut cb = select(&system, "name CB", &atoms, None, &config).unwrap();
    cb.fill_bonds(&system);
    assert_eq!(cb.len(), 5);
    assert!(cb.bonds().is_empty());
    assert!(!cb.bonds_null());
}

#[test]
fn resid_and_name_pick_a_single_atom() {
    let system = universe();
    let atoms = protein_atoms(&system);
    let selected = run(&system, "resid 1 and name CB", &atoms);
    assert_eq!(selected.len(), 1);
    let view = system.atom_view(selected[0]).unwrap();
    assert_eq!(view.residue.name, "MET");
    assert_eq!(view.atom.name, "CB");
}

#[test]
fn property_boundary_is_inclusive_only_for_ge() {
    let system = universe();
    let candidates = everything(&system);
    let ge = run(&system, "prop z >= 5", &candidates);
    let gt: HashSet<AtomId> = run(&system, "prop z > 5", &candidates)
        .into_iter()
        .collect();
    let on_boundary: Vec<AtomId> = ge.into_iter().filter(|id| !gt.contains(id)).collect();
    let expected: Vec<AtomId> = candidates
        .iter()
        .copied()
        .filter(|&id| system.atom(id).unwrap().position.z == 5.0)
        .collect();
    assert_eq!(on_boundary, expected);
    assert_eq!(on_boundary.len(), 1);
}

#[test]
fn around_returns_neighbours_without_the_seed() {
    let system = universe();
    let atoms = protein_atoms(&system);
    let seed: Vec<AtomId> = atoms
        .iter()
        .copied()
        .filter(|&id| system.atom_view(id).unwrap().residue.id == 2)
        .collect();
    let expected: Vec<AtomId> = atoms
        .iter()
        .copied()
        .filter(|id| !seed.contains(id))
        .filter(|&id| {
            let p = system.atom(id).unwrap().position;
            seed.iter()
                .any(|&s| (system.atom(s).unwrap().position - p).norm() <= 4.5)
        })
        .collect();

    let neighbours = run(&system, "not resid 2 and around 4.5 resid 2", &atoms);
    assert!(!neighbours.is_empty());
    assert_eq!(neighbours, expected);
    assert_eq!(run(&system, "around 4.5 resid 2", &atoms), expected);
    assert_eq!(
        run(&system, "not resid 2 and around 4.5 resid 2", &atoms),
        neighbours
    );
}

#[test]
fn spatial_index_gives_the_same_answer_as_brute_force() {
    let system = universe();
    let candidates = everything(&system);
    let linear = EngineConfigBuilder::new()
        .spatial_index_threshold(usize::MAX)
        .build()
        .unwrap();
    let indexed = EngineConfigBuilder::new()
        .spatial_index_threshold(1)
        .build()
        .unwrap();
    for query in [
        "around 6.0 (chain B or water)",
        "within 2.5 name CA",
        "around 0 protein",
        "byres around 4.0 resname SER",
    ] {
        let a = select(&system, query, &candidates, None, &linear).unwrap();
        let b = select(&system, query, &candidates, None, &indexed).unwrap();
        assert_eq!(a.atoms(), b.atoms(), "{query}");
    }
}

#[test]
fn around_handles_large_collinear_reference_sets() {
    let mut system = MolecularSystem::new();
    let mut builder = system.build_structure("line");
    builder
        .start_model()
        .start_chain("A")
        .unwrap()
        .start_residue(1, "UNK")
        .unwrap();
    for i in 0..100 {
        builder
            .add_atom(i + 1, "C", "C", Point3::new(0.0, 1.5 * i as f64, 0.0))
            .unwrap();
    }
    builder
        .start_residue(2, "HOH")
        .unwrap()
        .add_atom(101, "O", "O", Point3::new(1.2, 30.0, 1.0))
        .unwrap();
    builder.finish();

    let near = select_all(&system, "around 2.0 resid 1", None, &EngineConfig::default()).unwrap();
    assert_eq!(near.len(), 1);
    assert_eq!(
        system.atom_view(near.atoms()[0]).unwrap().residue.name,
        "HOH"
    );
}

#[test]
fn selection_command_round_trips_across_structures_and_models() {
    let system = universe();
    let candidates = everything(&system);
    let picked: Vec<AtomId> = candidates.iter().copied().step_by(3).collect();
    let selection = Selection::new(&system, picked, "picked atoms");
    assert!(selection.is_global_selection());
    assert!(!selection.same_model(&system));

    let command = selection.to_selection_command(&system);
    assert!(command.ends_with(' '));
    assert!(command.starts_with("1tst and (atomid "));
    assert!(command.contains("2mdl and model 0 and ("));
    assert!(command.contains("2mdl and model 1 and ("));

    let replayed = select(
        &system,
        &command,
        &candidates,
        None,
        &EngineConfig::default(),
    )
    .unwrap();
    assert!(replayed.same_atoms(&selection));
    assert_eq!(replayed.atoms(), selection.atoms());

    let config = EngineConfig::default();
    let second_model_ca = select(&system, "model 1 and name CA", &candidates, None, &config)
        .unwrap()
        .atoms()
        .to_vec();
    assert_eq!(second_model_ca.len(), 2);
    let selection = Selection::new(&system, second_model_ca, "second model");
    let command = selection.to_selection_command(&system);
    assert_eq!(command, "2mdl and model 1 and (atomid 2 or atomid 7) ");
    let replayed = select(&system, &command, &candidates, None, &config).unwrap();
    assert!(replayed.same_atoms(&selection));
}

#[test]
fn numeric_looking_structure_names_round_trip() {
    let mut system = MolecularSystem::new();
    let mut builder = system.build_structure("1e45");
    builder
        .start_model()
        .start_chain("A")
        .unwrap()
        .start_residue(1, "GLY")
        .unwrap()
        .add_atom(1, "N", "N", Point3::new(0.0, 0.0, 0.0))
        .unwrap()
        .add_atom(2, "CA", "C", Point3::new(1.45, 0.0, 0.0))
        .unwrap();
    builder.finish();
    let config = EngineConfig::default();

    let ca = select_all(&system, "1e45 and name CA", None, &config).unwrap();
    assert_eq!(ca.len(), 1);

    let selection = Selection::new(&system, ca.atoms().to_vec(), "ca");
    let command = selection.to_selection_command(&system);
    assert_eq!(command, "\"1e45\" and (atomid 2) ");
    let replayed = select_all(&system, &command, None, &config).unwrap();
    assert!(replayed.same_atoms(&selection));
}

#[test]
fn model_filter_scopes_multi_model_candidates() {
    let system = universe();
    let candidates = all_model_atoms(&system, ENSEMBLE);
    let config = EngineConfig::default();

    let first = select(&system, "model 0", &candidates, None, &config).unwrap();
    let second = select(&system, "model 1", &candidates, None, &config).unwrap();
    assert_eq!(first.len(), 9);
    assert_eq!(second.len(), 9);
    assert!(first.same_model(&system));
    assert!(second.same_model(&system));
    assert!(!first.same_atoms(&second));
    assert!(!first.union(&second, &system).same_model(&system));

    let current = select_all(&system, "2mdl", None, &config).unwrap();
    assert!(current.same_atoms(&first));
}

#[test]
fn registered_selections_can_be_combined() {
    let system = universe();
    let config = EngineConfig::default();
    let candidates = everything(&system);

    let mut registry = SelectionRegistry::new();
    let mut site = select(&system, "resid 3", &candidates, None, &config).unwrap();
    site.set_name("site");
    registry.insert(site);

    let combined = select(
        &system,
        "site or (chain B and name CA)",
        &candidates,
        Some(&registry),
        &config,
    )
    .unwrap();
    assert_eq!(combined.len(), 7);
    assert_eq!(
        combined.atoms(),
        run(&system, "resid 3 or (chain B and name CA)", &candidates)
    );
}

#[test]
fn malformed_queries_never_yield_partial_results() {
    let system = universe();
    let candidates = everything(&system);
    let config = EngineConfig::default();
    for query in ["", "resid 5:3", "(protein", "protein)", "name", "protein @", "bogus"] {
        assert!(
            matches!(
                select(&system, query, &candidates, None, &config),
                Err(EngineError::Syntax(_))
            ),
            "{query:?}"
        );
        assert!(select_or_empty(&system, query, &candidates, None, &config).is_empty());
    }
}

#[test]
fn unknown_names_and_empty_candidates_are_not_errors() {
    let system = universe();
    let config = EngineConfig::default();
    let none = select(&system, "resname XYZ or chain Q", &everything(&system), None, &config)
        .unwrap();
    assert!(none.is_empty());
    let empty = select(&system, "all", &[], None, &config).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.to_string(), "Selection of 0 atoms, named 'selection'");
}

#[test]
fn config_errors_convert_into_engine_errors() {
    let dir = tempfile::tempdir().unwrap();
    let result: Result<EngineConfig, EngineError> =
        EngineConfig::load(&dir.path().join("absent.toml")).map_err(EngineError::from);
    assert!(matches!(result, Err(EngineError::Config(_))));
}
