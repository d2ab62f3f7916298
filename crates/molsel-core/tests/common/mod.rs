#![allow(dead_code)]

use molsel::core::models::ids::AtomId;
use molsel::core::models::residue::SecondaryStructure;
use molsel::core::models::system::MolecularSystem;
use molsel::core::models::topology::BondOrder;
use nalgebra::{Point3, Vector3};

pub const PROTEIN: &str = "1tst";
pub const ENSEMBLE: &str = "2mdl";

/// Backbone offsets from a residue's anchor point, in N, CA, C, O order.
const BACKBONE: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.45, 0.31, 0.07],
    [2.42, -0.63, 0.21],
    [2.21, -1.84, 0.43],
];

/// CB of LEU residues sits at z = 5 exactly so property boundaries can be tested.
fn cb(residue_name: &str) -> Vector3<f64> {
    if residue_name == "LEU" {
        Vector3::new(1.62, 1.79, 5.0)
    } else {
        Vector3::new(1.62, 1.79, 0.93)
    }
}

fn backbone(anchor: Point3<f64>, index: usize) -> Point3<f64> {
    let [x, y, z] = BACKBONE[index];
    anchor + Vector3::new(x, y, z)
}

struct ChainSpec<'a> {
    name: &'a str,
    residues: &'a [(isize, &'a str, Option<SecondaryStructure>)],
    origin: Point3<f64>,
}

/// Adds one model to `structure`, creating the structure on first use.
///
/// Amino acids get N, CA, C, O (and CB unless GLY) with intra-residue bonds
/// and a peptide bond to the previous residue of the chain. `HOH` residues get
/// a single oxygen.
fn add_model(system: &mut MolecularSystem, structure: &str, chains: &[ChainSpec<'_>], shift: f64) {
    let mut builder = system.build_structure(structure);
    builder.start_model();
    let mut serial = 0i64;
    for chain in chains {
        builder.start_chain(chain.name).unwrap();
        let mut previous_c: Option<i64> = None;
        for (k, &(number, name, ss)) in chain.residues.iter().enumerate() {
            builder.start_residue(number, name).unwrap();
            if let Some(ss) = ss {
                builder.secondary_structure(ss).unwrap();
            }
            let anchor = chain.origin + Vector3::new(3.8 * k as f64 + shift, 0.0, 0.0);
            if name == "HOH" {
                serial += 1;
                builder.add_atom(serial, "O", "O", anchor).unwrap();
                continue;
            }
            let n = serial + 1;
            builder
                .add_atom(n, "N", "N", backbone(anchor, 0))
                .unwrap()
                .add_atom(n + 1, "CA", "C", backbone(anchor, 1))
                .unwrap()
                .add_atom(n + 2, "C", "C", backbone(anchor, 2))
                .unwrap()
                .add_atom(n + 3, "O", "O", backbone(anchor, 3))
                .unwrap()
                .add_bond(n, n + 1, BondOrder::Single)
                .unwrap()
                .add_bond(n + 1, n + 2, BondOrder::Single)
                .unwrap()
                .add_bond(n + 2, n + 3, BondOrder::Double)
                .unwrap();
            serial = n + 3;
            if name != "GLY" {
                serial += 1;
                builder
                    .add_atom(serial, "CB", "C", anchor + cb(name))
                    .unwrap()
                    .add_bond(n + 1, serial, BondOrder::Single)
                    .unwrap();
            }
            if let Some(c) = previous_c {
                builder.add_bond(c, n, BondOrder::Single).unwrap();
            }
            previous_c = Some(n + 2);
        }
    }
    builder.finish();
}

/// Builds the test universe.
///
/// `1tst`, one model, 31 atoms:
/// - chain A: MET 1, LEU 2, LYS 3, GLY 4 (1 and 2 helix, 3 strand)
/// - chain B: SER 10, LEU 11
/// - chain W: HOH 20, HOH 21, far from everything else
///
/// `2mdl`, two models of an ALA-GLY peptide in chain A (9 atoms each), the
/// second shifted by 0.5 along x.
pub fn universe() -> MolecularSystem {
    let mut system = MolecularSystem::new();
    add_model(
        &mut system,
        PROTEIN,
        &[
            ChainSpec {
                name: "A",
                residues: &[
                    (1, "MET", Some(SecondaryStructure::Helix)),
                    (2, "LEU", Some(SecondaryStructure::Helix310)),
                    (3, "LYS", Some(SecondaryStructure::Strand)),
                    (4, "GLY", None),
                ],
                origin: Point3::new(0.0, 0.0, 0.0),
            },
            ChainSpec {
                name: "B",
                residues: &[(10, "SER", None), (11, "LEU", None)],
                origin: Point3::new(0.7, 4.1, 0.3),
            },
            ChainSpec {
                name: "W",
                residues: &[(20, "HOH", None), (21, "HOH", None)],
                origin: Point3::new(30.0, 30.0, 30.0),
            },
        ],
        0.0,
    );

    let peptide = [ChainSpec {
        name: "A",
        residues: &[(1, "ALA", None), (2, "GLY", None)],
        origin: Point3::new(-20.0, -20.0, 0.0),
    }];
    add_model(&mut system, ENSEMBLE, &peptide, 0.0);
    add_model(&mut system, ENSEMBLE, &peptide, 0.5);
    system
}

/// Every atom of every model of `structure`, model by model.
pub fn all_model_atoms(system: &MolecularSystem, structure: &str) -> Vec<AtomId> {
    let structure_id = system.find_structure_by_name(structure).unwrap();
    system
        .structure(structure_id)
        .unwrap()
        .models()
        .iter()
        .flat_map(|&model_id| system.model(model_id).unwrap().all_atoms().to_vec())
        .collect()
}

/// Candidate list covering both models of the ensemble and the protein.
pub fn everything(system: &MolecularSystem) -> Vec<AtomId> {
    let mut atoms = all_model_atoms(system, PROTEIN);
    atoms.extend(all_model_atoms(system, ENSEMBLE));
    atoms
}
