use phf::{Set, phf_set};

static PROTEIN_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    // CHARMM
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HSD",
    "HSE", "HSP", "ILE", "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR",
    "TRP", "TYR", "VAL", "ALAD",
    // PDB
    "HIS", "MSE",
    // Gromacs oplsaa
    "ARGN", "ASPH", "CYS2", "CYSH", "QLN", "PGLU", "GLUH", "HIS1", "HISD",
    "HISE", "HISH", "LYSH",
    // Gromacs gromos53a6
    "ASN1", "CYS1", "HISA", "HISB", "HIS2",
    // Gromacs amber03
    "HID", "HIE", "HIP", "ORN", "DAB", "LYN", "HYP", "CYM", "CYX", "ASH",
    "GLH", "ACE", "NME",
    // Gromacs amber99sb-star-ildn terminal variants
    "NALA", "NGLY", "NSER", "NTHR", "NLEU", "NILE", "NVAL", "NASN", "NGLN",
    "NARG", "NHID", "NHIE", "NHIP", "NTRP", "NPHE", "NTYR", "NGLU", "NASP",
    "NLYS", "NPRO", "NCYS", "NCYX", "NMET", "CALA", "CGLY", "CSER", "CTHR",
    "CLEU", "CILE", "CVAL", "CASF", "CASN", "CGLN", "CARG", "CHID", "CHIE",
    "CHIP", "CTRP", "CPHE", "CTYR", "CGLU", "CASP", "CLYS", "CPRO", "CCYS",
    "CCYX", "CMET", "CME", "ASF",
};

static NUCLEIC_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "ADE", "URA", "CYT", "GUA", "THY", "DA", "DC", "DG", "DT", "RA",
    "RU", "RG", "RC", "A", "T", "U", "C", "G",
    "DA5", "DC5", "DG5", "DT5",
    "DA3", "DC3", "DG3", "DT3",
    "RA5", "RU5", "RG5", "RC5",
    "RA3", "RU3", "RG3", "RC3",
};

static BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! { "N", "C", "CA", "O" };

static NUCLEIC_BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "P", "C5'", "C3'", "O3'", "O5'",
};

static NUCLEIC_BASE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "N9", "N7", "C8", "C5", "C4", "N3", "C2", "N1", "C6",
    "O6", "N2", "N6", "O2", "N4", "O4", "C5M",
};

static NUCLEIC_SUGAR_ATOM_NAMES: Set<&'static str> = phf_set! {
    "C1'", "C2'", "C3'", "C4'", "O4'",
};

// Stored upper-case; lookups upper-case the residue name first.
static WATER_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "SOL", "TIP3", "TP3M", "SPC", "H2O", "TIP",
};

static SINGLE_LETTER_ION_NAMES: Set<&'static str> = phf_set! { "I", "F", "K", "V", "S" };

static ION_NAME_PREFIXES: Set<&'static str> = phf_set! {
    "AL", "AS", "AU", "BE", "BR", "CO", "CU", "EU", "FE", "GD", "IR",
    "MG", "MN", "MO", "NI", "PT", "RH", "RU", "SE", "TA", "ZN",
};

static ION_RESIDUE_NAMES: Set<&'static str> = phf_set! { "PO4", "SOD", "SO4", "NH4" };

static MERCURY_ION_RESIDUES: Set<&'static str> = phf_set! {
    "CMH", "EMC", "MBO", "MMC", "HGB", "BE7", "PMB",
};

static CHLORIDE_ION_RESIDUES: Set<&'static str> = phf_set! {
    "0QE", "CPT", "DCE", "EAA", "IMN", "OCZ", "OMY", "OMZ",
    "UN9", "1N1", "2T8", "393", "3MY", "BMU", "CLM", "CP6",
    "DB8", "DIF", "EFZ", "LUR", "RDC", "UCL", "XMM", "HLT",
    "IRE", "LCP", "PCI", "VGH",
};

/// Element type of calcium, which shares its name with the alpha carbon.
const CALCIUM_ELEMENT: &str = "CA";

pub fn is_protein_residue(residue_name: &str) -> bool {
    PROTEIN_RESIDUE_NAMES.contains(residue_name)
}

pub fn is_nucleic_residue(residue_name: &str) -> bool {
    NUCLEIC_RESIDUE_NAMES.contains(residue_name)
}

/// Protein backbone: `N`, `CA`, `C`, `O` of a protein residue, excluding calcium ions named `CA`.
pub fn is_backbone_atom(residue_name: &str, atom_name: &str, element: &str) -> bool {
    is_protein_residue(residue_name)
        && BACKBONE_ATOM_NAMES.contains(atom_name)
        && element != CALCIUM_ELEMENT
}

pub fn is_nucleic_backbone_atom(residue_name: &str, atom_name: &str) -> bool {
    is_nucleic_residue(residue_name) && NUCLEIC_BACKBONE_ATOM_NAMES.contains(atom_name)
}

pub fn is_nucleic_base_atom(residue_name: &str, atom_name: &str) -> bool {
    is_nucleic_residue(residue_name) && NUCLEIC_BASE_ATOM_NAMES.contains(atom_name)
}

pub fn is_nucleic_sugar_atom(residue_name: &str, atom_name: &str) -> bool {
    is_nucleic_residue(residue_name) && NUCLEIC_SUGAR_ATOM_NAMES.contains(atom_name)
}

/// Water residue names, matched case-insensitively.
pub fn is_water_residue(residue_name: &str) -> bool {
    WATER_RESIDUE_NAMES.contains(residue_name.to_ascii_uppercase().as_str())
}

/// Heuristic ion detection from the atom name and its residue name.
///
/// Single-letter names match a short element list. Longer names are judged by
/// their first two characters (upper-cased): a known ion element, equal to the
/// residue name, or one of the mercury/chloride special cases. Atoms of a few
/// ionic residues (phosphate, sulfate, sodium, ammonium) always match.
pub fn is_ion(atom_name: &str, residue_name: &str) -> bool {
    match atom_name.chars().count() {
        0 => false,
        1 => SINGLE_LETTER_ION_NAMES.contains(atom_name),
        _ => {
            let prefix: String = atom_name.chars().take(2).collect::<String>().to_uppercase();
            ION_NAME_PREFIXES.contains(prefix.as_str())
                || prefix == residue_name
                || ION_RESIDUE_NAMES.contains(residue_name)
                || (prefix == "HG" && MERCURY_ION_RESIDUES.contains(residue_name))
                || (prefix == "CL" && CHLORIDE_ION_RESIDUES.contains(residue_name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protein_residues_include_force_field_variants() {
        assert!(is_protein_residue("ALA"));
        assert!(is_protein_residue("HSD"));
        assert!(is_protein_residue("NALA"));
        assert!(is_protein_residue("CMET"));
        assert!(!is_protein_residue("ala"));
        assert!(!is_protein_residue("HOH"));
        assert!(!is_protein_residue("DA"));
    }

    #[test]
    fn nucleic_residues_are_case_sensitive() {
        assert!(is_nucleic_residue("DA"));
        assert!(is_nucleic_residue("U"));
        assert!(is_nucleic_residue("RC3"));
        assert!(!is_nucleic_residue("da"));
        assert!(!is_nucleic_residue("GLY"));
    }

    #[test]
    fn backbone_requires_protein_residue_and_excludes_calcium() {
        assert!(is_backbone_atom("GLY", "CA", "C"));
        assert!(is_backbone_atom("ALA", "O", "O"));
        assert!(!is_backbone_atom("ALA", "CB", "C"));
        assert!(!is_backbone_atom("HOH", "O", "O"));
        assert!(!is_backbone_atom("ALA", "CA", "CA"));
        assert!(!is_backbone_atom("ALA", "OXT", "O"));
    }

    #[test]
    fn nucleic_atom_groups_require_nucleic_residue() {
        assert!(is_nucleic_backbone_atom("DA", "P"));
        assert!(is_nucleic_backbone_atom("DG", "O3'"));
        assert!(!is_nucleic_backbone_atom("ALA", "P"));
        assert!(is_nucleic_base_atom("DT", "C5M"));
        assert!(!is_nucleic_base_atom("DT", "C1'"));
        assert!(is_nucleic_sugar_atom("RU", "C1'"));
        assert!(!is_nucleic_sugar_atom("RU", "P"));
    }

    #[test]
    fn water_is_case_insensitive() {
        assert!(is_water_residue("HOH"));
        assert!(is_water_residue("hoh"));
        assert!(is_water_residue("Tip3"));
        assert!(!is_water_residue("ALA"));
    }

    #[test]
    fn ions_single_letter_names() {
        assert!(is_ion("K", "K"));
        assert!(is_ion("I", "IOD"));
        assert!(!is_ion("N", "ALA"));
        assert!(!is_ion("", "ALA"));
    }

    #[test]
    fn ions_two_letter_prefixes() {
        assert!(is_ion("ZN", "ZN"));
        assert!(is_ion("Mg", "MG"));
        assert!(is_ion("FE2", "HEM"));
        assert!(is_ion("NA", "NA"));
        assert!(is_ion("O1", "SO4"));
        assert!(!is_ion("CA", "ALA"));
        assert!(!is_ion("CB", "ALA"));
    }

    #[test]
    fn ions_mercury_and_chloride_special_cases() {
        assert!(is_ion("HG", "CMH"));
        assert!(!is_ion("HG1", "ALA"));
        assert!(is_ion("CL1", "CLM"));
        assert!(!is_ion("CL", "ALA"));
        assert!(is_ion("CL", "CL"));
    }
}
