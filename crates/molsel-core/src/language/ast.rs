use crate::core::models::residue::SecondaryStructureClass;
use crate::core::utils::geometry::Parallelepiped;
use nalgebra::Point3;
use std::fmt;

/// A parsed selection expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    /// Every candidate atom whose residue contains an atom matched by the operand.
    ByRes(Box<Expr>),
    /// Candidate atoms within `radius` of an atom matched by `inner`, excluding those atoms.
    Around { radius: f64, inner: Box<Expr> },
    Predicate(Predicate),
}

/// A leaf test applied to one atom at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    All,
    Nothing,
    ResId(Vec<IdRange>),
    AtomId(Vec<IdRange>),
    ResName(Vec<NamePattern>),
    AtomName(Vec<NamePattern>),
    AtomType(Vec<NamePattern>),
    Chain(Vec<NamePattern>),
    /// Model index within its structure, 0-based.
    Model(usize),
    SecondaryStructure(SecondaryStructureClass),
    Macro(MacroKind),
    Property {
        axis: Axis,
        op: Comparator,
        value: f64,
    },
    InSphere {
        center: Point3<f64>,
        radius: f64,
    },
    InRect(Parallelepiped),
    Structure(String),
    NamedSelection(String),
}

/// Inclusive integer range; a single value is a range of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    pub start: i64,
    pub end: i64,
}

impl IdRange {
    pub fn single(value: i64) -> Self {
        Self {
            start: value,
            end: value,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.start <= value && value <= self.end
    }
}

/// A case-sensitive name pattern; a trailing `*` turns it into a prefix match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    Exact(String),
    Prefix(String),
}

impl NamePattern {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Exact(expected) => name == expected,
            NamePattern::Prefix(prefix) => name.starts_with(prefix.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn component(&self, point: &Point3<f64>) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
            Axis::Z => point.z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Comparator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }

    /// The comparator to use when the operands are swapped (`5 < z` is `z > 5`).
    pub fn flipped(&self) -> Self {
        match self {
            Self::Lt => Self::Gt,
            Self::Le => Self::Ge,
            Self::Gt => Self::Lt,
            Self::Ge => Self::Le,
            Self::Eq => Self::Eq,
            Self::Ne => Self::Ne,
        }
    }

    pub fn apply(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroKind {
    Protein,
    Backbone,
    Water,
    Nucleic,
    NucleicBackbone,
    NucleicBase,
    NucleicSugar,
    Ligand,
    Ions,
}

impl MacroKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Backbone => "backbone",
            Self::Water => "water",
            Self::Nucleic => "nucleic",
            Self::NucleicBackbone => "nucleicbackbone",
            Self::NucleicBase => "nucleicbase",
            Self::NucleicSugar => "nucleicsugar",
            Self::Ligand => "ligand",
            Self::Ions => "ions",
        }
    }
}

// --- Canonical rendering ---

/// Writes a literal so that it lexes back to a single word token.
fn write_literal(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if super::lexer::is_bare_word(text) {
        write!(f, "{text}")
    } else {
        write!(f, "\"{text}\"")
    }
}

fn write_ranges(f: &mut fmt::Formatter<'_>, keyword: &str, ranges: &[IdRange]) -> fmt::Result {
    write!(f, "{keyword}")?;
    for range in ranges {
        if range.start == range.end {
            write!(f, " {}", range.start)?;
        } else {
            write!(f, " {}:{}", range.start, range.end)?;
        }
    }
    Ok(())
}

fn write_patterns(
    f: &mut fmt::Formatter<'_>,
    keyword: &str,
    patterns: &[NamePattern],
) -> fmt::Result {
    write!(f, "{keyword}")?;
    for pattern in patterns {
        write!(f, " ")?;
        match pattern {
            NamePattern::Exact(name) => write_literal(f, name)?,
            NamePattern::Prefix(prefix) => write_literal(f, &format!("{prefix}*"))?,
        }
    }
    Ok(())
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Axis::X => "x",
                Axis::Y => "y",
                Axis::Z => "z",
            }
        )
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::All => write!(f, "all"),
            Predicate::Nothing => write!(f, "nothing"),
            Predicate::ResId(ranges) => write_ranges(f, "resid", ranges),
            Predicate::AtomId(ranges) => write_ranges(f, "atomid", ranges),
            Predicate::ResName(patterns) => write_patterns(f, "resname", patterns),
            Predicate::AtomName(patterns) => write_patterns(f, "name", patterns),
            Predicate::AtomType(patterns) => write_patterns(f, "type", patterns),
            Predicate::Chain(patterns) => write_patterns(f, "chain", patterns),
            Predicate::Model(index) => write!(f, "model {index}"),
            Predicate::SecondaryStructure(class) => write!(f, "ss {class}"),
            Predicate::Macro(kind) => write!(f, "{}", kind.keyword()),
            Predicate::Property { axis, op, value } => write!(f, "prop {axis} {op} {value}"),
            Predicate::InSphere { center, radius } => write!(
                f,
                "insphere {} {} {} {}",
                center.x, center.y, center.z, radius
            ),
            Predicate::InRect(cell) => {
                write!(
                    f,
                    "inrect {} {} {}",
                    cell.origin.x, cell.origin.y, cell.origin.z
                )?;
                for edge in &cell.edges {
                    write!(f, " {} {} {}", edge.x, edge.y, edge.z)?;
                }
                Ok(())
            }
            Predicate::Structure(name) | Predicate::NamedSelection(name) => write_literal(f, name),
        }
    }
}

/// Fully parenthesised so the output re-parses to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::And(l, r) => write!(f, "({l} and {r})"),
            Expr::Or(l, r) => write!(f, "({l} or {r})"),
            Expr::Not(e) => write!(f, "(not {e})"),
            Expr::ByRes(e) => write!(f, "(byres {e})"),
            Expr::Around { radius, inner } => write!(f, "(around {radius} {inner})"),
            Expr::Predicate(p) => write!(f, "{p}"),
        }
    }
}
