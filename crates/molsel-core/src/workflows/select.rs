use crate::core::models::ids::AtomId;
use crate::core::models::system::MolecularSystem;
use crate::core::selection::Selection;
use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::evaluate::Evaluator;
use crate::engine::registry::SelectionRegistry;
use crate::language::parser::{Vocabulary, parse};
use tracing::{debug, error, info, instrument};

fn vocabulary(system: &MolecularSystem, registry: Option<&SelectionRegistry>) -> Vocabulary {
    match registry {
        Some(registry) => registry.vocabulary(system),
        None => system
            .structure_names()
            .into_iter()
            .fold(Vocabulary::new(), Vocabulary::with_structure),
    }
}

/// Parses `query` and evaluates it against `candidates`.
///
/// The result keeps candidate order, is named after
/// [`EngineConfig::selection_name`] and remembers `query` as its source, so
/// [`Selection::to_selection_command`] returns it verbatim. Bonds are left
/// uncomputed; call [`Selection::fill_bonds`] when they are needed.
///
/// # Errors
///
/// Returns [`EngineError::Syntax`] if `query` does not tokenize or parse. No
/// atoms are evaluated in that case.
#[instrument(skip_all, name = "select_workflow", fields(query = %query))]
pub fn select(
    system: &MolecularSystem,
    query: &str,
    candidates: &[AtomId],
    registry: Option<&SelectionRegistry>,
    config: &EngineConfig,
) -> Result<Selection, EngineError> {
    let expr = parse(query, &vocabulary(system, registry))?;
    debug!(expr = %expr, "Parsed selection.");

    let mut evaluator = Evaluator::new(system, config);
    if let Some(registry) = registry {
        evaluator = evaluator.with_registry(registry);
    }
    let atoms = evaluator.evaluate(&expr, candidates);

    info!(
        "Selection '{}' matched {} of {} candidate atom(s).",
        config.selection_name,
        atoms.len(),
        candidates.len()
    );
    Ok(Selection::from_language(
        system,
        atoms,
        &config.selection_name,
        query,
    ))
}

/// Evaluates `query` against the current model of every structure.
pub fn select_all(
    system: &MolecularSystem,
    query: &str,
    registry: Option<&SelectionRegistry>,
    config: &EngineConfig,
) -> Result<Selection, EngineError> {
    select(system, query, &system.all_current_atoms(), registry, config)
}

/// Like [`select`], but a malformed query is logged with its caret diagnostic
/// and yields an empty selection instead of an error.
pub fn select_or_empty(
    system: &MolecularSystem,
    query: &str,
    candidates: &[AtomId],
    registry: Option<&SelectionRegistry>,
    config: &EngineConfig,
) -> Selection {
    match select(system, query, candidates, registry, config) {
        Ok(selection) => selection,
        Err(e) => {
            match e.as_syntax() {
                Some(syntax) => error!("{}", syntax.render(query)),
                None => error!("{e}"),
            }
            Selection::new(system, Vec::new(), &config.selection_name)
        }
    }
}
