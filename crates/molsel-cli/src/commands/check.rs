use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use molsel::language::parser::{Vocabulary, parse};
use std::io::Write;
use tracing::{debug, info};

fn vocabulary(args: &CheckArgs) -> Vocabulary {
    let mut vocabulary = Vocabulary::new();
    for name in &args.structures {
        vocabulary.add_structure(name.as_str());
    }
    for name in &args.selections {
        vocabulary.add_selection(name.as_str());
    }
    vocabulary
}

pub fn run(args: &CheckArgs, out: &mut impl Write) -> Result<()> {
    debug!(
        "Checking query with {} structure name(s) and {} selection name(s).",
        args.structures.len(),
        args.selections.len()
    );
    let expr = parse(&args.query, &vocabulary(args))
        .map_err(|e| CliError::InvalidSelection(e.render(&args.query)))?;
    info!("Query parsed successfully.");
    writeln!(out, "{expr}")?;
    Ok(())
}
