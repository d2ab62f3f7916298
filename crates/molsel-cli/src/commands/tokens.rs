use crate::cli::TokensArgs;
use crate::error::{CliError, Result};
use molsel::language::error::SyntaxError;
use molsel::language::lexer::tokenize;
use std::io::Write;
use tracing::debug;

pub fn run(args: &TokensArgs, out: &mut impl Write) -> Result<()> {
    let tokens = tokenize(&args.query)
        .map_err(|e| CliError::InvalidSelection(SyntaxError::from(e).render(&args.query)))?;
    debug!("Tokenized query into {} token(s).", tokens.len());

    for token in &tokens {
        writeln!(out, "{token}")?;
    }
    Ok(())
}
