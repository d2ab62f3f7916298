use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "molsel - inspect and validate molecular selection-language queries.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the token stream of a selection query.
    Tokens(TokensArgs),
    /// Parse a selection query and print its canonical, fully parenthesised form.
    Check(CheckArgs),
}

/// Arguments for the `tokens` subcommand.
#[derive(Args, Debug)]
pub struct TokensArgs {
    /// The selection query, e.g. "resname GLY and around 4.5 ligand".
    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// The selection query to parse.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Treat NAME as a loaded structure. Can be used multiple times.
    #[arg(short, long = "structure", value_name = "NAME")]
    pub structures: Vec<String>,

    /// Treat NAME as a registered selection. Can be used multiple times.
    #[arg(short = 'S', long = "selection", value_name = "NAME")]
    pub selections: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_collects_repeated_names() {
        let cli = Cli::parse_from([
            "molsel",
            "-vv",
            "check",
            "1abc and site",
            "--structure",
            "1abc",
            "-s",
            "2xyz",
            "--selection",
            "site",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Check(args) = cli.command else {
            panic!("expected the check subcommand");
        };
        assert_eq!(args.query, "1abc and site");
        assert_eq!(args.structures, vec!["1abc", "2xyz"]);
        assert_eq!(args.selections, vec!["site"]);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["molsel", "-q", "-v", "tokens", "all"]).is_err());
    }
}
