use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Prepares a context-free grammar for predictive parsing")]
pub struct Cli {
    /// File containing the grammar, one `A -> alt1 | alt2` rule per line
    pub file: PathBuf,

    /// Operator precedence, e.g. "* > +"
    #[arg(short, long, value_name = "ORDER")]
    pub precedence: Option<String>,

    /// Operator associativity, e.g. "*:left, +:left"
    #[arg(short, long, value_name = "LIST")]
    pub associativity: Option<String>,

    /// Treat every character of an alternative as a separate symbol
    #[arg(short, long)]
    pub chars: bool,

    /// Apply the precedence rewrite to the original grammar instead of the left-factored one
    #[arg(long)]
    pub from_original: bool,

    /// Start symbol for sampling (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Amount of sentences to sample from the final grammar (default: 0)
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub amount: Option<u32>,

    /// Also print notes about each transformation
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_arguments() {
        let cli = Cli::parse_from(["llprep", "g.cfg", "-p", "* > +", "-a", "*:left, +:left", "-n", "3", "--from-original"]);
        assert_eq!(cli.file, PathBuf::from("g.cfg"));
        assert_eq!(cli.precedence.as_deref(), Some("* > +"));
        assert_eq!(cli.associativity.as_deref(), Some("*:left, +:left"));
        assert_eq!(cli.amount, Some(3));
        assert!(cli.from_original);
        assert!(!cli.chars);
    }
}
