mod cli;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use rand::thread_rng;

use cli::Cli;
use llprep::error_handling::{Error, Location};
use llprep::log::{Log, LogMsg};
use llprep::parser::{self, SymbolMode};
use llprep::pipeline::{self, DisambiguationSource, Outcome, Request};
use llprep::generator;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let mode = if cli.chars { SymbolMode::Chars } else { SymbolMode::Words };
    let parsed = parser::parse_file(&cli.file, mode).map_err(|e| e.to_string())?;
    for error in &parsed.errors {
        eprintln!("{}", error);
    }
    if parsed.grammar.is_empty() {
        return Err(format!("{}: no grammar rules found", cli.file.display()));
    }

    let operators = match (&cli.precedence, &cli.associativity) {
        (Some(precedence), Some(associativity)) => Some(
            parser::operators::parse_operators(precedence, associativity)
                .map_err(|e| Error::new(Location::whole(Path::new("operators")), e).to_string())?
        ),
        (None, None) => None,
        _ => return Err("--precedence and --associativity must be given together".to_string()),
    };

    let source = if cli.from_original { DisambiguationSource::Original } else { DisambiguationSource::LeftFactored };
    let mut request = Request::new(parsed.grammar).with_source(source);
    if let Some(operators) = operators {
        request = request.with_operators(operators);
    }

    let outcome = pipeline::run(request)
        .map_err(|e| Error::new(Location::whole(&cli.file), e).to_string())?;

    print_log(&outcome.log, cli.verbose);
    print_outcome(&outcome);
    print_samples(&outcome, cli);
    Ok(())
}

// Warnings are always shown, notes only with --verbose
fn print_log(log: &Log, verbose: bool) {
    if log.is_empty() {
        return;
    }
    if verbose {
        for note in log.notes() {
            eprintln!("{}", LogMsg::Note(note.clone()));
        }
    }
    for warning in log.warnings() {
        eprintln!("{}", LogMsg::Warning(warning.clone()));
    }
    if log.num_warnings() > 0 {
        eprintln!("{} warning(s)\n", log.num_warnings());
    }
}

fn print_outcome(outcome: &Outcome) {
    println!("Grammar after removing left recursion:\n{}", outcome.without_left_recursion);
    println!("Grammar after left factoring:\n{}", outcome.left_factored);

    match &outcome.ambiguity {
        Some(found) => println!("The grammar is ambiguous: `{} -> {}` uses {} {} times.\n",
            found.nonterminal, found.production, found.nonterminal, found.count),
        None => println!("The grammar is not ambiguous.\n"),
    }

    match &outcome.disambiguated {
        Some(grammar) => println!("Grammar after eliminating ambiguity:\n{}", grammar),
        None if outcome.is_ambiguous() =>
            println!("Give --precedence and --associativity to eliminate the ambiguity.\n"),
        None => {}
    }
}

fn print_samples(outcome: &Outcome, cli: &Cli) {
    let amount = cli.amount.unwrap_or(0);
    if amount == 0 {
        return;
    }
    let Some(start) = cli.start.as_deref().or(outcome.original.first_nonterminal()) else {
        return;
    };

    println!("Sample sentences:");
    let mut rng = thread_rng();
    for _ in 0..amount {
        match generator::generate(outcome.last(), start, &mut rng, generator::DEFAULT_DEPTH) {
            Ok(sentence) => println!("{}", sentence),
            Err(e) => eprintln!("{}", Error::new(Location::whole(&cli.file), e)),
        }
    }
}
