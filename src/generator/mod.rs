/*
    This module derives sentences from a grammar: random samples for showing
    what a transformed grammar accepts, and bounded exhaustive derivation for
    comparing the languages of two grammars
*/

mod exhaustive;

pub use exhaustive::enumerate;

use rand::prelude::*;
use std::fmt::Display;

use crate::grammar::*;
use crate::error_handling::*;

// Past this recursion depth the sampler only picks the alternatives with the
// fewest nonterminals, and at twice the depth it gives up.
pub const DEFAULT_DEPTH: usize = 24;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // The start symbol has no rule
    UnknownStart(String),
    // The derivation didn't finish within the given limit
    LimitReached(usize),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UnknownStart(nonterminal) => write!(f, "No rule for start symbol `{}`", nonterminal),
            GenerateErrorType::LimitReached(limit) => write!(f, "Derivation did not finish within {} steps", limit),
        }
    }
}

pub type GenResult = Result<String, GenerateErrorType>;

// Generates a sentence in the given grammar starting with the given symbol.
// Terminals are separated by spaces
pub fn generate(grammar: &Grammar, start: &str, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    if !grammar.contains(start) {
        return Err(GenerateErrorType::UnknownStart(start.to_string()));
    }
    let mut words = Vec::new();
    generate_nonterminal(grammar, start, rng, 0, max_depth, &mut words)?;
    Ok(words.join(" "))
}

fn generate_nonterminal(grammar: &Grammar, nonterminal: &str, rng: &mut impl Rng, depth: usize, max_depth: usize, words: &mut Vec<String>) -> Result<(), GenerateErrorType> {
    if depth > 2 * max_depth {
        return Err(GenerateErrorType::LimitReached(depth));
    }
    let rewrite = grammar.get(nonterminal).unwrap_or(&[]);
    let alternative = if depth < max_depth {
        rewrite.choose(rng)
    } else {
        rewrite.iter().min_by_key(|p| p.symbols().iter().filter(|s| grammar.is_nonterminal(s)).count())
    };

    // A nonterminal without alternatives produces nothing
    let Some(alternative) = alternative else {
        return Ok(());
    };

    for symbol in alternative.symbols() {
        generate_symbol(grammar, symbol, rng, depth, max_depth, words)?;
    }
    Ok(())
}

fn generate_symbol(grammar: &Grammar, symbol: &Symbol, rng: &mut impl Rng, depth: usize, max_depth: usize, words: &mut Vec<String>) -> Result<(), GenerateErrorType> {
    if symbol.is_epsilon() {
        Ok(())
    } else if grammar.is_nonterminal(symbol) {
        generate_nonterminal(grammar, symbol.as_str(), rng, depth + 1, max_depth, words)
    } else {
        words.push(symbol.as_str().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::parser::{parse_text, SymbolMode};

    fn grammar(text: &str) -> Grammar {
        parse_text(text, Path::new("test.cfg"), SymbolMode::Words).grammar
    }

    #[test]
    fn generates_only_terminals() {
        let g = grammar("S -> b S'\nS' -> a S' | ε");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let sentence = generate(&g, "S", &mut rng, DEFAULT_DEPTH).unwrap();
            let words = sentence.split(' ').collect::<Vec<_>>();
            assert_eq!(words[0], "b");
            assert!(words[1..].iter().all(|w| *w == "a"));
        }
    }

    #[test]
    fn deep_grammar_still_terminates() {
        let g = grammar("E -> id E'\nE' -> + E E' | * E E' | ε");
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(generate(&g, "E", &mut rng, 4).is_ok());
        }
    }

    #[test]
    fn endless_grammar_reports_limit() {
        let g = grammar("A -> a A");
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(generate(&g, "A", &mut rng, 3), Err(GenerateErrorType::LimitReached(_))));
    }

    #[test]
    fn unknown_start() {
        let g = grammar("A -> a");
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(generate(&g, "B", &mut rng, 3), Err(GenerateErrorType::UnknownStart("B".to_string())));
    }
}
