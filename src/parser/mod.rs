/*
    This module parses grammar text of the form `A -> alt1 | alt2`
*/

mod lexer;
pub mod operators;

use std::fmt::Display;
use std::path::Path;

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;

/// How the text of an alternative is cut into symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolMode {
    /// Symbols are separated by whitespace: `E -> E + E | id`.
    #[default]
    Words,
    /// Every character is a symbol of its own: `A -> ab | ac`.
    ///
    /// Printed grammars use whole names like `S'`, which this mode would split
    /// into `S` and `'`. Read printed output back in `Words` mode instead.
    Chars,
}

#[derive(Debug)]
pub enum CompileErrorType {
    // A rule line has no `->`
    MissingArrow,
    // Nothing usable on the left of `->`
    MissingNonterminal,
    // More than one word on the left of `->`
    MultipleNonterminals,
    // A second `->` on the same line
    UnexpectedArrow,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let CompileErrorType::FileError(a) = self {
            if let CompileErrorType::FileError(b) = other {
                return a.kind() == b.kind();
            }
        }
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingArrow => write!(f, "Expected `->` after nonterminal, skipping line"),
            CompileErrorType::MissingNonterminal => write!(f, "Expected a nonterminal before `->`, skipping line"),
            CompileErrorType::MultipleNonterminals => write!(f, "Only one nonterminal can be defined per line, skipping line"),
            CompileErrorType::UnexpectedArrow => write!(f, "Unexpected second `->`, skipping line"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;

// The grammar built from every well-formed line, and one error per skipped line
#[derive(Debug, PartialEq)]
pub struct ParsedGrammar {
    pub grammar: Grammar,
    pub errors: CompileErrors,
}

#[derive(PartialEq, Debug)]
struct RuleLine {
    symbol: String,
    rewrite: Vec<Production>,
    location: Location,
}

fn parse_alternative(tokens: &[Token], mode: SymbolMode) -> Production {
    let symbols = tokens.iter()
        .filter_map(|t| match t {
            Token::Word(s) => Some(s),
            _ => None,
        })
        .flat_map(|word| match mode {
            SymbolMode::Words => vec![Symbol::new(word.as_str())],
            SymbolMode::Chars => word.chars().map(|c| Symbol::new(c.to_string())).collect_vec(),
        })
        .collect_vec();

    // `A -> a |` has an empty second alternative, which is the empty string
    if symbols.is_empty() {
        Production::epsilon()
    } else {
        Production::new(symbols)
    }
}

fn parse_rewrite(tokens: &[Token], mode: SymbolMode) -> Result<Vec<Production>> {
    if tokens.contains(&Token::Arrow) {
        return Err(CompileErrorType::UnexpectedArrow);
    }
    Ok(tokens.split(|t| *t == Token::Or).map(|alt| parse_alternative(alt, mode)).collect())
}

fn parse_line(tokens: &[Token], mode: SymbolMode) -> Result<(String, Vec<Production>)> {
    let arrow = tokens.iter()
        .position(|t| *t == Token::Arrow)
        .ok_or(CompileErrorType::MissingArrow)?;

    let symbol = match &tokens[..arrow] {
        [Token::Word(s)] => Ok(s.clone()),
        [] => Err(CompileErrorType::MissingNonterminal),
        lhs if lhs.iter().all(|t| matches!(t, Token::Word(_))) => Err(CompileErrorType::MultipleNonterminals),
        _ => Err(CompileErrorType::MissingNonterminal),
    }?;

    let rewrite = parse_rewrite(&tokens[arrow + 1..], mode)?;
    Ok((symbol, rewrite))
}

fn parse_lex_line(line: &str, location: Location, mode: SymbolMode) -> LineResult<RuleLine> {
    parse_line(&lexer::lex_line(line), mode)
        .map(|(symbol, rewrite)| RuleLine { symbol, rewrite, location: location.clone() })
        .map_err(|error| CompileError { location, error })
}

fn is_rule_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}

// Malformed lines are skipped and reported in `errors`, the remaining lines
// are still read
pub fn parse_text(text: &str, file: &Path, mode: SymbolMode) -> ParsedGrammar {
    let parsed_lines = text.lines()
        .enumerate()
        .filter(|(_, line)| is_rule_line(line))
        .map(|(num, line)| parse_lex_line(line, Location::at_line(file, num + 1), mode));

    let mut grammar = Grammar::new();
    let mut errors = CompileErrors::new();
    for parsed in parsed_lines {
        match parsed {
            Ok(rule) => {
                if grammar.add_rule(rule.symbol, rule.rewrite).is_err() {
                    errors.push(CompileError::new(rule.location, CompileErrorType::MissingNonterminal));
                }
            }
            Err(error) => errors.push(error),
        }
    }

    ParsedGrammar { grammar, errors }
}

pub fn parse_file(path: &Path, mode: SymbolMode) -> LineResult<ParsedGrammar> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CompileError::new(Location::whole(path), CompileErrorType::FileError(e)))?;
    Ok(parse_text(&text, path, mode))
}
