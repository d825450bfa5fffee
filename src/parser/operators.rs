/*
    Parses the operator settings used for disambiguation:
    precedence as `op1 > op2 > op3` and associativity as `op1:left, op2:right`
*/

use std::collections::HashMap;
use std::fmt::Display;

use crate::error_handling::ErrorType;
use crate::grammar::Symbol;
use crate::transform::{Associativity, OperatorTable};

#[derive(Debug, PartialEq)]
pub enum OperatorErrorType {
    // Nothing between two separators
    EmptyOperator,
    // The same operator was listed twice
    DuplicateOperator(String),
    // An associativity item without `:`
    MissingColon(String),
    // Something other than `left` or `right` after the colon
    UnknownAssociativity(String),
}

impl ErrorType for OperatorErrorType {}

impl Display for OperatorErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatorErrorType::EmptyOperator => write!(f, "Empty operator in list"),
            OperatorErrorType::DuplicateOperator(op) => write!(f, "Operator `{}` is listed more than once", op),
            OperatorErrorType::MissingColon(item) => write!(f, "Expected `operator:left` or `operator:right`, found `{}`", item),
            OperatorErrorType::UnknownAssociativity(word) => write!(f, "Unknown associativity `{}` (expected `left` or `right`)", word),
        }
    }
}

pub type Result<T> = std::result::Result<T, OperatorErrorType>;

// Parses `op1 > op2 > op3`. Each operator's rank is its position in the list,
// so the first one listed gets rank 0.
pub fn parse_precedence(text: &str) -> Result<HashMap<Symbol, usize>> {
    let mut precedence = HashMap::new();
    for (rank, op) in text.split('>').map(str::trim).enumerate() {
        if op.is_empty() {
            return Err(OperatorErrorType::EmptyOperator);
        }
        if precedence.insert(Symbol::new(op), rank).is_some() {
            return Err(OperatorErrorType::DuplicateOperator(op.to_string()));
        }
    }
    Ok(precedence)
}

fn parse_associativity_word(word: &str) -> Result<Associativity> {
    match word {
        "left" => Ok(Associativity::Left),
        "right" => Ok(Associativity::Right),
        _ => Err(OperatorErrorType::UnknownAssociativity(word.to_string())),
    }
}

// Parses `op1:left, op2:right`. Operators are matched exactly.
pub fn parse_associativity(text: &str) -> Result<HashMap<Symbol, Associativity>> {
    let mut associativity = HashMap::new();
    for item in text.split(',').map(str::trim) {
        // Split on the last colon so that `:` itself can be an operator
        let (op, word) = item.rsplit_once(':')
            .ok_or_else(|| OperatorErrorType::MissingColon(item.to_string()))?;
        let op = op.trim();
        if op.is_empty() {
            return Err(OperatorErrorType::EmptyOperator);
        }
        let assoc = parse_associativity_word(word.trim())?;
        if associativity.insert(Symbol::new(op), assoc).is_some() {
            return Err(OperatorErrorType::DuplicateOperator(op.to_string()));
        }
    }
    Ok(associativity)
}

pub fn parse_operators(precedence: &str, associativity: &str) -> Result<OperatorTable> {
    Ok(OperatorTable::new(parse_precedence(precedence)?, parse_associativity(associativity)?))
}
