/*
    Grammar rewrites for predictive parsing. Each one borrows its input and
    builds a new grammar, so every intermediate stage stays available
*/

mod ambiguity;
mod left_factor;
mod left_recursion;
mod precedence;

use std::fmt::Display;

use crate::error_handling::ErrorType;

pub use ambiguity::{find_ambiguity, is_ambiguous, SelfReference};
pub use left_factor::left_factor;
pub use left_recursion::remove_left_recursion;
pub use precedence::{disambiguate, Associativity, OperatorTable};

#[derive(Debug, PartialEq)]
pub enum TransformErrorType {
    // An operator alternative uses an operator with no precedence rank
    MissingPrecedence { nonterminal: String, operator: String },
    // An operator has a precedence rank but no associativity
    MissingAssociativity { nonterminal: String, operator: String },
}

impl ErrorType for TransformErrorType {}

impl Display for TransformErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformErrorType::MissingPrecedence { nonterminal, operator } =>
                write!(f, "No precedence given for operator `{}` used by `{}`", operator, nonterminal),
            TransformErrorType::MissingAssociativity { nonterminal, operator } =>
                write!(f, "No associativity given for operator `{}` used by `{}`", operator, nonterminal),
        }
    }
}

pub type TransformResult<T> = std::result::Result<T, TransformErrorType>;
