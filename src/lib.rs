//! Prepares context-free grammars for predictive (top-down) parsing: removes
//! immediate left recursion, left-factors, spots self-referencing operator
//! rules and rewrites them into precedence levels.
//!
//! Known limits: only immediate left recursion is removed (`A -> A x`, not
//! `A -> B x`, `B -> A y`), factoring is a single pass, and the ambiguity
//! check only looks for alternatives that use their own nonterminal twice.

pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod log;
pub mod parser;
pub mod pipeline;
pub mod transform;
