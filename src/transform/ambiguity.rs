use crate::grammar::{Grammar, Production};

// An alternative that refers to its own nonterminal more than once, like `E -> E + E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfReference {
    pub nonterminal: String,
    pub production: Production,
    pub count: usize,
}

// Returns the first alternative that uses its own nonterminal two or more times.
// This only catches the operator pattern `E -> E op E` and its relatives; it
// isn't a general ambiguity check (that question is undecidable for CFGs), so
// a grammar that passes may still be ambiguous, and a flagged one may not be.
pub fn find_ambiguity(grammar: &Grammar) -> Option<SelfReference> {
    grammar.rules().find_map(|rule| {
        let symbol = rule.symbol();
        rule.productions.iter()
            .map(|p| (p, p.count(&symbol)))
            .find(|(_, count)| *count >= 2)
            .map(|(p, count)| SelfReference {
                nonterminal: rule.name.clone(),
                production: p.clone(),
                count,
            })
    })
}

pub fn is_ambiguous(grammar: &Grammar) -> bool {
    find_ambiguity(grammar).is_some()
}
