/*
    This module is for storing grammars and rendering them back to text
*/

mod names;

pub use names::NameFixer;

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;

pub const EPSILON: &str = "ε";

// The base unit in a grammar rule. Whether a symbol is a nonterminal depends
// on the grammar it is used in, so it's only a name here
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(text: impl Into<String>) -> Self {
        Symbol(text.into())
    }

    pub fn epsilon() -> Self {
        Symbol(EPSILON.to_string())
    }

    pub fn is_epsilon(&self) -> bool {
        self.0 == EPSILON
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Symbol::new(text)
    }
}

impl From<String> for Symbol {
    fn from(text: String) -> Self {
        Symbol(text)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// One alternative right-hand side of a rule.
// A production made of the single symbol `ε` derives the empty string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Production(Vec<Symbol>);

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Production(symbols)
    }

    pub fn epsilon() -> Self {
        Production(vec![Symbol::epsilon()])
    }

    pub fn is_epsilon(&self) -> bool {
        self.0.len() == 1 && self.0[0].is_epsilon()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Symbol> {
        self.0.first()
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.0.get(index)
    }

    pub fn starts_with(&self, prefix: &[Symbol]) -> bool {
        self.0.starts_with(prefix)
    }

    // The symbols left after dropping the first `skip` ones.
    pub fn suffix(&self, skip: usize) -> Production {
        Production(self.0.iter().skip(skip).cloned().collect())
    }

    pub fn appended(&self, symbol: Symbol) -> Production {
        let mut symbols = self.0.clone();
        symbols.push(symbol);
        Production(symbols)
    }

    pub fn count(&self, symbol: &Symbol) -> usize {
        self.0.iter().filter(|s| *s == symbol).count()
    }
}

impl<S: Into<Symbol>> FromIterator<S> for Production {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Production(iter.into_iter().map(Into::into).collect())
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "{}", EPSILON)
        } else {
            write!(f, "{}", self.0.iter().join(" "))
        }
    }
}

// A nonterminal and its alternatives, in the order they were given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub productions: Vec<Production>,
}

impl Rule {
    pub fn symbol(&self) -> Symbol {
        Symbol::new(self.name.as_str())
    }
}

#[derive(Debug, PartialEq)]
pub enum GrammarErrorType {
    // A rule was given for a nonterminal without a name
    EmptyNonterminal,
}

impl ErrorType for GrammarErrorType {}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::EmptyNonterminal => write!(f, "Nonterminal names cannot be empty"),
        }
    }
}

// Ordered mapping from nonterminal name to its alternatives.
// Both the nonterminals and the alternatives of each nonterminal keep their
// insertion order, which is also the order they're printed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Grammar {
            rules: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    // Builds a grammar from ordered `(nonterminal, alternatives)` pairs. Pairs
    // for a nonterminal that was already seen extend its alternatives.
    pub fn from_pairs<N, I>(pairs: I) -> Result<Self, GrammarErrorType>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Vec<Production>)>,
    {
        let mut grammar = Grammar::new();
        for (name, productions) in pairs {
            grammar.add_rule(name, productions)?;
        }
        Ok(grammar)
    }

    // Adds alternatives to a nonterminal, creating it at the end if it's new.
    pub fn add_rule(&mut self, name: impl Into<String>, productions: Vec<Production>) -> Result<(), GrammarErrorType> {
        let name = name.into();
        if name.is_empty() {
            return Err(GrammarErrorType::EmptyNonterminal);
        }
        match self.index.get(&name) {
            Some(&i) => self.rules[i].productions.extend(productions),
            None => self.push_rule(name, productions),
        }
        Ok(())
    }

    // Used by the transformations, which only ever produce names from
    // existing ones. Replaces the alternatives of a known nonterminal
    pub(crate) fn set_rule(&mut self, name: String, productions: Vec<Production>) {
        match self.index.get(&name) {
            Some(&i) => self.rules[i].productions = productions,
            None => self.push_rule(name, productions),
        }
    }

    fn push_rule(&mut self, name: String, productions: Vec<Production>) {
        self.index.insert(name.clone(), self.rules.len());
        self.rules.push(Rule { name, productions });
    }

    pub fn get(&self, name: &str) -> Option<&[Production]> {
        self.index.get(name).map(|&i| self.rules[i].productions.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn is_nonterminal(&self, symbol: &Symbol) -> bool {
        self.contains(symbol.as_str())
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    pub fn first_nonterminal(&self) -> Option<&str> {
        self.rules.first().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    // Every nonterminal name and every symbol used in an alternative.
    pub fn used_names(&self) -> HashSet<String> {
        self.rules.iter()
            .flat_map(|r| std::iter::once(r.name.clone())
                .chain(r.productions.iter().flat_map(|p| p.symbols().iter().map(|s| s.as_str().to_string()))))
            .collect()
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{} -> {}", rule.name, rule.productions.iter().join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn prod(symbols: &[&str]) -> Production {
        symbols.iter().copied().collect()
    }

    #[test]
    fn keeps_insertion_order() {
        let grammar = Grammar::from_pairs(vec![
            ("S", vec![prod(&["A", "b"])]),
            ("A", vec![prod(&["a"]), prod(&["c"])]),
            ("S", vec![prod(&["d"])]),
        ]).unwrap();

        assert_eq!(grammar.nonterminals().collect::<Vec<_>>(), vec!["S", "A"]);
        assert_eq!(grammar.get("S").unwrap(), &[prod(&["A", "b"]), prod(&["d"])]);
        assert_eq!(grammar.first_nonterminal(), Some("S"));
        assert!(grammar.get("B").is_none());
    }

    #[test]
    fn rejects_empty_nonterminal() {
        let mut grammar = Grammar::new();
        assert_eq!(grammar.add_rule("", vec![prod(&["a"])]), Err(GrammarErrorType::EmptyNonterminal));
        assert!(grammar.is_empty());
    }

    #[test]
    fn set_rule_replaces_in_place() {
        let mut grammar = Grammar::from_pairs(vec![
            ("S", vec![prod(&["a"])]),
            ("T", vec![prod(&["b"])]),
        ]).unwrap();
        grammar.set_rule("S".to_string(), vec![prod(&["c"])]);

        assert_eq!(grammar.nonterminals().collect::<Vec<_>>(), vec!["S", "T"]);
        assert_eq!(grammar.get("S").unwrap(), &[prod(&["c"])]);
    }

    #[test]
    fn format_grammar() {
        let grammar = Grammar::from_pairs(vec![
            ("S", vec![prod(&["b", "S'"])]),
            ("S'", vec![prod(&["a", "S'"]), Production::epsilon()]),
        ]).unwrap();

        assert_eq!(grammar.to_string(), "S -> b S'\nS' -> a S' | ε\n");
    }

    #[test]
    fn empty_production_prints_as_epsilon() {
        assert_eq!(Production::default().to_string(), EPSILON);
        assert!(Production::epsilon().is_epsilon());
        assert!(!prod(&["ε", "A'"]).is_epsilon());
    }

    #[test]
    fn production_helpers() {
        let p = prod(&["E", "+", "E"]);
        assert_eq!(p.count(&Symbol::from("E")), 2);
        assert_eq!(p.suffix(1), prod(&["+", "E"]));
        assert_eq!(p.suffix(5), Production::default());
        assert!(p.starts_with(&[Symbol::from("E"), Symbol::from("+")]));
        assert_eq!(p.appended(Symbol::from("x")), prod(&["E", "+", "E", "x"]));
    }

    #[test]
    fn used_names_cover_symbols() {
        let grammar = Grammar::from_pairs(vec![("S", vec![prod(&["S'", "a"])])]).unwrap();
        let names = grammar.used_names();
        assert!(names.contains("S"));
        assert!(names.contains("S'"));
        assert!(names.contains("a"));
    }
}
