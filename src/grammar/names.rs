use std::collections::HashSet;

use super::Grammar;

// Hands out nonterminal names that clash with nothing already in use
#[derive(Clone, Debug)]
pub struct NameFixer {
    taken: HashSet<String>,
}

impl NameFixer {
    // Pre-filled with every nonterminal and symbol of `grammar`, so a new name
    // can't be mistaken for a terminal either
    pub fn for_grammar(grammar: &Grammar) -> Self {
        NameFixer { taken: grammar.used_names() }
    }

    // `name` if it's free, otherwise `name` with quotes appended until it is.
    // The result is reserved
    pub fn unique(&mut self, mut name: String) -> String {
        while self.taken.contains(&name) {
            name.push('\'');
        }
        self.taken.insert(name.clone());
        name
    }

    // `parent'`, or with more quotes if that one is taken
    pub fn primed(&mut self, parent: &str) -> String {
        self.unique(format!("{parent}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tests::prod;

    #[test]
    fn primed_adds_quotes_until_free() {
        let grammar = Grammar::from_pairs(vec![
            ("A", vec![prod(&["A'", "b"])]),
            ("A''", vec![prod(&["c"])]),
        ]).unwrap();
        let mut fixer = NameFixer::for_grammar(&grammar);

        assert_eq!(fixer.primed("A"), "A'''");
        assert_eq!(fixer.primed("A"), "A''''");
        assert_eq!(fixer.primed("B"), "B'");
    }

    #[test]
    fn unique_keeps_free_names() {
        let grammar = Grammar::from_pairs(vec![("E_1", vec![prod(&["id"])])]).unwrap();
        let mut fixer = NameFixer::for_grammar(&grammar);
        assert_eq!(fixer.unique("E_0".to_string()), "E_0");
        assert_eq!(fixer.unique("E_1".to_string()), "E_1'");
        assert_eq!(fixer.unique("E_1".to_string()), "E_1''");
    }
}
