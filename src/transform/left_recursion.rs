use itertools::Itertools;

use crate::grammar::{Grammar, NameFixer, Production, Symbol};
use crate::log::Log;

/// Removes immediate left recursion from every nonterminal.
///
/// ```text
/// A -> A α1 | ... | A αm | β1 | ... | βn
/// ```
/// becomes
/// ```text
/// A  -> β1 A' | ... | βn A'
/// A' -> α1 A' | ... | αm A' | ε
/// ```
/// `A'` is placed right after `A`. The `βi` get `A'` appended as they are, which
/// includes an `ε` alternative. Recursion going through other nonterminals
/// (`A -> B x`, `B -> A y`) is not detected and is left as it is.
pub fn remove_left_recursion(grammar: &Grammar, log: &mut Log) -> Grammar {
    let mut names = NameFixer::for_grammar(grammar);
    let mut result = Grammar::with_capacity(grammar.len());

    for rule in grammar.rules() {
        let symbol = rule.symbol();
        // `A -> A` derives nothing new and would turn into `A' -> A'`
        let (cycles, productions): (Vec<_>, Vec<_>) = rule.productions.iter()
            .partition(|p| p.symbols() == [symbol.clone()]);
        if !cycles.is_empty() {
            log.add_warning(format!("{}: dropped the alternative {} -> {}", rule.name, rule.name, rule.name));
        }
        let (recursive, fine): (Vec<&Production>, Vec<&Production>) = productions.into_iter()
            .partition(|p| p.first() == Some(&symbol));

        if recursive.is_empty() {
            result.set_rule(rule.name.clone(), fine.into_iter().cloned().collect());
            continue;
        }

        let prime = names.primed(&rule.name);
        let symbol_prime = Symbol::new(prime.as_str());

        let productions = fine.iter()
            .map(|p| p.appended(symbol_prime.clone()))
            .collect_vec();
        let mut tail = recursive.iter()
            .map(|p| p.suffix(1).appended(symbol_prime.clone()))
            .collect_vec();
        tail.push(Production::epsilon());

        if productions.is_empty() {
            log.add_warning(format!(
                "{}: every alternative is left-recursive, it no longer derives anything", rule.name));
        }
        log.add_note(format!("{}: removed left recursion, added {}", rule.name, prime));

        result.set_rule(rule.name.clone(), productions);
        result.set_rule(prime, tail);
    }

    result
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::grammar::tests::prod;
    use crate::parser::{parse_text, SymbolMode};
    use std::path::Path;

    fn grammar(text: &str) -> Grammar {
        let parsed = parse_text(text, Path::new("test.cfg"), SymbolMode::Words);
        assert!(parsed.errors.is_empty());
        parsed.grammar
    }

    #[test]
    fn simple_left_recursion() {
        let mut log = Log::new();
        let result = remove_left_recursion(&grammar("S -> S a | b"), &mut log);

        assert_eq!(result.to_string(), "S -> b S'\nS' -> a S' | ε\n");
        assert_eq!(log.notes().count(), 1);
        assert_eq!(log.num_warnings(), 0);
    }

    #[test]
    fn several_recursive_alternatives() {
        let result = remove_left_recursion(&grammar("E -> E + T | E - T | T\nT -> id"), &mut Log::new());

        assert_eq!(result.nonterminals().collect::<Vec<_>>(), vec!["E", "E'", "T"]);
        assert_eq!(result.get("E").unwrap(), &[prod(&["T", "E'"])]);
        assert_eq!(result.get("E'").unwrap(), &[
            prod(&["+", "T", "E'"]),
            prod(&["-", "T", "E'"]),
            Production::epsilon(),
        ]);
        assert_eq!(result.get("T").unwrap(), &[prod(&["id"])]);
    }

    #[test]
    fn epsilon_alternative_gets_prime_appended() {
        let result = remove_left_recursion(&grammar("A -> A x | ε"), &mut Log::new());
        assert_eq!(result.get("A").unwrap(), &[prod(&["ε", "A'"])]);
    }

    #[test]
    fn prime_name_collision() {
        let result = remove_left_recursion(&grammar("A -> A x | y\nA' -> z"), &mut Log::new());

        assert_eq!(result.nonterminals().collect::<Vec<_>>(), vec!["A", "A''", "A'"]);
        assert_eq!(result.get("A").unwrap(), &[prod(&["y", "A''"])]);
        assert_eq!(result.get("A'").unwrap(), &[prod(&["z"])]);
    }

    #[test]
    fn only_recursive_alternatives() {
        let mut log = Log::new();
        let result = remove_left_recursion(&grammar("A -> A x"), &mut log);

        assert!(result.get("A").unwrap().is_empty());
        assert_eq!(result.get("A'").unwrap(), &[prod(&["x", "A'"]), Production::epsilon()]);
        assert_eq!(log.num_warnings(), 1);
    }

    #[test]
    fn self_cycle_is_dropped() {
        let mut log = Log::new();
        let result = remove_left_recursion(&grammar("A -> A | A x | y"), &mut log);

        assert_eq!(result.get("A").unwrap(), &[prod(&["y", "A'"])]);
        assert_eq!(result.get("A'").unwrap(), &[prod(&["x", "A'"]), Production::epsilon()]);
        assert_eq!(log.num_warnings(), 1);
    }

    #[test]
    fn indirect_recursion_is_untouched() {
        let input = grammar("A -> B x | a\nB -> A y | b");
        assert_eq!(remove_left_recursion(&input, &mut Log::new()), input);
    }

    #[test]
    fn empty_rule_passes_through() {
        let input = Grammar::from_pairs(vec![("A", vec![])]).unwrap();
        assert_eq!(remove_left_recursion(&input, &mut Log::new()), input);
    }

    #[test]
    fn input_is_not_modified() {
        let input = grammar("S -> S a | b");
        let copy = input.clone();
        let _ = remove_left_recursion(&input, &mut Log::new());
        assert_eq!(input, copy);
    }

    fn arb_grammar() -> impl Strategy<Value = Grammar> {
        let symbol = prop::sample::select(vec!["A", "B", "C", "a", "b", "ε"]);
        let production = prop::collection::vec(symbol, 1..4)
            .prop_map(|symbols| symbols.into_iter().collect::<Production>());
        let rule = prop::collection::vec(production, 1..5);
        (rule.clone(), rule.clone(), rule).prop_map(|(a, b, c)| {
            Grammar::from_pairs(vec![("A", a), ("B", b), ("C", c)]).unwrap()
        })
    }

    proptest! {
        #[test]
        fn no_alternative_starts_with_its_own_nonterminal(input in arb_grammar()) {
            let result = remove_left_recursion(&input, &mut Log::new());
            for rule in result.rules() {
                let symbol = rule.symbol();
                prop_assert!(rule.productions.iter().all(|p| p.first() != Some(&symbol)));
            }
        }

        #[test]
        fn non_recursive_rules_are_unchanged(input in arb_grammar()) {
            let result = remove_left_recursion(&input, &mut Log::new());
            for rule in input.rules() {
                let symbol = rule.symbol();
                if rule.productions.iter().all(|p| p.first() != Some(&symbol)) {
                    prop_assert_eq!(result.get(&rule.name).unwrap(), rule.productions.as_slice());
                }
            }
        }
    }
}
