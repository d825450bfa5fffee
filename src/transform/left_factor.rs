use crate::grammar::{Grammar, NameFixer, Production, Symbol};
use crate::log::Log;

// Longest run of leading symbols shared by all the productions, shrinking a
// candidate that starts as the whole first production
fn common_prefix(productions: &[Production]) -> &[Symbol] {
    let Some((first, rest)) = productions.split_first() else {
        return &[];
    };
    rest.iter().fold(first.symbols(), |prefix, p| {
        let len = prefix.iter().zip(p.symbols()).take_while(|(a, b)| a == b).count();
        &prefix[..len]
    })
}

/// Factors out the prefix common to all the alternatives of each nonterminal.
///
/// ```text
/// A -> α β1 | ... | α βn
/// ```
/// becomes
/// ```text
/// A  -> α A'
/// A' -> β1 | ... | βn
/// ```
/// where an empty `βi` is written `ε`. Nothing happens when the prefix is empty
/// or is the whole first alternative.
///
/// This is a single pass: `A'` isn't factored again even if its own alternatives
/// share a prefix, and alternatives that only share a prefix with some of the
/// others are left alone.
pub fn left_factor(grammar: &Grammar, log: &mut Log) -> Grammar {
    let mut names = NameFixer::for_grammar(grammar);
    let mut result = Grammar::with_capacity(grammar.len());

    for rule in grammar.rules() {
        let prefix = common_prefix(&rule.productions);
        let first = rule.productions.first().map(Production::symbols);
        if prefix.is_empty() || first == Some(prefix) {
            result.set_rule(rule.name.clone(), rule.productions.clone());
            continue;
        }

        let prime = names.primed(&rule.name);
        let head = Production::new(prefix.to_vec()).appended(Symbol::new(prime.as_str()));
        let tail = rule.productions.iter()
            .filter(|p| p.starts_with(prefix))
            .map(|p| {
                let suffix = p.suffix(prefix.len());
                if suffix.is_empty() { Production::epsilon() } else { suffix }
            })
            .collect();

        log.add_note(format!("{}: factored out {}, added {}", rule.name, Production::new(prefix.to_vec()), prime));

        result.set_rule(rule.name.clone(), vec![head]);
        result.set_rule(prime, tail);
    }

    result
}
