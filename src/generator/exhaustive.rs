use std::collections::{BTreeSet, HashSet, VecDeque};

use super::GenerateErrorType;
use crate::grammar::{Grammar, Symbol};

// Every sentence of at most `max_len` terminals derivable from `start`.
// Sentential forms are expanded leftmost-first, breadth-first, and dropped as
// soon as they hold more than `max_len` terminals. `budget` caps the number of
// forms looked at; running out of it is an error rather than a silently
// partial answer.
pub fn enumerate(grammar: &Grammar, start: &str, max_len: usize, budget: usize) -> Result<BTreeSet<Vec<String>>, GenerateErrorType> {
    if !grammar.contains(start) {
        return Err(GenerateErrorType::UnknownStart(start.to_string()));
    }

    let mut sentences = BTreeSet::new();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([vec![Symbol::new(start)]]);
    let mut processed = 0;

    while let Some(form) = queue.pop_front() {
        processed += 1;
        if processed > budget {
            return Err(GenerateErrorType::LimitReached(budget));
        }

        let Some(i) = form.iter().position(|s| grammar.is_nonterminal(s)) else {
            sentences.insert(form.iter().map(|s| s.as_str().to_string()).collect());
            continue;
        };

        for production in grammar.get(form[i].as_str()).unwrap_or(&[]) {
            let next: Vec<Symbol> = form[..i].iter()
                .chain(production.symbols().iter().filter(|s| !s.is_epsilon()))
                .chain(&form[i + 1..])
                .cloned()
                .collect();
            let terminals = next.iter().filter(|s| !grammar.is_nonterminal(s)).count();
            if terminals <= max_len && seen.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }

    Ok(sentences)
}
