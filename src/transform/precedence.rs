use std::collections::HashMap;

use itertools::Itertools;

use super::{TransformErrorType, TransformResult};
use crate::grammar::{Grammar, NameFixer, Production, Rule, Symbol};
use crate::log::Log;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

// Precedence rank and associativity of each operator.
// Ranks come from the position in the user's list (first listed = 0). When the
// levels are built, the highest rank ends up innermost and the lowest rank
// outermost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorTable {
    precedence: HashMap<Symbol, usize>,
    associativity: HashMap<Symbol, Associativity>,
}

impl OperatorTable {
    pub fn new(precedence: HashMap<Symbol, usize>, associativity: HashMap<Symbol, Associativity>) -> Self {
        OperatorTable { precedence, associativity }
    }

    pub fn rank(&self, op: &Symbol) -> Option<usize> {
        self.precedence.get(op).copied()
    }

    pub fn associativity(&self, op: &Symbol) -> Option<Associativity> {
        self.associativity.get(op).copied()
    }

    pub fn is_operator(&self, op: &Symbol) -> bool {
        self.precedence.contains_key(op)
    }
}

// The operator of an alternative like `E + E`: its second symbol, if it has a rank
fn operator_of<'a>(production: &'a Production, operators: &OperatorTable) -> Option<&'a Symbol> {
    production.get(1).filter(|op| operators.is_operator(op))
}

// Every operator used by the rule must be in both tables. A `A x A` alternative
// counts as an operator alternative even when `x` isn't in the precedence list
fn check_operators(rule: &Rule, operators: &OperatorTable) -> TransformResult<()> {
    let symbol = rule.symbol();
    for p in &rule.productions {
        if let [left, op, right] = p.symbols() {
            if *left == symbol && *right == symbol && !operators.is_operator(op) {
                return Err(TransformErrorType::MissingPrecedence {
                    nonterminal: rule.name.clone(),
                    operator: op.to_string(),
                });
            }
        }
        if let Some(op) = operator_of(p, operators) {
            if operators.associativity(op).is_none() {
                return Err(TransformErrorType::MissingAssociativity {
                    nonterminal: rule.name.clone(),
                    operator: op.to_string(),
                });
            }
        }
    }
    Ok(())
}

// Builds the chain `A_r1`, `A_r1_r2`, ... from the highest rank down to the
// lowest, each level using the previous one as operand
fn build_levels(rule: &Rule, operators: &OperatorTable, names: &mut NameFixer) -> Vec<(String, Vec<Production>)> {
    let terms = rule.productions.iter().filter(|p| p.len() == 1).cloned().collect_vec();
    let ops = rule.productions.iter()
        .filter_map(|p| operator_of(p, operators))
        .unique()
        .collect_vec();
    let ranks = ops.iter()
        .filter_map(|op| operators.rank(op))
        .sorted()
        .rev()
        .dedup()
        .collect_vec();

    let mut levels = Vec::with_capacity(ranks.len());
    let mut previous = rule.name.clone();
    for rank in ranks {
        let current = names.unique(format!("{previous}_{rank}"));
        let symbol_previous = Symbol::new(previous.as_str());
        let symbol_current = Symbol::new(current.as_str());

        let (left, right): (Vec<&Symbol>, Vec<&Symbol>) = ops.iter()
            .copied()
            .filter(|op| operators.rank(op) == Some(rank))
            .partition(|op| operators.associativity(op) == Some(Associativity::Left));

        let mut productions = terms.clone();
        productions.extend(left.into_iter()
            .map(|op| Production::new(vec![symbol_previous.clone(), op.clone(), symbol_current.clone()])));
        productions.extend(right.into_iter()
            .map(|op| Production::new(vec![symbol_current.clone(), op.clone(), symbol_previous.clone()])));

        levels.push((current.clone(), productions));
        previous = current;
    }
    levels
}

/// Rewrites every nonterminal that has operator alternatives (`E -> E + E`, the
/// operator being the second symbol) into a chain of precedence levels.
///
/// With `* > +` (ranks 0 and 1), both left-associative:
/// ```text
/// E -> E + E | E * E | id
/// ```
/// becomes
/// ```text
/// E     -> E_1_0
/// E_1   -> id | E + E_1
/// E_1_0 -> id | E_1 * E_1_0
/// ```
/// Every level keeps all the single-symbol alternatives. Right-associative
/// operators give `current op previous` instead of `previous op current`.
/// Any other alternative of a rewritten nonterminal, like `( E )`, has no place
/// in the levels: it is dropped and a warning naming it goes to `log`.
///
/// The result holds every nonterminal of `grammar`: rewritten ones are followed
/// by their levels, the others are copied unchanged.
pub fn disambiguate(grammar: &Grammar, operators: &OperatorTable, log: &mut Log) -> TransformResult<Grammar> {
    let mut names = NameFixer::for_grammar(grammar);
    let mut result = Grammar::with_capacity(grammar.len());

    for rule in grammar.rules() {
        check_operators(rule, operators)?;
        if !rule.productions.iter().any(|p| operator_of(p, operators).is_some()) {
            result.set_rule(rule.name.clone(), rule.productions.clone());
            continue;
        }

        let levels = build_levels(rule, operators, &mut names);
        let Some((outermost, _)) = levels.last() else {
            result.set_rule(rule.name.clone(), rule.productions.clone());
            continue;
        };

        for dropped in rule.productions.iter().filter(|p| p.len() != 1 && operator_of(p, operators).is_none()) {
            log.add_warning(format!("{}: alternative `{}` is neither a single symbol nor an operator alternative, dropped",
                rule.name, dropped));
        }
        log.add_note(format!("{}: split into precedence levels {}",
            rule.name, levels.iter().map(|(name, _)| name).join(", ")));

        result.set_rule(rule.name.clone(), vec![Production::new(vec![Symbol::new(outermost.as_str())])]);
        for (name, productions) in levels {
            result.set_rule(name, productions);
        }
    }

    Ok(result)
}
