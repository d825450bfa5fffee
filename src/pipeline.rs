/*
    Runs the transformations in order and keeps every intermediate grammar
*/

use crate::grammar::Grammar;
use crate::log::Log;
use crate::transform::*;

// Which grammar the precedence rewrite is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisambiguationSource {
    // The output of left factoring.
    #[default]
    LeftFactored,
    // The grammar as it was given.
    Original,
}

#[derive(Debug, Clone)]
pub struct Request {
    pub grammar: Grammar,
    // Only needed if the grammar turns out to be ambiguous
    pub operators: Option<OperatorTable>,
    pub source: DisambiguationSource,
}

impl Request {
    pub fn new(grammar: Grammar) -> Self {
        Request {
            grammar,
            operators: None,
            source: DisambiguationSource::default(),
        }
    }

    pub fn with_operators(mut self, operators: OperatorTable) -> Self {
        self.operators = Some(operators);
        self
    }

    pub fn with_source(mut self, source: DisambiguationSource) -> Self {
        self.source = source;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub original: Grammar,
    pub without_left_recursion: Grammar,
    pub left_factored: Grammar,
    // Checked on the original grammar
    pub ambiguity: Option<SelfReference>,
    // Only present when the grammar is ambiguous and operators were given
    pub disambiguated: Option<Grammar>,
    pub log: Log,
}

impl Outcome {
    pub fn is_ambiguous(&self) -> bool {
        self.ambiguity.is_some()
    }

    // The most transformed grammar available.
    pub fn last(&self) -> &Grammar {
        self.disambiguated.as_ref().unwrap_or(&self.left_factored)
    }
}

// Removes left recursion, then left-factors the result. If the original
// grammar looks ambiguous and operators are given, rewrites it with
// precedence levels too.
pub fn run(request: Request) -> TransformResult<Outcome> {
    let Request { grammar, operators, source } = request;
    let mut log = Log::new();

    let without_left_recursion = remove_left_recursion(&grammar, &mut log);
    let left_factored = left_factor(&without_left_recursion, &mut log);
    let ambiguity = find_ambiguity(&grammar);

    let disambiguated = match (&ambiguity, operators) {
        (Some(found), Some(operators)) => {
            log.add_note(format!("{}: {} refers to itself {} times", found.nonterminal, found.production, found.count));
            let input = match source {
                DisambiguationSource::LeftFactored => &left_factored,
                DisambiguationSource::Original => &grammar,
            };
            Some(disambiguate(input, &operators, &mut log)?)
        }
        (Some(_), None) => {
            log.add_warning("the grammar looks ambiguous but no operator precedence was given");
            None
        }
        (None, _) => None,
    };

    Ok(Outcome {
        original: grammar,
        without_left_recursion,
        left_factored,
        ambiguity,
        disambiguated,
        log,
    })
}
