//! Parser for the formula surface syntax (see `formula.pest`).
//!
//! Follows the teacher's `parser/sat.rs` / `parser/sat_inline.rs` shape: a
//! `#[derive(Parser)]` struct naming its grammar file, a generated `Rule`
//! enum, and a recursive `parse_pair` that folds pest's parse tree
//! directly into the target type - here `formula::RawFormula`, built
//! bottom-up and handed to `Formula::new` for pre-order indexing.

use std::fmt;

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::formula::{Formula, RawFormula};

#[derive(Parser)]
#[grammar = "formula.pest"]
struct FormulaParser;

/// A recoverable failure to parse a formula string (spec.md §7 "parse error").
#[derive(Debug, Clone)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "failed to parse formula: {}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Parses a formula string into an indexed [Formula].
pub fn parse(input: &str) -> Result<Formula, ParseError> {
    let mut pairs =
        FormulaParser::parse(Rule::formula, input).map_err(|e| ParseError(e.to_string()))?;
    let raw = parse_pair(pairs.next().expect("formula rule always produces one pair"));
    Ok(Formula::new(raw))
}

fn parse_children(pair: Pair<Rule>) -> Vec<RawFormula> {
    pair.into_inner().map(parse_pair).collect()
}

fn parse_pair(pair: Pair<Rule>) -> RawFormula {
    match pair.as_rule() {
        Rule::formula | Rule::expr => parse_pair(pair.into_inner().next().unwrap()),
        Rule::or_expr => {
            let mut children = parse_children(pair);
            let mut acc = children.remove(0);
            for child in children {
                acc = RawFormula::Or(Box::new(acc), Box::new(child));
            }
            acc
        }
        Rule::and_expr => {
            let mut children = parse_children(pair);
            let mut acc = children.remove(0);
            for child in children {
                acc = RawFormula::And(Box::new(acc), Box::new(child));
            }
            acc
        }
        Rule::top => RawFormula::Top(None),
        Rule::not_atom => {
            let name = pair.into_inner().next().unwrap().as_str().to_string();
            RawFormula::NotAtom(name)
        }
        Rule::atom => RawFormula::Atom(pair.as_str().to_string()),
        Rule::ident => unreachable!("ident only appears nested under atom/not_atom"),
        Rule::EOI | Rule::WHITESPACE => unreachable!("silent/end rules never reach parse_pair"),
    }
}
