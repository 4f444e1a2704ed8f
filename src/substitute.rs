//! Subproof substitution: replaces any And/Or node whose all-parents token
//! has already coalesced to true with a fresh, named Top leaf.
//!
//! Grounded in `petri_net_substitute_top` of the original C source: a
//! bottom-up rebuild of the formula that, at each And/Or node, checks
//! whether the all-self token is marked before recursing into its
//! children, and threads a free-variable letter through the recursion so
//! every substitution gets a distinct name (spec.md §4.7).

use crate::formula::{Formula, Kind, NodeId, RawFormula};
use crate::net::Net;

/// The outcome of one [substitute_top] pass.
pub struct SubstitutionResult {
    pub formula: Formula,
    pub substituted: bool,
    pub next_free_var: char,
}

/// A callback invoked once per subproof substituted, carrying the formula
/// it was found in (for printing the substituted subtree), the node that
/// was replaced, the free-variable letter it was given, and whether the
/// caller has asked for substitution events to be suppressed. Matches
/// spec.md §6's `(f, v, suppress) -> ()` contract: the hook alone decides
/// whether `suppress` actually silences it.
pub type PrintHook<'a> = dyn FnMut(&Formula, NodeId, char, bool) + 'a;

fn next_letter(c: char) -> char {
    ((c as u8) + 1) as char
}

/// Rebuilds `formula` bottom-up, replacing any And/Or node whose all-self
/// token is marked in `net`'s grid with a fresh named Top leaf.
///
/// `free_var` is the letter given to the first substitution found; later
/// substitutions (in pre-order) get successive letters. `suppress_print`
/// is forwarded unchanged to every invocation of `on_substitute`.
pub fn substitute_top(
    formula: &Formula,
    net: &Net,
    free_var: char,
    suppress_print: bool,
    on_substitute: &mut PrintHook,
) -> SubstitutionResult {
    let (raw, substituted, next_free_var) = substitute_node(
        formula,
        net,
        formula.root(),
        free_var,
        suppress_print,
        on_substitute,
    );
    SubstitutionResult {
        formula: Formula::new(raw),
        substituted,
        next_free_var,
    }
}

fn substitute_node(
    formula: &Formula,
    net: &Net,
    id: NodeId,
    free_var: char,
    suppress_print: bool,
    on_substitute: &mut PrintHook,
) -> (RawFormula, bool, char) {
    match formula.kind(id).clone() {
        Kind::And(l, r) | Kind::Or(l, r) => {
            let all_self: Vec<usize> = vec![id; net.tokens.dimension()];
            if net.grid.get(&all_self) {
                on_substitute(formula, id, free_var, suppress_print);
                (RawFormula::Top(Some(free_var)), true, next_letter(free_var))
            } else {
                let is_and = matches!(formula.kind(id), Kind::And(_, _));
                let (left_raw, left_sub, after_left) =
                    substitute_node(formula, net, l, free_var, suppress_print, on_substitute);
                let (right_raw, right_sub, after_right) =
                    substitute_node(formula, net, r, after_left, suppress_print, on_substitute);
                let raw = if is_and {
                    RawFormula::And(Box::new(left_raw), Box::new(right_raw))
                } else {
                    RawFormula::Or(Box::new(left_raw), Box::new(right_raw))
                };
                (raw, left_sub || right_sub, after_right)
            }
        }
        Kind::Top(label) => (RawFormula::Top(label), false, free_var),
        Kind::Atom(s) => (RawFormula::Atom(s), false, free_var),
        Kind::NotAtom(s) => (RawFormula::NotAtom(s), false, free_var),
    }
}
