//! The firing engine: 1-D coalescence along a single axis, and the
//! fixpoint loop that sweeps it across every axis of a net.
//!
//! Grounded in `petri_net_1d_coalescence` / `petri_net_remove_redundant` /
//! `petri_net_fire` of the original C source: a token's move toward its
//! parent is either a prune (every axis already admits the move) or a fire
//! (the sibling place is marked, or the parent is an Or), and a single call
//! performs at most one such event before returning, since mutating the
//! token set mid-iteration would invalidate the iterator (spec.md §4.2,
//! §9 "Iteration invalidation").

use log::trace;

use crate::formula::{Formula, Kind};
use crate::net::Net;
use crate::token::{canonical, Token};

/// Attempts a single fire-or-prune event for axis `axis` of `net`.
///
/// Returns whether an event occurred. On `true`, the token set has been
/// mutated and the caller must not continue iterating the set it was
/// examining before the call.
pub fn coalesce_1d(formula: &Formula, net: &mut Net, axis: usize) -> bool {
    let tokens: Vec<Token> = net.tokens.iter().cloned().collect();
    for token in tokens {
        let this_node = token[axis];
        let parent = match formula.parent(this_node) {
            Some(p) => p,
            None => continue,
        };

        let mut parent_place = token.clone();
        parent_place[axis] = parent;
        let parent_place = canonical(parent_place);

        if net.grid.get(&parent_place) {
            if try_prune(formula, net, &token) {
                trace!("pruned token {:?} (axis {axis})", token);
                return true;
            }
        } else {
            let sibling = formula.sibling(this_node);
            let mut sibling_place = token.clone();
            sibling_place[axis] = sibling;
            let sibling_place = canonical(sibling_place);

            let parent_is_or = matches!(formula.kind(parent), Kind::Or(_, _));
            if net.grid.get(&sibling_place) || parent_is_or {
                net.tokens.remove(&token);
                let mut fired = token.clone();
                fired[axis] = parent;
                let fired = canonical(fired);
                net.grid.set(&fired, true);
                net.tokens.insert(fired.clone());
                trace!("fired token {:?} -> {:?} (axis {axis})", token, fired);
                return true;
            }
        }
    }
    false
}

/// Tests whether every axis of `token` independently admits a parent move,
/// and if so removes it as redundant (spec.md §4.5, "Prune").
///
/// A token already covered by its all-parents image along every axis adds
/// nothing a future coalescence step could not already reach.
fn try_prune(formula: &Formula, net: &mut Net, token: &Token) -> bool {
    for d in 0..token.len() {
        let node = token[d];
        let parent = match formula.parent(node) {
            Some(p) => p,
            None => return false,
        };
        let mut candidate = token.clone();
        candidate[d] = parent;
        let candidate = canonical(candidate);
        if !net.grid.get(&candidate) {
            return false;
        }
    }
    net.tokens.remove(token);
    true
}

/// Runs [coalesce_1d] to a fixpoint across every axis, stopping early as
/// soon as the all-root token appears (spec.md §4.5 "Fixpoint loop").
///
/// Returns whether the all-root token was reached.
pub fn run_to_fixpoint(formula: &Formula, net: &mut Net) -> bool {
    let n = net.tokens.dimension();
    let root_token: Token = vec![formula.root(); n];
    loop {
        let mut fired_this_sweep = false;
        for axis in 0..n {
            if coalesce_1d(formula, net, axis) {
                fired_this_sweep = true;
            }
        }
        if net.tokens.contains(&root_token) {
            return true;
        }
        if !fired_this_sweep {
            return false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::RawFormula;

    fn atom(s: &str) -> RawFormula {
        RawFormula::Atom(s.to_string())
    }
    fn not_atom(s: &str) -> RawFormula {
        RawFormula::NotAtom(s.to_string())
    }

    #[test]
    fn bare_top_reaches_fixpoint_immediately() {
        let f = Formula::new(RawFormula::Top(None));
        let mut net = Net::build(&f, 2);
        assert!(run_to_fixpoint(&f, &mut net));
    }

    #[test]
    fn axiom_pair_coalesces_to_root() {
        let f = Formula::new(RawFormula::Or(Box::new(atom("a")), Box::new(not_atom("a"))));
        let mut net = Net::build(&f, 2);
        assert!(run_to_fixpoint(&f, &mut net));
    }

    #[test]
    fn contradiction_does_not_reach_root() {
        let f = Formula::new(RawFormula::And(Box::new(atom("a")), Box::new(not_atom("a"))));
        let mut net = Net::build(&f, 2);
        assert!(!run_to_fixpoint(&f, &mut net));
    }

    #[test]
    fn nested_disjunction_coalesces_at_dimension_two() {
        // a or (b or not a)
        let f = Formula::new(RawFormula::Or(
            Box::new(atom("a")),
            Box::new(RawFormula::Or(Box::new(atom("b")), Box::new(not_atom("a")))),
        ));
        let mut net = Net::build(&f, 2);
        assert!(run_to_fixpoint(&f, &mut net));
    }

    /// spec.md §8 Invariant #2 "Grid consistency" (every stored token has a
    /// true grid cell) and #3 "Monotone grid" (grid cells are only ever set
    /// true, never false): once a fire or prune event removes a token from
    /// the store, its place in the grid must still read `true`, since
    /// `coalesce_1d`/`try_prune` never call `grid.set(_, false)` anywhere.
    #[test]
    fn firing_removes_a_token_from_the_store_but_never_clears_its_grid_cell() {
        // root=0 (Or), a=1, not a=2; the axiom pair [1, 2] is seeded, then
        // fires toward the root on axis 0, replacing node 1 with its parent.
        let f = Formula::new(RawFormula::Or(Box::new(atom("a")), Box::new(not_atom("a"))));
        let mut net = Net::build(&f, 2);

        let seeded = vec![1, 2];
        assert!(net.tokens.contains(&seeded));
        assert!(net.grid.get(&seeded));

        assert!(coalesce_1d(&f, &mut net, 0));

        // The seeded token fired and left the store...
        assert!(!net.tokens.contains(&seeded));
        // ...but its grid cell was never cleared.
        assert!(net.grid.get(&seeded));

        assert!(run_to_fixpoint(&f, &mut net));
        assert!(!net.tokens.contains(&seeded));
        assert!(net.grid.get(&seeded));
    }
}
