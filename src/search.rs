//! The outer proof-search driver: escalates dimension, rebuilds the net,
//! runs the firing fixpoint, and optionally substitutes proven subproofs
//! before retrying (spec.md §4.6).
//!
//! Grounded in `petri_net_coalescence` of the original C source, with its
//! `for (n = 2; n <= n_free + 1; (!substituted) ? n++ : substituted--)`
//! dimension-escalation idiom reproduced as an explicit retry-same-n loop
//! rather than arithmetic on a counter (spec.md §9).

use log::debug;

use crate::fire::run_to_fixpoint;
use crate::formula::{Formula, NodeId};
use crate::net::Net;
use crate::substitute::{substitute_top, PrintHook};

/// The result of a proof search: success records the dimension it
/// succeeded at and the root's pre-substitution index; failure is
/// reported as a negative dimension (spec.md §3 "Result").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofResult {
    pub dimension: i64,
    pub root_index: NodeId,
    pub succeeded: bool,
}

/// Runs the coalescence search over `formula`, escalating dimension from 2
/// up to (at least) `n_free + 1`.
///
/// When `top_optimise` is set, any subproof discovered by [substitute_top]
/// replaces its subtree with a named Top leaf and the same dimension is
/// retried before advancing; `on_substitute` is invoked for every
/// substitution discovered regardless, so it alone decides whether
/// anything gets printed (spec.md §6).
pub fn prove(
    mut formula: Formula,
    top_optimise: bool,
    mut on_substitute: impl FnMut(&Formula, NodeId, char, bool),
) -> ProofResult {
    let original_root = formula.root();
    let cap = (formula.n_free_names() + 1).max(2);
    let mut free_var = 'A';
    let hook: &mut PrintHook = &mut on_substitute;

    let mut n = 2;
    loop {
        debug!("dimension {n}: {formula}");
        let mut net = Net::build(&formula, n);
        if run_to_fixpoint(&formula, &mut net) {
            return ProofResult {
                dimension: n as i64,
                root_index: original_root,
                succeeded: true,
            };
        }

        let result = substitute_top(&formula, &net, free_var, !top_optimise, hook);
        free_var = result.next_free_var;

        if top_optimise && result.substituted {
            formula = result.formula.reindex();
            // retry the same dimension with the reduced formula
            continue;
        }

        if n >= cap {
            return ProofResult {
                dimension: -(n as i64),
                root_index: original_root,
                succeeded: false,
            };
        }
        n += 1;
    }
}
