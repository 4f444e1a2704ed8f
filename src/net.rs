//! The net builder: seeds a 2-D token set and extrapolates it to higher
//! dimensions, then populates a place grid from the resulting tokens.

use crate::formula::{Formula, Kind, NodeId};
use crate::grid::PlaceGrid;
use crate::token::{canonical, Token, TokenStore};

/// An n-dimensional Petri net over a formula's subformula index space: a
/// token store and the place grid populated from it.
pub struct Net {
    pub tokens: TokenStore,
    pub grid: PlaceGrid,
}

impl Net {
    /// Builds a net at dimension `n` for `formula`, seeding at dimension 2
    /// and extrapolating up to `n` (spec.md §4.4, §4.6).
    pub fn build(formula: &Formula, n: usize) -> Self {
        assert!(n >= 2, "coalescence nets require dimension >= 2");
        let mut tokens = seed_2d(formula);
        for k in 3..=n {
            tokens = extrapolate(&tokens, formula.len(), k);
        }
        let grid = populate_grid(formula.len(), &tokens);
        Net { tokens, grid }
    }
}

/// Returns whether a pair of subformula indices seeds a 2-D token, by the
/// Top rule or the Axiom rule (spec.md §4.4).
fn seeds_pair(formula: &Formula, i: NodeId, j: NodeId) -> bool {
    let top_rule = formula.is_top(i) || formula.is_top(j);
    let axiom_rule = match (formula.kind(i), formula.kind(j)) {
        (Kind::Atom(a), Kind::NotAtom(b)) | (Kind::NotAtom(a), Kind::Atom(b)) => a == b,
        _ => false,
    };
    top_rule || axiom_rule
}

/// Enumerates all unordered pairs of subformula indices and seeds the
/// initial 2-D token set (spec.md §4.4 "2-D seeding").
pub fn seed_2d(formula: &Formula) -> TokenStore {
    let len = formula.len();
    let mut store = TokenStore::new(2);
    for i in 0..len {
        for j in i..len {
            if seeds_pair(formula, i, j) {
                store.insert(canonical(vec![i, j]));
            }
        }
    }
    store
}

/// Extrapolates a k-D token set into the full (k+1)-D seed set by
/// appending every subformula index to every existing token (spec.md §4.4
/// "(k->k+1)-D extrapolation").
pub fn extrapolate(tokens: &TokenStore, len: usize, k: usize) -> TokenStore {
    let mut next = TokenStore::new(k);
    for old in tokens.iter() {
        for m in 0..len {
            let mut candidate: Token = old.clone();
            candidate.push(m);
            next.insert(canonical(candidate));
        }
    }
    next
}

/// Marks every token of `tokens` as present in a freshly allocated grid.
pub fn populate_grid(len: usize, tokens: &TokenStore) -> PlaceGrid {
    let mut grid = PlaceGrid::new(len, tokens.dimension());
    for token in tokens.iter() {
        grid.set(token, true);
    }
    grid
}
