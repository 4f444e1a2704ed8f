//! The formula model: a tree of Top / Atom / NotAtom / And / Or nodes.
//!
//! Each node is assigned a dense, unique pre-order index at construction and
//! again after any substitution (see [Formula::reindex]). The index range
//! `[0, len)` is the alphabet from which [crate::token::Token]s are built.

use std::fmt;

/// Identifier type for nodes of a [Formula].
///
/// Serves as an index into [Formula::nodes]. Dense and unique for the
/// lifetime of a formula; stable until the next [Formula::reindex].
pub type NodeId = usize;

/// The kind of a formula node, carrying child identifiers where relevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// The constant true. Carries a free-variable label when it stands in
    /// for a subformula proven by [crate::substitute::substitute_top]; the
    /// label only affects display, never the firing/seeding rules.
    Top(Option<char>),
    /// A propositional atom.
    Atom(String),
    /// A negated propositional atom.
    NotAtom(String),
    /// A conjunction of two sub-formulas.
    And(NodeId, NodeId),
    /// A disjunction of two sub-formulas.
    Or(NodeId, NodeId),
}

/// A single node of a [Formula]'s syntax tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: Kind,
    /// The parent of this node, or `None` at the root.
    pub parent: Option<NodeId>,
}

/// A parentless, un-indexed formula tree, as built by a parser or by
/// [crate::substitute::substitute_top] before it is absorbed into a
/// [Formula] via [Formula::new].
#[derive(Debug, Clone)]
pub enum RawFormula {
    Top(Option<char>),
    Atom(String),
    NotAtom(String),
    And(Box<RawFormula>, Box<RawFormula>),
    Or(Box<RawFormula>, Box<RawFormula>),
}

/// A propositional formula: atoms, negated atoms, Top, And and Or.
///
/// Stored as a flat arena in pre-order, so a node's identifier is also its
/// position in a pre-order walk of the tree (see [Formula::reindex]).
/// Immutable during the coalescence of a single dimension; between
/// dimensions, [crate::substitute::substitute_top] may replace it wholesale
/// with a structurally smaller formula.
#[derive(Debug, Clone)]
pub struct Formula {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Formula {
    /// Builds a [Formula] from a parentless tree, assigning pre-order
    /// indices and parent links as it goes (see [Formula::reindex]).
    pub fn new(raw: RawFormula) -> Self {
        let mut nodes = Vec::new();
        let root = Self::index_into(&raw, &mut nodes, None);
        Formula { nodes, root }
    }

    fn index_into(raw: &RawFormula, nodes: &mut Vec<Node>, parent: Option<NodeId>) -> NodeId {
        let id = nodes.len();
        nodes.push(Node {
            kind: Kind::Top(None), // placeholder, overwritten below
            parent,
        });
        nodes[id].kind = match raw {
            RawFormula::Top(label) => Kind::Top(*label),
            RawFormula::Atom(s) => Kind::Atom(s.clone()),
            RawFormula::NotAtom(s) => Kind::NotAtom(s.clone()),
            RawFormula::And(l, r) => {
                let left = Self::index_into(l, nodes, Some(id));
                let right = Self::index_into(r, nodes, Some(id));
                Kind::And(left, right)
            }
            RawFormula::Or(l, r) => {
                let left = Self::index_into(l, nodes, Some(id));
                let right = Self::index_into(r, nodes, Some(id));
                Kind::Or(left, right)
            }
        };
        id
    }

    /// Re-assigns pre-order indices to this formula, as if freshly parsed.
    ///
    /// Used by [crate::substitute::substitute_top] after building a new,
    /// smaller formula: "indices are dense, unique, and stable for the
    /// lifetime of the current formula" is re-established by this call.
    pub fn reindex(self) -> Self {
        Self::new(self.to_raw())
    }

    fn to_raw(&self) -> RawFormula {
        self.to_raw_at(self.root)
    }

    fn to_raw_at(&self, id: NodeId) -> RawFormula {
        match &self.nodes[id].kind {
            Kind::Top(label) => RawFormula::Top(*label),
            Kind::Atom(s) => RawFormula::Atom(s.clone()),
            Kind::NotAtom(s) => RawFormula::NotAtom(s.clone()),
            Kind::And(l, r) => {
                RawFormula::And(Box::new(self.to_raw_at(*l)), Box::new(self.to_raw_at(*r)))
            }
            Kind::Or(l, r) => {
                RawFormula::Or(Box::new(self.to_raw_at(*l)), Box::new(self.to_raw_at(*r)))
            }
        }
    }

    /// Returns the number of nodes of this formula (the `len` of spec.md).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the identifier of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the kind of a node.
    pub fn kind(&self, id: NodeId) -> &Kind {
        &self.nodes[id].kind
    }

    /// Returns the parent of a node, or `None` if it is the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Whether a node is Top, named or not - the Top rule of spec.md §4.4
    /// makes no distinction between the two.
    pub fn is_top(&self, id: NodeId) -> bool {
        matches!(self.nodes[id].kind, Kind::Top(_))
    }

    /// Returns the sibling of a node under its parent, if it has one.
    ///
    /// Panics if `id` is the root or its parent is not And/Or, which would
    /// indicate a malformed tree (a programming error in a collaborator).
    pub fn sibling(&self, id: NodeId) -> NodeId {
        let parent = self.parent(id).expect("sibling of root requested");
        match self.kind(parent) {
            Kind::And(l, r) | Kind::Or(l, r) => {
                if *l == id {
                    *r
                } else if *r == id {
                    *l
                } else {
                    unreachable!("parent/child links inconsistent")
                }
            }
            _ => unreachable!("parent of a node must be And or Or"),
        }
    }

    /// Returns an index -> [Kind] table, i.e. [Formula::flatten] of spec.md.
    pub fn flatten(&self) -> &[Node] {
        &self.nodes
    }

    /// Counts the number of distinct atomic symbols in this formula.
    pub fn n_free_names(&self) -> usize {
        let mut names: Vec<&str> = self
            .nodes
            .iter()
            .filter_map(|node| match &node.kind {
                Kind::Atom(s) | Kind::NotAtom(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }

    /// Writes a node of this formula to a formatter.
    fn format_node(&self, id: NodeId, f: &mut fmt::Formatter, latex: bool, parens: bool) -> fmt::Result {
        match &self.nodes[id].kind {
            Kind::Top(Some(label)) => write!(f, "{label}"),
            Kind::Top(None) => write!(f, "{}", if latex { "\\top" } else { "T" }),
            Kind::Atom(s) => write!(f, "{s}"),
            Kind::NotAtom(s) => write!(f, "{}{s}", if latex { "\\neg " } else { "\u{ac}" }),
            Kind::And(l, r) => self.format_binary(f, *l, *r, latex, true, parens),
            Kind::Or(l, r) => self.format_binary(f, *l, *r, latex, false, parens),
        }
    }

    fn format_binary(
        &self,
        f: &mut fmt::Formatter,
        left: NodeId,
        right: NodeId,
        latex: bool,
        is_and: bool,
        parens: bool,
    ) -> fmt::Result {
        let op = if latex {
            if is_and { " \\land " } else { " \\lor " }
        } else if is_and {
            " \u{2227} "
        } else {
            " \u{2228} "
        };
        if parens {
            write!(f, "(")?;
        }
        self.format_node(left, f, latex, true)?;
        write!(f, "{op}")?;
        self.format_node(right, f, latex, true)?;
        if parens {
            write!(f, ")")?;
        }
        Ok(())
    }

    /// Renders the subtree rooted at `id`, e.g. for the substitution print
    /// hook of spec.md §6 (`<v> := <print(f)>` where `f` is the substituted
    /// subformula, not the whole formula).
    pub fn subtree_to_string(&self, id: NodeId, latex: bool) -> String {
        struct Subtree<'a> {
            formula: &'a Formula,
            id: NodeId,
            latex: bool,
        }
        impl<'a> fmt::Display for Subtree<'a> {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                self.formula.format_node(self.id, f, self.latex, false)
            }
        }
        Subtree {
            formula: self,
            id,
            latex,
        }
        .to_string()
    }

    /// Renders this formula with LaTeX operators instead of ASCII/Unicode ones.
    pub fn to_latex(&self) -> String {
        struct Latex<'a>(&'a Formula);
        impl<'a> fmt::Display for Latex<'a> {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                self.0.format_node(self.0.root, f, true, false)
            }
        }
        Latex(self).to_string()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.format_node(self.root, f, false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(s: &str) -> RawFormula {
        RawFormula::Atom(s.to_string())
    }
    fn not_atom(s: &str) -> RawFormula {
        RawFormula::NotAtom(s.to_string())
    }

    #[test]
    fn indices_are_dense_and_unique() {
        let raw = RawFormula::Or(Box::new(atom("a")), Box::new(not_atom("a")));
        let f = Formula::new(raw);
        assert_eq!(f.len(), 3);
        let mut seen: Vec<usize> = (0..f.len()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn parent_links_consistent() {
        let raw = RawFormula::And(Box::new(atom("a")), Box::new(not_atom("b")));
        let f = Formula::new(raw);
        let root = f.root();
        if let Kind::And(l, r) = f.kind(root).clone() {
            assert_eq!(f.parent(l), Some(root));
            assert_eq!(f.parent(r), Some(root));
            assert_eq!(f.sibling(l), r);
            assert_eq!(f.sibling(r), l);
        } else {
            panic!("expected And at root");
        }
        assert_eq!(f.parent(root), None);
    }

    #[test]
    fn n_free_names_counts_distinct_atoms() {
        let raw = RawFormula::And(
            Box::new(RawFormula::Or(Box::new(atom("a")), Box::new(not_atom("a")))),
            Box::new(RawFormula::Or(Box::new(atom("b")), Box::new(not_atom("b")))),
        );
        let f = Formula::new(raw);
        assert_eq!(f.n_free_names(), 2);
    }

    #[test]
    fn display_top() {
        let f = Formula::new(RawFormula::Top(None));
        assert_eq!(f.to_string(), "T");
    }

    #[test]
    fn display_named_top_shows_label() {
        let f = Formula::new(RawFormula::Top(Some('A')));
        assert_eq!(f.to_string(), "A");
        assert!(f.is_top(f.root()));
    }

    #[test]
    fn reindex_after_rebuild_is_dense() {
        let raw = RawFormula::Or(Box::new(atom("a")), Box::new(not_atom("a")));
        let f = Formula::new(raw).reindex();
        assert_eq!(f.len(), 3);
    }
}
