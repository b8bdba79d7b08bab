use crate::types::Edge;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Named, directional edge label (e.g. "call" / "called by")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Relation {
    forward: Arc<str>,
    reverse: Arc<str>,
}

impl Relation {
    pub fn new(forward: impl AsRef<str>, reverse: impl AsRef<str>) -> Self {
        Self {
            forward: Arc::from(forward.as_ref()),
            reverse: Arc::from(reverse.as_ref()),
        }
    }

    /// Name read along head -> tail ("A call B"); also the registry key
    pub fn forward_name(&self) -> &str {
        &self.forward
    }

    /// Name read along tail -> head ("B called by A")
    pub fn reverse_name(&self) -> &str {
        &self.reverse
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.forward)
    }
}

/// Predicate over relations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RelationSet {
    #[default]
    Empty,
    All,
    Enumerated(BTreeSet<Relation>),
}

impl RelationSet {
    pub fn empty() -> Self {
        Self::Empty
    }

    pub fn all() -> Self {
        Self::All
    }

    pub fn single(relation: Relation) -> Self {
        Self::Enumerated(BTreeSet::from([relation]))
    }

    pub fn of<I>(relations: I) -> Self
    where
        I: IntoIterator<Item = Relation>,
    {
        let set: BTreeSet<Relation> = relations.into_iter().collect();
        if set.is_empty() {
            Self::Empty
        } else {
            Self::Enumerated(set)
        }
    }

    /// Relations of `universe` that `matcher` follows head -> tail
    pub fn forward_of<'a, I>(matcher: &EdgeMatcher, universe: I) -> Self
    where
        I: IntoIterator<Item = &'a Relation>,
    {
        Self::of(
            universe
                .into_iter()
                .filter(|r| matcher.matches_forward(r))
                .cloned(),
        )
    }

    /// Relations of `universe` that `matcher` follows tail -> head
    pub fn backward_of<'a, I>(matcher: &EdgeMatcher, universe: I) -> Self
    where
        I: IntoIterator<Item = &'a Relation>,
    {
        Self::of(
            universe
                .into_iter()
                .filter(|r| matcher.matches_backward(r))
                .cloned(),
        )
    }

    pub fn contains(&self, relation: &Relation) -> bool {
        match self {
            Self::Empty => false,
            Self::All => true,
            Self::Enumerated(set) => set.contains(relation),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn union(&self, other: &RelationSet) -> RelationSet {
        match (self, other) {
            (Self::All, _) | (_, Self::All) => Self::All,
            (Self::Empty, x) | (x, Self::Empty) => x.clone(),
            (Self::Enumerated(a), Self::Enumerated(b)) => Self::of(a.union(b).cloned()),
        }
    }

    pub fn intersection(&self, other: &RelationSet) -> RelationSet {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Empty) => Self::Empty,
            (Self::All, x) | (x, Self::All) => x.clone(),
            (Self::Enumerated(a), Self::Enumerated(b)) => Self::of(a.intersection(b).cloned()),
        }
    }
}

/// How an edge satisfies an [`EdgeMatcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMatch {
    Neither,
    Forward,
    Backward,
    Both,
}

impl EdgeMatch {
    pub fn is_forward(self) -> bool {
        matches!(self, EdgeMatch::Forward | EdgeMatch::Both)
    }

    pub fn is_backward(self) -> bool {
        matches!(self, EdgeMatch::Backward | EdgeMatch::Both)
    }
}

/// Direction-aware edge rule: one relation set per traversal direction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeMatcher {
    forward: RelationSet,
    backward: RelationSet,
}

impl EdgeMatcher {
    pub fn new(forward: RelationSet, backward: RelationSet) -> Self {
        Self { forward, backward }
    }

    /// Matches nothing in either direction
    pub fn none() -> Self {
        Self::default()
    }

    pub fn forward(relations: RelationSet) -> Self {
        Self::new(relations, RelationSet::Empty)
    }

    pub fn backward(relations: RelationSet) -> Self {
        Self::new(RelationSet::Empty, relations)
    }

    pub fn both(relations: RelationSet) -> Self {
        Self::new(relations.clone(), relations)
    }

    /// Build from per-relation direction flags `(relation, forward, backward)`
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = (Relation, bool, bool)>,
    {
        let mut forward = BTreeSet::new();
        let mut backward = BTreeSet::new();
        for (relation, fwd, bwd) in flags {
            if fwd {
                forward.insert(relation.clone());
            }
            if bwd {
                backward.insert(relation);
            }
        }
        Self::new(RelationSet::of(forward), RelationSet::of(backward))
    }

    /// Copy the direction flags of another rule, restricted to `universe`
    pub fn copy_of<'a, I>(other: &EdgeMatcher, universe: I) -> Self
    where
        I: IntoIterator<Item = &'a Relation> + Clone,
    {
        Self::new(
            RelationSet::forward_of(other, universe.clone()),
            RelationSet::backward_of(other, universe),
        )
    }

    /// Same relations, directions swapped
    pub fn inverted(&self) -> Self {
        Self::new(self.backward.clone(), self.forward.clone())
    }

    pub fn forward_set(&self) -> &RelationSet {
        &self.forward
    }

    pub fn backward_set(&self) -> &RelationSet {
        &self.backward
    }

    pub fn matches_forward(&self, relation: &Relation) -> bool {
        self.forward.contains(relation)
    }

    pub fn matches_backward(&self, relation: &Relation) -> bool {
        self.backward.contains(relation)
    }

    pub fn classify(&self, edge: &Edge) -> EdgeMatch {
        match (
            self.matches_forward(&edge.relation),
            self.matches_backward(&edge.relation),
        ) {
            (true, true) => EdgeMatch::Both,
            (true, false) => EdgeMatch::Forward,
            (false, true) => EdgeMatch::Backward,
            (false, false) => EdgeMatch::Neither,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Node, NodeKind};

    fn uses() -> Relation {
        Relation::new("uses", "used by")
    }

    fn extends() -> Relation {
        Relation::new("extends", "extended by")
    }

    #[test]
    fn test_relation_set_contains() {
        assert!(!RelationSet::empty().contains(&uses()));
        assert!(RelationSet::all().contains(&uses()));

        let single = RelationSet::single(uses());
        assert!(single.contains(&uses()));
        assert!(!single.contains(&extends()));

        assert_eq!(RelationSet::of(Vec::new()), RelationSet::Empty);
    }

    #[test]
    fn test_relation_set_algebra() {
        let a = RelationSet::single(uses());
        let b = RelationSet::single(extends());

        let both = a.union(&b);
        assert!(both.contains(&uses()) && both.contains(&extends()));
        assert_eq!(a.intersection(&b), RelationSet::Empty);
        assert_eq!(a.union(&RelationSet::All), RelationSet::All);
        assert_eq!(a.intersection(&RelationSet::All), a);
    }

    #[test]
    fn test_classify_edge() {
        let edge = Edge::new(
            Node::new("a", "a", NodeKind::Type),
            Node::new("b", "b", NodeKind::Type),
            uses(),
        );

        assert_eq!(
            EdgeMatcher::forward(RelationSet::single(uses())).classify(&edge),
            EdgeMatch::Forward
        );
        assert_eq!(
            EdgeMatcher::backward(RelationSet::single(uses())).classify(&edge),
            EdgeMatch::Backward
        );
        assert_eq!(
            EdgeMatcher::both(RelationSet::All).classify(&edge),
            EdgeMatch::Both
        );
        assert_eq!(EdgeMatcher::none().classify(&edge), EdgeMatch::Neither);
    }

    #[test]
    fn test_flags_and_copy() {
        let matcher = EdgeMatcher::from_flags([(uses(), true, false), (extends(), true, true)]);
        assert!(matcher.matches_forward(&uses()));
        assert!(!matcher.matches_backward(&uses()));
        assert!(matcher.matches_backward(&extends()));

        let universe = [uses()];
        let copied = EdgeMatcher::copy_of(&matcher, universe.iter());
        assert!(copied.matches_forward(&uses()));
        assert!(!copied.matches_forward(&extends()));

        let inverted = matcher.inverted();
        assert!(inverted.matches_backward(&uses()));
        assert!(!inverted.matches_forward(&uses()));
    }
}
