use depscope_graph::{EdgeMatcher, GraphModel, NodeKind, NodeSet};
use std::collections::BTreeSet;
use std::fmt;

/// One step of a path: maps an input node collection to the next match.
///
/// Implementations are pure functions of `(graph, input)`.
pub trait PathMatcher: fmt::Debug + Send + Sync {
    fn next_match(&self, graph: &GraphModel, input: &NodeSet) -> NodeSet;

    /// Short description for logs and UIs
    fn display_name(&self) -> String;
}

/// Follows exactly one edge accepted by an [`EdgeMatcher`]
#[derive(Debug, Clone)]
pub struct EdgeRuleMatcher {
    name: String,
    rule: EdgeMatcher,
}

impl EdgeRuleMatcher {
    pub fn new(name: impl Into<String>, rule: EdgeMatcher) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }

    pub fn rule(&self) -> &EdgeMatcher {
        &self.rule
    }
}

impl PathMatcher for EdgeRuleMatcher {
    fn next_match(&self, graph: &GraphModel, input: &NodeSet) -> NodeSet {
        graph.get_related(input, &self.rule)
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

/// Keeps only nodes whose kind is allowed.
///
/// [`NodeKind::Unknown`] is never allowed, even if listed.
#[derive(Debug, Clone)]
pub struct NodeKindMatcher {
    kinds: BTreeSet<NodeKind>,
}

impl NodeKindMatcher {
    pub fn new<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = NodeKind>,
    {
        Self {
            kinds: kinds
                .into_iter()
                .filter(|kind| *kind != NodeKind::Unknown)
                .collect(),
        }
    }

    pub fn accepts(&self, kind: NodeKind) -> bool {
        self.kinds.contains(&kind)
    }
}

impl PathMatcher for NodeKindMatcher {
    fn next_match(&self, _graph: &GraphModel, input: &NodeSet) -> NodeSet {
        input
            .iter()
            .filter(|node| self.accepts(node.kind()))
            .cloned()
            .collect()
    }

    fn display_name(&self) -> String {
        let kinds: Vec<&str> = self.kinds.iter().map(NodeKind::as_str).collect();
        format!("kinds[{}]", kinds.join(","))
    }
}
