use depscope_graph::{EdgeMatcher, GraphModel, Node, NodeSet};
use std::collections::BTreeMap;

/// Parent -> child structure induced on a graph by an edge rule.
///
/// A forward-matching edge makes its head the parent of its tail; a
/// backward-matching edge makes its tail the parent of its head. The result
/// may have several parents per node, cycles and disconnected parts.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    successors: BTreeMap<Node, NodeSet>,
    parents: BTreeMap<Node, NodeSet>,
    roots: NodeSet,
}

impl Hierarchy {
    pub fn build(graph: &GraphModel, matcher: &EdgeMatcher) -> Self {
        let mut successors: BTreeMap<Node, NodeSet> = graph
            .nodes()
            .map(|node| (node.clone(), NodeSet::new()))
            .collect();
        let mut parents = successors.clone();

        let mut link = |parent: &Node, child: &Node| {
            if parent == child {
                return;
            }
            if let Some(children) = successors.get_mut(parent) {
                children.insert(child.clone());
            }
            if let Some(owners) = parents.get_mut(child) {
                owners.insert(parent.clone());
            }
        };

        for edge in graph.edges() {
            let matched = matcher.classify(&edge);
            if matched.is_forward() {
                link(&edge.head, &edge.tail);
            }
            if matched.is_backward() {
                link(&edge.tail, &edge.head);
            }
        }

        let roots: NodeSet = parents
            .iter()
            .filter(|(_, owners)| owners.is_empty())
            .map(|(node, _)| node.clone())
            .collect();

        log::debug!(
            "Hierarchy over {} nodes: {} root(s)",
            successors.len(),
            roots.len()
        );

        Self {
            successors,
            parents,
            roots,
        }
    }

    /// Nodes without a parent
    pub fn roots(&self) -> &NodeSet {
        &self.roots
    }

    pub fn children(&self, node: &Node) -> Option<&NodeSet> {
        self.successors.get(node)
    }

    pub fn parents(&self, node: &Node) -> Option<&NodeSet> {
        self.parents.get(node)
    }

    /// True when the node has no children (or is not part of the hierarchy)
    pub fn is_leaf(&self, node: &Node) -> bool {
        self.children(node).map_or(true, NodeSet::is_empty)
    }

    /// Full successor map, every node of the graph included
    pub fn successors(&self) -> &BTreeMap<Node, NodeSet> {
        &self.successors
    }

    pub fn node_count(&self) -> usize {
        self.successors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depscope_graph::{GraphBuilder, NodeKind, Relation, RelationSet};
    use pretty_assertions::assert_eq;

    fn contains() -> Relation {
        Relation::new("contains", "in")
    }

    fn ids<'a>(set: impl IntoIterator<Item = &'a Node>) -> Vec<&'a str> {
        set.into_iter().map(|n| n.id().as_str()).collect()
    }

    fn graph() -> GraphModel {
        let mut builder = GraphBuilder::new();
        for id in ["root", "a", "b", "lonely", "loop"] {
            builder.node(id, NodeKind::Directory).unwrap();
        }
        builder
            .add_edge("root", "a", contains())
            .add_edge("root", "b", contains())
            .add_edge("a", "b", contains())
            .add_edge("loop", "loop", contains())
            .add_edge("a", "b", Relation::new("uses", "used by"));
        builder.build().unwrap()
    }

    #[test]
    fn test_forward_hierarchy() {
        let graph = graph();
        let h = Hierarchy::build(&graph, &EdgeMatcher::forward(RelationSet::single(contains())));

        assert_eq!(ids(h.roots()), vec!["lonely", "loop", "root"]);
        let root = graph.node("root").unwrap();
        assert_eq!(ids(h.children(root).unwrap()), vec!["a", "b"]);

        // Multiple parents are kept
        let b = graph.node("b").unwrap();
        assert_eq!(ids(h.parents(b).unwrap()), vec!["a", "root"]);
        assert!(h.is_leaf(b));
        assert_eq!(h.node_count(), 5);
    }

    #[test]
    fn test_backward_hierarchy_inverts() {
        let graph = graph();
        let h = Hierarchy::build(&graph, &EdgeMatcher::backward(RelationSet::single(contains())));

        assert_eq!(ids(h.roots()), vec!["b", "lonely", "loop"]);
        let b = graph.node("b").unwrap();
        assert_eq!(ids(h.children(b).unwrap()), vec!["a", "root"]);
    }

    #[test]
    fn test_no_matching_edges_all_roots() {
        let graph = graph();
        let h = Hierarchy::build(&graph, &EdgeMatcher::none());
        assert_eq!(h.roots().len(), 5);
        assert!(h.successors().values().all(NodeSet::is_empty));
    }
}
