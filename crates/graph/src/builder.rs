use crate::error::{GraphError, Result};
use crate::graph::GraphModel;
use crate::relation::Relation;
use crate::types::{Node, NodeId, NodeKind};
use std::collections::HashMap;

/// Collects nodes and edges from an analyzer and validates them into a
/// [`GraphModel`].
///
/// Edges may be added before their endpoints; endpoints are checked in
/// [`GraphBuilder::build`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    seen: HashMap<NodeId, usize>,
    edges: Vec<(NodeId, NodeId, Relation)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Re-adding an identical node is a no-op; re-adding an id
    /// with a different label or kind is rejected.
    pub fn add_node(&mut self, node: Node) -> Result<&Node> {
        if let Some(&pos) = self.seen.get(node.id()) {
            let existing = &self.nodes[pos];
            if !existing.same_definition(&node) {
                return Err(GraphError::ConflictingNode(node.id().to_string()));
            }
            return Ok(existing);
        }

        self.seen.insert(node.id().clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(&self.nodes[self.nodes.len() - 1])
    }

    /// Shorthand for a node whose label is its id
    pub fn node(&mut self, id: &str, kind: NodeKind) -> Result<&Node> {
        self.add_node(Node::new(id, id, kind))
    }

    pub fn add_edge(
        &mut self,
        head: impl Into<NodeId>,
        tail: impl Into<NodeId>,
        relation: Relation,
    ) -> &mut Self {
        self.edges.push((head.into(), tail.into(), relation));
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Validate and freeze the graph
    pub fn build(self) -> Result<GraphModel> {
        let mut graph = GraphModel::new();
        for node in self.nodes {
            graph.insert_node(node);
        }

        for (head, tail, relation) in self.edges {
            let dangling = |missing: &NodeId| GraphError::DanglingEdge {
                head: head.to_string(),
                tail: tail.to_string(),
                relation: relation.forward_name().to_string(),
                missing: missing.to_string(),
            };

            let head_idx = graph.index_of(&head).ok_or_else(|| dangling(&head))?;
            let tail_idx = graph.index_of(&tail).ok_or_else(|| dangling(&tail))?;
            graph.insert_edge(head_idx, tail_idx, relation);
        }

        log::debug!(
            "Built dependency graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(graph)
    }
}
