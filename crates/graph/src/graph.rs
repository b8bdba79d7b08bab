use crate::relation::{EdgeMatcher, Relation};
use crate::sets;
use crate::types::{Edge, Node, NodeId, NodeSet};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};

/// Read-only dependency graph.
///
/// Built once through [`crate::GraphBuilder`]; every edge endpoint is
/// guaranteed to be a node of the model.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    /// Directed graph (head -> tail, weighted by relation)
    graph: DiGraph<Node, Relation>,

    /// Node id -> NodeIndex mapping for fast lookup
    node_index: HashMap<NodeId, NodeIndex>,
}

impl GraphModel {
    /// Empty graph
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_node(&mut self, node: Node) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(node.id()) {
            return idx;
        }
        let id = node.id().clone();
        let idx = self.graph.add_node(node);
        self.node_index.insert(id, idx);
        idx
    }

    /// Insert an edge between two existing nodes; duplicate triples collapse
    pub(crate) fn insert_edge(&mut self, head: NodeIndex, tail: NodeIndex, relation: Relation) {
        let duplicate = self
            .graph
            .edges_connecting(head, tail)
            .any(|e| *e.weight() == relation);
        if !duplicate {
            self.graph.add_edge(head, tail, relation);
        }
    }

    pub(crate) fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    /// Find node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index
            .get(&NodeId::new(id))
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.node_index.contains_key(node.id())
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    pub fn node_set(&self) -> NodeSet {
        self.nodes().cloned().collect()
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().map(move |e| self.edge_from(e))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Relations that label at least one edge
    pub fn relations(&self) -> BTreeSet<Relation> {
        self.graph
            .edge_references()
            .map(|e| e.weight().clone())
            .collect()
    }

    /// Edges whose head is `node`
    pub fn outgoing(&self, node: &Node) -> Vec<Edge> {
        self.incident(node, Direction::Outgoing)
    }

    /// Edges whose tail is `node`
    pub fn incoming(&self, node: &Node) -> Vec<Edge> {
        self.incident(node, Direction::Incoming)
    }

    /// Every edge touching `node`, outgoing first
    pub fn find_edges(&self, node: &Node) -> Vec<Edge> {
        let mut edges = self.outgoing(node);
        edges.extend(self.incoming(node));
        edges
    }

    /// Nodes one matching hop away from any node of `input`.
    ///
    /// Forward-matching edges lead head -> tail, backward-matching edges lead
    /// tail -> head. Input nodes absent from this graph contribute nothing.
    pub fn get_related(&self, input: &NodeSet, matcher: &EdgeMatcher) -> NodeSet {
        let mut related = NodeSet::new();

        for node in input {
            let Some(idx) = self.index_of(node.id()) else {
                continue;
            };

            for edge in self.graph.edges_directed(idx, Direction::Outgoing) {
                if matcher.matches_forward(edge.weight()) {
                    related.insert(self.graph[edge.target()].clone());
                }
            }

            for edge in self.graph.edges_directed(idx, Direction::Incoming) {
                if matcher.matches_backward(edge.weight()) {
                    related.insert(self.graph[edge.source()].clone());
                }
            }
        }

        related
    }

    /// Induced sub-model: the given nodes and the edges between them
    pub fn subgraph(&self, nodes: &NodeSet) -> GraphModel {
        let mut sub = GraphModel::new();
        for node in self.nodes().filter(|n| nodes.contains(*n)) {
            sub.insert_node(node.clone());
        }

        for edge in self.graph.edge_references() {
            let head = &self.graph[edge.source()];
            let tail = &self.graph[edge.target()];
            if let (Some(h), Some(t)) = (sub.index_of(head.id()), sub.index_of(tail.id())) {
                sub.insert_edge(h, t, edge.weight().clone());
            }
        }

        sub
    }

    pub fn and(&self, other: &GraphModel) -> NodeSet {
        sets::and(&self.node_set(), &other.node_set())
    }

    pub fn or(&self, other: &GraphModel) -> NodeSet {
        sets::or(&self.node_set(), &other.node_set())
    }

    pub fn not(&self, other: &GraphModel) -> NodeSet {
        sets::not(&self.node_set(), &other.node_set())
    }

    pub fn xor(&self, other: &GraphModel) -> NodeSet {
        sets::xor(&self.node_set(), &other.node_set())
    }

    fn incident(&self, node: &Node, direction: Direction) -> Vec<Edge> {
        let Some(idx) = self.index_of(node.id()) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, direction)
            .map(|e| self.edge_from(e))
            .collect()
    }

    fn edge_from(&self, edge: petgraph::graph::EdgeReference<'_, Relation>) -> Edge {
        Edge::new(
            self.graph[edge.source()].clone(),
            self.graph[edge.target()].clone(),
            edge.weight().clone(),
        )
    }
}
