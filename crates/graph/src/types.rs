use crate::error::GraphError;
use crate::relation::Relation;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// Node collection used by every query. Ordered by node id so that
/// traversals and layouts are reproducible.
pub type NodeSet = BTreeSet<Node>;

/// Stable node identifier (e.g. "com.example.Foo", "src/main/java")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Arc<str>);

impl NodeId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

/// Category of a node, as classified by the analyzer that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
    Package,
    Type,
    Method,
    Field,
    Artifact,
    Property,

    /// Producer could not classify the node. Never matched by kind filters.
    Unknown,
}

impl NodeKind {
    pub const ALL: [NodeKind; 9] = [
        NodeKind::Directory,
        NodeKind::File,
        NodeKind::Package,
        NodeKind::Type,
        NodeKind::Method,
        NodeKind::Field,
        NodeKind::Artifact,
        NodeKind::Property,
        NodeKind::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
            NodeKind::Package => "package",
            NodeKind::Type => "type",
            NodeKind::Method => "method",
            NodeKind::Field => "field",
            NodeKind::Artifact => "artifact",
            NodeKind::Property => "property",
            NodeKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| GraphError::UnknownNodeKind(s.to_string()))
    }
}

/// Node in a dependency graph.
///
/// Identity is the id alone: two nodes with the same id are the same node,
/// whatever their label or kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    label: Arc<str>,
    kind: NodeKind,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl AsRef<str>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: Arc::from(label.as_ref()),
            kind,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Human readable label for display
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// True when label and kind agree, i.e. re-adding this node is harmless
    pub(crate) fn same_definition(&self, other: &Node) -> bool {
        self.id == other.id && self.label == other.label && self.kind == other.kind
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Directed edge: head -> tail labelled with a relation.
///
/// Forward traversal follows head to tail, backward follows tail to head.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub head: Node,
    pub tail: Node,
    pub relation: Relation,
}

impl Edge {
    pub fn new(head: Node, tail: Node, relation: Relation) -> Self {
        Self {
            head,
            tail,
            relation,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.head.id(), self.relation, self.tail.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_node_identity_is_id_only() {
        let a = Node::new("a", "Alpha", NodeKind::Type);
        let a2 = Node::new("a", "Other label", NodeKind::Method);

        assert_eq!(a, a2);
        assert!(!a.same_definition(&a2));

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(a2));
    }

    #[test]
    fn test_node_set_orders_by_id() {
        let set: NodeSet = ["c", "a", "b"]
            .into_iter()
            .map(|id| Node::new(id, id, NodeKind::File))
            .collect();

        let ids: Vec<&str> = set.iter().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_node_kind_parse() {
        assert_eq!("type".parse::<NodeKind>().unwrap(), NodeKind::Type);
        assert_eq!("Directory".parse::<NodeKind>().unwrap(), NodeKind::Directory);
        assert!(matches!(
            "widget".parse::<NodeKind>(),
            Err(GraphError::UnknownNodeKind(_))
        ));
    }
}
