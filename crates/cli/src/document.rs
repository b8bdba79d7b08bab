use anyhow::{Context, Result};
use depscope_graph::{GraphBuilder, GraphModel, Node, NodeKind, Relation, RelationRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Graph as handed over by an analyzer, in JSON form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDocument {
    /// Relations beyond the builtin vocabulary
    #[serde(default)]
    pub relations: Vec<RelationDoc>,

    pub nodes: Vec<NodeDoc>,

    #[serde(default)]
    pub edges: Vec<EdgeDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationDoc {
    pub name: String,
    pub reverse: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDoc {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeDoc {
    pub head: String,
    pub tail: String,
    pub relation: String,
}

impl GraphDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read graph document {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid graph document {}", path.display()))
    }

    /// Register the document's relations, then build and validate the graph
    pub fn into_graph(self, registry: &mut RelationRegistry) -> Result<GraphModel> {
        for relation in &self.relations {
            registry
                .register(Relation::new(&relation.name, &relation.reverse))
                .context("Invalid relation declaration")?;
        }

        let mut builder = GraphBuilder::new();
        for node in self.nodes {
            let kind = match node.kind.as_deref() {
                None => NodeKind::Unknown,
                Some(name) => name.parse().unwrap_or_else(|_| {
                    log::warn!("Node '{}' has unrecognized kind '{}'", node.id, name);
                    NodeKind::Unknown
                }),
            };
            let label = node.label.as_deref().unwrap_or(&node.id);
            builder.add_node(Node::new(node.id.as_str(), label, kind))?;
        }

        for edge in self.edges {
            let relation = registry
                .require(&edge.relation)
                .with_context(|| format!("Edge {} -> {}", edge.head, edge.tail))?;
            builder.add_edge(edge.head, edge.tail, relation);
        }

        let graph = builder.build()?;
        log::info!(
            "Loaded graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(json: &str) -> GraphDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_into_graph_with_custom_relation() {
        let doc = document(
            r#"{
                "relations": [{"name": "owns", "reverse": "owned by"}],
                "nodes": [
                    {"id": "a", "kind": "type"},
                    {"id": "b", "label": "Bee", "kind": "gizmo"}
                ],
                "edges": [
                    {"head": "a", "tail": "b", "relation": "owns"},
                    {"head": "a", "tail": "b", "relation": "call"}
                ]
            }"#,
        );

        let mut registry = RelationRegistry::with_builtins();
        let graph = doc.into_graph(&mut registry).unwrap();

        assert_eq!(graph.edge_count(), 2);
        let b = graph.node("b").unwrap();
        assert_eq!(b.label(), "Bee");
        assert_eq!(b.kind(), NodeKind::Unknown);
        assert!(registry.relation("owns").is_some());
    }

    #[test]
    fn test_dangling_edge_is_fatal() {
        let doc = document(
            r#"{"nodes": [{"id": "a"}], "edges": [{"head": "a", "tail": "z", "relation": "call"}]}"#,
        );
        let err = doc
            .into_graph(&mut RelationRegistry::with_builtins())
            .unwrap_err();
        assert!(err.to_string().contains("Dangling edge"));
    }

    #[test]
    fn test_unknown_relation_is_fatal() {
        let doc = document(
            r#"{"nodes": [{"id": "a"}], "edges": [{"head": "a", "tail": "a", "relation": "warp"}]}"#,
        );
        assert!(doc
            .into_graph(&mut RelationRegistry::with_builtins())
            .is_err());
    }
}
