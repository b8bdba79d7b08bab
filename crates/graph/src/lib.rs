//! # Depscope Graph
//!
//! Dependency graph model shared by the path-matching and layout engines.
//!
//! ## Architecture
//!
//! ```text
//! Analyzer output (nodes, edges)
//!     │
//!     ├──> GraphBuilder
//!     │      ├─ Collapse duplicate nodes and edges
//!     │      └─ Reject dangling edges
//!     │
//!     └──> GraphModel (petgraph, read-only)
//!            ├─ Nodes: files, types, methods, artifacts, ...
//!            ├─ Edges: (head, tail, relation)
//!            └─ Queries: get_related, find_edges, subgraph, set algebra
//!
//! RelationRegistry ──> Relation / RelationSet / EdgeMatcher
//! ```

mod builder;
mod error;
mod graph;
mod registry;
mod relation;
pub mod sets;
mod types;

pub use builder::GraphBuilder;
pub use error::{GraphError, Result};
pub use graph::GraphModel;
pub use registry::RelationRegistry;
pub use relation::{EdgeMatch, EdgeMatcher, Relation, RelationSet};
pub use types::{Edge, Node, NodeId, NodeKind, NodeSet};
