//! # Depscope Paths
//!
//! Relation-driven path matching over a [`depscope_graph::GraphModel`].
//!
//! A [`PathExpression`] is an ordered list of terms. Each term wraps a
//! [`PathMatcher`] (follow edges, filter by node kind, or a nested
//! expression) and may be:
//!
//! - **recursive**: re-applied to its own output until no new node appears;
//! - **cumulative**: its output is added to the carried set instead of
//!   replacing it.
//!
//! ## Example
//!
//! ```rust
//! use depscope_graph::{EdgeMatcher, GraphBuilder, NodeKind, NodeSet, RelationRegistry, RelationSet};
//! use depscope_paths::{EdgeRuleMatcher, PathExpression, PathMatcher};
//!
//! let registry = RelationRegistry::with_builtins();
//! let call = registry.require("call").unwrap();
//!
//! let mut builder = GraphBuilder::new();
//! for id in ["main", "parse", "lex"] {
//!     builder.node(id, NodeKind::Method).unwrap();
//! }
//! builder.add_edge("main", "parse", call.clone());
//! builder.add_edge("parse", "lex", call.clone());
//! let graph = builder.build().unwrap();
//!
//! let callees = PathExpression::new().then_recursive(EdgeRuleMatcher::new(
//!     "call",
//!     EdgeMatcher::forward(RelationSet::single(call)),
//! ));
//!
//! let start = NodeSet::from([graph.node("main").unwrap().clone()]);
//! assert_eq!(callees.next_match(&graph, &start).len(), 2);
//! ```

mod config;
mod error;
mod expression;
mod matcher;

pub use config::{EdgeRuleConfig, PathConfig, TermConfig};
pub use error::{PathError, Result};
pub use expression::{PathExpression, PathTerm};
pub use matcher::{EdgeRuleMatcher, NodeKindMatcher, PathMatcher};
