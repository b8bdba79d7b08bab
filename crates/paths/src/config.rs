use crate::error::{PathError, Result};
use crate::expression::{PathExpression, PathTerm};
use crate::matcher::{EdgeRuleMatcher, NodeKindMatcher};
use depscope_graph::{EdgeMatcher, NodeKind, RelationRegistry, RelationSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declarative path expression, loadable from JSON or TOML.
///
/// ```toml
/// name = "callers-of-types"
///
/// [[terms]]
/// edges = { backward = ["call"], forward_sets = ["containers"] }
/// recursive = true
///
/// [[terms]]
/// kinds = ["type"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub terms: Vec<TermConfig>,
}

/// One term: exactly one of `edges` or `kinds`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<EdgeRuleConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinds: Option<Vec<String>>,

    #[serde(default)]
    pub recursive: bool,

    #[serde(default)]
    pub cumulative: bool,
}

/// Relations to follow, by name, per direction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeRuleConfig {
    #[serde(default)]
    pub forward: Vec<String>,

    #[serde(default)]
    pub backward: Vec<String>,

    /// Named relation sets followed head -> tail
    #[serde(default)]
    pub forward_sets: Vec<String>,

    /// Named relation sets followed tail -> head
    #[serde(default)]
    pub backward_sets: Vec<String>,
}

impl EdgeRuleConfig {
    pub fn resolve(&self, registry: &RelationRegistry) -> Result<EdgeMatcher> {
        let forward = Self::resolve_direction(registry, &self.forward, &self.forward_sets)?;
        let backward = Self::resolve_direction(registry, &self.backward, &self.backward_sets)?;
        Ok(EdgeMatcher::new(forward, backward))
    }

    fn resolve_direction(
        registry: &RelationRegistry,
        relations: &[String],
        sets: &[String],
    ) -> Result<RelationSet> {
        let mut resolved = registry.relation_set(relations)?;
        for name in sets {
            resolved = resolved.union(&registry.require_set(name)?);
        }
        Ok(resolved)
    }

    fn display_name(&self) -> String {
        let forward = self.forward.iter().chain(&self.forward_sets).cloned();
        let backward = self
            .backward
            .iter()
            .chain(&self.backward_sets)
            .map(|name| format!("~{name}"));
        let parts: Vec<String> = forward.chain(backward).collect();
        format!("edges[{}]", parts.join(","))
    }
}

impl PathConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| PathError::parse(e.to_string()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PathError::parse(e.to_string()))
    }

    /// Load from a file; `.toml` files are read as TOML, anything else as JSON
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml(&text),
            _ => Self::from_json(&text),
        }
    }

    /// Resolve names against `registry` and build the expression
    pub fn build(&self, registry: &RelationRegistry) -> Result<PathExpression> {
        let mut expression = match &self.name {
            Some(name) => PathExpression::named(name.clone()),
            None => PathExpression::new(),
        };

        for (index, term) in self.terms.iter().enumerate() {
            let built = match (&term.edges, &term.kinds) {
                (Some(edges), None) => PathTerm::new(
                    EdgeRuleMatcher::new(edges.display_name(), edges.resolve(registry)?),
                    term.recursive,
                    term.cumulative,
                ),
                (None, Some(kinds)) => {
                    let kinds = kinds
                        .iter()
                        .map(|k| k.parse::<NodeKind>())
                        .collect::<std::result::Result<Vec<_>, _>>()?;
                    PathTerm::new(NodeKindMatcher::new(kinds), term.recursive, term.cumulative)
                }
                (Some(_), Some(_)) => {
                    return Err(PathError::invalid_term(
                        index,
                        "a term takes either `edges` or `kinds`, not both",
                    ))
                }
                (None, None) => {
                    return Err(PathError::invalid_term(
                        index,
                        "a term needs `edges` or `kinds`",
                    ))
                }
            };
            expression.push(built);
        }

        log::debug!(
            "Built path expression with {} term(s)",
            expression.terms().len()
        );
        Ok(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depscope_graph::GraphError;

    #[test]
    fn test_parse_toml() {
        let config = PathConfig::from_toml(
            r#"
            name = "callees"

            [[terms]]
            edges = { forward = ["call"], forward_sets = ["containers"] }
            recursive = true

            [[terms]]
            kinds = ["method"]
            cumulative = true
            "#,
        )
        .unwrap();

        assert_eq!(config.terms.len(), 2);
        assert!(config.terms[0].recursive);
        assert!(config.terms[1].cumulative);

        let expression = config.build(&RelationRegistry::with_builtins()).unwrap();
        assert_eq!(expression.terms().len(), 2);
    }

    #[test]
    fn test_parse_json() {
        let config = PathConfig::from_json(
            r#"{"terms": [{"edges": {"backward": ["extends"]}, "recursive": true}]}"#,
        )
        .unwrap();
        let expression = config.build(&RelationRegistry::with_builtins()).unwrap();

        let term = &expression.terms()[0];
        assert!(term.recursive);
        assert!(!term.cumulative);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = PathConfig::from_json(r#"{"terms": [{"edgez": {}}]}"#).unwrap_err();
        assert!(matches!(err, PathError::ParseError(_)));
    }

    #[test]
    fn test_invalid_terms() {
        let registry = RelationRegistry::with_builtins();

        let empty = PathConfig {
            name: None,
            terms: vec![TermConfig::default()],
        };
        assert!(matches!(
            empty.build(&registry),
            Err(PathError::InvalidTerm { index: 0, .. })
        ));

        let both = PathConfig {
            name: None,
            terms: vec![TermConfig {
                edges: Some(EdgeRuleConfig::default()),
                kinds: Some(vec!["type".to_string()]),
                ..Default::default()
            }],
        };
        assert!(matches!(
            both.build(&registry),
            Err(PathError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_unresolved_names() {
        let registry = RelationRegistry::with_builtins();

        let config = PathConfig::from_json(r#"{"terms": [{"edges": {"forward": ["warp"]}}]}"#)
            .unwrap();
        assert!(matches!(
            config.build(&registry),
            Err(PathError::Graph(GraphError::UnknownRelation(_)))
        ));

        let config = PathConfig::from_json(r#"{"terms": [{"kinds": ["gizmo"]}]}"#).unwrap();
        assert!(matches!(
            config.build(&registry),
            Err(PathError::Graph(GraphError::UnknownNodeKind(_)))
        ));
    }

    #[test]
    fn test_edge_rule_display_name() {
        let rule = EdgeRuleConfig {
            forward: vec!["call".to_string()],
            backward_sets: vec!["inheritance".to_string()],
            ..Default::default()
        };
        assert_eq!(rule.display_name(), "edges[call,~inheritance]");
    }
}
