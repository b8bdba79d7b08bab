use crate::error::{GraphError, Result};
use crate::relation::{Relation, RelationSet};
use std::collections::BTreeMap;

/// File system relations: (forward, reverse)
const FILE_SYSTEM_RELATIONS: &[(&str, &str)] = &[
    ("contains-dir", "in-dir"),
    ("contains-file", "in-file"),
];

/// Java bytecode relations
const JAVA_RELATIONS: &[(&str, &str)] = &[
    ("class", "class of"),
    ("extends", "extended by"),
    ("implements", "implemented by"),
    ("interface-extends", "extended by interface"),
    ("member-type", "member type of"),
    ("method", "method of"),
    ("field", "field of"),
    ("call", "called by"),
    ("static-call", "statically called by"),
    ("type-use", "used as type by"),
    ("field-access", "accessed by"),
    ("annotation", "annotates"),
];

/// Maven POM relations
const MAVEN_RELATIONS: &[(&str, &str)] = &[
    ("dependency", "dependency of"),
    ("module", "module of"),
    ("parent", "child of"),
    ("property", "property of"),
];

const BUILTIN_SETS: &[(&str, &[&str])] = &[
    (
        "containers",
        &[
            "contains-dir",
            "contains-file",
            "class",
            "member-type",
            "method",
            "field",
            "module",
        ],
    ),
    (
        "uses",
        &["call", "static-call", "type-use", "field-access", "annotation"],
    ),
    ("inheritance", &["extends", "implements", "interface-extends"]),
    ("maven-deps", &["dependency", "parent", "module"]),
];

/// Table of known relations and named relation sets.
///
/// Passed explicitly to whatever needs name resolution; there is no
/// process-wide registry.
#[derive(Debug, Clone, Default)]
pub struct RelationRegistry {
    relations: BTreeMap<String, Relation>,
    sets: BTreeMap<String, RelationSet>,
}

impl RelationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the file system, Java and Maven vocabularies
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        for &(forward, reverse) in FILE_SYSTEM_RELATIONS
            .iter()
            .chain(JAVA_RELATIONS)
            .chain(MAVEN_RELATIONS)
        {
            registry
                .relations
                .insert(forward.to_string(), Relation::new(forward, reverse));
        }

        for &(name, members) in BUILTIN_SETS {
            let set = RelationSet::of(
                members
                    .iter()
                    .filter_map(|m| registry.relations.get(*m).cloned()),
            );
            registry.sets.insert(name.to_string(), set);
        }
        registry.sets.insert("all".to_string(), RelationSet::All);
        registry.sets.insert("none".to_string(), RelationSet::Empty);

        registry
    }

    /// Add a relation to the vocabulary.
    ///
    /// Registering the same relation twice is a no-op; reusing a forward name
    /// with a different reverse name is an error.
    pub fn register(&mut self, relation: Relation) -> Result<()> {
        if let Some(existing) = self.relations.get(relation.forward_name()) {
            if existing.reverse_name() != relation.reverse_name() {
                return Err(GraphError::ConflictingRelation {
                    name: relation.forward_name().to_string(),
                    existing: existing.reverse_name().to_string(),
                });
            }
            return Ok(());
        }

        log::debug!("Registered relation '{}'", relation.forward_name());
        self.relations
            .insert(relation.forward_name().to_string(), relation);
        Ok(())
    }

    /// Add or replace a named relation set
    pub fn register_set(&mut self, name: impl Into<String>, set: RelationSet) {
        self.sets.insert(name.into(), set);
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }

    pub fn require(&self, name: &str) -> Result<Relation> {
        self.relation(name)
            .cloned()
            .ok_or_else(|| GraphError::UnknownRelation(name.to_string()))
    }

    pub fn set(&self, name: &str) -> Option<&RelationSet> {
        self.sets.get(name)
    }

    pub fn require_set(&self, name: &str) -> Result<RelationSet> {
        self.set(name)
            .cloned()
            .ok_or_else(|| GraphError::UnknownRelationSet(name.to_string()))
    }

    /// Resolve a list of relation names into an enumerated set
    pub fn relation_set<S: AsRef<str>>(&self, names: &[S]) -> Result<RelationSet> {
        let relations = names
            .iter()
            .map(|name| self.require(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(RelationSet::of(relations))
    }

    /// Every registered relation, ordered by forward name
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_loaded() {
        let registry = RelationRegistry::with_builtins();

        let call = registry.require("call").unwrap();
        assert_eq!(call.reverse_name(), "called by");

        let uses = registry.require_set("uses").unwrap();
        assert!(uses.contains(&call));
        assert!(!uses.contains(&registry.require("extends").unwrap()));

        assert_eq!(registry.require_set("all").unwrap(), RelationSet::All);
    }

    #[test]
    fn test_unknown_names() {
        let registry = RelationRegistry::with_builtins();
        assert!(matches!(
            registry.require("teleports"),
            Err(GraphError::UnknownRelation(_))
        ));
        assert!(matches!(
            registry.require_set("nope"),
            Err(GraphError::UnknownRelationSet(_))
        ));
    }

    #[test]
    fn test_register_conflict() {
        let mut registry = RelationRegistry::new();
        registry.register(Relation::new("owns", "owned by")).unwrap();
        registry.register(Relation::new("owns", "owned by")).unwrap();

        let err = registry
            .register(Relation::new("owns", "belongs to"))
            .unwrap_err();
        assert!(matches!(err, GraphError::ConflictingRelation { .. }));
    }

    #[test]
    fn test_relation_set_from_names() {
        let registry = RelationRegistry::with_builtins();
        let set = registry.relation_set(&["call", "extends"]).unwrap();
        assert!(set.contains(&registry.require("extends").unwrap()));
        assert!(registry.relation_set(&["call", "bogus"]).is_err());
    }
}
