use depscope_graph::{
    EdgeMatcher, GraphBuilder, GraphModel, NodeKind, NodeSet, Relation, RelationRegistry,
    RelationSet,
};
use depscope_paths::{EdgeRuleMatcher, PathConfig, PathExpression, PathMatcher, PathTerm};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::fs;
use tempfile::tempdir;

fn uses() -> Relation {
    Relation::new("uses", "used by")
}

fn uses_term(recursive: bool, cumulative: bool) -> PathTerm {
    PathTerm::new(
        EdgeRuleMatcher::new("uses", EdgeMatcher::forward(RelationSet::single(uses()))),
        recursive,
        cumulative,
    )
}

fn chain() -> GraphModel {
    let mut builder = GraphBuilder::new();
    for id in ["A", "B", "C"] {
        builder.node(id, NodeKind::Type).expect("node");
    }
    builder.add_edge("A", "B", uses()).add_edge("B", "C", uses());
    builder.build().expect("graph")
}

fn ids(set: &NodeSet) -> Vec<String> {
    set.iter().map(|n| n.id().to_string()).collect()
}

fn from(graph: &GraphModel, id: &str) -> NodeSet {
    NodeSet::from([graph.node(id).expect("node").clone()])
}

#[test]
fn recursive_non_cumulative_excludes_start() {
    let graph = chain();
    let expr = PathExpression::new().with_term(uses_term(true, false));
    assert_eq!(ids(&expr.next_match(&graph, &from(&graph, "A"))), vec!["B", "C"]);
}

#[test]
fn recursive_cumulative_includes_start() {
    let graph = chain();
    let expr = PathExpression::new().with_term(uses_term(true, true));
    assert_eq!(
        ids(&expr.next_match(&graph, &from(&graph, "A"))),
        vec!["A", "B", "C"]
    );
}

#[test]
fn matcher_that_never_matches_still_terminates() {
    let graph = chain();
    let expr = PathExpression::new().with_term(PathTerm::new(
        EdgeRuleMatcher::new("nothing", EdgeMatcher::none()),
        true,
        false,
    ));
    assert!(expr.next_match(&graph, &from(&graph, "A")).is_empty());
    assert!(expr.next_match(&graph, &NodeSet::new()).is_empty());
}

#[test]
fn config_file_drives_expression() {
    let registry = RelationRegistry::with_builtins();
    let call = registry.require("call").expect("builtin");
    let method = registry.require("method").expect("builtin");

    let mut builder = GraphBuilder::new();
    builder.node("Service", NodeKind::Type).expect("node");
    builder.node("Service.run", NodeKind::Method).expect("node");
    builder.node("Repo.load", NodeKind::Method).expect("node");
    builder.node("Repo", NodeKind::Type).expect("node");
    builder
        .add_edge("Service", "Service.run", method.clone())
        .add_edge("Repo", "Repo.load", method)
        .add_edge("Service.run", "Repo.load", call);
    let graph = builder.build().expect("graph");

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("types-used.toml");
    fs::write(
        &path,
        r#"
        name = "types-used"

        [[terms]]
        edges = { forward = ["method"] }

        [[terms]]
        edges = { forward = ["call"] }
        recursive = true

        [[terms]]
        edges = { backward = ["method"] }
        "#,
    )
    .expect("write config");

    let expr = PathConfig::load(&path)
        .expect("load")
        .build(&registry)
        .expect("build");
    assert_eq!(expr.display_name(), "types-used");
    assert_eq!(
        ids(&expr.next_match(&graph, &from(&graph, "Service"))),
        vec!["Repo"]
    );
}

/// Random graph over `n` nodes with `uses` edges
fn random_graph(n: usize, edges: &[(usize, usize)]) -> GraphModel {
    let mut builder = GraphBuilder::new();
    for i in 0..n {
        builder.node(&format!("n{i}"), NodeKind::Type).expect("node");
    }
    for &(h, t) in edges {
        builder.add_edge(format!("n{}", h % n), format!("n{}", t % n), uses());
    }
    builder.build().expect("graph")
}

proptest! {
    #[test]
    fn proptest_recursive_term_bounded_by_graph(
        n in 1usize..12,
        edges in proptest::collection::vec((0usize..12, 0usize..12), 0..40),
        start in 0usize..12,
    ) {
        let graph = random_graph(n, &edges);
        let input = from(&graph, &format!("n{}", start % n));
        let out = uses_term(true, false).apply(&graph, &input);
        prop_assert!(out.len() <= graph.node_count());
    }

    #[test]
    fn proptest_cumulative_output_contains_input(
        n in 1usize..12,
        edges in proptest::collection::vec((0usize..12, 0usize..12), 0..40),
        start in 0usize..12,
        recursive in any::<bool>(),
    ) {
        let graph = random_graph(n, &edges);
        let input = from(&graph, &format!("n{}", start % n));
        let expr = PathExpression::new().with_term(uses_term(recursive, true));
        let out = expr.next_match(&graph, &input);
        prop_assert!(out.is_superset(&input));
    }

    #[test]
    fn proptest_recursive_closure_is_fixed_point(
        n in 1usize..12,
        edges in proptest::collection::vec((0usize..12, 0usize..12), 0..40),
        start in 0usize..12,
    ) {
        let graph = random_graph(n, &edges);
        let input = from(&graph, &format!("n{}", start % n));
        let closure = PathExpression::new().with_term(uses_term(true, true));

        let once = closure.next_match(&graph, &input);
        let twice = closure.next_match(&graph, &once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn proptest_single_term_iteration_reaches_stable_set(
        n in 1usize..12,
        edges in proptest::collection::vec((0usize..12, 0usize..12), 0..40),
        start in 0usize..12,
    ) {
        let graph = random_graph(n, &edges);
        let step = PathExpression::new().with_term(uses_term(false, false));

        // Feed the term its own output, collecting everything seen, until a pass adds nothing
        let mut seen = from(&graph, &format!("n{}", start % n));
        let mut current = seen.clone();
        for _ in 0..=graph.node_count() {
            current = step.next_match(&graph, &current);
            let before = seen.len();
            seen.extend(current.iter().cloned());
            if seen.len() == before {
                break;
            }
        }

        let again = step.next_match(&graph, &seen);
        prop_assert!(again.is_subset(&seen));
    }
}
