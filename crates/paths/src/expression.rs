use crate::matcher::PathMatcher;
use depscope_graph::{GraphModel, NodeSet};
use std::sync::Arc;

/// One stage of a [`PathExpression`]
#[derive(Debug, Clone)]
pub struct PathTerm {
    pub matcher: Arc<dyn PathMatcher>,

    /// Re-apply the matcher to its own output until nothing new appears
    pub recursive: bool,

    /// Union this term's output into the carried set instead of replacing it
    pub cumulative: bool,
}

impl PathTerm {
    pub fn new(matcher: impl PathMatcher + 'static, recursive: bool, cumulative: bool) -> Self {
        Self {
            matcher: Arc::new(matcher),
            recursive,
            cumulative,
        }
    }

    /// Run this term alone on `input`, returning everything it produced
    pub fn apply(&self, graph: &GraphModel, input: &NodeSet) -> NodeSet {
        let mut local_input = input.clone();
        let mut term_output = NodeSet::new();
        let mut iterations = 0usize;

        loop {
            iterations += 1;
            let local_output = self.matcher.next_match(graph, &local_input);

            let mut element_added = false;
            for node in &local_output {
                element_added |= term_output.insert(node.clone());
            }

            if !(element_added && self.recursive) {
                break;
            }
            local_input = local_output;
        }

        log::debug!(
            "Term '{}' ran {} iteration(s), produced {} node(s)",
            self.matcher.display_name(),
            iterations,
            term_output.len()
        );

        term_output
    }
}

/// Ordered pipeline of path terms.
///
/// Each term reads the set carried from the previous term; the order of terms
/// is significant.
#[derive(Debug, Clone, Default)]
pub struct PathExpression {
    name: Option<String>,
    terms: Vec<PathTerm>,
}

impl PathExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            terms: Vec::new(),
        }
    }

    pub fn with_term(mut self, term: PathTerm) -> Self {
        self.terms.push(term);
        self
    }

    /// Append a single, replacing step
    pub fn then(self, matcher: impl PathMatcher + 'static) -> Self {
        self.with_term(PathTerm::new(matcher, false, false))
    }

    /// Append a step iterated to a fixed point
    pub fn then_recursive(self, matcher: impl PathMatcher + 'static) -> Self {
        self.with_term(PathTerm::new(matcher, true, false))
    }

    pub fn push(&mut self, term: PathTerm) {
        self.terms.push(term);
    }

    pub fn terms(&self) -> &[PathTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl PathMatcher for PathExpression {
    fn next_match(&self, graph: &GraphModel, input: &NodeSet) -> NodeSet {
        let mut carry = input.clone();

        for term in &self.terms {
            let term_output = term.apply(graph, &carry);
            if term.cumulative {
                carry.extend(term_output);
            } else {
                carry = term_output;
            }
        }

        carry
    }

    fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => {
                let parts: Vec<String> = self
                    .terms
                    .iter()
                    .map(|t| {
                        let mut part = t.matcher.display_name();
                        if t.recursive {
                            part.push('*');
                        }
                        if t.cumulative {
                            part.push('+');
                        }
                        part
                    })
                    .collect();
                parts.join(" / ")
            }
        }
    }
}
