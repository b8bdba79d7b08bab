use crate::hierarchical::{place_roots, LayoutHooks, LeafCounter, TraversalContext};
use crate::hierarchy::Hierarchy;
use crate::positions::{Point, PositionMap};
use crate::HierarchicalLayout;
use depscope_graph::Node;

/// Cartesian tree layout: x grows with depth, y with leaf order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearLayout {
    /// Distance between consecutive levels
    pub horizontal_spacing: f64,

    /// Distance between consecutive leaf offsets
    pub vertical_spacing: f64,
}

impl LinearLayout {
    pub fn new(horizontal_spacing: f64, vertical_spacing: f64) -> Self {
        Self {
            horizontal_spacing,
            vertical_spacing,
        }
    }
}

struct LinearHooks<'a> {
    layout: &'a LinearLayout,
    leaves: LeafCounter,
    positions: PositionMap,
}

impl LayoutHooks for LinearHooks<'_> {
    fn current_offset(&self, _level: usize) -> usize {
        self.leaves.current()
    }

    fn increment_offset(&mut self, _level: usize) {
        self.leaves.increment();
    }

    fn assign(&mut self, node: &Node, level: usize, offset: usize) {
        self.positions.insert(
            node.id().clone(),
            Point::new(
                level as f64 * self.layout.horizontal_spacing,
                offset as f64 * self.layout.vertical_spacing,
            ),
        );
    }
}

impl HierarchicalLayout for LinearLayout {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn compute(&self, hierarchy: &Hierarchy) -> PositionMap {
        let mut hooks = LinearHooks {
            layout: self,
            leaves: LeafCounter::default(),
            positions: PositionMap::new(),
        };
        let mut ctx = TraversalContext::new();
        place_roots(hierarchy, hierarchy.roots(), &mut hooks, &mut ctx);

        log::info!(
            "Linear layout placed {} node(s) over {} leaf slot(s)",
            hooks.positions.len(),
            hooks.leaves.current()
        );
        hooks.positions
    }
}
