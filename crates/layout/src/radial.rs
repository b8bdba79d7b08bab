use crate::hierarchical::{place_roots, LayoutHooks, LeafCounter, TraversalContext};
use crate::hierarchy::Hierarchy;
use crate::positions::{Point, PositionMap};
use crate::HierarchicalLayout;
use depscope_graph::{Node, NodeSet};
use std::f64::consts::TAU;

/// Concentric-ring layout: ring = hierarchy depth, angle = leaf offset.
///
/// Runs the hierarchical traversal twice. The dry run only measures the
/// number of leaf slots (the circumference) and the deepest level; the second
/// run places nodes using that circumference. Roots without children
/// ("orphans") are kept out of both runs and spread on the ring just outside
/// the deepest level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialLayout {
    /// Distance between consecutive rings
    pub ring_spacing: f64,
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self { ring_spacing: 1.0 }
    }
}

/// Result of the dry run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadialMeasure {
    /// Leaf slots around the circle, never zero
    pub circumference: usize,

    /// Deepest level assigned, `None` when only orphans exist
    pub max_level: Option<usize>,

    pub orphans: usize,
}

enum Pass {
    DryRun,
    Place { radians_per_leaf: f64 },
}

struct RadialHooks {
    pass: Pass,
    ring_spacing: f64,
    leaves: LeafCounter,
    max_level: Option<usize>,
    positions: PositionMap,
}

impl RadialHooks {
    fn new(pass: Pass, ring_spacing: f64) -> Self {
        Self {
            pass,
            ring_spacing,
            leaves: LeafCounter::default(),
            max_level: None,
            positions: PositionMap::new(),
        }
    }
}

impl LayoutHooks for RadialHooks {
    fn current_offset(&self, _level: usize) -> usize {
        self.leaves.current()
    }

    fn increment_offset(&mut self, _level: usize) {
        self.leaves.increment();
    }

    fn assign(&mut self, node: &Node, level: usize, offset: usize) {
        self.max_level = Some(self.max_level.map_or(level, |max| max.max(level)));

        if let Pass::Place { radians_per_leaf } = self.pass {
            let angle = offset as f64 * radians_per_leaf;
            let radius = level as f64 * self.ring_spacing;
            self.positions
                .insert(node.id().clone(), Point::new(angle.cos() * radius, angle.sin() * radius));
        }
    }

    fn root_level(&self, roots: &NodeSet) -> usize {
        radial_root_level(roots.len())
    }
}

/// Starting ring for the roots: more roots start further out
pub fn radial_root_level(root_count: usize) -> usize {
    match root_count {
        0 | 1 => 0,
        2..=3 => 1,
        4..=9 => 2,
        _ => 3,
    }
}

/// Split roots into those with children and childless orphans
pub fn split_orphans(hierarchy: &Hierarchy) -> (NodeSet, NodeSet) {
    hierarchy
        .roots()
        .iter()
        .cloned()
        .partition(|root| !hierarchy.is_leaf(root))
}

impl RadialLayout {
    pub fn new(ring_spacing: f64) -> Self {
        Self { ring_spacing }
    }

    /// First pass: count leaf slots and the deepest level without placing
    pub fn measure(&self, hierarchy: &Hierarchy) -> RadialMeasure {
        let (roots, orphans) = split_orphans(hierarchy);

        let mut dry = RadialHooks::new(Pass::DryRun, self.ring_spacing);
        place_roots(hierarchy, &roots, &mut dry, &mut TraversalContext::new());

        RadialMeasure {
            circumference: dry.leaves.current().max(orphans.len()).max(1),
            max_level: dry.max_level,
            orphans: orphans.len(),
        }
    }
}

impl HierarchicalLayout for RadialLayout {
    fn name(&self) -> &'static str {
        "radial"
    }

    fn compute(&self, hierarchy: &Hierarchy) -> PositionMap {
        let measure = self.measure(hierarchy);
        let (roots, orphans) = split_orphans(hierarchy);

        let radians_per_leaf = TAU / measure.circumference as f64;
        let mut hooks = RadialHooks::new(Pass::Place { radians_per_leaf }, self.ring_spacing);
        place_roots(hierarchy, &roots, &mut hooks, &mut TraversalContext::new());

        let orphan_level = measure.max_level.map_or(0, |level| level + 1);
        for (offset, orphan) in orphans.iter().enumerate() {
            hooks.assign(orphan, orphan_level, offset);
        }

        log::info!(
            "Radial layout placed {} node(s): circumference {}, {} orphan(s) on ring {}",
            hooks.positions.len(),
            measure.circumference,
            measure.orphans,
            orphan_level
        );
        hooks.positions
    }
}
