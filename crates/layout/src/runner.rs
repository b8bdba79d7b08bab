use crate::hierarchy::Hierarchy;
use crate::positions::PositionMap;
use crate::HierarchicalLayout;
use depscope_graph::NodeSet;

/// Cooperative layout contract.
///
/// A host calls [`LayoutRunner::step`] until [`LayoutRunner::done`], and may
/// interleave other work between steps or simply stop. Positions assigned so
/// far remain readable at any point.
pub trait LayoutRunner {
    /// Number of steps a full run takes
    fn cost(&self) -> usize;

    /// Advance one unit of work; a no-op once done
    fn step(&mut self);

    fn done(&self) -> bool;

    fn positions(&self) -> &PositionMap;

    fn get_positions(&self, nodes: &NodeSet) -> PositionMap {
        self.positions().get_positions(nodes)
    }
}

/// Step `runner` until it reports completion. Returns the steps taken.
pub fn run_to_completion<R>(runner: &mut R) -> usize
where
    R: LayoutRunner + ?Sized,
{
    let mut steps = 0;
    while !runner.done() {
        runner.step();
        steps += 1;
    }
    steps
}

/// Runs a hierarchical layout in a single step
pub struct HierarchicalRunner {
    layout: Box<dyn HierarchicalLayout>,
    hierarchy: Hierarchy,
    positions: PositionMap,
    done: bool,
}

impl HierarchicalRunner {
    pub fn new(layout: Box<dyn HierarchicalLayout>, hierarchy: Hierarchy) -> Self {
        Self {
            layout,
            hierarchy,
            positions: PositionMap::new(),
            done: false,
        }
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn layout_name(&self) -> &'static str {
        self.layout.name()
    }

    /// Consume the runner, returning whatever has been placed
    pub fn into_positions(self) -> PositionMap {
        self.positions
    }
}

impl LayoutRunner for HierarchicalRunner {
    fn cost(&self) -> usize {
        1
    }

    fn step(&mut self) {
        if self.done {
            return;
        }
        self.positions = self.layout.compute(&self.hierarchy);
        self.done = true;
    }

    fn done(&self) -> bool {
        self.done
    }

    fn positions(&self) -> &PositionMap {
        &self.positions
    }
}
