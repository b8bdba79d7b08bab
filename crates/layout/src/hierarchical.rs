//! Depth-first placement shared by the hierarchical layouts.
//!
//! Concrete layouts supply a [`LayoutHooks`] implementation that decides how
//! leaf offsets are counted and what "assigning" a node means. The traversal
//! itself owns no state beyond the [`TraversalContext`] passed in.

use crate::hierarchy::Hierarchy;
use depscope_graph::{Node, NodeSet};
use std::collections::HashSet;

/// Callbacks a concrete hierarchical layout provides to the traversal
pub trait LayoutHooks {
    /// Next free offset at `level`
    fn current_offset(&self, level: usize) -> usize;

    /// Consume the offset returned by [`LayoutHooks::current_offset`]
    fn increment_offset(&mut self, level: usize);

    fn assign(&mut self, node: &Node, level: usize, offset: usize);

    /// Level at which every root starts
    fn root_level(&self, _roots: &NodeSet) -> usize {
        0
    }
}

/// Per-run traversal state. Never share one between runs.
#[derive(Debug, Default)]
pub struct TraversalContext {
    visited: HashSet<Node>,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visited(&self, node: &Node) -> bool {
        self.visited.contains(node)
    }
}

/// Place every root (and whatever it reaches) through `hooks`
pub fn place_roots<H>(hierarchy: &Hierarchy, roots: &NodeSet, hooks: &mut H, ctx: &mut TraversalContext)
where
    H: LayoutHooks + ?Sized,
{
    let level = hooks.root_level(roots);
    for root in roots {
        place_subtree(hierarchy, root, level, hooks, ctx);
    }
}

/// A node whose children are being placed
struct Frame {
    node: Node,
    level: usize,
    children: Vec<Node>,
    next: usize,
    left: usize,
    placed_any: bool,
}

impl Frame {
    /// Open a frame for a node that was just marked visited
    fn enter<H>(hierarchy: &Hierarchy, node: Node, level: usize, hooks: &H, ctx: &TraversalContext) -> Self
    where
        H: LayoutHooks + ?Sized,
    {
        let children = order_children(hierarchy, &node, ctx);
        let left = hooks.current_offset(level + 1);
        Self {
            node,
            level,
            children,
            next: 0,
            left,
            placed_any: false,
        }
    }

    /// Assign the node once every child has been handled
    fn finish<H>(self, hooks: &mut H)
    where
        H: LayoutHooks + ?Sized,
    {
        let right = hooks.current_offset(self.level + 1);

        if self.placed_any && right > self.left {
            // Children used offsets left..=right - 1; centre between the first and last
            let last = right - 1;
            hooks.assign(&self.node, self.level, (self.left + last) / 2);
        } else {
            let offset = hooks.current_offset(self.level);
            hooks.assign(&self.node, self.level, offset);
            hooks.increment_offset(self.level);
        }
    }
}

/// Depth-first placement of `root` and its unvisited subtree.
///
/// Uses an explicit frame stack, so depth is bounded by memory rather than
/// the call stack. A node already placed earlier in this run is skipped.
fn place_subtree<H>(
    hierarchy: &Hierarchy,
    root: &Node,
    level: usize,
    hooks: &mut H,
    ctx: &mut TraversalContext,
) where
    H: LayoutHooks + ?Sized,
{
    if !ctx.visited.insert(root.clone()) {
        return;
    }

    let mut stack = vec![Frame::enter(hierarchy, root.clone(), level, hooks, ctx)];

    while let Some(frame) = stack.last_mut() {
        match frame.children.get(frame.next).cloned() {
            Some(child) => {
                frame.next += 1;
                if ctx.visited.insert(child.clone()) {
                    frame.placed_any = true;
                    let child_level = frame.level + 1;
                    stack.push(Frame::enter(hierarchy, child, child_level, hooks, ctx));
                }
            }
            None => {
                if let Some(done) = stack.pop() {
                    done.finish(hooks);
                }
            }
        }
    }
}

/// Unvisited children, leaves first, then inner nodes; each group by id
pub fn order_children(hierarchy: &Hierarchy, node: &Node, ctx: &TraversalContext) -> Vec<Node> {
    let Some(children) = hierarchy.children(node) else {
        return Vec::new();
    };

    let (mut leaves, inner): (Vec<Node>, Vec<Node>) = children
        .iter()
        .filter(|child| !ctx.is_visited(child))
        .cloned()
        .partition(|child| hierarchy.is_leaf(child));

    leaves.extend(inner);
    leaves
}

/// Leaf counter shared by all levels, as used by the linear and radial layouts
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafCounter {
    next: usize,
}

impl LeafCounter {
    pub fn current(&self) -> usize {
        self.next
    }

    pub fn increment(&mut self) {
        self.next += 1;
    }
}
