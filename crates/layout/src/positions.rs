use depscope_graph::{NodeId, NodeSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 2D point in layout space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the origin
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Axis-aligned bounding box of a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }
}

/// Layout output: node id -> position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionMap {
    positions: BTreeMap<NodeId, Point>,
}

impl PositionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NodeId, point: Point) {
        self.positions.insert(id, point);
    }

    pub fn get(&self, id: &NodeId) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Positions for an arbitrary subset of nodes; unplaced nodes are omitted
    pub fn get_positions(&self, nodes: &NodeSet) -> PositionMap {
        let positions = nodes
            .iter()
            .filter_map(|node| self.get(node.id()).map(|p| (node.id().clone(), p)))
            .collect();
        PositionMap { positions }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Point)> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.positions.values();
        let first = *points.next()?;
        Some(points.fold(
            Bounds {
                min: first,
                max: first,
            },
            |b, p| Bounds {
                min: Point::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                max: Point::new(b.max.x.max(p.x), b.max.y.max(p.y)),
            },
        ))
    }
}

/// Uniformly scale and translate positions into a `width` x `height`
/// viewport anchored at the origin, leaving `margin` on each side.
///
/// A degenerate extent (single point, or all points on a line) is centred
/// instead of stretched.
pub fn fit_to_viewport(positions: &PositionMap, width: f64, height: f64, margin: f64) -> PositionMap {
    let Some(bounds) = positions.bounds() else {
        return PositionMap::new();
    };

    let inner_w = (width - 2.0 * margin).max(0.0);
    let inner_h = (height - 2.0 * margin).max(0.0);

    let scale_x = (bounds.width() > 0.0).then(|| inner_w / bounds.width());
    let scale_y = (bounds.height() > 0.0).then(|| inner_h / bounds.height());
    let scale = match (scale_x, scale_y) {
        (Some(x), Some(y)) => x.min(y),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => 1.0,
    };

    let from = bounds.center();
    let to = Point::new(width / 2.0, height / 2.0);

    let mut fitted = PositionMap::new();
    for (id, p) in positions.iter() {
        fitted.insert(
            id.clone(),
            Point::new(
                to.x + (p.x - from.x) * scale,
                to.y + (p.y - from.y) * scale,
            ),
        );
    }
    fitted
}
