//! # Depscope Layout
//!
//! Hierarchical layouts for dependency graphs.
//!
//! ## Architecture
//!
//! ```text
//! GraphModel + EdgeMatcher
//!     │
//!     ├──> Hierarchy (successor map, roots)
//!     │
//!     ├──> Hierarchical traversal (depth-first, leaves first, visited set)
//!     │      ├─ LinearLayout: (level * h, offset * v)
//!     │      └─ RadialLayout: dry run (circumference) + placement on rings
//!     │
//!     └──> LayoutRunner (cost / step / done) ──> PositionMap
//! ```

mod config;
mod error;
pub mod hierarchical;
mod hierarchy;
mod linear;
mod positions;
mod radial;
mod runner;

pub use config::{LayoutConfig, LayoutKind};
pub use error::{LayoutError, Result};
pub use hierarchy::Hierarchy;
pub use linear::LinearLayout;
pub use positions::{fit_to_viewport, Bounds, Point, PositionMap};
pub use radial::{radial_root_level, split_orphans, RadialLayout, RadialMeasure};
pub use runner::{run_to_completion, HierarchicalRunner, LayoutRunner};

/// A layout computed from a [`Hierarchy`] in one pass
pub trait HierarchicalLayout: Send + Sync {
    fn name(&self) -> &'static str;

    fn compute(&self, hierarchy: &Hierarchy) -> PositionMap;
}
