//! Set algebra over node collections

use crate::types::NodeSet;

/// Nodes present in both collections
pub fn and(left: &NodeSet, right: &NodeSet) -> NodeSet {
    left.intersection(right).cloned().collect()
}

/// Nodes present in either collection
pub fn or(left: &NodeSet, right: &NodeSet) -> NodeSet {
    left.union(right).cloned().collect()
}

/// Nodes of `left` that are not in `right`
pub fn not(left: &NodeSet, right: &NodeSet) -> NodeSet {
    left.difference(right).cloned().collect()
}

/// Nodes present in exactly one collection
pub fn xor(left: &NodeSet, right: &NodeSet) -> NodeSet {
    left.symmetric_difference(right).cloned().collect()
}
