//! Depth-first traversal shared by section folding, the tree dump and rendering

use super::ast::Node;

/// What a visitor wants the walk to do after seeing a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Descend into the node's children, then move on
    Continue,
    /// Abandon the whole walk
    Stop,
    /// Move on without visiting the node's children
    Skip,
}

/// Visit `nodes` and their descendants in document order
///
/// The visitor receives each node with its depth (0 for `nodes` themselves).
/// Returns `Stop` if any visit stopped the walk, `Continue` otherwise.
pub fn walk<F>(nodes: &[Node], mut visit: F) -> WalkControl
where
    F: FnMut(&Node, usize) -> WalkControl,
{
    walk_children(nodes, 0, &mut visit)
}

fn walk_children<F>(nodes: &[Node], depth: usize, visit: &mut F) -> WalkControl
where
    F: FnMut(&Node, usize) -> WalkControl,
{
    for node in nodes {
        let control = match visit(node, depth) {
            WalkControl::Stop => WalkControl::Stop,
            WalkControl::Skip => WalkControl::Continue,
            WalkControl::Continue => walk_children(&node.children, depth + 1, visit),
        };
        if control == WalkControl::Stop {
            return WalkControl::Stop;
        }
    }
    WalkControl::Continue
}

/// Mutable counterpart of [`walk`]; children are visited after the visitor
/// has had a chance to edit them
pub fn walk_mut<F>(nodes: &mut [Node], mut visit: F) -> WalkControl
where
    F: FnMut(&mut Node, usize) -> WalkControl,
{
    walk_children_mut(nodes, 0, &mut visit)
}

fn walk_children_mut<F>(nodes: &mut [Node], depth: usize, visit: &mut F) -> WalkControl
where
    F: FnMut(&mut Node, usize) -> WalkControl,
{
    for node in nodes {
        let control = match visit(&mut *node, depth) {
            WalkControl::Stop => WalkControl::Stop,
            WalkControl::Skip => WalkControl::Continue,
            WalkControl::Continue => walk_children_mut(&mut node.children, depth + 1, visit),
        };
        if control == WalkControl::Stop {
            return WalkControl::Stop;
        }
    }
    WalkControl::Continue
}
