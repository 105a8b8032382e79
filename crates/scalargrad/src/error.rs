//! Error types for scalargrad.

use crate::graph::NodeId;
use thiserror::Error;

/// Errors that can occur when traversing or evaluating an expression graph.
///
/// All of these are unrecoverable at the point of evaluation: the caller's
/// remedy is to fix the graph or the input vector and re-invoke.
#[derive(Debug, Error)]
pub enum ExprError {
    /// A variable's location is out of range for the supplied inputs.
    #[error("variable location {location} out of range for {inputs_len} inputs")]
    VariableOutOfBounds { location: usize, inputs_len: usize },

    /// The operand relation is not acyclic.
    #[error("cycle detected through node {}", .node.index())]
    CycleDetected { node: NodeId },

    /// A node references an operand id that is not in the arena.
    #[error("node {} references operand {} outside the graph", .node.index(), .operand.index())]
    DanglingOperand { node: NodeId, operand: NodeId },

    /// The requested node id is not in the arena.
    #[error("node {} out of range for graph of {len} nodes", .node.index())]
    NodeOutOfRange { node: NodeId, len: usize },
}
