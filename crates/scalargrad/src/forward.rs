//! Forward evaluation pass.

use crate::error::ExprError;
use crate::graph::{ExprGraph, NodeId};
use crate::node::Node;
use crate::topo::topological_order;

/// Compute the value of every node in `order`.
///
/// `order` must place operands before their consumers, as produced by
/// [`topological_order`]. Values are written into a side array indexed by
/// arena slot, so the graph itself stays untouched and repeated passes with
/// different inputs cannot interfere.
///
/// # Errors
///
/// [`ExprError::VariableOutOfBounds`] if a variable's location is out of
/// range for `inputs`. The error is surfaced immediately, never clamped.
pub fn forward_values(
    graph: &ExprGraph,
    order: &[NodeId],
    inputs: &[f64],
) -> Result<Vec<f64>, ExprError> {
    let mut values = vec![0.0; graph.len()];

    for &id in order {
        let node = graph.node(id).expect("ordered node is in the arena");
        let value = match node {
            Node::Constant(c) => *c,
            Node::Variable(location) => {
                *inputs
                    .get(*location)
                    .ok_or(ExprError::VariableOutOfBounds {
                        location: *location,
                        inputs_len: inputs.len(),
                    })?
            }
            // Operand values are final: the order lists them first
            Node::Unary { op, arg } => op.apply(values[arg.index()]),
            Node::Binary { op, lhs, rhs } => op.apply(values[lhs.index()], values[rhs.index()]),
        };
        values[id.index()] = value;
    }

    Ok(values)
}

/// Forward-only evaluation of `root` at `inputs`.
///
/// The value is a pure function of `inputs` and the graph structure; calling
/// this twice with identical inputs yields identical results.
///
/// # Example
///
/// ```
/// use scalargrad::{value, ExprGraph};
///
/// let mut g = ExprGraph::new();
/// let x = g.variable(0);
/// let two = g.constant(2.0);
/// let root = g.mul(x, two);
///
/// assert_eq!(value(&g, root, &[3.0]).unwrap(), 6.0);
/// ```
///
/// # Errors
///
/// Propagates ordering errors ([`ExprError::CycleDetected`],
/// [`ExprError::DanglingOperand`], [`ExprError::NodeOutOfRange`]) and
/// [`ExprError::VariableOutOfBounds`] from the forward pass.
pub fn value(graph: &ExprGraph, root: NodeId, inputs: &[f64]) -> Result<f64, ExprError> {
    let order = topological_order(graph, root)?;
    let values = forward_values(graph, &order, inputs)?;
    Ok(values[root.index()])
}
