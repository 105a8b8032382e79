//! Backward pass execution for reverse-mode automatic differentiation.

use crate::error::ExprError;
use crate::forward::forward_values;
use crate::gradients::Gradients;
use crate::graph::{ExprGraph, NodeId};
use crate::node::Node;
use crate::topo::topological_order;

/// Run a full forward/backward cycle and return the gradients of `root` with
/// respect to every variable it depends on.
///
/// The topological order is built once; forward runs over it, then the
/// gradient of the root is seeded to 1 and propagated in reverse order.
/// Because each node's consumers all run before the node itself, the
/// gradient handed to a node's backward step is already fully accumulated,
/// and a node shared by several consumers receives the sum of every path's
/// contribution (the multivariate chain rule).
///
/// # Arguments
///
/// * `graph` - The expression arena.
/// * `root` - The designated scalar output.
/// * `inputs` - The input vector variables read from.
///
/// # Returns
///
/// A [`Gradients`] mapping keyed by the graph's *variable* node ids.
/// Gradients reaching constants are discarded (constants do not participate
/// further), and interior operator gradients are consumed by the sweep.
///
/// # Example
///
/// ```
/// use scalargrad::{evaluate_gradients, ExprGraph};
///
/// // f(x1, x2) = x1*x2 + sin(x1)
/// let mut g = ExprGraph::new();
/// let x1 = g.variable(0);
/// let x2 = g.variable(1);
/// let prod = g.mul(x1, x2);
/// let s = g.sin(x1);
/// let f = g.add(prod, s);
///
/// let grads = evaluate_gradients(&g, f, &[1.0, 2.0]).unwrap();
///
/// // df/dx1 = x2 + cos(x1), df/dx2 = x1
/// assert!((grads.get(x1).unwrap() - (2.0 + 1.0f64.cos())).abs() < 1e-12);
/// assert!((grads.get(x2).unwrap() - 1.0).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// Propagates ordering errors ([`ExprError::CycleDetected`],
/// [`ExprError::DanglingOperand`], [`ExprError::NodeOutOfRange`]) and
/// [`ExprError::VariableOutOfBounds`] from the forward pass.
pub fn evaluate_gradients(
    graph: &ExprGraph,
    root: NodeId,
    inputs: &[f64],
) -> Result<Gradients, ExprError> {
    let order = topological_order(graph, root)?;
    let values = forward_values(graph, &order, inputs)?;

    // Fresh storage per call: no gradient state survives between runs
    let mut gradients = Gradients::new();
    gradients.accumulate(root, 1.0);

    for &id in order.iter().rev() {
        let grad = match gradients.remove(id) {
            Some(g) => g,
            None => continue, // no gradient flows to this node
        };

        match graph.node(id).expect("ordered node is in the arena") {
            // Constants absorb their gradient; there is nothing to propagate into
            Node::Constant(_) => {}
            // Variables keep theirs: this is the caller-facing result
            Node::Variable(_) => gradients.accumulate(id, grad),
            Node::Unary { op, arg } => {
                gradients.accumulate(*arg, op.partial(values[arg.index()]) * grad);
            }
            Node::Binary { op, lhs, rhs } => {
                let (dl, dr) = op.partials(values[lhs.index()], values[rhs.index()]);
                gradients.accumulate(*lhs, dl * grad);
                gradients.accumulate(*rhs, dr * grad);
            }
        }
    }

    Ok(gradients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_gradients() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);
        let y = g.variable(1);
        let root = g.add(x, y);

        let grads = evaluate_gradients(&g, root, &[5.0, 7.0]).unwrap();

        assert_eq!(grads.get(x), Some(1.0));
        assert_eq!(grads.get(y), Some(1.0));
    }

    #[test]
    fn test_mul_gradients_follow_product_rule() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);
        let y = g.variable(1);
        let root = g.mul(x, y);

        let grads = evaluate_gradients(&g, root, &[5.0, 7.0]).unwrap();

        assert_eq!(grads.get(x), Some(7.0));
        assert_eq!(grads.get(y), Some(5.0));
    }

    #[test]
    fn test_constant_absorbs_gradient() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);
        let c = g.constant(3.0);
        let root = g.mul(x, c);

        let grads = evaluate_gradients(&g, root, &[2.0]).unwrap();

        assert_eq!(grads.get(x), Some(3.0));
        assert_eq!(grads.get(c), None);
        assert_eq!(grads.len(), 1);
    }

    #[test]
    fn test_root_variable_gradient_is_one() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);

        let grads = evaluate_gradients(&g, x, &[4.0]).unwrap();
        assert_eq!(grads.get(x), Some(1.0));
    }

    #[test]
    fn test_shared_operand_accumulates() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);
        // f = x * x, both operands the same node
        let root = g.mul(x, x);

        let grads = evaluate_gradients(&g, root, &[3.0]).unwrap();

        // df/dx = 2x, only via accumulation across both operand slots
        assert_eq!(grads.get(x), Some(6.0));
    }

    #[test]
    fn test_unary_chain() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);
        let inner = g.sin(x);
        let root = g.sin(inner);

        let grads = evaluate_gradients(&g, root, &[0.5]).unwrap();

        let expected = 0.5f64.sin().cos() * 0.5f64.cos();
        assert!((grads.get(x).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_neg_and_sub() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);
        let y = g.variable(1);
        let n = g.neg(y);
        let root = g.sub(x, n); // x - (-y) = x + y

        let grads = evaluate_gradients(&g, root, &[1.0, 2.0]).unwrap();

        assert_eq!(grads.get(x), Some(1.0));
        assert_eq!(grads.get(y), Some(1.0));
    }
}
