//! Topological ordering of the expression DAG.

use crate::error::ExprError;
use crate::graph::{ExprGraph, NodeId};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};

/// Dependency-consistent visitation order for the nodes reachable from `root`.
///
/// Every operand appears strictly before all of its consumers and each
/// reachable node appears exactly once, so one pass over the order is a
/// forward pass and one pass over the reverse is a backward pass. A node
/// shared by several consumers (diamond dependency) is still listed once.
///
/// # Errors
///
/// - [`ExprError::NodeOutOfRange`] if `root` is not in the arena.
/// - [`ExprError::DanglingOperand`] if a reachable node references an id
///   outside the arena.
/// - [`ExprError::CycleDetected`] if the operand relation reachable from
///   `root` contains a cycle. Detection happens here, before any forward or
///   backward work, so a cyclic graph never causes unbounded traversal.
pub fn topological_order(graph: &ExprGraph, root: NodeId) -> Result<Vec<NodeId>, ExprError> {
    if graph.node(root).is_none() {
        return Err(ExprError::NodeOutOfRange {
            node: root,
            len: graph.len(),
        });
    }

    // Reachable set via BFS over operand edges. The visited set keeps this
    // bounded even when the operand relation has a cycle; the sort below is
    // what reports it.
    let mut reachable = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(root);

    while let Some(id) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        reachable.push(id);

        let node = graph.node(id).expect("visited node is in the arena");
        for operand in node.operands() {
            if graph.node(operand).is_none() {
                return Err(ExprError::DanglingOperand { node: id, operand });
            }
            if !visited.contains(&operand) {
                queue.push_back(operand);
            }
        }
    }

    // One petgraph edge per operand -> consumer relation; toposort then
    // yields operands-before-consumers or names a node on a cycle.
    let mut dag: DiGraph<NodeId, ()> = DiGraph::new();
    let mut indices: HashMap<NodeId, NodeIndex> = HashMap::new();
    for &id in &reachable {
        indices.insert(id, dag.add_node(id));
    }
    for &id in &reachable {
        let consumer = indices[&id];
        let node = graph.node(id).expect("reachable node is in the arena");
        for operand in node.operands() {
            dag.add_edge(indices[&operand], consumer, ());
        }
    }

    match toposort(&dag, None) {
        Ok(order) => Ok(order.into_iter().map(|ix| dag[ix]).collect()),
        Err(cycle) => Err(ExprError::CycleDetected {
            node: dag[cycle.node_id()],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{BinaryOp, Node, UnaryOp};

    /// Position of `id` in `order`, panicking if absent.
    fn pos(order: &[NodeId], id: NodeId) -> usize {
        order.iter().position(|&n| n == id).unwrap()
    }

    #[test]
    fn test_chain_operands_before_consumers() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);
        let s = g.sin(x);
        let root = g.exp(s);

        let order = topological_order(&g, root).unwrap();

        assert_eq!(order.len(), 3);
        assert!(pos(&order, x) < pos(&order, s));
        assert!(pos(&order, s) < pos(&order, root));
    }

    #[test]
    fn test_diamond_listed_once() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);
        let a = g.sin(x);
        let b = g.cos(x);
        let root = g.add(a, b);

        let order = topological_order(&g, root).unwrap();

        // x is shared by both branches but appears exactly once
        assert_eq!(order.len(), 4);
        assert!(pos(&order, x) < pos(&order, a));
        assert!(pos(&order, x) < pos(&order, b));
        assert!(pos(&order, a) < pos(&order, root));
        assert!(pos(&order, b) < pos(&order, root));
    }

    #[test]
    fn test_order_scoped_to_root() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);
        let root = g.sin(x);
        g.constant(42.0); // unreachable from root

        let order = topological_order(&g, root).unwrap();
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn test_self_cycle_detected() {
        let mut g = ExprGraph::new();
        // A node that names its own slot as operand
        let root = g.push(Node::Unary {
            op: UnaryOp::Sin,
            arg: NodeId::from_index(0),
        });

        let err = topological_order(&g, root).unwrap_err();
        assert!(matches!(err, ExprError::CycleDetected { .. }));
    }

    #[test]
    fn test_two_node_cycle_detected() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);
        // a (slot 1) consumes b (slot 2); b consumes a
        let a = g.push(Node::Binary {
            op: BinaryOp::Add,
            lhs: x,
            rhs: NodeId::from_index(2),
        });
        let root = g.push(Node::Unary {
            op: UnaryOp::Sin,
            arg: a,
        });

        let err = topological_order(&g, root).unwrap_err();
        assert!(matches!(err, ExprError::CycleDetected { .. }));
    }

    #[test]
    fn test_dangling_operand() {
        let mut g = ExprGraph::new();
        let x = g.variable(0);
        let root = g.push(Node::Binary {
            op: BinaryOp::Mul,
            lhs: x,
            rhs: NodeId::from_index(7),
        });

        let err = topological_order(&g, root).unwrap_err();
        assert!(matches!(
            err,
            ExprError::DanglingOperand { operand, .. } if operand.index() == 7
        ));
    }

    #[test]
    fn test_root_out_of_range() {
        let g = ExprGraph::new();
        let err = topological_order(&g, NodeId::from_index(0)).unwrap_err();
        assert!(matches!(err, ExprError::NodeOutOfRange { len: 0, .. }));
    }
}
