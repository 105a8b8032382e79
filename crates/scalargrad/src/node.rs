//! Expression node variants and operator kinds.

use crate::graph::NodeId;

/// Binary operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `lhs + rhs`
    Add,
    /// `lhs - rhs`
    Sub,
    /// `lhs * rhs`
    Mul,
}

impl BinaryOp {
    /// Apply the operator to already-computed operand values.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
        }
    }

    /// Local partial derivatives with respect to `(lhs, rhs)`.
    ///
    /// For `Mul` these are `(rhs, lhs)` per the product rule.
    pub fn partials(self, lhs: f64, rhs: f64) -> (f64, f64) {
        match self {
            BinaryOp::Add => (1.0, 1.0),
            BinaryOp::Sub => (1.0, -1.0),
            BinaryOp::Mul => (rhs, lhs),
        }
    }
}

/// Unary operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `sin(arg)`
    Sin,
    /// `cos(arg)`
    Cos,
    /// `e^arg`
    Exp,
    /// `-arg`
    Neg,
}

impl UnaryOp {
    /// Apply the operator to an already-computed operand value.
    pub fn apply(self, arg: f64) -> f64 {
        match self {
            UnaryOp::Sin => arg.sin(),
            UnaryOp::Cos => arg.cos(),
            UnaryOp::Exp => arg.exp(),
            UnaryOp::Neg => -arg,
        }
    }

    /// Local partial derivative with respect to the operand.
    pub fn partial(self, arg: f64) -> f64 {
        match self {
            UnaryOp::Sin => arg.cos(),
            UnaryOp::Cos => -arg.sin(),
            UnaryOp::Exp => arg.exp(),
            UnaryOp::Neg => -1.0,
        }
    }
}

/// A node in the expression graph.
///
/// The variant set is closed: evaluation dispatches on the tag, so adding an
/// operator means adding a kind to [`UnaryOp`] or [`BinaryOp`] with its
/// `apply`/`partial` rules.
///
/// Operands are [`NodeId`] indices into the owning
/// [`ExprGraph`](crate::graph::ExprGraph); a node holds no numeric state of
/// its own beyond `Constant`'s fixed value. Forward values and gradients live
/// in per-pass storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    /// A fixed value, independent of the inputs.
    Constant(f64),
    /// An index into the input slice supplied at evaluation time.
    Variable(usize),
    /// A unary operator applied to one operand.
    Unary {
        /// Operator kind.
        op: UnaryOp,
        /// Operand id.
        arg: NodeId,
    },
    /// A binary operator applied to two operands.
    Binary {
        /// Operator kind.
        op: BinaryOp,
        /// Left operand id.
        lhs: NodeId,
        /// Right operand id.
        rhs: NodeId,
    },
}

impl Node {
    /// Direct operand ids, used purely for structural traversal.
    ///
    /// Empty for `Constant` and `Variable`.
    pub fn operands(&self) -> Vec<NodeId> {
        match self {
            Node::Constant(_) | Node::Variable(_) => Vec::new(),
            Node::Unary { arg, .. } => vec![*arg],
            Node::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
        }
    }
}
