//! scalargrad - reverse-mode automatic differentiation over scalar
//! expression graphs.
//!
//! This crate computes gradients of a scalar-valued arithmetic expression
//! with respect to its inputs by backpropagation over an explicit DAG of
//! nodes (constants, variables, operators).
//!
//! # Architecture
//!
//! ```text
//! ExprGraph (arena, Vec<Node>)          topological_order (petgraph)
//!        │                                       │
//!        ▼                                       ▼
//!  Node::{Constant, Variable,      forward_values: Vec<f64> per pass
//!         Unary, Binary}                         │
//!        │                                       ▼
//!        └── operands: NodeId ──►  backward sweep → Gradients (HashMap)
//! ```
//!
//! Nodes reference their operands by [`NodeId`] index into the arena, so a
//! subexpression shared by several consumers is a single node and its
//! gradient accumulates across every path from the root. The graph is never
//! mutated by evaluation: each pass allocates fresh value and gradient
//! storage, so repeated runs with different inputs cannot contaminate each
//! other.
//!
//! A single deduplicated topological order (operands before consumers)
//! drives both directions: forward walks it once, backward walks it in
//! reverse with the root gradient seeded to 1. Cyclic graphs are rejected
//! with [`ExprError::CycleDetected`] before any evaluation work.
//!
//! # Example
//!
//! ```
//! use scalargrad::{evaluate_gradients, value, ExprGraph};
//!
//! // f(x1, x2) = x1*x2 + sin(x1)
//! let mut g = ExprGraph::new();
//! let x1 = g.variable(0);
//! let x2 = g.variable(1);
//! let prod = g.mul(x1, x2);
//! let s = g.sin(x1);
//! let f = g.add(prod, s);
//!
//! let x = [1.0, 2.0];
//! let fx = value(&g, f, &x).unwrap();
//! assert!((fx - (2.0 + 1.0f64.sin())).abs() < 1e-12);
//!
//! let grads = evaluate_gradients(&g, f, &x).unwrap();
//! assert!((grads.get(x1).unwrap() - (2.0 + 1.0f64.cos())).abs() < 1e-12);
//! assert!((grads.get(x2).unwrap() - 1.0).abs() < 1e-12);
//! ```
//!
//! # Key Types
//!
//! - [`ExprGraph`]: arena owning the expression DAG
//! - [`Node`], [`UnaryOp`], [`BinaryOp`]: the closed node variant set
//! - [`evaluate_gradients`]: forward + backward cycle, returns [`Gradients`]
//! - [`value`]: forward-only evaluation

pub mod backward;
pub mod error;
pub mod forward;
pub mod gradients;
pub mod graph;
pub mod node;
pub mod topo;

pub use backward::evaluate_gradients;
pub use error::ExprError;
pub use forward::{forward_values, value};
pub use gradients::Gradients;
pub use graph::{ExprGraph, NodeId};
pub use node::{BinaryOp, Node, UnaryOp};
pub use topo::topological_order;
