//! Gradient storage container.

use crate::graph::NodeId;
use std::collections::HashMap;

/// Container for accumulated gradients.
///
/// Stores gradients keyed by [`NodeId`], with in-place accumulation for
/// nodes reached along multiple paths from the root.
#[derive(Debug)]
pub struct Gradients {
    grads: HashMap<NodeId, f64>,
}

impl Gradients {
    /// Create an empty gradient container.
    pub fn new() -> Self {
        Self {
            grads: HashMap::new(),
        }
    }

    /// Accumulate gradient for a node.
    ///
    /// If a gradient already exists, adds to it (for multiple paths).
    pub fn accumulate(&mut self, id: NodeId, grad: f64) {
        *self.grads.entry(id).or_insert(0.0) += grad;
    }

    /// Get gradient for a node.
    pub fn get(&self, id: NodeId) -> Option<f64> {
        self.grads.get(&id).copied()
    }

    /// Remove and return gradient (for handing to the backward sweep).
    pub fn remove(&mut self, id: NodeId) -> Option<f64> {
        self.grads.remove(&id)
    }

    /// Check if gradient exists for node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.grads.contains_key(&id)
    }

    /// Number of stored gradients.
    pub fn len(&self) -> usize {
        self.grads.len()
    }

    /// Check if no gradients stored.
    pub fn is_empty(&self) -> bool {
        self.grads.is_empty()
    }

    /// Iterate over all gradients.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.grads.iter().map(|(&id, &grad)| (id, grad))
    }
}

impl Default for Gradients {
    fn default() -> Self {
        Self::new()
    }
}
