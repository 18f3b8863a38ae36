//! The value objects components emit for one MNA assembly.

use super::NodeId;

/// A single matrix contribution emitted by a component.
#[derive(Debug, Clone, PartialEq)]
pub enum Stamp {
    /// Adds conductance `g` between `n1` and `n2` (either may be ground).
    Conductance { n1: NodeId, n2: NodeId, g: f64 },

    /// Imposes `V(n_plus) - V(n_minus) = v`, introducing one extra MNA
    /// unknown (this branch's current). `id` is the key this current
    /// is reported under in [`crate::solver::SolveResult::vs_currents`].
    VoltageSource {
        n_plus: NodeId,
        n_minus: NodeId,
        v: f64,
        id: String,
    },

    /// Injects current `i` into node `n` (positive = into the node).
    CurrentInjection { n: NodeId, i: f64 },
}

impl Stamp {
    pub fn conductance(n1: NodeId, n2: NodeId, g: f64) -> Self {
        Self::Conductance { n1, n2, g }
    }

    pub fn voltage_source(n_plus: NodeId, n_minus: NodeId, v: f64, id: impl Into<String>) -> Self {
        Self::VoltageSource {
            n_plus,
            n_minus,
            v,
            id: id.into(),
        }
    }

    pub fn current_injection(n: NodeId, i: f64) -> Self {
        Self::CurrentInjection { n, i }
    }
}
