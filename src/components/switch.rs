//! Ideal switch: a 0 V voltage-source short when closed, an open circuit otherwise.

use crate::netlist::{ComponentId, NodeId, NodeVoltages, Stamp};

/// An ideal switch between pins `A` and `B`.
///
/// A closed switch is stamped as `VS(A, B, 0)` — an equality
/// constraint enforced through the MNA extension — rather than as a
/// very small resistance, which would leave the matrix ill-conditioned.
#[derive(Debug, Clone)]
pub struct Switch {
    pub id: ComponentId,
    pub a: NodeId,
    pub b: NodeId,
    pub closed: bool,
}

impl Switch {
    pub const PINS: [&'static str; 2] = ["A", "B"];

    pub fn new(id: ComponentId, a: NodeId, b: NodeId, closed: bool) -> Self {
        Self { id, a, b, closed }
    }

    pub fn stamps(&self) -> Vec<Stamp> {
        if self.closed {
            vec![Stamp::voltage_source(self.a, self.b, 0.0, self.id.to_string())]
        } else {
            Vec::new()
        }
    }

    /// No-op: the open/closed bit is a user input, not solved.
    pub fn update_state(&mut self, _voltages: &NodeVoltages) {}
}
