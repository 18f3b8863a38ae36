//! Resistor: a single conductance between two pins.

use crate::netlist::{ComponentId, NodeId, NodeVoltages, Stamp};

/// A linear resistor between pins `A` and `B`.
#[derive(Debug, Clone)]
pub struct Resistor {
    pub id: ComponentId,
    pub a: NodeId,
    pub b: NodeId,
    /// Resistance in ohms, R > 0.
    pub resistance: f64,
}

impl Resistor {
    pub const PINS: [&'static str; 2] = ["A", "B"];

    pub fn new(id: ComponentId, a: NodeId, b: NodeId, resistance: f64) -> Self {
        Self { id, a, b, resistance }
    }

    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    pub fn stamps(&self) -> Vec<Stamp> {
        vec![Stamp::conductance(self.a, self.b, self.conductance())]
    }

    /// No-op: resistors carry no behavioral state.
    pub fn update_state(&mut self, _voltages: &NodeVoltages) {}
}
