//! Ideal (optionally current-limited) voltage source.

use crate::netlist::{ComponentId, NodeId, NodeVoltages, Stamp};

/// A voltage source between `PLUS` and `MINUS`.
///
/// When `max_current` is `Some(imax)`, the source is modeled with an
/// internal conductance `Imax / V` in parallel with the ideal source —
/// a linearized current limit, not a true saturation. It sags smoothly
/// as load current approaches `Imax` rather than clamping at it.
#[derive(Debug, Clone)]
pub struct VoltageSource {
    pub id: ComponentId,
    pub plus: NodeId,
    pub minus: NodeId,
    pub voltage: f64,
    pub max_current: Option<f64>,
}

impl VoltageSource {
    pub const PINS: [&'static str; 2] = ["PLUS", "MINUS"];

    pub fn new(id: ComponentId, plus: NodeId, minus: NodeId, voltage: f64, max_current: Option<f64>) -> Self {
        Self {
            id,
            plus,
            minus,
            voltage,
            max_current,
        }
    }

    pub fn stamps(&self) -> Vec<Stamp> {
        let mut stamps = vec![Stamp::voltage_source(self.plus, self.minus, self.voltage, self.id.to_string())];
        if let Some(imax) = self.max_current {
            if self.voltage != 0.0 {
                stamps.push(Stamp::conductance(self.plus, self.minus, imax / self.voltage));
            }
        }
        stamps
    }

    /// No-op: the source's own state is a fixed parameter.
    pub fn update_state(&mut self, _voltages: &NodeVoltages) {}
}
