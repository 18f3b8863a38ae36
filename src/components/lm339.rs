//! LM339 open-collector comparator.

use crate::netlist::{ComponentId, NodeId, NodeVoltages, Stamp};

/// Activation margin (volts) around the two comparator inputs.
pub const ACTIVE_MARGIN: f64 = 1e-3;

/// An LM339 comparator: `VCC`, `GND`, `IN+`, `IN-`, `OUT`.
///
/// Open-collector: when active, the output is pulled hard to this
/// component's own `GND` pin; when inactive, the output is high-Z and
/// relies on an external pull-up to read high.
///
/// Polarity note: this part activates — pulls `OUT` low — when
/// `IN+ > IN- + margin`, the inverse of a textbook LM339. Kept as the
/// documented behavior of the modeled part rather than "corrected" to
/// the textbook polarity.
#[derive(Debug, Clone)]
pub struct Lm339 {
    pub id: ComponentId,
    pub vcc: NodeId,
    pub gnd: NodeId,
    pub in_pos: NodeId,
    pub in_neg: NodeId,
    pub out: NodeId,
    pub active: bool,
}

impl Lm339 {
    pub const PINS: [&'static str; 5] = ["VCC", "GND", "IN+", "IN-", "OUT"];

    pub fn new(id: ComponentId, vcc: NodeId, gnd: NodeId, in_pos: NodeId, in_neg: NodeId, out: NodeId) -> Self {
        Self {
            id,
            vcc,
            gnd,
            in_pos,
            in_neg,
            out,
            active: false,
        }
    }

    pub fn stamps(&self) -> Vec<Stamp> {
        if self.active {
            vec![Stamp::voltage_source(self.out, self.gnd, 0.0, self.id.to_string())]
        } else {
            Vec::new()
        }
    }

    pub fn update_state(&mut self, voltages: &NodeVoltages) {
        self.active = voltages.get(self.in_pos) > voltages.get(self.in_neg) + ACTIVE_MARGIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voltages(in_pos: f64, in_neg: f64) -> NodeVoltages {
        NodeVoltages::from_solution(&[NodeId(1), NodeId(2)], &[in_pos, in_neg])
    }

    #[test]
    fn in_plus_greater_activates_and_pulls_output_low() {
        let mut cmp = Lm339::new(
            ComponentId::new("U1"),
            NodeId(3),
            NodeId::GROUND,
            NodeId(1),
            NodeId(2),
            NodeId(4),
        );
        cmp.update_state(&voltages(3.0, 2.0));
        assert!(cmp.active);
        assert_eq!(cmp.stamps().len(), 1);
    }

    #[test]
    fn in_plus_lower_is_inactive_and_high_z() {
        let mut cmp = Lm339::new(
            ComponentId::new("U1"),
            NodeId(3),
            NodeId::GROUND,
            NodeId(1),
            NodeId(2),
            NodeId(4),
        );
        cmp.update_state(&voltages(2.0, 3.0));
        assert!(!cmp.active);
        assert!(cmp.stamps().is_empty());
    }
}
