//! HC04 inverter and HC08 2-input AND, modelled as rail-to-rail digital
//! drivers with indeterminate-input retention.

use crate::netlist::{ComponentId, NodeId, NodeVoltages, Stamp};

/// The three-valued read of a digital input against its gate's rails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    High,
    Low,
    Indeterminate,
}

/// Classify `v` against `VIL = 0.3*vcc`, `VIH = 0.7*vcc`.
///
/// LOW is checked before HIGH so that a degenerate `vcc == 0` (the
/// all-zero seed vector used before the first real solve) resolves to
/// a definite LOW rather than a contradictory both-High-and-Low read;
/// this has no effect once real rail voltages are in play, since
/// VIL < VIH there.
fn classify(v: f64, vcc: f64) -> Level {
    let vil = 0.3 * vcc;
    let vih = 0.7 * vcc;
    if v <= vil {
        Level::Low
    } else if v >= vih {
        Level::High
    } else {
        Level::Indeterminate
    }
}

/// An HC04 inverter: `VCC`, `GND`, `IN`, `OUT`.
#[derive(Debug, Clone)]
pub struct Hc04 {
    pub id: ComponentId,
    pub vcc: NodeId,
    pub gnd: NodeId,
    pub input: NodeId,
    pub out: NodeId,
    /// Nominal (rated) supply voltage, stored as a datasheet reference
    /// value; thresholds are computed from the live `VCC` node voltage.
    pub vcc_nominal: f64,
    pub driven: bool,
    pub out_high: bool,
}

impl Hc04 {
    pub const PINS: [&'static str; 4] = ["VCC", "GND", "IN", "OUT"];

    pub fn new(id: ComponentId, vcc: NodeId, gnd: NodeId, input: NodeId, out: NodeId, vcc_nominal: f64) -> Self {
        Self {
            id,
            vcc,
            gnd,
            input,
            out,
            vcc_nominal,
            driven: false,
            out_high: false,
        }
    }

    /// The id key used for this gate's output-clamp stamp in the
    /// reported per-source currents: `"<gate_id>_vs"`.
    pub fn vs_id(&self) -> String {
        format!("{}_vs", self.id)
    }

    pub fn stamps(&self) -> Vec<Stamp> {
        if !self.driven {
            return Vec::new();
        }
        if self.out_high {
            vec![Stamp::voltage_source(self.out, self.vcc, 0.0, self.vs_id())]
        } else {
            vec![Stamp::voltage_source(self.out, self.gnd, 0.0, self.vs_id())]
        }
    }

    pub fn update_state(&mut self, voltages: &NodeVoltages) {
        let vcc = voltages.get(self.vcc);
        match classify(voltages.get(self.input), vcc) {
            Level::High => {
                self.out_high = false;
                self.driven = true;
            }
            Level::Low => {
                self.out_high = true;
                self.driven = true;
            }
            Level::Indeterminate => {
                // Retain previous out_high if already driven; otherwise
                // stay undriven until a definite input appears.
            }
        }
    }
}

/// An HC08 2-input AND gate: `VCC`, `GND`, `A`, `B`, `OUT`.
#[derive(Debug, Clone)]
pub struct Hc08 {
    pub id: ComponentId,
    pub vcc: NodeId,
    pub gnd: NodeId,
    pub a: NodeId,
    pub b: NodeId,
    pub out: NodeId,
    pub vcc_nominal: f64,
    pub driven: bool,
    pub out_high: bool,
}

impl Hc08 {
    pub const PINS: [&'static str; 5] = ["VCC", "GND", "A", "B", "OUT"];

    pub fn new(id: ComponentId, vcc: NodeId, gnd: NodeId, a: NodeId, b: NodeId, out: NodeId, vcc_nominal: f64) -> Self {
        Self {
            id,
            vcc,
            gnd,
            a,
            b,
            out,
            vcc_nominal,
            driven: false,
            out_high: false,
        }
    }

    pub fn vs_id(&self) -> String {
        format!("{}_vs", self.id)
    }

    pub fn stamps(&self) -> Vec<Stamp> {
        if !self.driven {
            return Vec::new();
        }
        if self.out_high {
            vec![Stamp::voltage_source(self.out, self.vcc, 0.0, self.vs_id())]
        } else {
            vec![Stamp::voltage_source(self.out, self.gnd, 0.0, self.vs_id())]
        }
    }

    pub fn update_state(&mut self, voltages: &NodeVoltages) {
        let vcc = voltages.get(self.vcc);
        let a = classify(voltages.get(self.a), vcc);
        let b = classify(voltages.get(self.b), vcc);

        if a == Level::Low || b == Level::Low {
            // LOW dominant: a definite low on either input always wins.
            self.out_high = false;
            self.driven = true;
        } else if a == Level::High && b == Level::High {
            self.out_high = true;
            self.driven = true;
        }
        // Otherwise: at least one indeterminate input and no LOW —
        // retain previous out_high if already driven, else stay undriven.
    }
}
