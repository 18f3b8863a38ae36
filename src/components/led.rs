//! LED modelled as a hysteretic piecewise-linear diode.

use crate::netlist::{ComponentId, NodeId, NodeVoltages, Stamp};

/// Hysteresis margin (volts) around the forward voltage.
pub const HYSTERESIS_MARGIN: f64 = 0.1;

/// An LED between anode `AN` and cathode `K`.
///
/// Piecewise-linear model: off is an open circuit, on is an ideal
/// `Vf` source in series with `Rs`. The `on` bit is hysteretic around
/// `Vf ± HYSTERESIS_MARGIN` to avoid chattering across the threshold.
#[derive(Debug, Clone)]
pub struct Led {
    pub id: ComponentId,
    pub an: NodeId,
    pub k: NodeId,
    /// Forward voltage, Vf > 0.
    pub vf: f64,
    /// Series resistance when on, Rs > 0.
    pub rs: f64,
    pub on: bool,
}

impl Led {
    pub const PINS: [&'static str; 2] = ["AN", "K"];

    pub fn new(id: ComponentId, an: NodeId, k: NodeId, vf: f64, rs: f64) -> Self {
        Self {
            id,
            an,
            k,
            vf,
            rs,
            on: false,
        }
    }

    /// The id key used for this LED's on-branch voltage-source stamp
    /// in the reported per-source currents: `"<led_id>_Vf"`.
    pub fn vs_id(&self) -> String {
        format!("{}_Vf", self.id)
    }

    pub fn stamps(&self) -> Vec<Stamp> {
        if !self.on {
            return Vec::new();
        }
        vec![
            Stamp::voltage_source(self.an, self.k, self.vf, self.vs_id()),
            Stamp::conductance(self.an, self.k, 1.0 / self.rs),
        ]
    }

    pub fn update_state(&mut self, voltages: &NodeVoltages) {
        let vd = voltages.get(self.an) - voltages.get(self.k);
        self.on = if self.on {
            vd >= self.vf - HYSTERESIS_MARGIN
        } else {
            vd >= self.vf + HYSTERESIS_MARGIN
        };
    }
}
