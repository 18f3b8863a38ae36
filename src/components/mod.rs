//! The closed family of component kinds and their two-operation MNA
//! stamping contract.
//!
//! Every kind exposes `stamps()` (pure read of its own state) and
//! `update_state()` (refines behavioral state from a freshly solved
//! voltage vector). Linear, memoryless parts (`Resistor`,
//! `VoltageSource`, `Switch`) implement `update_state` as a no-op;
//! everything else carries a discrete behavioral state that selects
//! which piecewise-linear stamp variant it emits next.

mod led;
mod lm339;
mod logic;
mod resistor;
mod switch;
mod voltage_source;

pub use led::Led;
pub use lm339::Lm339;
pub use logic::{Hc04, Hc08};
pub use resistor::Resistor;
pub use switch::Switch;
pub use voltage_source::VoltageSource;

use crate::netlist::{ComponentId, NodeId, NodeVoltages, Stamp};

/// A component's kind-specific construction parameters, before its
/// pins are bound to nodes by the netlist builder.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentSpecKind {
    Resistor {
        resistance: f64,
    },
    VoltageSource {
        voltage: f64,
        max_current: Option<f64>,
    },
    Switch {
        closed: bool,
    },
    Led {
        vf: f64,
        rs: f64,
    },
    Lm339,
    Hc04 {
        vcc_nominal: f64,
    },
    Hc08 {
        vcc_nominal: f64,
    },
}

impl ComponentSpecKind {
    /// The kind tag string used by the persisted circuit format and in
    /// error messages.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Resistor { .. } => "RESISTOR",
            Self::VoltageSource { .. } => "GENERATEUR",
            Self::Switch { .. } => "SWITCH",
            Self::Led { .. } => "LED",
            Self::Lm339 => "LM339",
            Self::Hc04 { .. } => "HC04",
            Self::Hc08 { .. } => "HC08",
        }
    }

    /// The fixed, ordered pin names belonging to this kind.
    pub fn pins(&self) -> &'static [&'static str] {
        match self {
            Self::Resistor { .. } => &Resistor::PINS,
            Self::VoltageSource { .. } => &VoltageSource::PINS,
            Self::Switch { .. } => &Switch::PINS,
            Self::Led { .. } => &Led::PINS,
            Self::Lm339 => &Lm339::PINS,
            Self::Hc04 { .. } => &Hc04::PINS,
            Self::Hc08 { .. } => &Hc08::PINS,
        }
    }
}

/// A component before its pins are bound to nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub id: ComponentId,
    pub kind: ComponentSpecKind,
}

impl ComponentSpec {
    pub fn new(id: impl Into<ComponentId>, kind: ComponentSpecKind) -> Self {
        Self { id: id.into(), kind }
    }

    /// Resolve this spec into a concrete, node-bound [`Component`].
    ///
    /// `resolve(component_id, pin_name)` must return the bound node for
    /// every pin name in `self.kind.pins()`; the netlist builder is the
    /// only intended caller.
    pub fn into_component(self, resolve: impl Fn(&ComponentId, &str) -> NodeId) -> Component {
        let id = self.id;
        match self.kind {
            ComponentSpecKind::Resistor { resistance } => Component::Resistor(Resistor::new(
                id.clone(),
                resolve(&id, "A"),
                resolve(&id, "B"),
                resistance,
            )),
            ComponentSpecKind::VoltageSource { voltage, max_current } => {
                Component::VoltageSource(VoltageSource::new(
                    id.clone(),
                    resolve(&id, "PLUS"),
                    resolve(&id, "MINUS"),
                    voltage,
                    max_current,
                ))
            }
            ComponentSpecKind::Switch { closed } => Component::Switch(Switch::new(
                id.clone(),
                resolve(&id, "A"),
                resolve(&id, "B"),
                closed,
            )),
            ComponentSpecKind::Led { vf, rs } => Component::Led(Led::new(
                id.clone(),
                resolve(&id, "AN"),
                resolve(&id, "K"),
                vf,
                rs,
            )),
            ComponentSpecKind::Lm339 => Component::Lm339(Lm339::new(
                id.clone(),
                resolve(&id, "VCC"),
                resolve(&id, "GND"),
                resolve(&id, "IN+"),
                resolve(&id, "IN-"),
                resolve(&id, "OUT"),
            )),
            ComponentSpecKind::Hc04 { vcc_nominal } => Component::Hc04(Hc04::new(
                id.clone(),
                resolve(&id, "VCC"),
                resolve(&id, "GND"),
                resolve(&id, "IN"),
                resolve(&id, "OUT"),
                vcc_nominal,
            )),
            ComponentSpecKind::Hc08 { vcc_nominal } => Component::Hc08(Hc08::new(
                id.clone(),
                resolve(&id, "VCC"),
                resolve(&id, "GND"),
                resolve(&id, "A"),
                resolve(&id, "B"),
                resolve(&id, "OUT"),
                vcc_nominal,
            )),
        }
    }
}

/// A netlisted component: pins bound to nodes, behavioral state inline.
#[derive(Debug, Clone)]
pub enum Component {
    Resistor(Resistor),
    VoltageSource(VoltageSource),
    Switch(Switch),
    Led(Led),
    Lm339(Lm339),
    Hc04(Hc04),
    Hc08(Hc08),
}

impl Component {
    pub fn id(&self) -> &ComponentId {
        match self {
            Self::Resistor(c) => &c.id,
            Self::VoltageSource(c) => &c.id,
            Self::Switch(c) => &c.id,
            Self::Led(c) => &c.id,
            Self::Lm339(c) => &c.id,
            Self::Hc04(c) => &c.id,
            Self::Hc08(c) => &c.id,
        }
    }

    /// Compute this component's MNA contributions for its current state.
    pub fn stamps(&self) -> Vec<Stamp> {
        match self {
            Self::Resistor(c) => c.stamps(),
            Self::VoltageSource(c) => c.stamps(),
            Self::Switch(c) => c.stamps(),
            Self::Led(c) => c.stamps(),
            Self::Lm339(c) => c.stamps(),
            Self::Hc04(c) => c.stamps(),
            Self::Hc08(c) => c.stamps(),
        }
    }

    /// Refine this component's behavioral state from a freshly solved
    /// (or seeded) voltage vector.
    pub fn update_state(&mut self, voltages: &NodeVoltages) {
        match self {
            Self::Resistor(c) => c.update_state(voltages),
            Self::VoltageSource(c) => c.update_state(voltages),
            Self::Switch(c) => c.update_state(voltages),
            Self::Led(c) => c.update_state(voltages),
            Self::Lm339(c) => c.update_state(voltages),
            Self::Hc04(c) => c.update_state(voltages),
            Self::Hc08(c) => c.update_state(voltages),
        }
    }
}
