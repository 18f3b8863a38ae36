//! The persisted circuit JSON format.
//!
//! This crate does not own editor/storage concerns, but must
//! round-trip interop with the external format the schematic editor
//! serializes: typed structs at the boundary, with a raw property bag
//! for per-kind parameters that vary by component.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::components::{ComponentSpec, ComponentSpecKind};
use crate::error::{CircuitError, Result};
use crate::netlist::PinRef;

/// Top-level persisted circuit document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedCircuit {
    pub version: String,
    pub components: Vec<PersistedComponent>,
    pub wires: Vec<(String, String)>,
}

/// One persisted component: kind tag, id, and a loosely-typed property bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Editor layout metadata; opaque to the solver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

fn prop_f64(props: &HashMap<String, Value>, key: &str, default: f64) -> f64 {
    props.get(key).and_then(Value::as_f64).unwrap_or(default)
}

fn prop_bool(props: &HashMap<String, Value>, key: &str, default: bool) -> bool {
    props.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn prop_opt_f64(props: &HashMap<String, Value>, key: &str) -> Option<f64> {
    props.get(key).and_then(Value::as_f64)
}

impl PersistedComponent {
    fn into_spec(self) -> Result<ComponentSpec> {
        let kind = match self.kind.as_str() {
            "RESISTOR" => ComponentSpecKind::Resistor {
                resistance: prop_f64(&self.properties, "resistance", 1000.0),
            },
            // Older persisted files used V_SOURCE; accept both.
            "GENERATEUR" | "V_SOURCE" => ComponentSpecKind::VoltageSource {
                voltage: prop_f64(&self.properties, "voltage", 0.0),
                max_current: prop_opt_f64(&self.properties, "max_current"),
            },
            "SWITCH" => ComponentSpecKind::Switch {
                closed: prop_bool(&self.properties, "closed", false),
            },
            "LED" => ComponentSpecKind::Led {
                vf: prop_f64(&self.properties, "vf", 2.0),
                rs: prop_f64(&self.properties, "rs", 20.0),
            },
            "LM339" => ComponentSpecKind::Lm339,
            "HC04" => ComponentSpecKind::Hc04 {
                vcc_nominal: prop_f64(&self.properties, "vcc_nominal", 5.0),
            },
            "HC08" => ComponentSpecKind::Hc08 {
                vcc_nominal: prop_f64(&self.properties, "vcc_nominal", 5.0),
            },
            other => return Err(CircuitError::unknown_component_kind(other, self.id)),
        };
        Ok(ComponentSpec::new(self.id, kind))
    }

    fn from_spec(spec: &ComponentSpec) -> Self {
        let mut properties = HashMap::new();
        match &spec.kind {
            ComponentSpecKind::Resistor { resistance } => {
                properties.insert("resistance".to_string(), Value::from(*resistance));
            }
            ComponentSpecKind::VoltageSource { voltage, max_current } => {
                properties.insert("voltage".to_string(), Value::from(*voltage));
                if let Some(imax) = max_current {
                    properties.insert("max_current".to_string(), Value::from(*imax));
                }
            }
            ComponentSpecKind::Switch { closed } => {
                properties.insert("closed".to_string(), Value::from(*closed));
            }
            ComponentSpecKind::Led { vf, rs } => {
                properties.insert("vf".to_string(), Value::from(*vf));
                properties.insert("rs".to_string(), Value::from(*rs));
            }
            ComponentSpecKind::Lm339 => {}
            ComponentSpecKind::Hc04 { vcc_nominal } | ComponentSpecKind::Hc08 { vcc_nominal } => {
                properties.insert("vcc_nominal".to_string(), Value::from(*vcc_nominal));
            }
        }
        Self {
            kind: spec.kind.tag().to_string(),
            id: spec.id.to_string(),
            properties,
            position: None,
        }
    }
}

fn parse_pin_id(pin_id: &str) -> Result<PinRef> {
    let (component, pin) = pin_id
        .split_once(':')
        .ok_or_else(|| CircuitError::malformed_netlist(pin_id))?;
    Ok(PinRef::new(component, pin))
}

/// Deserialize a persisted circuit into this crate's netlist input
/// shape: a component spec list and a pin-pair wire list.
pub fn to_netlist_input(persisted: PersistedCircuit) -> Result<(Vec<ComponentSpec>, Vec<(PinRef, PinRef)>)> {
    let components = persisted
        .components
        .into_iter()
        .map(PersistedComponent::into_spec)
        .collect::<Result<Vec<_>>>()?;

    let wires = persisted
        .wires
        .into_iter()
        .map(|(a, b)| Ok((parse_pin_id(&a)?, parse_pin_id(&b)?)))
        .collect::<Result<Vec<_>>>()?;

    Ok((components, wires))
}

/// Serialize this crate's netlist input shape back into the persisted
/// circuit format.
pub fn from_netlist_input(components: &[ComponentSpec], wires: &[(PinRef, PinRef)]) -> PersistedCircuit {
    PersistedCircuit {
        version: "1.0".to_string(),
        components: components.iter().map(PersistedComponent::from_spec).collect(),
        wires: wires
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect(),
    }
}
