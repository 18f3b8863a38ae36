//! Core identity types for netlisting: pins, nodes, and components.

use std::collections::HashMap;
use std::fmt;

/// A unique identifier for a node in the circuit.
///
/// Node 0 is always ground; it is displayed as `"0"` per the external
/// node-id grammar, not as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The ground node (always index 0, fixed at 0 V).
    pub const GROUND: NodeId = NodeId(0);

    /// Check if this is the ground node.
    pub fn is_ground(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground() {
            write!(f, "0")
        } else {
            write!(f, "N{}", self.0)
        }
    }
}

/// A caller-supplied stable identifier for a component.
///
/// Unlike an auto-incrementing index, component ids are strings chosen
/// by the netlist's author (the editor/UI collaborator) and carried
/// through unchanged, since `vs_currents` and the persisted format key
/// on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub String);

impl ComponentId {
    /// Build a component id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A wire endpoint: one named pin on one component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PinRef {
    pub component: ComponentId,
    pub pin: String,
}

impl PinRef {
    pub fn new(component: impl Into<ComponentId>, pin: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            pin: pin.into(),
        }
    }

    /// True if this pin's name matches `GND` case-insensitively — the
    /// convenience convention that auto-unions all ground pins into a
    /// single node.
    pub fn is_ground_pin(&self) -> bool {
        self.pin.eq_ignore_ascii_case("gnd")
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component, self.pin)
    }
}

/// A solved (or tentative) node-voltage vector, with ground pinned to 0 V.
///
/// Components read this in `update_state` to decide their next
/// behavioral state; the outer DC loop both seeds it with zeros before
/// the first assembly and rebuilds it after every solve.
#[derive(Debug, Clone)]
pub struct NodeVoltages {
    values: HashMap<NodeId, f64>,
}

impl NodeVoltages {
    /// A voltage vector with every listed node (and ground) at 0 V.
    pub fn zero(nodes: &[NodeId]) -> Self {
        let mut values: HashMap<NodeId, f64> = nodes.iter().map(|&n| (n, 0.0)).collect();
        values.insert(NodeId::GROUND, 0.0);
        Self { values }
    }

    /// Build a voltage vector from a solved MNA solution slice.
    ///
    /// `node_list` gives the stable non-ground node order used when the
    /// solution vector `x` was assembled; `x[i]` is the voltage of
    /// `node_list[i]`.
    pub fn from_solution(node_list: &[NodeId], x: &[f64]) -> Self {
        let mut values: HashMap<NodeId, f64> = node_list
            .iter()
            .zip(x.iter())
            .map(|(&n, &v)| (n, v))
            .collect();
        values.insert(NodeId::GROUND, 0.0);
        Self { values }
    }

    /// Voltage at `node`; ground is always 0 V; an unbound node (never
    /// produced by `build`, but defensively handled) reads as 0 V.
    pub fn get(&self, node: NodeId) -> f64 {
        if node.is_ground() {
            return 0.0;
        }
        self.values.get(&node).copied().unwrap_or(0.0)
    }

    /// The largest per-node voltage delta between `self` and `other`,
    /// over the union of nodes either knows about.
    pub fn max_diff(&self, other: &NodeVoltages) -> f64 {
        let mut max_diff = 0.0f64;
        for (&node, &v) in &self.values {
            max_diff = max_diff.max((v - other.get(node)).abs());
        }
        for (&node, &v) in &other.values {
            max_diff = max_diff.max((v - self.get(node)).abs());
        }
        max_diff
    }

    /// Consume into a plain `node -> voltage` map for [`crate::solver::SolveResult`].
    pub fn into_map(self) -> HashMap<NodeId, f64> {
        self.values
    }
}
