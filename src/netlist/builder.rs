//! The netlist builder: fuses pin identities into electrical nodes.

use std::collections::HashMap;

use tracing::debug;

use crate::components::{Component, ComponentSpec};
use crate::error::{CircuitError, Result};

use super::types::{NodeId, PinRef};
use super::union_find::UnionFind;

/// A netlisted circuit: components with bound pins, plus the stable
/// non-ground node order the solver iterates over.
#[derive(Debug)]
pub struct Netlist {
    pub components: Vec<Component>,
    /// Non-ground nodes, in first-encounter order.
    pub node_list: Vec<NodeId>,
    /// `Some` iff at least one pin named `GND` (case-insensitive) exists.
    pub ground_node: Option<NodeId>,
}

impl Netlist {
    /// Total distinct nodes, including ground if present.
    pub fn node_count(&self) -> usize {
        self.node_list.len() + usize::from(self.ground_node.is_some())
    }
}

/// Build a netlist from a component list and an explicit pin-pair wire
/// list.
///
/// Contract: unions every wire pair, then unions all `GND`-named pins
/// together; assigns node ids deterministically in first-encounter
/// order given the input order. Never fails on topology — only a wire
/// referencing an undeclared pin is an error.
pub fn build(components: &[ComponentSpec], wires: &[(PinRef, PinRef)]) -> Result<Netlist> {
    // 1. Enumerate every declared pin in deterministic (component, pin) order.
    let mut pin_index: HashMap<PinRef, usize> = HashMap::new();
    let mut pin_order: Vec<PinRef> = Vec::new();
    for spec in components {
        for &pin in spec.kind.pins() {
            let pin_ref = PinRef::new(spec.id.clone(), pin);
            let idx = pin_order.len();
            pin_order.push(pin_ref.clone());
            pin_index.insert(pin_ref, idx);
        }
    }

    let mut uf = UnionFind::new(pin_order.len());

    // 2. Union explicit wires.
    for (a, b) in wires {
        let ia = *pin_index
            .get(a)
            .ok_or_else(|| CircuitError::malformed_netlist(a.to_string()))?;
        let ib = *pin_index
            .get(b)
            .ok_or_else(|| CircuitError::malformed_netlist(b.to_string()))?;
        uf.union(ia, ib);
    }

    // 3. Union all GND-named pins together, regardless of wiring.
    let ground_pin_indices: Vec<usize> = pin_order
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_ground_pin())
        .map(|(i, _)| i)
        .collect();
    for w in ground_pin_indices.windows(2) {
        uf.union(w[0], w[1]);
    }
    let has_ground = !ground_pin_indices.is_empty();
    let ground_root = ground_pin_indices.first().map(|&i| uf.find(i));

    // 4. Assign node ids in first-encounter order over `pin_order`.
    let mut root_to_node: HashMap<usize, NodeId> = HashMap::new();
    let mut node_list: Vec<NodeId> = Vec::new();
    let mut next_id = 1usize;

    if has_ground {
        root_to_node.insert(ground_root.unwrap(), NodeId::GROUND);
    }

    for i in 0..pin_order.len() {
        let root = uf.find(i);
        if let std::collections::hash_map::Entry::Vacant(entry) = root_to_node.entry(root) {
            let node = NodeId(next_id);
            entry.insert(node);
            node_list.push(node);
            next_id += 1;
        }
    }

    // 5. Resolve each declared pin to its node id.
    let mut bindings: HashMap<PinRef, NodeId> = HashMap::with_capacity(pin_order.len());
    for (i, pin_ref) in pin_order.into_iter().enumerate() {
        let root = uf.find(i);
        let node = root_to_node[&root];
        bindings.insert(pin_ref, node);
    }

    // 6. Convert specs into concrete, node-bound components.
    let resolved_components: Vec<Component> = components
        .iter()
        .map(|spec| spec.clone().into_component(|component_id, pin| {
            bindings[&PinRef::new(component_id.clone(), pin)]
        }))
        .collect();

    debug!(
        components = resolved_components.len(),
        nodes = node_list.len(),
        ground = has_ground,
        "netlist built"
    );

    Ok(Netlist {
        components: resolved_components,
        node_list,
        ground_node: has_ground.then_some(NodeId::GROUND),
    })
}
