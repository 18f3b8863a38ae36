//! Stamp-to-matrix assembly: turns a flat list of [`crate::netlist::Stamp`]
//! values into the dense `A x = z` system the outer loop hands to
//! [`super::linalg`].

use std::collections::HashMap;

use crate::netlist::{NodeId, Stamp};

/// Tiny conductance-to-ground shunted onto floating nodes.
pub const FLOATING_NODE_SHUNT: f64 = 1e-12;

/// An assembled `A x = z` system plus the bookkeeping needed to read
/// the solution back out.
pub struct Assembly {
    pub a: Vec<f64>,
    pub z: Vec<f64>,
    pub size: usize,
    /// Non-ground node count `N`; `size == node_count + vs_ids.len()`.
    pub node_count: usize,
    /// Voltage-source extension ids, in assigned-index order (row `N + i`).
    pub vs_ids: Vec<String>,
    node_index: HashMap<NodeId, usize>,
}

impl Assembly {
    fn idx(&self, r: usize, c: usize) -> usize {
        r * self.size + c
    }

    /// Row/column for `node`, or `None` for ground (which has none).
    fn row_of(&self, node: NodeId) -> Option<usize> {
        if node.is_ground() {
            None
        } else {
            self.node_index.get(&node).copied()
        }
    }

    fn add_conductance(&mut self, n1: NodeId, n2: NodeId, g: f64) {
        if n1 == n2 {
            return;
        }
        let r1 = self.row_of(n1);
        let r2 = self.row_of(n2);
        if let Some(r1) = r1 {
            let i = self.idx(r1, r1);
            self.a[i] += g;
        }
        if let Some(r2) = r2 {
            let i = self.idx(r2, r2);
            self.a[i] += g;
        }
        if let (Some(r1), Some(r2)) = (r1, r2) {
            let i12 = self.idx(r1, r2);
            self.a[i12] -= g;
            let i21 = self.idx(r2, r1);
            self.a[i21] -= g;
        }
    }

    fn add_current_injection(&mut self, n: NodeId, i: f64) {
        if let Some(r) = self.row_of(n) {
            self.z[r] -= i;
        }
    }

    fn add_voltage_source(&mut self, n_plus: NodeId, n_minus: NodeId, v: f64, k: usize) {
        if let Some(rp) = self.row_of(n_plus) {
            self.a[self.idx(rp, k)] += 1.0;
            self.a[self.idx(k, rp)] += 1.0;
        }
        if let Some(rm) = self.row_of(n_minus) {
            self.a[self.idx(rm, k)] -= 1.0;
            self.a[self.idx(k, rm)] -= 1.0;
        }
        self.z[k] = v;
    }

    /// Add `eps` to every non-ground node diagonal and to any
    /// zero-diagonal VS extension row: the Tikhonov fallback used once
    /// a direct solve turns up singular.
    pub fn tikhonov_regularize(&mut self, eps: f64) {
        for r in 0..self.node_count {
            self.a[self.idx(r, r)] += eps;
        }
        for k in self.node_count..self.size {
            if self.a[self.idx(k, k)] == 0.0 {
                self.a[self.idx(k, k)] += eps;
            }
        }
    }

    /// Non-ground nodes whose row is entirely zero across the node
    /// block and the VS coupling columns: nothing couples them to the
    /// rest of the circuit in this assembly.
    pub fn floating_nodes(&self) -> Vec<NodeId> {
        let mut floating = Vec::new();
        for (&node, &row) in &self.node_index {
            let is_floating = (0..self.size).all(|c| self.a[self.idx(row, c)] == 0.0);
            if is_floating {
                floating.push(node);
            }
        }
        floating.sort_by_key(|n| n.0);
        floating
    }
}

/// Assemble a stamp list against a fixed non-ground node order into a
/// linear system, applying floating-node regularization.
pub fn assemble(node_list: &[NodeId], stamps: &[Stamp]) -> Assembly {
    let node_count = node_list.len();
    let node_index: HashMap<NodeId, usize> = node_list
        .iter()
        .enumerate()
        .map(|(i, &n)| (n, i))
        .collect();

    // A stamp that would force two identical nodes is dropped outright.
    // This applies to VS stamps too, not just conductances, since
    // `VS(n, n, v)` is either a contradiction (v != 0) or a redundant
    // identity (v == 0), not a real constraint.
    let live_stamps: Vec<&Stamp> = stamps
        .iter()
        .filter(|s| !matches!(s,
            Stamp::VoltageSource { n_plus, n_minus, .. } if n_plus == n_minus))
        .collect();

    // Assign VS extension indices in encounter order.
    let mut vs_ids: Vec<String> = Vec::new();
    for stamp in &live_stamps {
        if let Stamp::VoltageSource { id, .. } = stamp {
            vs_ids.push(id.clone());
        }
    }
    let size = node_count + vs_ids.len();

    let mut assembly = Assembly {
        a: vec![0.0; size * size],
        z: vec![0.0; size],
        size,
        node_count,
        vs_ids,
        node_index,
    };

    let mut vs_rank = 0usize;
    for stamp in live_stamps {
        match *stamp {
            Stamp::Conductance { n1, n2, g } => assembly.add_conductance(n1, n2, g),
            Stamp::CurrentInjection { n, i } => assembly.add_current_injection(n, i),
            Stamp::VoltageSource { n_plus, n_minus, v, .. } => {
                let k = node_count + vs_rank;
                assembly.add_voltage_source(n_plus, n_minus, v, k);
                vs_rank += 1;
            }
        }
    }

    for node in assembly.floating_nodes() {
        let r = assembly.node_index[&node];
        let i = assembly.idx(r, r);
        assembly.a[i] += FLOATING_NODE_SHUNT;
    }

    assembly
}
