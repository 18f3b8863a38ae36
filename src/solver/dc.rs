//! The outer fixed-point DC solve loop: assemble, solve, update
//! behavioral state, repeat until the node voltages settle.

use std::collections::HashMap;

use tracing::{trace, warn};

use crate::components::Component;
use crate::error::{CircuitError, Result};
use crate::netlist::{NodeId, NodeVoltages};

use super::linalg;
use super::mna::assemble;

/// Tikhonov regularization strength used on the singular-matrix retry.
pub const TIKHONOV_EPSILON: f64 = 1e-9;

/// Tunable knobs for [`solve`]: iteration budget and the convergence tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    max_iter: usize,
    tol: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tol: 1e-3,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }
}

/// The result of a DC solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub node_voltages: HashMap<NodeId, f64>,
    pub vs_currents: HashMap<String, f64>,
    /// 1-based count of outer iterations actually run.
    pub iterations: usize,
    pub converged: bool,
}

/// Run the outer fixed-point loop to DC steady state.
///
/// `node_list` must be the stable non-ground node order produced by
/// [`crate::netlist::build`]. `components` carry their own behavioral
/// state and are mutated in place by `update_state` each iteration.
pub fn solve(
    components: &mut [Component],
    node_list: &[NodeId],
    config: SolverConfig,
) -> Result<SolveResult> {
    let mut last_voltages = NodeVoltages::zero(node_list);

    // Seed behavioral state from the all-zero vector so devices (logic
    // gates especially) have committed a driven/undriven decision before
    // the first real assembly.
    for c in components.iter_mut() {
        c.update_state(&last_voltages);
    }

    for iter in 1..=config.max_iter {
        let stamps: Vec<_> = components.iter().flat_map(|c| c.stamps()).collect();

        let assembly = assemble(node_list, &stamps);
        let size = assembly.size;
        let node_count = assembly.node_count;
        let vs_ids = assembly.vs_ids.clone();

        let x = match linalg::solve(assembly.a.clone(), assembly.z.clone(), size) {
            Ok(x) => x,
            Err(CircuitError::SingularMatrix) => {
                warn!(iter, "singular matrix, retrying with Tikhonov regularization");
                let mut retry = assembly;
                retry.tikhonov_regularize(TIKHONOV_EPSILON);
                let a = retry.a.clone();
                let z = retry.z.clone();
                match linalg::solve(a, z, size) {
                    Ok(x) => x,
                    Err(_) => {
                        let floating_nodes = retry
                            .floating_nodes()
                            .into_iter()
                            .map(|n| n.to_string())
                            .collect();
                        return Err(CircuitError::Unsolvable {
                            node_count,
                            vs_count: vs_ids.len(),
                            floating_nodes,
                        });
                    }
                }
            }
            Err(other) => return Err(other),
        };

        let node_voltages = NodeVoltages::from_solution(node_list, &x[..node_count]);

        for c in components.iter_mut() {
            c.update_state(&node_voltages);
        }

        let max_diff = node_voltages.max_diff(&last_voltages);
        trace!(iter, max_diff, "dc iteration");
        last_voltages = node_voltages;

        if max_diff < config.tol {
            let vs_currents = vs_ids
                .iter()
                .enumerate()
                .map(|(i, id)| (id.clone(), x[node_count + i]))
                .collect();
            return Ok(SolveResult {
                node_voltages: last_voltages.into_map(),
                vs_currents,
                iterations: iter,
                converged: true,
            });
        }
    }

    warn!(max_iter = config.max_iter, "dc solve did not converge");
    Ok(SolveResult {
        node_voltages: last_voltages.into_map(),
        vs_currents: HashMap::new(),
        iterations: config.max_iter,
        converged: false,
    })
}
