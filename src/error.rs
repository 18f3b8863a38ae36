//! Error types for the circuit solver core.
//!
//! This module provides a unified error type [`CircuitError`] covering
//! netlist construction, the dense linear-algebra backend, and the
//! outer DC solve loop.

use thiserror::Error;

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Unified error type for all circuit_core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CircuitError {
    // ============ Netlist Errors ============
    /// A wire referenced a pin that no component declares.
    #[error("wire references unknown pin '{pin}'")]
    MalformedNetlist { pin: String },

    /// A persisted/deserialized component used a tag outside the closed kind set.
    #[error("unknown component kind '{kind}' for component '{id}'")]
    UnknownComponentKind { kind: String, id: String },

    // ============ Linear Algebra Errors ============
    /// The assembled matrix is singular (pivot magnitude below 1e-15).
    #[error("singular matrix during MNA solve")]
    SingularMatrix,

    /// Both the direct solve and the Tikhonov-regularized retry failed.
    #[error(
        "unsolvable system: {node_count} nodes, {vs_count} voltage-source unknowns, floating nodes: {floating_nodes:?}"
    )]
    Unsolvable {
        node_count: usize,
        vs_count: usize,
        floating_nodes: Vec<String>,
    },
}

impl CircuitError {
    /// Create a malformed-netlist error for the given pin reference string.
    pub fn malformed_netlist(pin: impl Into<String>) -> Self {
        Self::MalformedNetlist { pin: pin.into() }
    }

    /// Create an unknown-component-kind error.
    pub fn unknown_component_kind(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::UnknownComponentKind {
            kind: kind.into(),
            id: id.into(),
        }
    }
}
