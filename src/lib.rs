//! # Circuit Core
//!
//! A DC steady-state simulator for small analog/mixed-signal circuits:
//! resistors, ideal (optionally current-limited) voltage sources, ideal
//! switches, LEDs modelled as piecewise diodes, LM339 open-collector
//! comparators, and HC04/HC08 logic gates.
//!
//! This library provides:
//! - A disjoint-set netlist builder that fuses wired (and `GND`-named) pins into nodes
//! - A closed family of component models, each a pure stamp/update-state pair
//! - Modified Nodal Analysis (MNA) matrix assembly over those stamps
//! - A dense Gauss-Jordan linear solver with partial pivoting
//! - An outer fixed-point loop driving behavioral devices to DC steady state
//!
//! ## Architecture
//!
//! - [`netlist`] - Pin/node identity, disjoint-set union, MNA stamp value objects
//! - [`components`] - The closed component family and their stamping contract
//! - [`solver`] - Linear algebra, MNA assembly, and the outer DC loop
//! - [`format`] - The persisted circuit JSON format (editor/storage interop)
//! - [`error`] - Unified error type for netlisting, assembly, and solving
//!
//! ## Usage
//!
//! ```no_run
//! use circuit_core::components::{ComponentSpec, ComponentSpecKind};
//! use circuit_core::netlist::{self, PinRef};
//! use circuit_core::solver::{self, SolverConfig};
//!
//! let specs = vec![
//!     ComponentSpec::new("V1", ComponentSpecKind::VoltageSource { voltage: 10.0, max_current: None }),
//!     ComponentSpec::new("R1", ComponentSpecKind::Resistor { resistance: 1000.0 }),
//! ];
//! let wires = vec![(PinRef::new("V1", "PLUS"), PinRef::new("R1", "A"))];
//!
//! let mut netlist = netlist::build(&specs, &wires).unwrap();
//! let result = solver::solve(&mut netlist.components, &netlist.node_list, SolverConfig::default()).unwrap();
//! assert!(result.converged);
//! ```
//!
//! ## DC Solve Method
//!
//! The solver runs a Gauss-Seidel-style fixed point over behavioral
//! device state:
//!
//! 1. Seed every component's behavioral state from the all-zero voltage vector.
//! 2. Assemble `A x = z` from the current stamps, regularizing floating nodes.
//! 3. Solve (falling back to Tikhonov regularization once on a singular matrix).
//! 4. Update every component's behavioral state from the fresh solution.
//! 5. Repeat until the max per-node voltage delta falls below `tol`, or `max_iter` is exhausted.

pub mod components;
pub mod error;
pub mod format;
pub mod netlist;
pub mod solver;

pub use error::{CircuitError, Result};
pub use solver::{SolveResult, SolverConfig};
