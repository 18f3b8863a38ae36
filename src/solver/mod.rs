//! Dense linear algebra, MNA stamp assembly, and the outer DC fixed-point loop.

mod dc;
mod linalg;
mod mna;

pub use dc::{solve, SolveResult, SolverConfig, TIKHONOV_EPSILON};
pub use mna::{assemble, Assembly, FLOATING_NODE_SHUNT};
