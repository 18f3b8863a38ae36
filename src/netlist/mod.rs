//! Netlist construction: pin/node identity and the disjoint-set builder
//! that fuses wired (and `GND`-named) pins into electrical nodes.

mod builder;
mod stamp;
mod types;
mod union_find;

pub use builder::{build, Netlist};
pub use stamp::Stamp;
pub use types::{ComponentId, NodeId, NodeVoltages, PinRef};
pub use union_find::UnionFind;
