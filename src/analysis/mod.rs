//! Graph analyses. Both take the matrix by shared reference and never mutate it.
pub mod eulerian;
pub mod hamiltonian;

pub use eulerian::{EulerianReport, EulerianVerdict, classify, is_connected, odd_degree_nodes};
pub use hamiltonian::{HamiltonianCycle, HamiltonianSearch, SearchOutcome, find_cycle};
