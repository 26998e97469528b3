//! Random undirected graphs with Hamiltonian-cycle search and Eulerian checks.
#![warn(non_snake_case)]

pub mod analysis;
pub mod config;
pub mod graph;
pub mod options;
pub mod render;
pub mod report;
pub mod shell;
