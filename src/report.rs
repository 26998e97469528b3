use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::analysis::eulerian::EulerianReport;
use crate::analysis::hamiltonian::SearchOutcome;
use crate::graph::ids::one_based;
use crate::graph::matrix::AdjacencyMatrix;

fn bracketed(nodes: &[usize]) -> String {
    format!("[{}]", nodes.iter().join(", "))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    /// 实际边数占完全图边数的百分比.
    pub density_percent: f64,
    /// `degrees[k]` is the degree of node `k + 1`.
    pub degrees: Vec<usize>,
}

impl GraphSummary {
    pub fn new(graph: &AdjacencyMatrix) -> Self {
        let max_edges = graph.max_edges();
        let edge_count = graph.edge_count();
        let density_percent = if max_edges == 0 {
            0.0
        } else {
            edge_count as f64 * 100.0 / max_edges as f64
        };
        Self {
            node_count: graph.node_count(),
            edge_count,
            density_percent,
            degrees: graph.degrees(),
        }
    }
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes: {}", self.node_count)?;
        writeln!(
            f,
            "Edges: {} ({:.1}% saturation)",
            self.edge_count, self.density_percent
        )?;
        write!(f, "Degrees: {}", bracketed(&self.degrees))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub found: bool,
    pub timed_out: bool,
    /// 1-based, closing node repeated.
    pub cycle: Option<Vec<usize>>,
}

impl From<&SearchOutcome> for CycleReport {
    fn from(outcome: &SearchOutcome) -> Self {
        Self {
            found: outcome.cycle().is_some(),
            timed_out: matches!(outcome, SearchOutcome::TimedOut),
            cycle: outcome.cycle().map(|cycle| cycle.one_based()),
        }
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cycle {
            Some(cycle) => write!(f, "Hamiltonian cycle: {}", bracketed(cycle)),
            None if self.timed_out => write!(f, "Hamiltonian search timed out."),
            None => write!(f, "No Hamiltonian cycle found."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EulerReport {
    pub eulerian: bool,
    pub connected: bool,
    pub traversal: Option<Vec<usize>>,
    pub circuit: Option<Vec<usize>>,
    pub odd_degree_nodes: Vec<usize>,
}

impl From<&EulerianReport> for EulerReport {
    fn from(report: &EulerianReport) -> Self {
        Self {
            eulerian: report.is_eulerian(),
            connected: report.connected,
            traversal: report.traversal.as_deref().map(one_based),
            circuit: report.circuit.as_deref().map(one_based),
            odd_degree_nodes: one_based(&report.odd_degree_nodes),
        }
    }
}

impl fmt::Display for EulerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(traversal) = self.traversal.as_ref().filter(|order| !order.is_empty()) {
            writeln!(f, "DFS traversal: {}", bracketed(traversal))?;
        }
        if !self.connected {
            writeln!(f, "Graph is not connected")?;
        } else if !self.odd_degree_nodes.is_empty() {
            writeln!(f, "Odd-degree nodes: {}", bracketed(&self.odd_degree_nodes))?;
        }
        if self.eulerian {
            write!(f, "Graph is Eulerian")?;
        } else {
            write!(f, "Graph is not Eulerian")?;
        }
        if let Some(circuit) = &self.circuit {
            write!(f, "\nEuler cycle: {}", bracketed(circuit))?;
        }
        Ok(())
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
