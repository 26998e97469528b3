//! 无向简单图的对称 0/1 邻接矩阵.
use std::fmt;

use petgraph::graph::UnGraph;
use smallvec::SmallVec;
use thiserror::Error;

use crate::graph::generator::HamiltonProperty;
use crate::graph::ids::NodeId;

type SmallRow = SmallVec<[bool; 16]>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("a graph needs at least one node, got {0}")]
    InvalidDimension(usize),
    #[error("node index {index} is out of range for a graph of {node_count} nodes")]
    IndexOutOfRange { index: usize, node_count: usize },
    #[error("self-loop on node {0} is not allowed")]
    SelfLoop(usize),
    #[error("row {row} has {len} entries, expected {node_count}")]
    NotSquare {
        row: usize,
        len: usize,
        node_count: usize,
    },
    #[error("matrix is not symmetric at ({row}, {col})")]
    Asymmetric { row: usize, col: usize },
    #[error("entry ({row}, {col}) is {value}, expected 0 or 1")]
    InvalidEntry { row: usize, col: usize, value: u8 },
    #[error("saturation {0} is outside (0, 1]")]
    InvalidSaturation(f64),
    #[error("no graph with the requested property after {attempts} candidates")]
    AttemptsExhausted { attempts: usize },
    #[error("no graph with {node_count} nodes and {edges} edges satisfies {property:?}")]
    Unsatisfiable {
        node_count: usize,
        edges: usize,
        property: HamiltonProperty,
    },
}

/// Square symmetric boolean matrix with a zero diagonal.
///
/// The only mutation is [`AdjacencyMatrix::add_edge`], which writes both
/// `(i, j)` and `(j, i)` under one `&mut` borrow, so no other component can
/// observe a half-written edge.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AdjacencyMatrix {
    rows: Vec<SmallRow>,
}

impl AdjacencyMatrix {
    pub fn new(node_count: usize) -> Result<Self, GraphError> {
        if node_count == 0 {
            return Err(GraphError::InvalidDimension(node_count));
        }
        let rows = (0..node_count)
            .map(|_| SmallRow::from_elem(false, node_count))
            .collect();
        Ok(Self { rows })
    }

    /// Builds a matrix from explicit 0/1 rows, validating every invariant.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, GraphError> {
        let node_count = rows.len();
        let mut matrix = Self::new(node_count)?;

        for (row, values) in rows.iter().enumerate() {
            if values.len() != node_count {
                return Err(GraphError::NotSquare {
                    row,
                    len: values.len(),
                    node_count,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                match value {
                    0 => {}
                    1 if row == col => return Err(GraphError::SelfLoop(row)),
                    1 => matrix.rows[row][col] = true,
                    _ => return Err(GraphError::InvalidEntry { row, col, value }),
                }
            }
        }

        for row in 0..node_count {
            for col in (row + 1)..node_count {
                if matrix.rows[row][col] != matrix.rows[col][row] {
                    return Err(GraphError::Asymmetric { row, col });
                }
            }
        }

        Ok(matrix)
    }

    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut matrix = Self::new(node_count)?;
        for &(i, j) in edges {
            matrix.add_edge(i, j)?;
        }
        Ok(matrix)
    }

    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.node_count()).map(NodeId::from_usize)
    }

    fn check(&self, index: usize) -> Result<(), GraphError> {
        if index >= self.node_count() {
            return Err(GraphError::IndexOutOfRange {
                index,
                node_count: self.node_count(),
            });
        }
        Ok(())
    }

    pub fn has_edge(&self, i: usize, j: usize) -> Result<bool, GraphError> {
        self.check(i)?;
        self.check(j)?;
        Ok(self.rows[i][j])
    }

    /// Inserts the undirected edge `{i, j}`. Returns `false` if it was already present.
    pub fn add_edge(&mut self, i: usize, j: usize) -> Result<bool, GraphError> {
        self.check(i)?;
        self.check(j)?;
        if i == j {
            return Err(GraphError::SelfLoop(i));
        }
        if self.rows[i][j] {
            return Ok(false);
        }
        self.rows[i][j] = true;
        self.rows[j][i] = true;
        Ok(true)
    }

    /// Unchecked lookup for callers iterating over `nodes()`.
    pub(crate) fn adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.rows[a.index()][b.index()]
    }

    pub fn degree(&self, i: usize) -> Result<usize, GraphError> {
        self.check(i)?;
        Ok(self.row_degree(i))
    }

    fn row_degree(&self, i: usize) -> usize {
        self.rows[i].iter().filter(|&&set| set).count()
    }

    pub fn degrees(&self) -> Vec<usize> {
        (0..self.node_count()).map(|i| self.row_degree(i)).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.degrees().iter().sum::<usize>() / 2
    }

    /// Undirected edges as `(i, j)` with `i < j`, in row-major order.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (i, row) in self.rows.iter().enumerate() {
            for j in (i + 1)..row.len() {
                if row[j] {
                    edges.push((NodeId::from_usize(i), NodeId::from_usize(j)));
                }
            }
        }
        edges
    }

    /// Neighbours of `node` in ascending index order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.rows[node.index()]
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(|(idx, _)| NodeId::from_usize(idx))
    }

    pub fn max_edges(&self) -> usize {
        let n = self.node_count();
        n * (n - 1) / 2
    }

    pub fn is_complete(&self) -> bool {
        self.edge_count() == self.max_edges()
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|&set| u8::from(set)).collect())
            .collect()
    }

    pub fn to_petgraph(&self) -> UnGraph<NodeId, ()> {
        let mut graph = UnGraph::with_capacity(self.node_count(), self.edge_count());
        let indices: Vec<_> = self.nodes().map(|node| graph.add_node(node)).collect();
        for (a, b) in self.edges() {
            graph.add_edge(indices[a.index()], indices[b.index()], ());
        }
        graph
    }
}

impl fmt::Debug for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdjacencyMatrix")
            .field("node_count", &self.node_count())
            .field("edges", &self.edges())
            .finish()
    }
}
