//! 欧拉图判定：连通性 + 偶度数条件.
use log::debug;

use crate::graph::ids::NodeId;
use crate::graph::matrix::AdjacencyMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EulerianVerdict {
    Eulerian,
    NotEulerian,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EulerianReport {
    pub verdict: EulerianVerdict,
    pub connected: bool,
    /// Depth-first visiting order. Not an Euler circuit: edges may repeat or be
    /// skipped. `Some(vec![])` for an edgeless graph, `None` when disconnected.
    pub traversal: Option<Vec<NodeId>>,
    pub odd_degree_nodes: Vec<NodeId>,
    /// Closed walk using every edge exactly once, when the graph is Eulerian
    /// and has at least one edge.
    pub circuit: Option<Vec<NodeId>>,
}

impl EulerianReport {
    pub fn is_eulerian(&self) -> bool {
        self.verdict == EulerianVerdict::Eulerian
    }
}

/// Lowest-indexed node with at least one edge.
fn traversal_root(graph: &AdjacencyMatrix) -> Option<NodeId> {
    graph
        .nodes()
        .find(|&node| graph.neighbors(node).next().is_some())
}

/// Depth-first preorder from `root`, smallest neighbour first.
fn depth_first_order(graph: &AdjacencyMatrix, root: NodeId) -> (Vec<NodeId>, Vec<bool>) {
    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if visited[node.index()] {
            continue;
        }
        visited[node.index()] = true;
        order.push(node);

        let unvisited: Vec<NodeId> = graph
            .neighbors(node)
            .filter(|next| !visited[next.index()])
            .collect();
        stack.extend(unvisited.into_iter().rev());
    }

    (order, visited)
}

fn connected_order(graph: &AdjacencyMatrix) -> Option<Vec<NodeId>> {
    let Some(root) = traversal_root(graph) else {
        return Some(Vec::new());
    };
    let (order, visited) = depth_first_order(graph, root);
    visited.iter().all(|&seen| seen).then_some(order)
}

/// Every node is reachable from the traversal root. An isolated node next to
/// any edge breaks connectivity; an edgeless graph is vacuously connected.
pub fn is_connected(graph: &AdjacencyMatrix) -> bool {
    connected_order(graph).is_some()
}

pub fn odd_degree_nodes(graph: &AdjacencyMatrix) -> Vec<NodeId> {
    graph
        .degrees()
        .into_iter()
        .enumerate()
        .filter(|(_, degree)| degree % 2 == 1)
        .map(|(idx, _)| NodeId::from_usize(idx))
        .collect()
}

/// Hierholzer's algorithm. Caller guarantees the graph is connected with all
/// degrees even.
fn euler_circuit(graph: &AdjacencyMatrix, root: NodeId) -> Vec<NodeId> {
    let n = graph.node_count();
    let mut unused: Vec<Vec<bool>> = graph
        .nodes()
        .map(|a| graph.nodes().map(|b| graph.adjacent(a, b)).collect())
        .collect();
    let mut cursor = vec![0usize; n];
    let mut stack = vec![root];
    let mut circuit = Vec::with_capacity(graph.edge_count() + 1);

    while let Some(&current) = stack.last() {
        let u = current.index();
        while cursor[u] < n && !unused[u][cursor[u]] {
            cursor[u] += 1;
        }
        if cursor[u] < n {
            let v = cursor[u];
            unused[u][v] = false;
            unused[v][u] = false;
            stack.push(NodeId::from_usize(v));
        } else {
            circuit.push(current);
            stack.pop();
        }
    }

    circuit.reverse();
    circuit
}

pub fn classify(graph: &AdjacencyMatrix) -> EulerianReport {
    let traversal = connected_order(graph);
    let connected = traversal.is_some();
    let odd = odd_degree_nodes(graph);

    let verdict = if connected && odd.is_empty() {
        EulerianVerdict::Eulerian
    } else {
        EulerianVerdict::NotEulerian
    };

    let circuit = match (verdict, traversal_root(graph)) {
        (EulerianVerdict::Eulerian, Some(root)) => Some(euler_circuit(graph, root)),
        _ => None,
    };

    debug!(
        "eulerian check: connected={}, odd-degree nodes={}, verdict={:?}",
        connected,
        odd.len(),
        verdict
    );

    EulerianReport {
        verdict,
        connected,
        traversal,
        odd_degree_nodes: odd,
        circuit,
    }
}
