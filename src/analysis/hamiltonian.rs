//! 回溯搜索哈密顿回路.
use std::fmt;
use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, trace};

use crate::graph::ids::{NodeId, one_based};
use crate::graph::matrix::AdjacencyMatrix;

/// Deadline is only polled once every this many `extend` calls.
const DEADLINE_POLL_INTERVAL: u64 = 1024;

/// A closed walk `[0, v1, …, v(n-1), 0]` visiting every node once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HamiltonianCycle(Vec<NodeId>);

impl HamiltonianCycle {
    /// Nodes in visiting order, 0-based, with the start repeated at the end.
    /// A single-node graph yields `[0]`.
    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    pub fn one_based(&self) -> Vec<usize> {
        one_based(&self.0)
    }

    /// Number of distinct nodes on the cycle.
    pub fn len(&self) -> usize {
        if self.0.len() > 1 {
            self.0.len() - 1
        } else {
            self.0.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks the cycle against `graph`: every node exactly once and every
    /// consecutive pair, including the closing one, is an edge.
    pub fn is_valid_for(&self, graph: &AdjacencyMatrix) -> bool {
        let n = graph.node_count();
        if self.len() != n || self.0.first() != self.0.last() {
            return false;
        }
        let mut seen = vec![false; n];
        for node in &self.0[..self.len()] {
            if node.index() >= n || seen[node.index()] {
                return false;
            }
            seen[node.index()] = true;
        }
        self.0
            .iter()
            .tuple_windows()
            .all(|(a, b)| graph.has_edge(a.index(), b.index()).unwrap_or(false))
    }
}

impl fmt::Display for HamiltonianCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(HamiltonianCycle),
    /// The whole search space was explored without closing a cycle.
    NotFound,
    /// The configured deadline expired first; nothing is known about the graph.
    TimedOut,
}

impl SearchOutcome {
    pub fn cycle(&self) -> Option<&HamiltonianCycle> {
        match self {
            SearchOutcome::Found(cycle) => Some(cycle),
            _ => None,
        }
    }

    pub fn into_cycle(self) -> Option<HamiltonianCycle> {
        match self {
            SearchOutcome::Found(cycle) => Some(cycle),
            _ => None,
        }
    }
}

enum Step {
    Closed,
    Exhausted,
    Interrupted,
}

/// Partial path owned by one search run and threaded through the recursion.
struct SearchState {
    path: Vec<NodeId>,
    on_path: Vec<bool>,
    extensions: u64,
    polls: u64,
    deadline: Option<Instant>,
}

impl SearchState {
    fn new(node_count: usize, deadline: Option<Instant>) -> Self {
        let start = NodeId::from_usize(0);
        let mut on_path = vec![false; node_count];
        on_path[start.index()] = true;
        let mut path = Vec::with_capacity(node_count + 1);
        path.push(start);
        Self {
            path,
            on_path,
            extensions: 0,
            polls: 0,
            deadline,
        }
    }

    fn push(&mut self, node: NodeId) {
        self.on_path[node.index()] = true;
        self.path.push(node);
        self.extensions += 1;
    }

    fn pop(&mut self) {
        if let Some(node) = self.path.pop() {
            self.on_path[node.index()] = false;
        }
    }

    /// Counts its own calls; a path-length cutoff between polls cannot skip one.
    fn expired(&mut self) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        let due = self.polls % DEADLINE_POLL_INTERVAL == 0;
        self.polls += 1;
        due && Instant::now() >= deadline
    }
}

/// Backtracking search with node 0 fixed as the start. Candidates are tried
/// in ascending index order, so the cycle found is deterministic.
pub struct HamiltonianSearch<'g> {
    graph: &'g AdjacencyMatrix,
    timeout: Option<Duration>,
}

impl<'g> HamiltonianSearch<'g> {
    pub fn new(graph: &'g AdjacencyMatrix) -> Self {
        Self {
            graph,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn find_cycle(&self) -> SearchOutcome {
        let n = self.graph.node_count();
        if n == 1 {
            return SearchOutcome::Found(HamiltonianCycle(vec![NodeId::from_usize(0)]));
        }

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let mut state = SearchState::new(n, deadline);
        let outcome = match self.extend(&mut state) {
            Step::Closed => {
                let mut nodes = state.path;
                nodes.push(nodes[0]);
                SearchOutcome::Found(HamiltonianCycle(nodes))
            }
            Step::Exhausted => SearchOutcome::NotFound,
            Step::Interrupted => SearchOutcome::TimedOut,
        };
        debug!(
            "hamiltonian search on {} nodes: {} extensions, found: {}",
            n,
            state.extensions,
            matches!(outcome, SearchOutcome::Found(_))
        );
        outcome
    }

    fn extend(&self, state: &mut SearchState) -> Step {
        let n = self.graph.node_count();
        let last = state.path[state.path.len() - 1];

        if state.path.len() == n {
            return if self.graph.adjacent(last, state.path[0]) {
                Step::Closed
            } else {
                Step::Exhausted
            };
        }
        if state.expired() {
            return Step::Interrupted;
        }

        for candidate in self.graph.nodes().skip(1) {
            if state.on_path[candidate.index()] || !self.graph.adjacent(last, candidate) {
                continue;
            }
            state.push(candidate);
            trace!("depth {}: try {:?}", state.path.len() - 1, candidate);
            match self.extend(state) {
                Step::Exhausted => state.pop(),
                done => return done,
            }
        }
        Step::Exhausted
    }
}

/// Runs an unbounded search. `None` means no Hamiltonian cycle exists.
pub fn find_cycle(graph: &AdjacencyMatrix) -> Option<HamiltonianCycle> {
    HamiltonianSearch::new(graph).find_cycle().into_cycle()
}
