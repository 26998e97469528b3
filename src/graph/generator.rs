//! 按饱和度随机生成无向图，以及按哈密顿性质筛选生成.
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::hamiltonian;
use crate::graph::matrix::{AdjacencyMatrix, GraphError};

/// Target edge density in `(0, 1]`. A percentage is kept as an integer so
/// the edge count stays exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturation(Level);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    Percent(u32),
    Fraction(f64),
}

impl Saturation {
    pub fn from_fraction(fraction: f64) -> Result<Self, GraphError> {
        if fraction.is_nan() || fraction <= 0.0 || fraction > 1.0 {
            return Err(GraphError::InvalidSaturation(fraction));
        }
        Ok(Self(Level::Fraction(fraction)))
    }

    pub fn from_percent(percent: u32) -> Result<Self, GraphError> {
        if !(1..=100).contains(&percent) {
            return Err(GraphError::InvalidSaturation(percent as f64 / 100.0));
        }
        Ok(Self(Level::Percent(percent)))
    }

    pub fn fraction(self) -> f64 {
        match self.0 {
            Level::Percent(percent) => percent as f64 / 100.0,
            Level::Fraction(fraction) => fraction,
        }
    }
}

/// `floor(n * (n - 1) * s / 2)`, zero for graphs with fewer than two nodes.
pub fn target_edge_count(node_count: usize, saturation: Saturation) -> usize {
    if node_count < 2 {
        return 0;
    }
    let possible = node_count * (node_count - 1);
    let target = match saturation.0 {
        Level::Percent(percent) => possible * percent as usize / 200,
        Level::Fraction(_) => (possible as f64 * saturation.fraction() / 2.0).floor() as usize,
    };
    target.min(possible / 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HamiltonProperty {
    HasHamiltonianCycle,
    NoHamiltonianCycle,
}

impl HamiltonProperty {
    fn accepts(self, has_cycle: bool) -> bool {
        match self {
            HamiltonProperty::HasHamiltonianCycle => has_cycle,
            HamiltonProperty::NoHamiltonianCycle => !has_cycle,
        }
    }
}

/// Whether some graph with `node_count` nodes and exactly `edges` edges can
/// have `property`. Used to refuse requests that could only loop forever.
///
/// For `n >= 3` a Hamiltonian cycle needs at least `n` edges, and every graph
/// with at least `C(n - 1, 2) + 2` edges is Hamiltonian (Ore, 1960).
pub fn property_is_reachable(node_count: usize, edges: usize, property: HamiltonProperty) -> bool {
    let has_cycle_possible;
    let no_cycle_possible;
    match node_count {
        0 => return false,
        1 => {
            has_cycle_possible = true;
            no_cycle_possible = false;
        }
        2 => {
            has_cycle_possible = edges == 1;
            no_cycle_possible = edges == 0;
        }
        n => {
            let forcing = (n - 1) * (n - 2) / 2 + 2;
            has_cycle_possible = edges >= n;
            no_cycle_possible = edges < forcing;
        }
    }
    match property {
        HamiltonProperty::HasHamiltonianCycle => has_cycle_possible,
        HamiltonProperty::NoHamiltonianCycle => no_cycle_possible,
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// 按性质生成时最多尝试的候选图数量. None 表示不设上限.
    pub max_attempts: Option<usize>,
}

/// Random graph source. The RNG is owned by the generator, so a seeded
/// generator reproduces the same sequence of graphs.
#[derive(Debug, Clone)]
pub struct RandomGraphGenerator<R = StdRng> {
    rng: R,
    config: GeneratorConfig,
}

impl RandomGraphGenerator<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomGraphGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Places exactly [`target_edge_count`] edges by accept/reject sampling.
    pub fn generate_with_saturation(
        &mut self,
        node_count: usize,
        saturation: Saturation,
    ) -> Result<AdjacencyMatrix, GraphError> {
        let mut matrix = AdjacencyMatrix::new(node_count)?;
        let target = target_edge_count(node_count, saturation);

        let mut added = 0;
        let mut trials = 0u64;
        while added < target {
            trials += 1;
            let i = self.rng.random_range(0..node_count);
            let j = self.rng.random_range(0..node_count);
            if i == j {
                continue;
            }
            if matrix.add_edge(i, j)? {
                added += 1;
            }
        }

        trace!(
            "generated {} nodes / {} edges in {} trials",
            node_count, target, trials
        );
        Ok(matrix)
    }

    /// Regenerates candidates until the Hamiltonian-cycle existence matches
    /// `property`. Unbounded unless `max_attempts` is configured.
    pub fn generate_with_property(
        &mut self,
        node_count: usize,
        saturation: Saturation,
        property: HamiltonProperty,
    ) -> Result<AdjacencyMatrix, GraphError> {
        if node_count == 0 {
            return Err(GraphError::InvalidDimension(node_count));
        }
        let edges = target_edge_count(node_count, saturation);
        if !property_is_reachable(node_count, edges, property) {
            return Err(GraphError::Unsatisfiable {
                node_count,
                edges,
                property,
            });
        }

        let mut attempts = 0usize;
        loop {
            if let Some(limit) = self.config.max_attempts {
                if attempts >= limit {
                    return Err(GraphError::AttemptsExhausted { attempts });
                }
            }
            attempts += 1;

            let candidate = self.generate_with_saturation(node_count, saturation)?;
            let has_cycle = hamiltonian::find_cycle(&candidate).is_some();
            if property.accepts(has_cycle) {
                info!(
                    "accepted {:?} graph ({} nodes, {} edges) after {} attempt(s)",
                    property, node_count, edges, attempts
                );
                return Ok(candidate);
            }
            debug!("candidate {} rejected (has cycle: {})", attempts, has_cycle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::hamiltonian::find_cycle;

    fn sat(percent: u32) -> Saturation {
        Saturation::from_percent(percent).unwrap()
    }

    #[test]
    fn saturation_bounds() {
        assert!(Saturation::from_fraction(0.0).is_err());
        assert!(Saturation::from_fraction(-0.5).is_err());
        assert!(Saturation::from_fraction(1.5).is_err());
        assert!(Saturation::from_fraction(f64::NAN).is_err());
        assert!(Saturation::from_fraction(1.0).is_ok());
        assert!(Saturation::from_percent(0).is_err());
        assert!(Saturation::from_percent(101).is_err());
        assert_eq!(sat(50).fraction(), 0.5);
    }

    #[test]
    fn target_edge_count_floors() {
        assert_eq!(target_edge_count(1, sat(100)), 0);
        assert_eq!(target_edge_count(2, sat(50)), 0);
        assert_eq!(target_edge_count(2, sat(100)), 1);
        assert_eq!(target_edge_count(4, sat(50)), 3);
        assert_eq!(target_edge_count(5, sat(25)), 2);
        assert_eq!(target_edge_count(6, sat(100)), 15);
    }

    #[test]
    fn percent_edge_count_is_exact() {
        // 25 * 24 * 41 / 200 = 123, 76 * 75 * 70 / 200 = 1995.
        assert_eq!(target_edge_count(25, sat(41)), 123);
        assert_eq!(target_edge_count(76, sat(70)), 1995);
        assert_eq!(target_edge_count(105, sat(70)), 3822);
        for n in 2..=120 {
            for percent in 1..=100 {
                assert_eq!(target_edge_count(n, sat(percent)), n * (n - 1) * percent as usize / 200);
            }
        }
        let graph = RandomGraphGenerator::from_seed(5)
            .generate_with_saturation(25, sat(41))
            .unwrap();
        assert_eq!(graph.edge_count(), 123);
    }

    #[test]
    fn generated_edge_count_matches_target() {
        let mut generator = RandomGraphGenerator::from_seed(7);
        for n in 2..12 {
            for percent in [10, 30, 50, 70, 100] {
                let graph = generator.generate_with_saturation(n, sat(percent)).unwrap();
                assert_eq!(graph.edge_count(), target_edge_count(n, sat(percent)));
            }
        }
    }

    #[test]
    fn single_node_is_empty() {
        let mut generator = RandomGraphGenerator::from_seed(1);
        let graph = generator.generate_with_saturation(1, sat(100)).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn zero_nodes_rejected() {
        let mut generator = RandomGraphGenerator::from_seed(1);
        assert_eq!(
            generator.generate_with_saturation(0, sat(50)),
            Err(GraphError::InvalidDimension(0))
        );
    }

    #[test]
    fn same_seed_same_graph() {
        let a = RandomGraphGenerator::from_seed(42)
            .generate_with_saturation(9, sat(40))
            .unwrap();
        let b = RandomGraphGenerator::from_seed(42)
            .generate_with_saturation(9, sat(40))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn property_generation_respects_request() {
        let mut generator = RandomGraphGenerator::from_seed(3);
        let hamiltonian = generator
            .generate_with_property(7, sat(70), HamiltonProperty::HasHamiltonianCycle)
            .unwrap();
        assert!(find_cycle(&hamiltonian).is_some());

        let non_hamiltonian = generator
            .generate_with_property(7, sat(50), HamiltonProperty::NoHamiltonianCycle)
            .unwrap();
        assert!(find_cycle(&non_hamiltonian).is_none());
    }

    #[test]
    fn unreachable_property_fails_fast() {
        let mut generator = RandomGraphGenerator::from_seed(3);
        // 4 nodes at 30% gives a single edge.
        assert!(matches!(
            generator.generate_with_property(4, sat(30), HamiltonProperty::HasHamiltonianCycle),
            Err(GraphError::Unsatisfiable { edges: 1, .. })
        ));
        // A complete graph on 5 nodes is always Hamiltonian.
        assert!(matches!(
            generator.generate_with_property(5, sat(100), HamiltonProperty::NoHamiltonianCycle),
            Err(GraphError::Unsatisfiable { edges: 10, .. })
        ));
    }

    #[test]
    fn attempt_limit_stops_the_loop() {
        let mut generator = RandomGraphGenerator::from_seed(11).with_config(GeneratorConfig {
            max_attempts: Some(0),
        });
        assert_eq!(
            generator.generate_with_property(6, sat(50), HamiltonProperty::HasHamiltonianCycle),
            Err(GraphError::AttemptsExhausted { attempts: 0 })
        );
    }

    #[test]
    fn reachability_table() {
        use HamiltonProperty::*;
        assert!(property_is_reachable(1, 0, HasHamiltonianCycle));
        assert!(!property_is_reachable(1, 0, NoHamiltonianCycle));
        assert!(property_is_reachable(2, 1, HasHamiltonianCycle));
        assert!(!property_is_reachable(2, 0, HasHamiltonianCycle));
        assert!(!property_is_reachable(5, 4, HasHamiltonianCycle));
        assert!(property_is_reachable(5, 5, HasHamiltonianCycle));
        assert!(property_is_reachable(5, 7, NoHamiltonianCycle));
        assert!(!property_is_reachable(5, 8, NoHamiltonianCycle));
    }
}
