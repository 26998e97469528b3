//! # 无向简单图
//!
//! 设结点集合 `V = {0, …, n-1}`，邻接矩阵 `A ∈ {0,1}^{n×n}` 满足：
//!
//! * 对称：`A[i][j] = A[j][i]`；
//! * 无自环：`A[i][i] = 0`；
//! * 结点 `i` 的度数为 `deg(i) = Σ_j A[i][j]`。
//!
//! 随机生成时，给定饱和度 `s ∈ (0, 1]`，目标边数为 `⌊n(n-1)s / 2⌋`。
//! 内部索引从 0 开始，所有对外输出（环、度数、网格）使用 1 起始的编号。
//!
//! ## 示例
//!
//! ```rust
//! use hamgraph::graph::*;
//!
//! let mut generator = RandomGraphGenerator::from_seed(7);
//! let saturation = Saturation::from_percent(50).unwrap();
//! let graph = generator.generate_with_saturation(6, saturation).unwrap();
//!
//! assert_eq!(graph.edge_count(), target_edge_count(6, saturation));
//! assert_eq!(graph.has_edge(2, 4).unwrap(), graph.has_edge(4, 2).unwrap());
//! ```

pub mod generator;
pub mod ids;
pub mod matrix;

pub use generator::{
    GeneratorConfig, HamiltonProperty, RandomGraphGenerator, Saturation, property_is_reachable,
    target_edge_count,
};
pub use ids::NodeId;
pub use matrix::{AdjacencyMatrix, GraphError};
