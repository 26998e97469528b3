//! Human-readable and diagram renderings of an adjacency matrix.
use std::fmt;
use std::fs;
use std::path::Path;

use itertools::Itertools;
use petgraph::dot::{Config, Dot};

use crate::graph::matrix::AdjacencyMatrix;

/// Grid with 1-based headers:
///
/// ```text
///     1  2  3
/// --+---------
/// 1 | 0  1  0
/// ```
pub struct TextGrid<'g>(pub &'g AdjacencyMatrix);

impl fmt::Display for TextGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.node_count();
        writeln!(f, "    {}", (1..=n).join("  "))?;
        writeln!(f, "--+{}", "---".repeat(n))?;
        for (i, row) in self.0.to_rows().iter().enumerate() {
            writeln!(f, "{} | {}", i + 1, row.iter().join("  "))?;
        }
        Ok(())
    }
}

/// Standalone LaTeX document drawing the graph with TikZ. Node `k` sits at
/// angle `k * 360 / n` on a 3cm circle; one `\path` is emitted per set matrix
/// entry, so each undirected edge appears twice.
pub struct TikzDocument<'g>(pub &'g AdjacencyMatrix);

impl fmt::Display for TikzDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;
        let n = graph.node_count();
        writeln!(f, "\\documentclass{{article}}")?;
        writeln!(f, "\\usepackage{{tikz}}")?;
        writeln!(f, "\\begin{{document}}")?;
        writeln!(f, "\\begin{{figure}}")?;
        writeln!(f, "\\centering")?;
        writeln!(
            f,
            "\\begin{{tikzpicture}}[auto, node distance=2cm, every loop/.style={{}},]"
        )?;

        for node in graph.nodes() {
            let label = node.one_based();
            let angle = label as f64 * 360.0 / n as f64;
            writeln!(
                f,
                "\\node[draw, circle] ({}) at ({}:3cm) {{$ {} $}};",
                label, angle, label
            )?;
        }

        for a in graph.nodes() {
            for b in graph.neighbors(a) {
                writeln!(
                    f,
                    "\\path[-] ({}) edge node {{}} ({});",
                    a.one_based(),
                    b.one_based()
                )?;
            }
        }

        writeln!(f, "\\end{{tikzpicture}}")?;
        writeln!(f, "\\end{{figure}}")?;
        writeln!(f, "\\end{{document}}")
    }
}

pub fn text_grid(graph: &AdjacencyMatrix) -> String {
    TextGrid(graph).to_string()
}

pub fn tikz_document(graph: &AdjacencyMatrix) -> String {
    TikzDocument(graph).to_string()
}

/// Undirected Graphviz rendering with 1-based node labels.
pub fn dot(graph: &AdjacencyMatrix) -> String {
    let view = graph.to_petgraph();
    format!(
        "{:?}",
        Dot::with_attr_getters(
            &view,
            &[Config::NodeNoLabel, Config::EdgeNoLabel],
            &|_, _| String::new(),
            &|_, (_, node)| format!("label = \"{}\"", node),
        )
    )
}

fn write_file<P: AsRef<Path>>(path: P, content: String) -> std::io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

pub fn write_tikz<P: AsRef<Path>>(graph: &AdjacencyMatrix, path: P) -> std::io::Result<()> {
    write_file(path, tikz_document(graph))
}

pub fn write_dot<P: AsRef<Path>>(graph: &AdjacencyMatrix, path: P) -> std::io::Result<()> {
    write_file(path, dot(graph))
}
