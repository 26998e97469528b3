//! Interactive command loop driving generation, analysis and export.
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{info, warn};
use rand::Rng;
use rand::rngs::StdRng;

use crate::analysis::{HamiltonianSearch, classify};
use crate::config::AppConfig;
use crate::graph::{AdjacencyMatrix, HamiltonProperty, RandomGraphGenerator, Saturation};
use crate::render;
use crate::report::{self, CycleReport, EulerReport, GraphSummary};

const HELP: &str = "--- Help ---
hamilton - generate a hamilton graph
non_hamilton - generate a non-hamilton graph
print - print the graph
draw - draw the graph in LaTeX
dot - export the graph in Graphviz DOT format
euler - check if the graph is Eulerian
cycle - find a Hamiltonian cycle
summary - show node, edge and degree counts
exit - exit the program";

const NO_GRAPH: &str = "No graph generated yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Hamilton,
    NonHamilton,
    Print,
    Draw,
    Dot,
    Euler,
    Cycle,
    Summary,
    Help,
    Exit,
}

impl ShellCommand {
    pub fn parse(input: &str) -> Option<Self> {
        let command = match input.trim().to_lowercase().as_str() {
            "hamilton" => ShellCommand::Hamilton,
            "non_hamilton" => ShellCommand::NonHamilton,
            "print" => ShellCommand::Print,
            "draw" => ShellCommand::Draw,
            "dot" => ShellCommand::Dot,
            "euler" => ShellCommand::Euler,
            "cycle" => ShellCommand::Cycle,
            "summary" => ShellCommand::Summary,
            "help" => ShellCommand::Help,
            "exit" => ShellCommand::Exit,
            _ => return None,
        };
        Some(command)
    }
}

pub struct Shell<I, O, R = StdRng> {
    input: I,
    output: O,
    generator: RandomGraphGenerator<R>,
    config: AppConfig,
    json: bool,
    graph: Option<AdjacencyMatrix>,
}

impl<I, O, R> Shell<I, O, R>
where
    I: BufRead,
    O: Write,
    R: Rng,
{
    pub fn new(input: I, output: O, generator: RandomGraphGenerator<R>, config: AppConfig) -> Self {
        Self {
            input,
            output,
            generator,
            config,
            json: false,
            graph: None,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn graph(&self) -> Option<&AdjacencyMatrix> {
        self.graph.as_ref()
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Reads commands until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        while let Some(line) = self.prompt("command> ")? {
            match ShellCommand::parse(&line) {
                Some(ShellCommand::Exit) => break,
                Some(command) => {
                    if !self.execute(command)? {
                        break;
                    }
                }
                None => writeln!(
                    self.output,
                    "Invalid command. Type \"help\" for a list of commands."
                )?,
            }
        }
        Ok(())
    }

    /// Generates the startup graph requested on the command line. Missing
    /// values are prompted for.
    pub fn startup(
        &mut self,
        property: HamiltonProperty,
        nodes: Option<usize>,
        saturation: Option<u32>,
    ) -> Result<()> {
        let nodes = match nodes {
            Some(nodes) => nodes,
            None => match self.read_nodes()? {
                Some(nodes) => nodes,
                None => return Ok(()),
            },
        };
        let percent = match (saturation, property) {
            (Some(percent), _) => percent,
            (None, HamiltonProperty::NoHamiltonianCycle) => self.config.non_hamilton_saturation,
            (None, HamiltonProperty::HasHamiltonianCycle) => {
                match self.read_hamilton_saturation()? {
                    Some(percent) => percent,
                    None => return Ok(()),
                }
            }
        };
        self.generate(property, nodes, percent)
    }

    /// Returns `false` when input ran out mid-command.
    pub fn execute(&mut self, command: ShellCommand) -> Result<bool> {
        match command {
            ShellCommand::Hamilton => {
                let Some(nodes) = self.read_nodes()? else {
                    return Ok(false);
                };
                let Some(percent) = self.read_hamilton_saturation()? else {
                    return Ok(false);
                };
                self.generate(HamiltonProperty::HasHamiltonianCycle, nodes, percent)?;
            }
            ShellCommand::NonHamilton => {
                let Some(nodes) = self.read_nodes()? else {
                    return Ok(false);
                };
                let percent = self.config.non_hamilton_saturation;
                self.generate(HamiltonProperty::NoHamiltonianCycle, nodes, percent)?;
            }
            ShellCommand::Print => {
                if let Some(graph) = &self.graph {
                    write!(self.output, "{}", render::TextGrid(graph))?;
                } else {
                    writeln!(self.output, "{}", NO_GRAPH)?;
                }
            }
            ShellCommand::Draw => {
                if let Some(graph) = &self.graph {
                    let path = &self.config.tikz_output;
                    render::write_tikz(graph, path)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    writeln!(self.output, "Graph exported to {}", path.display())?;
                } else {
                    writeln!(self.output, "{}", NO_GRAPH)?;
                }
            }
            ShellCommand::Dot => {
                if let Some(graph) = &self.graph {
                    let path = &self.config.dot_output;
                    render::write_dot(graph, path)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    writeln!(self.output, "Graph exported to {}", path.display())?;
                } else {
                    writeln!(self.output, "{}", NO_GRAPH)?;
                }
            }
            ShellCommand::Euler => {
                if let Some(graph) = &self.graph {
                    let report = EulerReport::from(&classify(graph));
                    self.emit(&report)?;
                } else {
                    writeln!(self.output, "{}", NO_GRAPH)?;
                }
            }
            ShellCommand::Cycle => {
                if let Some(graph) = &self.graph {
                    let mut search = HamiltonianSearch::new(graph);
                    if let Some(timeout) = self.config.search_timeout() {
                        search = search.with_timeout(timeout);
                    }
                    let report = CycleReport::from(&search.find_cycle());
                    self.emit(&report)?;
                } else {
                    writeln!(self.output, "{}", NO_GRAPH)?;
                }
            }
            ShellCommand::Summary => {
                if let Some(graph) = &self.graph {
                    let summary = GraphSummary::new(graph);
                    self.emit(&summary)?;
                } else {
                    writeln!(self.output, "{}", NO_GRAPH)?;
                }
            }
            ShellCommand::Help => writeln!(self.output, "{}", HELP)?,
            ShellCommand::Exit => return Ok(false),
        }
        Ok(true)
    }

    fn emit<T>(&mut self, value: &T) -> Result<()>
    where
        T: serde::Serialize + std::fmt::Display,
    {
        if self.json {
            writeln!(self.output, "{}", report::to_json(value)?)?;
        } else {
            writeln!(self.output, "{}", value)?;
        }
        Ok(())
    }

    fn generate(&mut self, property: HamiltonProperty, nodes: usize, percent: u32) -> Result<()> {
        let saturation = Saturation::from_percent(percent)?;
        info!(
            "generating {:?} graph with {} nodes at {}%",
            property, nodes, percent
        );
        match self
            .generator
            .generate_with_property(nodes, saturation, property)
        {
            Ok(graph) => {
                let title = match property {
                    HamiltonProperty::HasHamiltonianCycle => "Hamiltonian Graph",
                    HamiltonProperty::NoHamiltonianCycle => "Non-Hamiltonian Graph",
                };
                writeln!(self.output, "{}", title)?;
                write!(self.output, "{}", render::TextGrid(&graph))?;
                self.graph = Some(graph);
            }
            Err(err) => {
                warn!("generation failed: {}", err);
                writeln!(self.output, "Generation failed: {}", err)?;
            }
        }
        Ok(())
    }

    /// Writes `prompt` and reads one line. `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_nodes(&mut self) -> Result<Option<usize>> {
        while let Some(line) = self.prompt("nodes> ")? {
            match line.parse::<usize>() {
                Ok(nodes) if nodes >= 1 => return Ok(Some(nodes)),
                _ => writeln!(
                    self.output,
                    "Invalid input. Please enter a positive integer."
                )?,
            }
        }
        Ok(None)
    }

    fn read_hamilton_saturation(&mut self) -> Result<Option<u32>> {
        let choices = self
            .config
            .hamilton_saturations
            .iter()
            .map(|percent| percent.to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        loop {
            writeln!(
                self.output,
                "Please enter the saturation level of the graph ({}).",
                choices
            )?;
            let Some(line) = self.prompt("saturation> ")? else {
                return Ok(None);
            };
            match line.parse::<u32>() {
                Ok(percent) if self.config.hamilton_saturations.contains(&percent) => {
                    return Ok(Some(percent));
                }
                Ok(_) => writeln!(self.output, "Invalid input. Please enter {}.", choices)?,
                Err(_) => writeln!(
                    self.output,
                    "Invalid input. Please enter a valid integer."
                )?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str, config: AppConfig) -> (String, Option<AdjacencyMatrix>) {
        let generator = RandomGraphGenerator::from_seed(2024);
        let mut shell = Shell::new(Cursor::new(script.to_owned()), Vec::new(), generator, config);
        shell.run().unwrap();
        let graph = shell.graph().cloned();
        (String::from_utf8(shell.into_output()).unwrap(), graph)
    }

    #[test]
    fn commands_need_a_graph() {
        let (out, graph) = run_script("print\ncycle\neuler\ndraw\nexit\n", AppConfig::default());
        assert_eq!(out.matches(NO_GRAPH).count(), 4);
        assert!(graph.is_none());
    }

    #[test]
    fn unknown_command_and_help() {
        let (out, _) = run_script("frobnicate\nHELP\n", AppConfig::default());
        assert!(out.contains("Invalid command. Type \"help\" for a list of commands."));
        assert!(out.contains("--- Help ---"));
        assert!(out.contains("cycle - find a Hamiltonian cycle"));
    }

    #[test]
    fn hamilton_session_validates_input() {
        let script = "hamilton\nabc\n0\n6\n50\nx\n70\ncycle\nexit\n";
        let (out, graph) = run_script(script, AppConfig::default());
        assert_eq!(
            out.matches("Invalid input. Please enter a positive integer.")
                .count(),
            2
        );
        assert!(out.contains("Invalid input. Please enter 30 or 70."));
        assert!(out.contains("Invalid input. Please enter a valid integer."));
        assert!(out.contains("Hamiltonian Graph"));
        assert!(out.contains("Hamiltonian cycle: [1, "));

        let graph = graph.unwrap();
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 10);
    }

    #[test]
    fn non_hamilton_uses_fixed_saturation() {
        let (out, graph) = run_script("non_hamilton\n7\ncycle\nprint\n", AppConfig::default());
        assert!(out.contains("Non-Hamiltonian Graph"));
        assert!(out.contains("No Hamiltonian cycle found."));
        assert!(out.contains("--+---------------------"));
        assert_eq!(graph.unwrap().edge_count(), 10);
    }

    #[test]
    fn unsatisfiable_request_reports_failure() {
        let (out, graph) = run_script("hamilton\n4\n30\nexit\n", AppConfig::default());
        assert!(out.contains("Generation failed:"));
        assert!(graph.is_none());
    }

    #[test]
    fn json_output_for_analysis() {
        let generator = RandomGraphGenerator::from_seed(5);
        let mut shell = Shell::new(
            Cursor::new("euler\nsummary\n".to_owned()),
            Vec::new(),
            generator,
            AppConfig::default(),
        )
        .with_json(true);
        shell
            .startup(HamiltonProperty::HasHamiltonianCycle, Some(5), Some(70))
            .unwrap();
        shell.run().unwrap();
        let out = String::from_utf8(shell.into_output()).unwrap();
        assert!(out.contains("\"eulerian\":"));
        assert!(out.contains("\"node_count\": 5"));
        assert!(out.contains("\"edge_count\": 7"));
    }

    #[test]
    fn draw_and_dot_write_configured_paths() {
        let dir = std::env::temp_dir().join(format!("hamgraph-shell-{}", std::process::id()));
        let config = AppConfig {
            tikz_output: dir.join("graph.tex"),
            dot_output: dir.join("graph.dot"),
            ..AppConfig::default()
        };
        let (out, _) = run_script("non_hamilton\n5\ndraw\ndot\nexit\n", config);
        assert!(out.contains("Graph exported to"));
        let tex = std::fs::read_to_string(dir.join("graph.tex")).unwrap();
        assert!(tex.contains("\\begin{tikzpicture}"));
        let dot = std::fs::read_to_string(dir.join("graph.dot")).unwrap();
        assert!(dot.starts_with("graph {"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn end_of_input_mid_prompt_stops_cleanly() {
        let (out, graph) = run_script("hamilton\n5\n", AppConfig::default());
        assert!(out.ends_with("saturation> "));
        assert!(graph.is_none());
    }

    #[test]
    fn command_parsing_is_case_insensitive() {
        assert_eq!(ShellCommand::parse("  Cycle "), Some(ShellCommand::Cycle));
        assert_eq!(ShellCommand::parse("NON_HAMILTON"), Some(ShellCommand::NonHamilton));
        assert_eq!(ShellCommand::parse("non-hamilton"), None);
    }
}
