//! Parsing Options.
//! `--hamilton` / `--non-hamilton` generate a graph before the prompt opens,
//! extra flags can also come from the `HAMGRAPH_FLAGS` environment variable.

use anyhow::{Result, anyhow};
use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

use crate::graph::HamiltonProperty;

pub const FLAGS_ENV: &str = "HAMGRAPH_FLAGS";

fn make_options_parser() -> clap::Command {
    Command::new("hamgraph")
        .no_binary_name(true)
        .version("v0.1.0")
        .about("Random graph generator with Hamiltonian cycle and Eulerian checks")
        .arg(
            Arg::new("hamilton")
                .long("hamilton")
                .action(ArgAction::SetTrue)
                .conflicts_with("non-hamilton")
                .help("Generate a graph that has a Hamiltonian cycle at startup"),
        )
        .arg(
            Arg::new("non-hamilton")
                .long("non-hamilton")
                .action(ArgAction::SetTrue)
                .help("Generate a graph without a Hamiltonian cycle at startup"),
        )
        .arg(
            Arg::new("nodes")
                .short('n')
                .long("nodes")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Node count for the startup graph (prompted when omitted)"),
        )
        .arg(
            Arg::new("saturation")
                .short('s')
                .long("saturation")
                .value_name("PERCENT")
                .value_parser(value_parser!(u32).range(1..=100))
                .help("Saturation percentage for the startup graph"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .value_parser(value_parser!(u64))
                .help("Seed the random generator for reproducible graphs"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Path to a TOML configuration file [default: hamgraph.toml]"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print analysis results as JSON"),
        )
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Options {
    pub startup: Option<HamiltonProperty>,
    pub nodes: Option<usize>,
    pub saturation: Option<u32>,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

impl Options {
    pub fn parse_from_str(s: &str) -> Result<Self> {
        let flags = shellwords::split(s).map_err(|err| anyhow!("{}: {}", FLAGS_ENV, err))?;
        Self::parse_from_args(&flags)
    }

    pub fn parse_from_args(flags: &[String]) -> Result<Self> {
        let app = make_options_parser();
        let matches = app.try_get_matches_from(flags.iter())?;

        let startup = if matches.get_flag("hamilton") {
            Some(HamiltonProperty::HasHamiltonianCycle)
        } else if matches.get_flag("non-hamilton") {
            Some(HamiltonProperty::NoHamiltonianCycle)
        } else {
            None
        };

        if let Some(0) = matches.get_one::<usize>("nodes") {
            return Err(anyhow!("--nodes must be a positive integer"));
        }

        Ok(Options {
            startup,
            nodes: matches.get_one::<usize>("nodes").copied(),
            saturation: matches.get_one::<u32>("saturation").copied(),
            seed: matches.get_one::<u64>("seed").copied(),
            config: matches.get_one::<PathBuf>("config").cloned(),
            json: matches.get_flag("json"),
        })
    }

    /// Flags from `HAMGRAPH_FLAGS` come first so command-line arguments win.
    pub fn from_env_and_args(env_flags: &str, args: &[String]) -> Result<Self> {
        let mut flags = shellwords::split(env_flags).map_err(|err| anyhow!("{}: {}", FLAGS_ENV, err))?;
        flags.extend(args.iter().cloned());
        Self::parse_from_args(&flags)
    }
}
