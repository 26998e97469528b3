use std::io;

use anyhow::{Context, Result};
use log::debug;

use hamgraph::config::{AppConfig, DEFAULT_CONFIG_FILE};
use hamgraph::graph::{GeneratorConfig, RandomGraphGenerator};
use hamgraph::options::{FLAGS_ENV, Options};
use hamgraph::shell::Shell;

fn main() -> Result<()> {
    if std::env::var("HAMGRAPH_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("HAMGRAPH_LOG")
            .write_style("HAMGRAPH_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let env_flags = std::env::var(FLAGS_ENV).unwrap_or_default();
    let options = match Options::from_env_and_args(&env_flags, &args) {
        Ok(options) => options,
        Err(err) => match err.downcast_ref::<clap::Error>() {
            // --help / --version and usage errors are printed by clap itself.
            Some(clap_err) => clap_err.exit(),
            None => return Err(err),
        },
    };
    debug!("hamgraph options: {:?}", options);

    let config_path = options
        .config
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.into());
    let config = AppConfig::load_from_file(&config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    debug!("hamgraph config: {:?}", config);

    let generator = match options.seed {
        Some(seed) => RandomGraphGenerator::from_seed(seed),
        None => RandomGraphGenerator::from_entropy(),
    }
    .with_config(GeneratorConfig {
        max_attempts: config.max_attempts,
    });

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), generator, config).with_json(options.json);

    if let Some(property) = options.startup {
        shell.startup(property, options.nodes, options.saturation)?;
    }
    shell.run()
}
