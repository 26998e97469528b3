use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "hamgraph.toml";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Saturation percentages accepted at the `saturation>` prompt.
    #[serde(default = "default_hamilton_saturations")]
    pub hamilton_saturations: Vec<u32>,
    #[serde(default = "default_non_hamilton_saturation")]
    pub non_hamilton_saturation: u32,
    #[serde(default = "default_tikz_output")]
    pub tikz_output: PathBuf,
    #[serde(default = "default_dot_output")]
    pub dot_output: PathBuf,
    /// 哈密顿回路搜索的超时时间(毫秒). 不设置则一直搜索到结束.
    #[serde(default)]
    pub search_timeout_ms: Option<u64>,
    /// 按性质生成图时最多尝试的候选数量.
    #[serde(default)]
    pub max_attempts: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hamilton_saturations: default_hamilton_saturations(),
            non_hamilton_saturation: default_non_hamilton_saturation(),
            tikz_output: default_tikz_output(),
            dot_output: default_dot_output(),
            search_timeout_ms: None,
            max_attempts: None,
        }
    }
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.hamilton_saturations.is_empty(),
            "hamilton_saturations must list at least one percentage"
        );
        for &percent in self
            .hamilton_saturations
            .iter()
            .chain(std::iter::once(&self.non_hamilton_saturation))
        {
            ensure!(
                (1..=100).contains(&percent),
                "saturation {}% is outside 1..=100",
                percent
            );
        }
        Ok(())
    }

    pub fn search_timeout(&self) -> Option<Duration> {
        self.search_timeout_ms.map(Duration::from_millis)
    }
}

// Prompt defaults.
fn default_hamilton_saturations() -> Vec<u32> {
    vec![30, 70]
}

fn default_non_hamilton_saturation() -> u32 {
    50
}

fn default_tikz_output() -> PathBuf {
    PathBuf::from("draw.tex")
}

fn default_dot_output() -> PathBuf {
    PathBuf::from("draw.dot")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from_file("/nonexistent/hamgraph.toml").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.hamilton_saturations, vec![30, 70]);
        assert_eq!(config.non_hamilton_saturation, 50);
        assert_eq!(config.search_timeout(), None);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            "hamilton_saturations = [40, 60, 80]\nsearch_timeout_ms = 250\n",
        )
        .unwrap();
        assert_eq!(config.hamilton_saturations, vec![40, 60, 80]);
        assert_eq!(config.search_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.tikz_output, PathBuf::from("draw.tex"));
        assert_eq!(config.max_attempts, None);
    }

    #[test]
    fn out_of_range_saturation_rejected() {
        assert!(AppConfig::from_toml_str("non_hamilton_saturation = 0").is_err());
        assert!(AppConfig::from_toml_str("hamilton_saturations = [30, 170]").is_err());
        assert!(AppConfig::from_toml_str("hamilton_saturations = []").is_err());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("hamgraph-config-{}.toml", std::process::id()));
        fs::write(&path, "max_attempts = 12\ntikz_output = \"out/graph.tex\"\n").unwrap();
        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.max_attempts, Some(12));
        assert_eq!(config.tikz_output, PathBuf::from("out/graph.tex"));
        let _ = fs::remove_file(&path);
    }
}
