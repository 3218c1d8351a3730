use anyhow::{Context, Result};
use serde::Deserialize;

/// Probe configuration loaded from a TOML file or defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeConfig {
    /// External swap query.
    #[serde(default)]
    pub swap: SwapCommandConfig,
}

/// Command whose stdout reports total, used and free swap, in that order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwapCommandConfig {
    #[serde(default = "default_swap_command")]
    pub command: String,

    #[serde(default = "default_swap_args")]
    pub args: Vec<String>,
}

fn default_swap_command() -> String {
    "sysctl".to_string()
}

fn default_swap_args() -> Vec<String> {
    vec!["vm.swapusage".to_string()]
}

impl Default for SwapCommandConfig {
    fn default() -> Self {
        Self {
            command: default_swap_command(),
            args: default_swap_args(),
        }
    }
}

impl ProbeConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("failed to parse {path}"))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ProbeConfig = toml::de::from_str(contents)?;
        Ok(config)
    }
}
