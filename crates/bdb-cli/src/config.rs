use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bdb_store::Severity;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Settings for the `bdb` binary, read from an optional TOML file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Database root directory.
    pub root: PathBuf,
    /// Most verbose severity that gets printed.
    pub log_level: Severity,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("mydb"),
            log_level: Severity::Info,
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// File values (or defaults) with command-line overrides applied.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(root) = &cli.root {
            config.root = root.clone();
        }
        if let Some(level) = cli.log_level {
            config.log_level = level;
        }
        Ok(config)
    }
}
