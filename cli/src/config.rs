// SPDX-License-Identifier: MIT OR Apache-2.0

//! TOML configuration for the CLI, overridable from the command line

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use meshgo_core::{EngineConfig, Topology};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Side length of the square grid used when no topology file is given
    #[serde(default = "default_board_size")]
    pub size: usize,
    /// Adjacency table to load instead of a grid
    #[serde(default)]
    pub topology: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Where finished games are written; archiving is off when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_board_size() -> usize {
    19
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: default_board_size(),
            topology: None,
        }
    }
}

impl BoardConfig {
    /// Build the board graph this section describes
    pub fn build_topology(&self) -> Result<Topology> {
        if let Some(path) = &self.topology {
            return Topology::load(path)
                .with_context(|| format!("Failed to load topology from {}", path.display()));
        }
        if self.size == 0 {
            bail!("Invalid board size 0");
        }
        Ok(Topology::grid(self.size, self.size))
    }
}

/// Values given on the command line; `None` leaves the file value alone
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub size: Option<usize>,
    pub topology: Option<PathBuf>,
    pub komi: Option<f32>,
    pub allow_suicide: bool,
    pub archive_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Apply command-line overrides on top of file values
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(size) = overrides.size {
            self.board.size = size;
            // An explicit size means a grid, even if the file names a topology
            if overrides.topology.is_none() {
                self.board.topology = None;
            }
        }
        if let Some(path) = overrides.topology {
            self.board.topology = Some(path);
        }
        if let Some(komi) = overrides.komi {
            self.engine.komi = komi;
        }
        if overrides.allow_suicide {
            self.engine.allow_suicide = true;
        }
        if let Some(dir) = overrides.archive_dir {
            self.archive.dir = Some(dir);
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "meshgo", "meshgo")
        .context("Failed to determine config directory")?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Load the configuration from `path`, or from the default location.
///
/// An explicit path must exist. A missing default file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<CliConfig> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                tracing::debug!(
                    "Config file not found at {}, using defaults",
                    default_path.display()
                );
                return Ok(CliConfig::default());
            }
            default_path
        }
    };

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config = toml::from_str::<CliConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    tracing::info!("Loaded config from: {}", config_path.display());
    Ok(config)
}
