use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level project configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoverySection,
    #[serde(default)]
    pub imports: ImportsSection,
}

/// `[discovery]`: which class files to scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverySection {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// `[imports]`: post-processing of extracted imports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportsSection {
    /// Glob patterns over dotted names (e.g. `"java.**"`) to leave out.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Leave a class's own name out of its imports.
    #[serde(default = "default_drop_self")]
    pub drop_self: bool,
}

impl Default for ImportsSection {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            drop_self: default_drop_self(),
        }
    }
}

fn default_drop_self() -> bool {
    true
}

/// Default config file names, searched in order.
const CONFIG_FILENAMES: &[&str] = &[".classdeps/config.toml", "classdeps.toml"];

/// Find the config file for a project.
///
/// If `config_override` is provided, use that path directly.
/// Otherwise, search for config files in the project root.
pub fn find_config_path(project_root: &Path, config_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(override_path) = config_override {
        if override_path.exists() {
            return Some(override_path.to_path_buf());
        }
        return None;
    }

    for filename in CONFIG_FILENAMES {
        let path = project_root.join(filename);
        if path.exists() {
            return Some(path);
        }
    }

    None
}

/// Load and parse a config from a TOML file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse a config from a TOML string.
pub fn parse_config(toml_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(toml_str)?;
    Ok(config)
}

/// Resolve the effective config for a project.
///
/// An explicit path that does not exist is an error; a project without any
/// config file gets the defaults.
pub fn resolve_config(project_root: &Path, config_override: Option<&Path>) -> Result<Config> {
    match find_config_path(project_root, config_override) {
        Some(path) => {
            log::debug!("loading config from {}", path.display());
            load_config(&path)
        }
        None => {
            if let Some(missing) = config_override {
                bail!("config file not found: {}", missing.display());
            }
            Ok(Config::default())
        }
    }
}
