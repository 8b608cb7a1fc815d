use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.module-dashboard/config.toml`.
///
/// Every section and field is optional; missing values fall back to the
/// built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub maven: MavenConfig,
    pub inspector: InspectorConfig,
    pub report: ReportConfig,
}

/// How the dependency data is exported from the project.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MavenConfig {
    /// Maven launcher, run from the project directory. Defaults to `./mvnw`.
    pub command: String,
    /// Also export `dependency:tree -Dverbose`.
    pub verbose_tree: bool,
}

impl Default for MavenConfig {
    fn default() -> Self {
        MavenConfig {
            command: "./mvnw".to_string(),
            verbose_tree: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Highest release checked under `META-INF/versions/`.
    pub max_release: u32,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        InspectorConfig { max_release: 25 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    /// Where the HTML page is written, relative to the working directory.
    pub output: PathBuf,
    /// Base URL that dependency links point to; `/<group>/<artifact>` is appended.
    pub artifact_url: String,
    /// The project's own `group:artifact:packaging:version`, stripped from the tree.
    /// Derived from `pom.xml` when unset.
    pub root: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            title: "Modularization Dashboard".to_string(),
            output: PathBuf::from("site").join("index.html"),
            artifact_url: "https://central.sonatype.com/artifact".to_string(),
            root: None,
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.module-dashboard/config.toml`
/// 3. `~/.config/module-dashboard/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".module-dashboard").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("module-dashboard")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    log::debug!("No config file found, using defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}
