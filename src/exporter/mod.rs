use std::path::Path;

use anyhow::Result;

pub mod maven;

/// Raw text exported from a build, before any classification.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Path-list-separated resolved classpath.
    pub classpath: String,
    pub tree: String,
    pub verbose_tree: Option<String>,
    /// The project's own coordinate as printed on the first tree line.
    pub root: Option<String>,
}

pub trait Exporter {
    fn export(&self, project: &Path) -> Result<Snapshot>;
}
