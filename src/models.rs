use std::path::PathBuf;

use serde::Serialize;

/// Maven `(group, artifact, version)` triple identifying one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinate {
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Coordinate {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A classpath entry that has not been inspected yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub path: PathBuf,
    pub coordinate: Coordinate,
    pub file_name: String,
}

/// A classified classpath entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dependency {
    #[serde(flatten)]
    pub artifact: Artifact,
    pub classification: Classification,
}

impl Dependency {
    pub fn coordinate(&self) -> &Coordinate {
        &self.artifact.coordinate
    }
}

/// Level of Java Module System adoption, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ModuleStatus {
    NoModuleInfo,
    AutomaticModuleName,
    FullModuleInfo,
}

impl ModuleStatus {
    /// Summary order used by every report.
    pub const ALL: [ModuleStatus; 3] = [
        ModuleStatus::NoModuleInfo,
        ModuleStatus::AutomaticModuleName,
        ModuleStatus::FullModuleInfo,
    ];
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleStatus::NoModuleInfo => write!(f, "No module info"),
            ModuleStatus::AutomaticModuleName => write!(f, "Automatic module name"),
            ModuleStatus::FullModuleInfo => write!(f, "Full module info"),
        }
    }
}

/// Outcome of inspecting one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Module(ModuleStatus),
    Unreadable { reason: String },
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Module(status) => write!(f, "{}", status),
            Classification::Unreadable { .. } => write!(f, "Unreadable"),
        }
    }
}
