use std::path::PathBuf;

use thiserror::Error;

/// Failures of the classification pipeline.
///
/// Everything except [`DashboardError::ArtifactUnreadable`] aborts the run;
/// unreadable artifacts are recovered per dependency by the inspector.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("`{command}` exited with status {code}")]
    ExternalToolFailure { command: String, code: i32 },

    #[error("Malformed classpath entry: {path}\nReason: {reason}")]
    MalformedCoordinate { path: String, reason: String },

    #[error("Cannot read artifact {}: {source}", .path.display())]
    ArtifactUnreadable {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Duplicate coordinate on classpath: {coordinate}")]
    DuplicateCoordinate { coordinate: String },
}

impl DashboardError {
    /// Process exit code to use when this error ends the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            DashboardError::ExternalToolFailure { code, .. } => *code,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failure_forwards_exit_code() {
        let err = DashboardError::ExternalToolFailure {
            command: "./mvnw dependency:tree".to_string(),
            code: 3,
        };
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("./mvnw dependency:tree"));
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        let err = DashboardError::DuplicateCoordinate {
            coordinate: "org.a:lib:1.0".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
    }
}
