use std::path::PathBuf;

use crate::error::DashboardError;
use crate::models::{Artifact, Coordinate};

/// Directory that marks the start of the local Maven repository.
const REPOSITORY_MARKER: &str = ".m2";

#[cfg(windows)]
const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: char = ':';

/// Derive Maven coordinates from a local-repository artifact path.
///
/// Expects `.../.m2/repository/<group/segments>/<artifactId>/<version>/<fileName>`.
/// The segment right after `.m2` (normally `repository`) is skipped and the
/// remaining group segments are joined with `.`.
pub fn parse_coordinate(path: &str) -> Result<Artifact, DashboardError> {
    let segments: Vec<&str> = path.split(['/', '\\']).collect();

    let malformed = |reason: &str| DashboardError::MalformedCoordinate {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let marker = segments
        .iter()
        .position(|s| *s == REPOSITORY_MARKER)
        .ok_or_else(|| malformed("no `.m2` directory in path"))?;

    // marker, repository dir, at least one group segment, artifact, version, file
    if segments.len() < marker + 6 {
        return Err(malformed("too few path segments after `.m2`"));
    }

    let n = segments.len();
    let file_name = segments[n - 1];
    let version = segments[n - 2];
    let artifact_id = segments[n - 3];
    let group_segments = &segments[marker + 2..n - 3];

    if [file_name, version, artifact_id]
        .iter()
        .chain(group_segments.iter())
        .any(|s| s.is_empty())
    {
        return Err(malformed("empty path segment"));
    }

    Ok(Artifact {
        path: PathBuf::from(path),
        coordinate: Coordinate::new(&group_segments.join("."), artifact_id, version),
        file_name: file_name.to_string(),
    })
}

/// Split the text written by `dependency:build-classpath` and parse every entry.
///
/// The first malformed entry aborts the whole parse.
pub fn parse_classpath(text: &str) -> Result<Vec<Artifact>, DashboardError> {
    text.split(PATH_LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_coordinate)
        .collect()
}
