use std::fs::File;
use std::io::Read;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::DashboardError;
use crate::models::{Artifact, Classification, Dependency, ModuleStatus};

/// Lowest release that can hold a versioned `module-info.class`.
pub const MIN_VERSIONED_RELEASE: u32 = 10;

const MODULE_DESCRIPTOR: &str = "module-info.class";
const MANIFEST: &str = "META-INF/MANIFEST.MF";
const AUTOMATIC_MODULE_NAME: &str = "Automatic-Module-Name";

/// Classify an artifact, recovering from archives that cannot be read.
pub fn classify(artifact: Artifact, max_release: u32) -> Dependency {
    let classification = match inspect(&artifact, max_release) {
        Ok(status) => Classification::Module(status),
        Err(e) => {
            log::warn!("{}", e);
            Classification::Unreadable {
                reason: e.to_string(),
            }
        }
    };
    Dependency {
        artifact,
        classification,
    }
}

/// Determine the module status of one artifact.
///
/// Looks for, in order: a root or versioned `module-info.class` (releases
/// `max_release` down to [`MIN_VERSIONED_RELEASE`]), then an
/// `Automatic-Module-Name` manifest attribute. A missing manifest is not an
/// error. The archive is closed when this function returns.
pub fn inspect(artifact: &Artifact, max_release: u32) -> Result<ModuleStatus, DashboardError> {
    let unreadable = |source: ZipError| DashboardError::ArtifactUnreadable {
        path: artifact.path.clone(),
        source,
    };

    let file = File::open(&artifact.path).map_err(|e| unreadable(ZipError::Io(e)))?;
    let mut archive = ZipArchive::new(file).map_err(unreadable)?;

    for name in descriptor_candidates(max_release) {
        if has_entry(&mut archive, &name).map_err(unreadable)? {
            log::debug!("{}: found {}", artifact.coordinate, name);
            return Ok(ModuleStatus::FullModuleInfo);
        }
    }

    let manifest = match archive.by_name(MANIFEST) {
        Ok(mut entry) => {
            let mut bytes = Vec::new();
            entry
                .read_to_end(&mut bytes)
                .map_err(|e| unreadable(ZipError::Io(e)))?;
            Some(String::from_utf8_lossy(&bytes).into_owned())
        }
        Err(ZipError::FileNotFound) => None,
        Err(e) => return Err(unreadable(e)),
    };

    let automatic = manifest
        .as_deref()
        .and_then(|m| manifest_attribute(m, AUTOMATIC_MODULE_NAME))
        .is_some();

    Ok(if automatic {
        ModuleStatus::AutomaticModuleName
    } else {
        ModuleStatus::NoModuleInfo
    })
}

/// Entry names that mark a full module, most specific release first.
fn descriptor_candidates(max_release: u32) -> Vec<String> {
    std::iter::once(MODULE_DESCRIPTOR.to_string())
        .chain(
            (MIN_VERSIONED_RELEASE..=max_release)
                .rev()
                .map(|release| format!("META-INF/versions/{}/{}", release, MODULE_DESCRIPTOR)),
        )
        .collect()
}

fn has_entry<R: std::io::Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<bool, ZipError> {
    match archive.by_name(name) {
        Ok(_) => Ok(true),
        Err(ZipError::FileNotFound) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Look up a main-section attribute in `MANIFEST.MF` text.
///
/// Continuation lines (leading single space) are folded into the previous
/// value. Attribute names compare case-insensitively.
pub fn manifest_attribute(manifest: &str, name: &str) -> Option<String> {
    let mut logical: Vec<String> = Vec::new();
    for line in manifest.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(rest) = line.strip_prefix(' ') {
            if let Some(last) = logical.last_mut() {
                last.push_str(rest);
            }
            continue;
        }
        logical.push(line.to_string());
    }

    logical.iter().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_jar(dir: &Path, name: &str, entries: &[(&str, &str)]) -> Artifact {
        let path = dir.join(name);
        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (entry, content) in entries {
            zip.start_file(*entry, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        Artifact {
            path,
            coordinate: Coordinate::new("org.test", name, "1.0"),
            file_name: name.to_string(),
        }
    }

    #[test]
    fn test_root_descriptor_is_full_module() {
        let dir = TempDir::new().unwrap();
        let jar = write_jar(dir.path(), "a.jar", &[("module-info.class", "")]);
        assert_eq!(inspect(&jar, 21).unwrap(), ModuleStatus::FullModuleInfo);
    }

    #[test]
    fn test_versioned_descriptor_is_full_module() {
        let dir = TempDir::new().unwrap();
        let jar = write_jar(
            dir.path(),
            "b.jar",
            &[("META-INF/versions/11/module-info.class", "")],
        );
        assert_eq!(inspect(&jar, 21).unwrap(), ModuleStatus::FullModuleInfo);
    }

    #[test]
    fn test_versioned_descriptor_above_ceiling_is_ignored() {
        let dir = TempDir::new().unwrap();
        let jar = write_jar(
            dir.path(),
            "c.jar",
            &[("META-INF/versions/22/module-info.class", "")],
        );
        assert_eq!(inspect(&jar, 21).unwrap(), ModuleStatus::NoModuleInfo);
    }

    #[test]
    fn test_descriptor_wins_over_automatic_name() {
        let dir = TempDir::new().unwrap();
        let jar = write_jar(
            dir.path(),
            "d.jar",
            &[
                ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\nAutomatic-Module-Name: org.test.d\n"),
                ("module-info.class", ""),
            ],
        );
        assert_eq!(inspect(&jar, 21).unwrap(), ModuleStatus::FullModuleInfo);
    }

    #[test]
    fn test_automatic_module_name() {
        let dir = TempDir::new().unwrap();
        let jar = write_jar(
            dir.path(),
            "e.jar",
            &[("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\r\nAutomatic-Module-Name: org.test.e\r\n")],
        );
        assert_eq!(inspect(&jar, 21).unwrap(), ModuleStatus::AutomaticModuleName);
    }

    #[test]
    fn test_missing_manifest_is_no_module_info() {
        let dir = TempDir::new().unwrap();
        let jar = write_jar(dir.path(), "f.jar", &[("org/test/F.class", "")]);
        assert_eq!(inspect(&jar, 21).unwrap(), ModuleStatus::NoModuleInfo);
    }

    #[test]
    fn test_corrupt_archive_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.jar");
        std::fs::write(&path, b"not a zip").unwrap();
        let artifact = Artifact {
            path,
            coordinate: Coordinate::new("org.test", "broken", "1.0"),
            file_name: "broken.jar".to_string(),
        };
        assert!(matches!(
            inspect(&artifact, 21),
            Err(DashboardError::ArtifactUnreadable { .. })
        ));
        let dep = classify(artifact, 21);
        assert!(matches!(dep.classification, Classification::Unreadable { .. }));
    }

    #[test]
    fn test_descriptor_candidates_descend_to_ten() {
        let names = descriptor_candidates(12);
        assert_eq!(
            names,
            vec![
                "module-info.class",
                "META-INF/versions/12/module-info.class",
                "META-INF/versions/11/module-info.class",
                "META-INF/versions/10/module-info.class",
            ]
        );
    }

    #[test]
    fn test_manifest_continuation_lines() {
        let manifest = "Manifest-Version: 1.0\nAutomatic-Module-Name: com.example.very\n .long.name\n";
        assert_eq!(
            manifest_attribute(manifest, "automatic-module-name"),
            Some("com.example.very.long.name".to_string())
        );
        assert_eq!(manifest_attribute(manifest, "Main-Class"), None);
    }
}
