use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::config::MavenConfig;
use crate::error::DashboardError;

use super::Snapshot;

const TREE_FILE: &str = "tree.txt";
const VERBOSE_TREE_FILE: &str = "tree-verbose.txt";
const CLASSPATH_FILE: &str = "cp.txt";

/// Exports the classpath and dependency trees by running Maven goals in the
/// project directory.
///
/// Invocations are sequential and blocking with inherited stdio. With
/// `skip_build` the text files left by a previous run are read as-is.
pub struct MavenExporter<'a> {
    config: &'a MavenConfig,
    skip_build: bool,
}

impl<'a> MavenExporter<'a> {
    pub fn new(config: &'a MavenConfig, skip_build: bool) -> Self {
        Self { config, skip_build }
    }

    fn run(&self, project: &Path, args: &[&str]) -> Result<()> {
        let display = format!("{} {}", self.config.command, args.join(" "));
        log::info!("Running `{}` in {}", display, project.display());

        // A relative launcher such as `./mvnw` belongs to the project.
        let local = project.join(&self.config.command);
        let program = if self.config.command.contains('/') && local.exists() {
            // The child runs inside `project`, so a relative path would resolve twice.
            local
                .canonicalize()
                .with_context(|| format!("Failed to resolve {}", local.display()))?
        } else {
            self.config.command.clone().into()
        };

        let status = Command::new(&program)
            .args(args)
            .current_dir(project)
            .status()
            .with_context(|| format!("Failed to launch `{}`", display))?;

        if !status.success() {
            return Err(DashboardError::ExternalToolFailure {
                command: display,
                code: status.code().unwrap_or(1),
            }
            .into());
        }
        Ok(())
    }
}

impl super::Exporter for MavenExporter<'_> {
    fn export(&self, project: &Path) -> Result<Snapshot> {
        if !self.skip_build {
            self.run(
                project,
                &["dependency:tree", &format!("-DoutputFile={}", TREE_FILE)],
            )?;
            if self.config.verbose_tree {
                self.run(
                    project,
                    &[
                        "dependency:tree",
                        "-Dverbose",
                        &format!("-DoutputFile={}", VERBOSE_TREE_FILE),
                    ],
                )?;
            }
            self.run(
                project,
                &[
                    "dependency:build-classpath",
                    &format!("-Dmdep.outputFile={}", CLASSPATH_FILE),
                ],
            )?;
        }

        let tree = read(&project.join(TREE_FILE))?;
        let classpath = read(&project.join(CLASSPATH_FILE))?;

        let verbose_path = project.join(VERBOSE_TREE_FILE);
        let verbose_tree = if self.config.verbose_tree && verbose_path.exists() {
            Some(read(&verbose_path)?)
        } else {
            None
        };

        let pom = project.join("pom.xml");
        let root = match tree_root(&tree) {
            Some(root) => Some(root),
            None if pom.exists() => root_coordinate(&read(&pom)?),
            None => None,
        };

        Ok(Snapshot {
            classpath,
            tree,
            verbose_tree,
            root,
        })
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// The project coordinate Maven prints on the first, unindented tree line.
///
/// This is the resolved form, so `${revision}`-style versions are already
/// expanded.
pub fn tree_root(tree: &str) -> Option<String> {
    let first = tree.lines().find(|line| !line.trim().is_empty())?;
    let first = first.trim_end();
    let unindented = !first.starts_with(|c: char| c.is_whitespace() || "+|\\-".contains(c));
    (unindented && first.split(':').count() >= 4).then(|| first.to_string())
}

/// Build `groupId:artifactId:packaging:version` for the project described by a POM.
///
/// Group and version fall back to `<parent>`; packaging defaults to `jar`.
/// Unresolved `${...}` placeholders yield `None`.
pub fn root_coordinate(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();

    let mut group_id = None;
    let mut artifact_id = None;
    let mut version = None;
    let mut packaging = None;
    let mut parent_group_id = None;
    let mut parent_version = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned());
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map(|t| t.into_owned()).unwrap_or_default();
                let segments: Vec<&str> = path.iter().map(String::as_str).collect();
                match segments.as_slice() {
                    ["project", "groupId"] => group_id = Some(text),
                    ["project", "artifactId"] => artifact_id = Some(text),
                    ["project", "version"] => version = Some(text),
                    ["project", "packaging"] => packaging = Some(text),
                    ["project", "parent", "groupId"] => parent_group_id = Some(text),
                    ["project", "parent", "version"] => parent_version = Some(text),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Cannot parse pom.xml: {}", e);
                return None;
            }
            _ => {}
        }
        buf.clear();
    }

    let root = format!(
        "{}:{}:{}:{}",
        group_id.or(parent_group_id)?,
        artifact_id?,
        packaging.unwrap_or_else(|| "jar".to_string()),
        version.or(parent_version)?
    );
    (!root.contains("${")).then_some(root)
}
