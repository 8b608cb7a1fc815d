use anyhow::Result;
use regex::{Captures, Regex};

use crate::models::{Classification, Dependency, ModuleStatus};
use crate::registry::DependencyRegistry;

pub const RED: &str = "#BF616A";
pub const YELLOW: &str = "#EBCB8B";
pub const GREEN: &str = "#A3BE8C";
pub const PURPLE: &str = "#B48EAD";

/// Display color for a classification.
pub fn color(classification: &Classification) -> &'static str {
    match classification {
        Classification::Module(ModuleStatus::NoModuleInfo) => RED,
        Classification::Module(ModuleStatus::AutomaticModuleName) => YELLOW,
        Classification::Module(ModuleStatus::FullModuleInfo) => GREEN,
        Classification::Unreadable { .. } => PURPLE,
    }
}

/// Annotated tree text and the number of lines rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated {
    pub text: String,
    pub replaced: usize,
}

/// Rewrites `mvn dependency:tree` output so every known dependency line becomes
/// a colored link.
///
/// The text is treated line by line; no tree structure is built.
pub struct TreeAnnotator<'a> {
    registry: &'a DependencyRegistry,
    root: Option<&'a str>,
    artifact_url: &'a str,
}

impl<'a> TreeAnnotator<'a> {
    pub fn new(registry: &'a DependencyRegistry, root: Option<&'a str>, artifact_url: &'a str) -> Self {
        TreeAnnotator {
            registry,
            root,
            artifact_url,
        }
    }

    /// Annotate a plain `dependency:tree` output.
    pub fn annotate(&self, tree: &str) -> Result<Annotated> {
        let mut text = match self.root {
            Some(root) if !root.is_empty() => strip_root(tree, root),
            _ => tree.to_string(),
        };

        let mut replaced = 0;
        for dep in self.registry.iter() {
            let pattern = line_pattern(dep)?;
            let mut hits = 0;
            let rewritten = pattern.replace_all(&text, |caps: &Captures| {
                hits += 1;
                format!("{}{}{}", &caps[1], self.render(dep), &caps[2])
            });
            if hits > 0 {
                text = rewritten.into_owned();
                replaced += hits;
            }
        }

        Ok(Annotated { text, replaced })
    }

    /// Annotate a `dependency:tree -Dverbose` output.
    ///
    /// Parenthesized entries are unwrapped and `version managed` /
    /// `omitted for conflict` lines are dropped before annotation.
    pub fn annotate_verbose(&self, tree: &str) -> Result<Annotated> {
        self.annotate(&normalize_verbose(tree))
    }

    fn render(&self, dep: &Dependency) -> String {
        let c = dep.coordinate();
        let href = format!(
            "{}/{}/{}",
            self.artifact_url.trim_end_matches('/'),
            c.group_id,
            c.artifact_id
        );
        let label = format!("{}/{}@{}", c.group_id, c.artifact_id, c.version);
        format!(
            "<span style=\"color:{}\"><a style=\"color:inherit\" href=\"{}\">{}</a></span>",
            color(&dep.classification),
            html_escape::encode_double_quoted_attribute(&href),
            html_escape::encode_text(&label)
        )
    }
}

/// Pattern for one dependency's tree line.
///
/// Group 1 is the tree prefix, group 2 a trailing `\r`. The coordinate must
/// start the line or follow a space or `(`, and the version must end the line
/// or be followed by `:`, whitespace or `)`.
fn line_pattern(dep: &Dependency) -> Result<Regex> {
    let c = dep.coordinate();
    let pattern = format!(
        r"(?m)^((?:[^\r\n]*[ (])?){}:{}:[^:\s]+(?::[^:\s]+)?:{}(?:[: \t)][^\r\n]*)?(\r?)$",
        regex::escape(&c.group_id),
        regex::escape(&c.artifact_id),
        regex::escape(&c.version)
    );
    Ok(Regex::new(&pattern)?)
}

/// Remove the project's own coordinate; drop the line if nothing else is left.
fn strip_root(tree: &str, root: &str) -> String {
    tree.split_inclusive('\n')
        .filter_map(|line| {
            if !line.contains(root) {
                return Some(line.to_string());
            }
            let stripped = line.replace(root, "");
            if stripped.trim().is_empty() {
                None
            } else {
                Some(stripped)
            }
        })
        .collect()
}

fn normalize_verbose(tree: &str) -> String {
    tree.replace("- (", "- ")
        .split_inclusive('\n')
        .filter(|line| {
            !(line.contains(" - version managed") || line.contains(" - omitted for conflict"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::dep;

    const URL: &str = "https://central.sonatype.com/artifact";
    const ROOT: &str = "com.example:demo:jar:0.0.1-SNAPSHOT";

    fn registry(deps: Vec<Dependency>) -> DependencyRegistry {
        let mut registry = DependencyRegistry::new();
        for d in deps {
            registry.add(d).unwrap();
        }
        registry
    }

    #[test]
    fn test_full_module_line_becomes_green_link() {
        let reg = registry(vec![dep("com.g", "art", "2.0", ModuleStatus::FullModuleInfo)]);
        let out = TreeAnnotator::new(&reg, None, URL).annotate("com.g:art:jar:2.0:compile\n").unwrap();
        assert_eq!(out.replaced, 1);
        assert_eq!(
            out.text,
            "<span style=\"color:#A3BE8C\"><a style=\"color:inherit\" \
             href=\"https://central.sonatype.com/artifact/com.g/art\">com.g/art@2.0</a></span>\n"
        );
    }

    #[test]
    fn test_tree_prefix_and_line_endings_preserved() {
        let reg = registry(vec![
            dep("org.a", "lib", "1.0", ModuleStatus::NoModuleInfo),
            dep("org.b", "util", "3.1", ModuleStatus::AutomaticModuleName),
        ]);
        let tree = "com.example:demo:jar:0.0.1-SNAPSHOT\r\n+- org.a:lib:jar:1.0:compile\r\n|  \\- org.b:util:jar:3.1:runtime\r\n";
        let out = TreeAnnotator::new(&reg, Some(ROOT), URL).annotate(tree).unwrap();
        assert_eq!(out.replaced, 2);
        let lines: Vec<&str> = out.text.split_inclusive('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("+- <span style=\"color:#BF616A\">"));
        assert!(lines[0].ends_with("org.a/lib@1.0</a></span>\r\n"));
        assert!(lines[1].starts_with("|  \\- <span style=\"color:#EBCB8B\">"));
        assert!(lines[1].ends_with("\r\n"));
    }

    #[test]
    fn test_similar_coordinates_are_not_confused() {
        let reg = registry(vec![
            dep("g", "lib", "1.0", ModuleStatus::NoModuleInfo),
            dep("org.g", "lib", "1.0.1", ModuleStatus::FullModuleInfo),
        ]);
        let tree = "+- org.g:lib:jar:1.0.1:compile\n\\- g:lib:jar:1.0:compile\n";
        let out = TreeAnnotator::new(&reg, None, URL).annotate(tree).unwrap();
        assert_eq!(out.replaced, 2);
        let lines: Vec<&str> = out.text.lines().collect();
        assert!(lines[0].contains(GREEN) && lines[0].contains("org.g/lib@1.0.1"));
        assert!(lines[1].contains(RED) && lines[1].contains(">g/lib@1.0<"));
    }

    #[test]
    fn test_classifier_and_decoration_tolerated() {
        let reg = registry(vec![dep("io.netty", "netty-transport-native-epoll", "4.1.100.Final", ModuleStatus::AutomaticModuleName)]);
        let tree = "   +- io.netty:netty-transport-native-epoll:jar:linux-x86_64:4.1.100.Final:runtime (optional)\n";
        let out = TreeAnnotator::new(&reg, None, URL).annotate(tree).unwrap();
        assert_eq!(out.replaced, 1);
        assert!(out.text.starts_with("   +- <span"));
        assert!(!out.text.contains("runtime"));
    }

    #[test]
    fn test_annotation_is_idempotent() {
        let reg = registry(vec![
            dep("org.a", "lib", "1.0", ModuleStatus::NoModuleInfo),
            dep("com.g", "art", "2.0", ModuleStatus::FullModuleInfo),
        ]);
        let annotator = TreeAnnotator::new(&reg, Some(ROOT), URL);
        let tree = "com.example:demo:jar:0.0.1-SNAPSHOT\n+- org.a:lib:jar:1.0:compile\n\\- com.g:art:jar:2.0:compile\n";
        let first = annotator.annotate(tree).unwrap();
        let second = annotator.annotate(&first.text).unwrap();
        assert_eq!(first.replaced, 2);
        assert_eq!(second.replaced, 0);
        assert_eq!(second.text, first.text);

        let verbose = annotator.annotate_verbose(&first.text).unwrap();
        assert_eq!(verbose.replaced, 0);
        assert_eq!(verbose.text, first.text);
    }

    #[test]
    fn test_verbose_version_managed_line_removed() {
        let reg = registry(vec![dep("org.a", "lib", "1.0", ModuleStatus::NoModuleInfo)]);
        let out = TreeAnnotator::new(&reg, None, URL)
            .annotate_verbose("  +- (org.a:lib:jar:1.0 - version managed from 1.1)\n")
            .unwrap();
        assert_eq!(out.text, "");
        assert_eq!(out.replaced, 0);
    }

    #[test]
    fn test_verbose_parenthesized_entry_unwrapped() {
        let reg = registry(vec![dep("org.a", "lib", "1.0", ModuleStatus::FullModuleInfo)]);
        let tree = "+- org.b:app:jar:2.0:compile\n|  \\- (org.a:lib:jar:1.0:compile - omitted for duplicate)\n\\- (org.a:lib:jar:0.9:compile - omitted for conflict with 1.0)\n";
        let out = TreeAnnotator::new(&reg, None, URL).annotate_verbose(tree).unwrap();
        assert_eq!(out.replaced, 1);
        let lines: Vec<&str> = out.text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "+- org.b:app:jar:2.0:compile");
        assert!(lines[1].starts_with("|  \\- <span style=\"color:#A3BE8C\">"));
    }

    #[test]
    fn test_root_coordinate_never_survives() {
        let reg = registry(vec![]);
        let tree = "com.example:demo:jar:0.0.1-SNAPSHOT\n\\- org.x:y:jar:1:compile\n";
        let out = TreeAnnotator::new(&reg, Some(ROOT), URL).annotate(tree).unwrap();
        assert!(!out.text.contains(ROOT));
        assert_eq!(out.text, "\\- org.x:y:jar:1:compile\n");
    }

    #[test]
    fn test_unreadable_uses_distinct_color() {
        let mut broken = dep("org.a", "lib", "1.0", ModuleStatus::NoModuleInfo);
        broken.classification = Classification::Unreadable {
            reason: "truncated".to_string(),
        };
        let reg = registry(vec![broken]);
        let out = TreeAnnotator::new(&reg, None, URL).annotate("\\- org.a:lib:jar:1.0:compile\n").unwrap();
        assert!(out.text.contains(PURPLE));
    }
}
