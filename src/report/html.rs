use std::path::Path;

use anyhow::{Context, Result};

use crate::annotate::{color, PURPLE};
use crate::models::Classification;
use crate::registry::StatusSummary;

const BACKGROUND: &str = "#2e3440";
const FOREGROUND: &str = "#ECEFF4";

/// Page-level text that is not derived from the registry.
pub struct PageInfo<'a> {
    pub title: &'a str,
    pub project: &'a str,
}

/// Build the dashboard page.
///
/// `plain` and `verbose` are annotated tree texts; they are embedded as-is.
/// When `verbose` is present the page gets a button that switches between the
/// two views.
pub fn render(
    summary: &StatusSummary<'_>,
    plain: &str,
    verbose: Option<&str>,
    page: &PageInfo<'_>,
) -> String {
    let mut html = String::new();
    let title = html_escape::encode_text(page.title);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", title));
    html.push_str("</head>\n");
    html.push_str(&format!("<body style=\"background-color:{};\">\n", BACKGROUND));
    html.push_str(&format!("<span style=\"color:{}\">\n", FOREGROUND));
    html.push_str(&format!("<h1> {} </h1>\n", title));

    for group in &summary.groups {
        let count = group.count();
        html.push_str(&format!(
            "<h2 style=\"color:{}\"> {}: {} ({}%) </h2>\n",
            color(&Classification::Module(group.status)),
            group.status,
            count,
            summary.percentage(count)
        ));
    }
    if !summary.unreadable.is_empty() {
        let count = summary.unreadable.len();
        html.push_str(&format!(
            "<h2 style=\"color:{}\"> Unreadable: {} ({}%) </h2>\n",
            PURPLE,
            count,
            summary.percentage(count)
        ));
    }
    html.push_str(&format!("<p> Total dependencies: {} </p>\n", summary.total));

    html.push_str(&format!(
        "<p> This page lists every library on the resolved classpath of <code>{}</code>, \
         colored by how far it has adopted the Java Module System: a full <code>module-info.class</code>, \
         only an <code>Automatic-Module-Name</code> manifest entry, or neither. </p>\n",
        html_escape::encode_text(page.project)
    ));

    html.push_str("<hr>\n");

    if verbose.is_some() {
        html.push_str(
            "<button id=\"tree-toggle\" onclick=\"toggleTree()\">Show verbose tree</button>\n",
        );
    }

    html.push_str("<pre id=\"plain-tree\">");
    html.push_str(plain);
    html.push_str("</pre>\n");

    if let Some(verbose) = verbose {
        html.push_str("<pre id=\"verbose-tree\" style=\"display:none\">");
        html.push_str(verbose);
        html.push_str("</pre>\n");
        html.push_str(TOGGLE_SCRIPT);
    }

    html.push_str("</span>\n</body>\n</html>\n");
    html
}

const TOGGLE_SCRIPT: &str = r#"<script>
function toggleTree() {
  var plain = document.getElementById("plain-tree");
  var verbose = document.getElementById("verbose-tree");
  var button = document.getElementById("tree-toggle");
  var showVerbose = verbose.style.display === "none";
  verbose.style.display = showVerbose ? "block" : "none";
  plain.style.display = showVerbose ? "none" : "block";
  button.textContent = showVerbose ? "Show plain tree" : "Show verbose tree";
}
</script>
"#;

/// Write the page, creating parent directories as needed.
pub fn write_report(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
