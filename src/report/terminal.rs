use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{Classification, Dependency, ModuleStatus};
use crate::registry::StatusSummary;

/// Print the classification summary to the terminal.
pub fn render(summary: &StatusSummary<'_>, project: &Path, verbose: bool, quiet: bool) {
    let no = summary.count(ModuleStatus::NoModuleInfo);
    let automatic = summary.count(ModuleStatus::AutomaticModuleName);
    let full = summary.count(ModuleStatus::FullModuleInfo);
    let unreadable = summary.unreadable.len();

    if quiet {
        println!(
            "Total: {}  None: {}  Automatic: {}  Full: {}  Unreadable: {}",
            summary.total,
            no.to_string().red(),
            automatic.to_string().yellow(),
            full.to_string().green(),
            unreadable.to_string().magenta(),
        );
        return;
    }

    println!(
        "\n {} v{}",
        "module-dashboard".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Project: {}\n", project.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!("Total dependencies    : {}", summary.total)
    );
    println!(
        " │  {:<48} │",
        format!("{}  No module info     : {:>4}  ({}%)", "✗".red(), no, summary.percentage(no))
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Automatic name     : {:>4}  ({}%)",
            "~".yellow(),
            automatic,
            summary.percentage(automatic)
        )
    );
    println!(
        " │  {:<48} │",
        format!("{}  Full module info   : {:>4}  ({}%)", "✓".green(), full, summary.percentage(full))
    );
    if unreadable > 0 {
        println!(
            " │  {:<48} │",
            format!("{}  Unreadable         : {:>4}", "?".magenta(), unreadable)
        );
    }
    println!(" └────────────────────────────────────────────────────┘\n");

    if unreadable > 0 {
        println!(" {} Artifacts that could not be inspected:\n", "[UNREADABLE]".magenta().bold());
        render_table(&summary.unreadable);
        println!();
    }

    if verbose {
        for group in summary.groups.iter().filter(|g| g.count() > 0) {
            println!(" {} {}:\n", "[STATUS]".bold(), group.status);
            render_table(&group.dependencies);
            println!();
        }
    }
}

fn render_table(deps: &[&Dependency]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Group").add_attribute(Attribute::Bold),
            Cell::new("Artifact").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for dep in deps {
        let c = dep.coordinate();
        let (status, status_color) = match &dep.classification {
            Classification::Module(ModuleStatus::NoModuleInfo) => ("none".to_string(), Color::Red),
            Classification::Module(ModuleStatus::AutomaticModuleName) => {
                ("automatic".to_string(), Color::Yellow)
            }
            Classification::Module(ModuleStatus::FullModuleInfo) => ("full".to_string(), Color::Green),
            Classification::Unreadable { reason } => (reason.clone(), Color::Magenta),
        };

        table.add_row(vec![
            Cell::new(&c.group_id),
            Cell::new(&c.artifact_id),
            Cell::new(&c.version),
            Cell::new(status).fg(status_color),
        ]);
    }

    println!("{}", table);
}
