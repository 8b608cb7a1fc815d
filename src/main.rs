//! `module-dashboard` — classify a Maven project's dependencies by Java Module
//! System adoption and render an annotated dependency tree.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and load config ([`config::load_config`]).
//! 2. Export classpath and dependency trees from Maven ([`exporter`]).
//! 3. Parse classpath entries into coordinates ([`coordinate`]).
//! 4. Inspect every archive for module descriptors ([`inspector`]) and collect
//!    the results ([`registry`]).
//! 5. Print the console summary ([`report::terminal`] or JSON).
//! 6. Annotate the trees ([`annotate`]) and write the HTML page ([`report::html`]).
//!
//! Fatal errors exit non-zero before anything is written; a failing Maven
//! invocation forwards its exit code.

mod annotate;
mod cli;
mod config;
mod coordinate;
mod error;
mod exporter;
mod inspector;
mod models;
mod registry;
mod report;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use annotate::TreeAnnotator;
use cli::{Cli, ReportFormat};
use config::load_config;
use error::DashboardError;
use exporter::maven::MavenExporter;
use exporter::Exporter;
use models::Artifact;
use registry::DependencyRegistry;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        let code = err
            .downcast_ref::<DashboardError>()
            .map(DashboardError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let project = cli.project.clone();
    let config = load_config(&project, cli.config.as_deref())?;

    let snapshot = MavenExporter::new(&config.maven, cli.skip_build).export(&project)?;

    let artifacts = coordinate::parse_classpath(&snapshot.classpath)?;
    if !cli.quiet {
        eprintln!(
            "  {} {} classpath entries",
            "→".cyan(),
            artifacts.len()
        );
    }

    let registry = build_registry(artifacts, config.inspector.max_release, cli.quiet)?;
    let summary = registry.group_by_status();

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&summary, &project, cli.verbose, cli.quiet);
        }
        ReportFormat::Json => {
            let deps: Vec<_> = registry.iter().collect();
            println!("{}", serde_json::to_string_pretty(&deps)?);
        }
    }

    let root = config.report.root.clone().or(snapshot.root);
    log::debug!("Root coordinate: {:?}", root);

    let annotator = TreeAnnotator::new(&registry, root.as_deref(), &config.report.artifact_url);
    let plain = annotator.annotate(&snapshot.tree)?;
    log::info!("Annotated {} plain tree lines", plain.replaced);

    let verbose = snapshot
        .verbose_tree
        .as_deref()
        .map(|tree| annotator.annotate_verbose(tree))
        .transpose()?;
    if let Some(verbose) = &verbose {
        log::info!("Annotated {} verbose tree lines", verbose.replaced);
    }

    let project_name = project
        .canonicalize()
        .unwrap_or_else(|_| project.clone())
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| project.display().to_string());

    let html = report::html::render(
        &summary,
        &plain.text,
        verbose.as_ref().map(|v| v.text.as_str()),
        &report::html::PageInfo {
            title: &config.report.title,
            project: &project_name,
        },
    );

    let output = cli.output.unwrap_or(config.report.output);
    report::html::write_report(&output, &html)?;
    if !cli.quiet {
        eprintln!("  {} report written to {}", "→".cyan(), output.display());
    }

    Ok(())
}

/// Inspect every artifact in classpath order.
fn build_registry(artifacts: Vec<Artifact>, max_release: u32, quiet: bool) -> Result<DependencyRegistry> {
    let pb = if !quiet {
        let pb = ProgressBar::new(artifacts.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut registry = DependencyRegistry::new();
    for artifact in artifacts {
        if let Some(pb) = &pb {
            pb.set_message(artifact.file_name.clone());
        }
        registry.add(inspector::classify(artifact, max_release))?;
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    Ok(registry)
}
