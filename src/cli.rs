use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "module-dashboard",
    about = "Classify Maven dependencies by Java module system adoption",
    version
)]
pub struct Cli {
    /// Maven project directory to inspect
    #[arg(default_value = "demo")]
    pub project: PathBuf,

    /// Config file [default: <project>/.module-dashboard/config.toml, fallback ~/.config/module-dashboard/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reuse cp.txt / tree.txt from a previous run instead of invoking Maven
    #[arg(long)]
    pub skip_build: bool,

    /// HTML output path [default: site/index.html]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Console report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// List every dependency per status
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
