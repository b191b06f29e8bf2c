//! ModeSync CLI
//!
//! Command-line interface for installing custom mode profiles into a project.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use modesync::{ConsoleReporter, InstallOptions, Installer};

#[derive(Parser)]
#[command(name = "modesync")]
#[command(
    author,
    version,
    about = "Install custom mode profiles, rules, and MCP defaults into a project"
)]
struct Cli {
    /// Target project directory
    #[arg(short, long)]
    target: PathBuf,

    /// Source directory containing mode definitions (default: <bundle>/modes)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Bundle directory holding modes, rule files, and the MCP template
    /// (default: the directory of the executable)
    #[arg(long, env = "MODESYNC_BUNDLE_DIR")]
    bundle_dir: Option<PathBuf>,

    /// Emit a `version` field with this value in the aggregate file
    #[arg(long)]
    schema_version: Option<String>,

    /// Show what would be done without making changes
    #[arg(long)]
    dry_run: bool,

    /// Show detailed output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    print_header();

    let options = InstallOptions {
        schema_version: cli.schema_version,
        dry_run: cli.dry_run,
    };
    let installer = Installer::new(cli.target, cli.source, cli.bundle_dir, options)?;
    let reporter = ConsoleReporter::new(cli.verbose);

    if cli.verbose {
        println!(
            "Using source: {}\n",
            installer.source_dir().display().to_string().dimmed()
        );
    }

    println!("{}", "➤ Installing mode profiles".cyan().bold());
    let report = installer.install(&reporter)?;

    if report.is_clean() {
        println!("\n{}", "✨ Install complete!".green().bold());
    } else {
        println!(
            "\n{}",
            format!("Install completed with {} errors", report.parse_errors)
                .yellow()
                .bold()
        );
    }
    println!(
        "  Modes: {}, Rules: {}, Errors: {}",
        report.modes_installed.to_string().green(),
        report.rules_copied.to_string().green(),
        if report.parse_errors > 0 {
            report.parse_errors.to_string().red()
        } else {
            report.parse_errors.to_string().dimmed()
        }
    );

    Ok(())
}

fn print_header() {
    println!(
        "{}",
        r#"
╔═══════════════════════════════════════════════════════════════════╗
║                          ModeSync                                 ║
║               Custom Mode Profile Installation                    ║
╚═══════════════════════════════════════════════════════════════════╝
"#
        .cyan()
        .bold()
    );
}
