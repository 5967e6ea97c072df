mod loader;
mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gravsim_core::{analyze_campaign, format_error_chain, run_campaign, DomainSpec};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "gravsim")]
#[command(about = "gravsim - point masses under mutual gravity in a walled 2D domain", long_about = None)]
struct Cli {
    /// Log debug-level engine events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a domain or campaign file and print the results
    Run {
        /// Path to a YAML or JSON domain/campaign file
        file: PathBuf,

        /// What to print on stdout
        #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,
    },
    /// Validate a file without simulating it
    Check {
        file: PathBuf,
    },
    /// Replay scenes from `run --format json` at another frame rate
    Retime {
        /// Path to the exported scenes
        file: PathBuf,

        /// New playback rate in frames per second
        #[arg(long)]
        fps: u32,
    },
    /// Print a starter domain as YAML
    Template,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Final state of every body
    Summary,
    /// Frame-by-frame scenes for a renderer
    Json,
    /// One `t,x,y,dxdt,dydt` table per body
    Csv,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Run { file, format } => run_file(&file, format),
        Commands::Check { file } => check_file(&file),
        Commands::Retime { file, fps } => retime_file(&file, fps),
        Commands::Template => print_template(),
    };

    if let Err(e) = outcome {
        eprintln!("{}", format_error_chain(&*e));
        std::process::exit(1);
    }
}

fn run_file(file: &Path, format: OutputFormat) -> Result<()> {
    let spec = loader::load_campaign(file)?;
    let campaign = run_campaign(&spec).with_context(|| format!("simulating {}", file.display()))?;
    info!(domains = campaign.domains().len(), "campaign finished");

    let output = match format {
        OutputFormat::Summary => report::summary(&campaign),
        OutputFormat::Json => report::scenes_json(&campaign)?,
        OutputFormat::Csv => report::tables_csv(&campaign),
    };
    print!("{}", output);

    Ok(())
}

fn check_file(file: &Path) -> Result<()> {
    let spec = loader::load_campaign(file)?;
    let diagnostics = analyze_campaign(&spec);

    for diagnostic in diagnostics.iter() {
        println!("{}", diagnostic);
    }
    if diagnostics.has_errors() {
        bail!("{} has {} error(s)", file.display(), diagnostics.errors().count());
    }

    println!(
        "{}: {} domain(s) ok, {} warning(s)",
        file.display(),
        spec.domains.len(),
        diagnostics.warnings().count()
    );
    Ok(())
}

fn retime_file(file: &Path, fps: u32) -> Result<()> {
    if fps == 0 {
        bail!("fps must be at least 1");
    }
    let scenes = loader::load_scenes(file)?;
    let retimed: Vec<_> = scenes.into_iter().map(|s| s.with_fps(fps)).collect();
    info!(scenes = retimed.len(), fps, "retimed");

    print!("{}", report::scenes_to_json(&retimed)?);
    Ok(())
}

fn print_template() -> Result<()> {
    let yaml = serde_yaml::to_string(&DomainSpec::template()).context("rendering template")?;
    print!("{}", yaml);
    Ok(())
}
