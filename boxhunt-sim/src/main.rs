mod logic;

use anyhow::{Context, Result};
use boxhunt_game::constants::{DEFAULT_MASTER_SEED, GAMES_PER_RUN, MAX_IN_FLIGHT};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use logic::{RunPlan, RunSummary, reports, run_trials};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Plain win counts, probabilities and elapsed time
    Console,
    /// Pretty-printed JSON summary
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "boxhunt-sim", version)]
#[command(
    about = "Monte Carlo estimate of the box-opening puzzle's group win probability per strategy"
)]
struct Args {
    /// Number of trials; each trial plays one game per strategy
    #[arg(long, default_value_t = GAMES_PER_RUN)]
    games: u64,

    /// Maximum number of trials executing at once
    #[arg(long, default_value_t = MAX_IN_FLIGHT)]
    max_in_flight: usize,

    /// Master seed every trial's RNG streams are derived from
    #[arg(long, default_value_t = DEFAULT_MASTER_SEED)]
    seed: u64,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Add reference probabilities and concurrency details to the report
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if shows_banner(&args) {
        announce_banner();
    }

    let summary = run_trials(build_plan(&args)).await?;
    write_report(&args, &summary)
}

/// Only the console report gets a heading; JSON on stdout must stay parseable.
fn shows_banner(args: &Args) -> bool {
    args.verbose && args.report == ReportFormat::Console
}

fn announce_banner() {
    println!("{}", "📦 Boxhunt Monte Carlo".bright_cyan().bold());
    println!("{}", "======================".cyan());
}

fn build_plan(args: &Args) -> RunPlan {
    RunPlan::new(args.games, args.max_in_flight, args.seed)
}

fn write_report(args: &Args, summary: &RunSummary) -> Result<()> {
    let mut sink = open_report_sink(args.output.as_deref())?;

    match args.report {
        ReportFormat::Console => {
            reports::generate_console_report(&mut sink, summary, args.verbose)?;
        }
        ReportFormat::Json => reports::generate_json_report(&mut sink, summary)?,
    }

    sink.flush().context("failed to flush report output")?;
    Ok(())
}

/// Buffered destination for the report: the `--output` file, else stdout.
///
/// Colour is switched off for files so escape codes never land on disk.
fn open_report_sink(path: Option<&Path>) -> Result<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot write report to {}", path.display()))?;
            colored::control::set_override(false);
            Box::new(file)
        }
        None => Box::new(stdout()),
    };
    Ok(BufWriter::new(sink))
}
