use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use irregular_connect_four::config::AppConfig;
use irregular_connect_four::experiment::{write_summary, CsvSink, Experiment};

/// Sweep rollout budgets against each other on a set of boards.
#[derive(Parser)]
#[command(name = "experiment", about = "Batch AI-vs-AI experiments")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the CSV output path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Override games per budget pairing
    #[arg(long)]
    games: Option<usize>,

    /// Base seed for reproducible sweeps
    #[arg(long)]
    seed: Option<u64>,

    /// Also write a JSON summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Run rollouts across threads
    #[arg(long)]
    parallel: bool,

    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(output) = cli.output {
        app_config.experiment.output = output;
    }
    if let Some(games) = cli.games {
        app_config.experiment.games_per_pairing = games;
    }
    if cli.seed.is_some() {
        app_config.experiment.seed = cli.seed;
    }
    if cli.summary.is_some() {
        app_config.experiment.summary = cli.summary;
    }
    if cli.parallel {
        app_config.game.parallel = true;
    }
    app_config.validate().context("invalid configuration")?;

    let experiment = Experiment::new(app_config.experiment.clone(), app_config.game.clone());
    let output = &experiment.config().output;
    let mut sink = CsvSink::open(output)
        .with_context(|| format!("opening results file {}", output.display()))?;

    let pb = if cli.quiet {
        None
    } else {
        let pb = ProgressBar::new(experiment.config().total_games() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos:>6}/{len:<6}  {percent:>3}%  {elapsed_precise}  {msg}",
            )
            .context("progress bar template")?
            .progress_chars("=>-"),
        );
        Some(pb)
    };

    let summary = experiment
        .run(&mut sink, pb.as_ref())
        .context("experiment failed")?;
    if let Some(pb) = &pb {
        pb.finish_with_message("done");
    }

    for line in summary.table_lines() {
        println!("{line}");
    }
    info!(
        "{} games appended to {}",
        summary.total_games(),
        output.display()
    );

    if let Some(path) = &experiment.config().summary {
        write_summary(&summary, path)
            .with_context(|| format!("writing summary to {}", path.display()))?;
        info!("summary written to {}", path.display());
    }

    Ok(())
}
