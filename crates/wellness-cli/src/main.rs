//! wellness CLI - survey form, cluster prediction and PDF report

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Mental health survey: predict a wellness cluster and export a report.
#[derive(Parser)]
#[command(name = "wellness")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the model artifacts and reference tables
    #[arg(long, global = true, env = "WELLNESS_ASSETS", default_value = "assets")]
    assets: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// How the answers are collected, shared by `predict` and `report`.
#[derive(clap::Args, Debug, Default)]
pub struct AnswerArgs {
    /// Answer as question=value (repeatable); unanswered questions take their default
    #[arg(short, long = "answer", value_name = "QUESTION=VALUE")]
    answers: Vec<String>,

    /// Prompt for every question on the terminal
    #[arg(short, long, conflicts_with = "answers")]
    interactive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List survey questions and their permissible answers
    Questions {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Predict the cluster for a set of answers
    Predict {
        #[command(flatten)]
        answers: AnswerArgs,

        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Predict and write the PDF wellness report
    Report {
        #[command(flatten)]
        answers: AnswerArgs,

        /// Name printed on the report and used in the file name
        #[arg(short, long)]
        name: Option<String>,

        /// Directory to write the report into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Load and cross-check the asset bundle
    Check,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Questions { json } => commands::questions::run(&cli.assets, json, cli.verbose),
        Commands::Predict { answers, json } => {
            commands::predict::run(&cli.assets, &answers, json, cli.verbose)
        }
        Commands::Report { answers, name, out_dir } => {
            commands::report::run(&cli.assets, &answers, name.as_deref(), &out_dir, cli.verbose)
        }
        Commands::Check => commands::check::run(&cli.assets, cli.verbose),
    }
}
