//! Subcommand implementations and the helpers they share.

pub mod check;
pub mod predict;
pub mod questions;
pub mod report;

use std::path::Path;

use anyhow::{Context, Result, bail};
use wellness_cluster::{AppConfig, AppState, FormController, Prediction, ResponseRecord};

use crate::AnswerArgs;

/// Load every asset from `assets`, failing fast on any problem.
pub fn load_state(assets: &Path, verbose: bool) -> Result<AppState> {
    if verbose {
        eprintln!("Loading assets from: {}", assets.display());
    }
    AppState::load(&AppConfig::from_dir(assets))
        .with_context(|| format!("Failed to load assets from {}", assets.display()))
}

/// Split a `question=value` argument.
pub fn parse_answer(arg: &str) -> Result<(&str, &str)> {
    let Some((question, value)) = arg.split_once('=') else {
        bail!("Answer '{}' must look like question=value", arg);
    };
    let (question, value) = (question.trim(), value.trim());
    if question.is_empty() || value.is_empty() {
        bail!("Answer '{}' must look like question=value", arg);
    }
    Ok((question, value))
}

/// Build the response record from flags or an interactive session.
pub fn collect_answers(form: &FormController<'_>, args: &AnswerArgs) -> Result<ResponseRecord> {
    if args.interactive {
        let stdin = std::io::stdin();
        return form
            .collect_interactive(stdin.lock(), std::io::stdout())
            .context("Failed to read answers");
    }

    let pairs = args
        .answers
        .iter()
        .map(|a| parse_answer(a))
        .collect::<Result<Vec<_>>>()?;
    form.record_from_pairs(pairs).context("Invalid answers")
}

/// Print the on-screen result: banner, profile, interpretation, answers.
pub fn print_prediction(prediction: &Prediction) -> Result<()> {
    println!("You belong to Cluster {}", prediction.cluster);
    println!();

    if let Some(profile) = &prediction.profile {
        println!("Cluster Profile:");
        println!("{:-<60}", "");
        for (column, value) in &profile.fields {
            println!("  {:<20} {}", column, value);
        }
        println!();
    }

    let interp = &prediction.interpretation;
    println!("{}", interp.title);
    println!("{:-<60}", "");
    println!("{}", interp.description);
    println!();
    println!("Suggestions:");
    for suggestion in &interp.suggestions {
        println!("  - {}", suggestion);
    }
    println!();

    println!("Your Answers:");
    println!("{}", serde_json::to_string_pretty(&prediction.answers)?);
    Ok(())
}
