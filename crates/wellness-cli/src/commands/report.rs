//! PDF report command.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use wellness_cluster::FormController;

use crate::AnswerArgs;

pub fn run(
    assets: &Path,
    args: &AnswerArgs,
    name: Option<&str>,
    out_dir: &Path,
    verbose: bool,
) -> Result<()> {
    let state = super::load_state(assets, verbose)?;
    let form = FormController::new(&state);

    let answers = super::collect_answers(&form, args)?;
    let submission = form.submit(&answers, name).context("Report generation failed")?;

    super::print_prediction(&submission.prediction)?;

    let output_path = out_dir.join(&submission.file_name);
    std::fs::write(&output_path, &submission.report)
        .with_context(|| format!("Failed to write to {}", output_path.display()))?;
    info!(path = %output_path.display(), bytes = submission.report.len(), "report written");
    println!();
    println!("Saved report to: {}", output_path.display());

    Ok(())
}
