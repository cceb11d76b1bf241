//! Cluster prediction command.

use std::path::Path;

use anyhow::{Context, Result};
use wellness_cluster::FormController;

use crate::AnswerArgs;

pub fn run(assets: &Path, args: &AnswerArgs, json: bool, verbose: bool) -> Result<()> {
    let state = super::load_state(assets, verbose)?;
    let form = FormController::new(&state);

    let answers = super::collect_answers(&form, args)?;
    let prediction = form.predict(&answers).context("Prediction failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        super::print_prediction(&prediction)?;
    }

    Ok(())
}
