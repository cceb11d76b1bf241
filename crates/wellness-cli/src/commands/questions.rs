//! List survey questions.

use std::path::Path;

use anyhow::Result;

pub fn run(assets: &Path, json: bool, verbose: bool) -> Result<()> {
    let state = super::load_state(assets, verbose)?;
    let questions = state.catalog.questions();

    if json {
        println!("{}", serde_json::to_string_pretty(questions)?);
        return Ok(());
    }

    println!("{} questions", questions.len());
    println!();
    for q in questions {
        println!("{}", q.prompt);
        println!("  id: {}", q.id);
        let options: Vec<String> = q
            .domain
            .iter()
            .enumerate()
            .map(|(i, v)| if i == 0 { format!("{v} (default)") } else { v.clone() })
            .collect();
        println!("  answers: {}", options.join(", "));
    }

    Ok(())
}
