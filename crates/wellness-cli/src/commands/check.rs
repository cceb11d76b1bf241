//! Asset bundle validation command.

use std::path::Path;

use anyhow::Result;

pub fn run(assets: &Path, verbose: bool) -> Result<()> {
    let state = super::load_state(assets, verbose)?;

    println!("Assets OK: {}", assets.display());
    println!("  Questions: {}", state.catalog.questions().len());
    println!("  Encoder components: {}", state.pipeline.encoder().n_components());
    println!("  Clusters: {}", state.pipeline.n_clusters());
    println!("  Interpretations: {}", state.interpretations.len());
    println!("  Profile rows: {}", state.profiles.len());

    if verbose {
        for q in state.catalog.questions() {
            eprintln!("  {}: {}", q.id, q.domain.join(" | "));
        }
    }

    Ok(())
}
