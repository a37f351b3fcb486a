use anyhow::Result;
use std::path::Path;

use crate::config::GhostlyConfig;

/// Search the current project's memories from the terminal.
pub fn search(config: &GhostlyConfig, query: &str, root: Option<&Path>) -> Result<()> {
    let store = super::open_store(config);
    let limit = config.recall.default_limit;

    let results = crate::memory::search(&store, Some(query), root, limit)?;

    if results.is_empty() {
        println!("No memories found.");
        return Ok(());
    }

    println!("Found {} memory(ies):\n", results.len());
    super::print_episodes(&results);
    Ok(())
}

/// Show the most recent memories for the current project.
pub fn recent(config: &GhostlyConfig, root: Option<&Path>) -> Result<()> {
    let store = super::open_store(config);
    let limit = config.recall.default_limit;

    let results = crate::memory::list_recent(&store, root, limit)?;

    if results.is_empty() {
        println!("No memories for this project.");
        return Ok(());
    }

    println!("Project: {}\n", crate::memory::scope::current(root));
    super::print_episodes(&results);
    Ok(())
}
