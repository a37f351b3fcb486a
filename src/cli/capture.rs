//! CLI `capture` command: save a snippet for the current project.

use anyhow::Result;
use std::path::Path;

use crate::config::GhostlyConfig;
use crate::memory::error::MemoryError;

/// Capture `text`. Blank text is a no-op with a notice, not a failure.
pub fn capture(config: &GhostlyConfig, text: &str, root: Option<&Path>) -> Result<()> {
    let store = super::open_store(config);

    match crate::memory::capture(&store, text, root) {
        Ok(episode) => {
            println!("Saved: {}", episode.summary);
            Ok(())
        }
        Err(MemoryError::EmptyInput) => {
            println!("No text provided, nothing saved.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
