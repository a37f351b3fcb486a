//! Terminal commands. Each one resolves the store from config, runs a single
//! memory operation, and prints the outcome.

pub mod capture;
pub mod search;
pub mod stats;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::GhostlyConfig;
use crate::memory::store::EpisodeStore;
use crate::memory::types::Episode;

/// Open the store at the configured location.
pub fn open_store(config: &GhostlyConfig) -> EpisodeStore {
    EpisodeStore::new(config.resolved_memory_file())
}

/// Resolve the project root the command runs against.
///
/// `--no-project` wins; otherwise an explicit `--project` path, else the current
/// working directory.
pub fn project_root(project: Option<PathBuf>, no_project: bool) -> Result<Option<PathBuf>> {
    if no_project {
        return Ok(None);
    }
    match project {
        Some(path) => Ok(Some(path)),
        None => std::env::current_dir()
            .map(Some)
            .context("failed to determine current directory"),
    }
}

/// Print episodes as a numbered list, newest first.
fn print_episodes(episodes: &[Episode]) {
    for (i, ep) in episodes.iter().enumerate() {
        let label = if ep.summary.is_empty() {
            truncate_preview(&ep.body, 30)
        } else {
            ep.summary.clone()
        };
        println!("  {}. {} ({})", i + 1, label, ep.created_at.instant().format("%Y-%m-%d %H:%M"));
        println!("     {}", ep.body);
        println!();
    }
}

/// Truncate to at most `max_chars` characters, appending "..." when cut.
fn truncate_preview(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        content.to_string()
    } else {
        let truncated: String = content.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_preview() {
        assert_eq!(truncate_preview("short", 30), "short");
        assert_eq!(truncate_preview("abcdef", 3), "abc...");
        assert_eq!(truncate_preview("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_project_root_flags() {
        assert_eq!(project_root(Some("/p".into()), true).unwrap(), None);
        assert_eq!(
            project_root(Some("/p".into()), false).unwrap(),
            Some(PathBuf::from("/p"))
        );
        assert!(project_root(None, false).unwrap().is_some());
    }
}
