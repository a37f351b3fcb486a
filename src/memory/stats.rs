use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::memory::error::{MemoryError, Result};
use crate::memory::store::EpisodeStore;
use crate::memory::types::{MemoryStore, ScopeId};

/// Response from memory_stats.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_episodes: u64,
    pub scope: ScopeId,
    pub scope_episodes: u64,
    pub by_scope: BTreeMap<String, u64>,
    pub reserved_events: u64,
    pub file_size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_episode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_episode: Option<String>,
}

/// Load the store and summarize it, highlighting `scope`.
pub fn memory_stats(store: &EpisodeStore, scope: &ScopeId) -> Result<StatsResponse> {
    let data = store.load_all()?;
    let file_size_bytes = file_size(store.path())?;
    Ok(summarize(&data, scope, file_size_bytes))
}

fn file_size(path: &Path) -> Result<u64> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| MemoryError::unavailable(path, e))
}

fn summarize(data: &MemoryStore, scope: &ScopeId, file_size_bytes: u64) -> StatsResponse {
    let mut by_scope: BTreeMap<String, u64> = BTreeMap::new();
    for ep in &data.episodes {
        *by_scope.entry(ep.project_scope.to_string()).or_default() += 1;
    }

    // Episodes are chronological, so the ends of the list bound the time range.
    let oldest_episode = data.episodes.first().map(|e| e.created_at.instant().to_rfc3339());
    let newest_episode = data.episodes.last().map(|e| e.created_at.instant().to_rfc3339());

    StatsResponse {
        total_episodes: data.episodes.len() as u64,
        scope: scope.clone(),
        scope_episodes: by_scope.get(scope.as_str()).copied().unwrap_or(0),
        by_scope,
        reserved_events: data.events.len() as u64,
        file_size_bytes,
        oldest_episode,
        newest_episode,
    }
}
