#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use ghostly::memory::store::EpisodeStore;
use ghostly::memory::types::{Episode, ScopeId};
use tempfile::TempDir;

/// A store backed by a fresh temp directory. Keep the `TempDir` alive for the
/// duration of the test.
pub fn test_store() -> (TempDir, EpisodeStore) {
    let tmp = TempDir::new().unwrap();
    let store = EpisodeStore::new(tmp.path().join(".ghostly").join("memory.json"));
    (tmp, store)
}

/// Build an episode with a fixed id and timestamp.
pub fn episode(id: i64, scope: &str, body: &str) -> Episode {
    let summary = body.split_whitespace().next().unwrap_or("").to_string();
    Episode {
        id: id.to_string(),
        created_at: Utc.timestamp_millis_opt(1_700_000_000_000 + id).unwrap().into(),
        project_scope: ScopeId::new(scope),
        summary: summary.clone(),
        body: body.to_string(),
        keywords: summary,
        extra: Default::default(),
    }
}
