//! Write path and whole-file persistence.
//!
//! [`EpisodeStore`] wraps a single JSON file. Every operation reads or rewrites
//! the whole document; there is no locking and no atomic rename, so two
//! processes appending at once can lose an update (last writer wins) but the
//! file is never left half-written by this code beyond what `fs::write` allows.

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::memory::error::{MemoryError, Result};
use crate::memory::types::{Episode, MemoryStore, ScopeId};

/// Last id handed out by [`create_episode`], in epoch milliseconds.
static LAST_ID_MS: AtomicI64 = AtomicI64::new(0);

/// Handle to the backing memory file. Cheap to clone; holds only the path.
#[derive(Debug, Clone)]
pub struct EpisodeStore {
    path: PathBuf,
}

impl EpisodeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Materialize the parent directory and an empty store file if either is
    /// missing. Never touches an existing file.
    pub fn ensure_initialized(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| MemoryError::unavailable(parent, e))?;
            }
        }

        if !self.path.exists() {
            let empty = serde_json::to_string(&MemoryStore::default())
                .map_err(|e| MemoryError::unavailable(&self.path, e.into()))?;
            std::fs::write(&self.path, empty)
                .map_err(|e| MemoryError::unavailable(&self.path, e))?;
            tracing::info!(path = %self.path.display(), "memory store initialized");
        }

        Ok(())
    }

    /// Read and parse the whole store.
    pub fn load_all(&self) -> Result<MemoryStore> {
        self.ensure_initialized()?;

        // Raw bytes, so invalid UTF-8 surfaces as a parse failure.
        let raw = std::fs::read(&self.path).map_err(|e| MemoryError::unavailable(&self.path, e))?;
        let store: MemoryStore =
            serde_json::from_slice(&raw).map_err(|e| MemoryError::corrupt(&self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            episodes = store.episodes.len(),
            events = store.events.len(),
            "memory store loaded"
        );
        Ok(store)
    }

    /// Overwrite the file with `store`, pretty-printed.
    pub fn save(&self, store: &MemoryStore) -> Result<()> {
        let json = serde_json::to_string_pretty(store)
            .map_err(|e| MemoryError::unavailable(&self.path, e.into()))?;
        std::fs::write(&self.path, json).map_err(|e| MemoryError::unavailable(&self.path, e))
    }

    /// Read-modify-write: load, push `episode` at the tail, write back.
    ///
    /// Fails with [`MemoryError::DuplicateId`] if the id is already stored.
    pub fn append(&self, episode: Episode) -> Result<()> {
        let mut store = self.load_all()?;
        push_episode(&self.path, &mut store, episode)?;
        self.save(&store)
    }

    /// Create an episode from `raw_text` and append it in one read-modify-write.
    ///
    /// The id is raised above every id already in the store, so a clock that
    /// stepped backwards between processes cannot produce a duplicate.
    pub fn record(&self, raw_text: &str, scope: ScopeId) -> Result<Episode> {
        let mut store = self.load_all()?;
        let floor_ms = store
            .episodes
            .iter()
            .filter_map(|ep| ep.id.parse::<i64>().ok())
            .max()
            .map_or(0, |last| last + 1);

        let episode = new_episode(raw_text, scope, floor_ms);
        push_episode(&self.path, &mut store, episode.clone())?;
        self.save(&store)?;
        Ok(episode)
    }
}

fn push_episode(path: &Path, store: &mut MemoryStore, episode: Episode) -> Result<()> {
    if store.episodes.iter().any(|ep| ep.id == episode.id) {
        return Err(MemoryError::DuplicateId {
            path: path.to_path_buf(),
            id: episode.id,
        });
    }

    tracing::debug!(id = %episode.id, total = store.episodes.len() + 1, "episode appended");
    store.episodes.push(episode);
    Ok(())
}

/// Build a new episode from captured text, stamped with the current time.
///
/// `summary` and `keywords` are the first whitespace-delimited token of
/// `raw_text`, or empty when there is none. The caller is responsible for
/// rejecting blank input before it gets here.
pub fn create_episode(raw_text: &str, scope: ScopeId) -> Episode {
    new_episode(raw_text, scope, 0)
}

/// Like [`create_episode`], with the id held at or above `floor_ms`.
fn new_episode(raw_text: &str, scope: ScopeId, floor_ms: i64) -> Episode {
    let now = Utc::now();
    let id_ms = next_id_ms(now.timestamp_millis().max(floor_ms));
    let label = first_token(raw_text).to_string();
    Episode {
        id: id_ms.to_string(),
        created_at: now.into(),
        project_scope: scope,
        summary: label.clone(),
        body: raw_text.to_string(),
        keywords: label,
        extra: Default::default(),
    }
}

fn first_token(raw_text: &str) -> &str {
    raw_text.split_whitespace().next().unwrap_or("")
}

/// Millisecond id that is never reused within the process, even when the clock
/// stalls or two captures land in the same millisecond.
fn next_id_ms(now_ms: i64) -> i64 {
    let mut last = LAST_ID_MS.load(Ordering::SeqCst);
    loop {
        let next = now_ms.max(last + 1);
        match LAST_ID_MS.compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scope() -> ScopeId {
        ScopeId::new("abc123")
    }

    #[test]
    fn test_first_token() {
        assert_eq!(first_token("git rebase -i HEAD~3"), "git");
        assert_eq!(first_token("  \tcargo  build"), "cargo");
        assert_eq!(first_token("   "), "");
        assert_eq!(first_token(""), "");
    }

    #[test]
    fn test_create_episode_fields() {
        let ep = create_episode("npm run build", scope());
        assert_eq!(ep.summary, "npm");
        assert_eq!(ep.keywords, "npm");
        assert_eq!(ep.body, "npm run build");
        assert_eq!(ep.project_scope, scope());
        let id_ms: i64 = ep.id.parse().unwrap();
        assert!(id_ms >= ep.created_at.timestamp_millis());
    }

    #[test]
    fn test_create_episode_blank_text_has_empty_label() {
        let ep = create_episode(" \n ", scope());
        assert_eq!(ep.summary, "");
        assert_eq!(ep.body, " \n ");
    }

    #[test]
    fn test_ids_strictly_increase() {
        let ids: Vec<i64> = (0..50)
            .map(|_| create_episode("x", scope()).id.parse().unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_next_id_bumps_stalled_clock() {
        let a = next_id_ms(1);
        let b = next_id_ms(1);
        assert!(b > a);
    }

    #[test]
    fn test_ensure_initialized_creates_dir_and_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("memory.json");
        let store = EpisodeStore::new(&path);

        store.ensure_initialized().unwrap();

        assert!(path.exists());
        let loaded = store.load_all().unwrap();
        assert!(loaded.episodes.is_empty());
        assert!(loaded.events.is_empty());
    }

    #[test]
    fn test_append_then_load() {
        let tmp = TempDir::new().unwrap();
        let store = EpisodeStore::new(tmp.path().join("memory.json"));
        let ep = create_episode("git status", scope());

        store.append(ep.clone()).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.episodes, vec![ep]);
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let tmp = TempDir::new().unwrap();
        let store = EpisodeStore::new(tmp.path().join("memory.json"));
        let ep = create_episode("make", scope());

        store.append(ep.clone()).unwrap();
        let err = store.append(ep).unwrap_err();

        assert!(matches!(err, MemoryError::DuplicateId { .. }));
        assert_eq!(store.load_all().unwrap().episodes.len(), 1);
    }

    #[test]
    fn test_record_id_above_stored_ids() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("memory.json");
        // An id far ahead of the wall clock, as left by a clock that later stepped back.
        std::fs::write(
            &path,
            r#"{"events": [], "episodes": [{"id": "90000000000000", "timestamp": "2024-01-01T00:00:00.000Z", "project_hash": "abc123", "fix": "ls"}]}"#,
        )
        .unwrap();
        let store = EpisodeStore::new(&path);

        let ep = store.record("pwd", scope()).unwrap();

        let id_ms: i64 = ep.id.parse().unwrap();
        assert!(id_ms > 90_000_000_000_000);
        assert_eq!(store.load_all().unwrap().episodes.len(), 2);
    }

    #[test]
    fn test_corrupt_file_is_reported_not_replaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("memory.json");
        std::fs::write(&path, "not json").unwrap();
        let store = EpisodeStore::new(&path);

        let err = store.load_all().unwrap_err();
        assert!(matches!(err, MemoryError::CorruptStore { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }
}
