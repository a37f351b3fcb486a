pub mod error;
pub mod recall;
pub mod scope;
pub mod stats;
pub mod store;
pub mod types;

use std::path::Path;

use error::{MemoryError, Result};
use store::EpisodeStore;
use types::Episode;

/// Capture `raw_text` as a new episode in the scope of `root`.
///
/// Blank text is rejected with [`MemoryError::EmptyInput`] before the store is
/// touched, so a cancelled capture never writes anything.
pub fn capture(store: &EpisodeStore, raw_text: &str, root: Option<&Path>) -> Result<Episode> {
    if raw_text.trim().is_empty() {
        tracing::warn!("capture rejected: no text provided");
        return Err(MemoryError::EmptyInput);
    }

    let scope = scope::current(root);
    let episode = store.record(raw_text, scope)?;

    tracing::info!(
        id = %episode.id,
        scope = %episode.project_scope,
        summary = %episode.summary,
        "episode captured"
    );
    Ok(episode)
}

/// Episodes in the scope of `root` matching `query`, most recent first.
pub fn search(
    store: &EpisodeStore,
    query: Option<&str>,
    root: Option<&Path>,
    limit: usize,
) -> Result<Vec<Episode>> {
    let data = store.load_all()?;
    let scope = scope::current(root);
    let results: Vec<Episode> = recall::search(&data, &scope, query, limit)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(
        scope = %scope,
        query = query.unwrap_or(""),
        results = results.len(),
        "search complete"
    );
    Ok(results)
}

/// The most recent episodes in the scope of `root`.
pub fn list_recent(store: &EpisodeStore, root: Option<&Path>, limit: usize) -> Result<Vec<Episode>> {
    search(store, None, root, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, EpisodeStore) {
        let tmp = TempDir::new().unwrap();
        let store = EpisodeStore::new(tmp.path().join("memory.json"));
        (tmp, store)
    }

    #[test]
    fn test_capture_rejects_blank_text_without_writing() {
        let (_tmp, store) = temp_store();
        let err = capture(&store, "  \n\t", None).unwrap_err();
        assert!(matches!(err, MemoryError::EmptyInput));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_capture_then_search_same_project() {
        let (_tmp, store) = temp_store();
        let root = Path::new("/work/app");
        let ep = capture(&store, "cargo test --all", Some(root)).unwrap();

        let found = search(&store, Some("CARGO"), Some(root), 10).unwrap();
        assert_eq!(found, vec![ep]);
        assert!(search(&store, Some("cargo"), Some(Path::new("/work/other")), 10)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_no_project_episodes_stay_together() {
        let (_tmp, store) = temp_store();
        capture(&store, "echo loose", None).unwrap();
        capture(&store, "echo scoped", Some(Path::new("/p"))).unwrap();

        let loose = list_recent(&store, None, 10).unwrap();
        assert_eq!(loose.len(), 1);
        assert_eq!(loose[0].body, "echo loose");
        assert_eq!(loose[0].project_scope.as_str(), scope::NO_PROJECT);
    }

    #[test]
    fn test_list_recent_on_fresh_store_is_empty() {
        let (_tmp, store) = temp_store();
        assert!(list_recent(&store, Some(Path::new("/p")), 10).unwrap().is_empty());
    }
}
