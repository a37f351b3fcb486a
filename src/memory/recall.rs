//! Read path: scope filter, substring match, recency bound.

use crate::memory::types::{Episode, MemoryStore, ScopeId};

/// Number of results returned when the caller does not ask for a specific bound.
pub const DEFAULT_LIMIT: usize = 10;

/// Episodes in `scope` matching `query`, at most `limit` of them, most recent first.
///
/// An absent or empty query matches everything in scope. Otherwise the query is
/// a case-insensitive substring test against the summary or the body; there is
/// no tokenization or scoring. Since `episodes` is insertion-ordered, the last
/// `limit` matches are the most recent ones.
pub fn search<'a>(
    store: &'a MemoryStore,
    scope: &ScopeId,
    query: Option<&str>,
    limit: usize,
) -> Vec<&'a Episode> {
    let needle = query.filter(|q| !q.is_empty()).map(str::to_lowercase);

    let matches: Vec<&Episode> = store
        .episodes
        .iter()
        .filter(|ep| &ep.project_scope == scope)
        .filter(|ep| match &needle {
            Some(needle) => matches_text(ep, needle),
            None => true,
        })
        .collect();

    matches.into_iter().rev().take(limit).collect()
}

fn matches_text(episode: &Episode, needle: &str) -> bool {
    episode.summary.to_lowercase().contains(needle) || episode.body.to_lowercase().contains(needle)
}
