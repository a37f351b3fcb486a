pub mod capture_episode;
pub mod list_recent;
pub mod search_episodes;

use capture_episode::CaptureEpisodeParams;
use list_recent::ListRecentParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use search_episodes::SearchEpisodesParams;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::GhostlyConfig;
use crate::memory::store::EpisodeStore;
use crate::memory::types::Episode;

/// The Ghostly MCP tool handler. Holds the shared store handle and config, and
/// exposes capture/search/list tools via the `#[tool_router]` macro.
///
/// The store sits behind a mutex so each read-modify-write cycle completes
/// before the next request touches the file.
#[derive(Clone)]
pub struct GhostlyTools {
    tool_router: ToolRouter<Self>,
    store: Arc<Mutex<EpisodeStore>>,
    config: Arc<GhostlyConfig>,
}

#[tool_router]
impl GhostlyTools {
    pub fn new(store: Arc<Mutex<EpisodeStore>>, config: Arc<GhostlyConfig>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store,
            config,
        }
    }

    /// Remember a command or fix for the current project.
    #[tool(description = "Save a command or fix to episodic memory, scoped to the given project root.")]
    async fn capture_episode(
        &self,
        Parameters(params): Parameters<CaptureEpisodeParams>,
    ) -> Result<String, String> {
        if params.text.trim().is_empty() {
            return Err("text must not be empty".into());
        }

        tracing::info!(
            text_len = params.text.len(),
            has_project = params.project.is_some(),
            "capture_episode called"
        );

        let store = Arc::clone(&self.store);
        let root = params.project.map(PathBuf::from);
        let text = params.text;

        let episode = tokio::task::spawn_blocking(move || {
            let store = store
                .lock()
                .map_err(|e| anyhow::anyhow!("store lock poisoned: {e}"))?;
            crate::memory::capture(&store, &text, root.as_deref()).map_err(anyhow::Error::from)
        })
        .await
        .map_err(|e| format!("store task failed: {e}"))?
        .map_err(|e| format!("capture failed: {e}"))?;

        serde_json::to_string(&episode).map_err(|e| format!("serialization failed: {e}"))
    }

    /// Search this project's memories by substring.
    #[tool(description = "Search past commands for the given project by case-insensitive substring. Returns the most recent matches first.")]
    async fn search_episodes(
        &self,
        Parameters(params): Parameters<SearchEpisodesParams>,
    ) -> Result<String, String> {
        tracing::info!(query = %params.query, "search_episodes called");
        let limit = params.limit.unwrap_or(self.config.recall.default_limit);
        let results = self
            .run_search(Some(params.query), params.project, limit)
            .await?;
        render(&results)
    }

    /// List the most recent memories for a project.
    #[tool(description = "List the most recent commands saved for the given project, newest first.")]
    async fn list_recent(
        &self,
        Parameters(params): Parameters<ListRecentParams>,
    ) -> Result<String, String> {
        tracing::info!("list_recent called");
        let limit = params.limit.unwrap_or(self.config.recall.default_limit);
        let results = self.run_search(None, params.project, limit).await?;
        render(&results)
    }
}

impl GhostlyTools {
    async fn run_search(
        &self,
        query: Option<String>,
        project: Option<String>,
        limit: usize,
    ) -> Result<Vec<Episode>, String> {
        let store = Arc::clone(&self.store);
        let root = project.map(PathBuf::from);

        tokio::task::spawn_blocking(move || {
            let store = store
                .lock()
                .map_err(|e| anyhow::anyhow!("store lock poisoned: {e}"))?;
            crate::memory::search(&store, query.as_deref(), root.as_deref(), limit)
                .map_err(anyhow::Error::from)
        })
        .await
        .map_err(|e| format!("store task failed: {e}"))?
        .map_err(|e| format!("search failed: {e}"))
    }
}

fn render(results: &[Episode]) -> Result<String, String> {
    serde_json::to_string(&serde_json::json!({
        "episodes": results,
        "total": results.len(),
    }))
    .map_err(|e| format!("serialization failed: {e}"))
}

#[tool_handler]
impl ServerHandler for GhostlyTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Ghostly is a per-project episodic memory for terminal commands. Use \
                 capture_episode to save a command, search_episodes to find one, and \
                 list_recent to browse the latest."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_counts_results() {
        let json = render(&[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 0);
        assert!(value["episodes"].as_array().unwrap().is_empty());
    }
}
