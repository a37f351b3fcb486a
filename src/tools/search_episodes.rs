//! MCP `search_episodes` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `search_episodes` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchEpisodesParams {
    /// Case-insensitive substring matched against summary and body.
    #[schemars(description = "Case-insensitive substring to look for in past commands")]
    pub query: String,

    /// Absolute path of the active project root. Omit when no project is open.
    #[schemars(
        description = "Absolute path of the current project root. Omit when no project is open."
    )]
    pub project: Option<String>,

    /// Maximum number of results. Defaults to the configured recall limit.
    #[schemars(description = "Maximum number of results to return. Defaults to 10.")]
    pub limit: Option<usize>,
}
