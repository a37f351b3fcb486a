//! MCP `capture_episode` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `capture_episode` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CaptureEpisodeParams {
    /// The snippet to remember, stored verbatim.
    #[schemars(description = "The command or fix to remember, stored verbatim")]
    pub text: String,

    /// Absolute path of the active project root. Omit when no project is open.
    #[schemars(
        description = "Absolute path of the current project root. Omit when no project is open."
    )]
    pub project: Option<String>,
}
