use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListRecentParams {
    #[schemars(
        description = "Absolute path of the current project root. Omit when no project is open."
    )]
    pub project: Option<String>,

    #[schemars(description = "Maximum number of results to return. Defaults to 10.")]
    pub limit: Option<usize>,
}
