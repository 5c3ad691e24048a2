use crate::mcp::tools::support::deserialize_non_empty_string;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

/// Identifies a pull request; shared by every tool that targets one.
#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestArgs {
    /// Pull request ID
    pub pull_request_id: u32,
    /// Repository ID or name
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub repository_id: String,
    /// Project name or ID
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub project: String,
}
