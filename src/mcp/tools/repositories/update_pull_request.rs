use crate::azure::connection::Connection;
use crate::azure::models::{PullRequestStatus, PullRequestUpdate};
use crate::mcp::tools::ToolError;
use crate::mcp::tools::support::{deserialize_non_empty_string, non_empty};
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePullRequestArgs {
    /// Pull request ID
    pub pull_request_id: u32,
    /// Repository ID or name
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub repository_id: String,
    /// Project name or ID
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub project: String,
    /// PR status
    #[serde(default)]
    pub status: Option<PullRequestStatus>,
    /// PR title
    #[serde(default)]
    pub title: Option<String>,
    /// PR description
    #[serde(default)]
    pub description: Option<String>,
}

#[mcp_tool(
    name = "mcp_ado_repos_update_pull_request",
    description = "Update a pull request"
)]
pub async fn update_pull_request(
    connection: Connection,
    args: UpdatePullRequestArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_repos_update_pull_request(pull_request_id={}, status={:?}, title={:?})",
        args.pull_request_id,
        args.status,
        args.title
    );

    // Only what was supplied is sent; the server leaves the rest untouched.
    let update = PullRequestUpdate {
        status: args.status,
        title: non_empty(args.title),
        description: non_empty(args.description),
    };
    if update.is_empty() {
        return Err(ToolError::invalid(
            UPDATE_PULL_REQUEST_TOOL,
            "at least one of `status`, `title` or `description` is required",
        ));
    }

    let pull_request = connection
        .update_pull_request(
            &args.project,
            &args.repository_id,
            args.pull_request_id,
            &update,
        )
        .await?;
    Ok(pull_request)
}
