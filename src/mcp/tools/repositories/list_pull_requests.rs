use crate::azure::connection::Connection;
use crate::azure::models::{PullRequestSearchCriteria, PullRequestStatusFilter};
use crate::mcp::tools::ToolError;
use crate::mcp::tools::support::{deserialize_non_empty_string, non_empty};
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPullRequestsArgs {
    /// Repository ID or name
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub repository_id: String,
    /// Project name or ID
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub project: String,
    /// PR status filter
    #[serde(default)]
    pub status: Option<PullRequestStatusFilter>,
    /// Creator user ID
    #[serde(default)]
    pub creator_id: Option<String>,
    /// Reviewer user ID
    #[serde(default)]
    pub reviewer_id: Option<String>,
    /// Maximum number of PRs
    #[serde(default)]
    pub top: Option<u32>,
}

#[mcp_tool(
    name = "mcp_ado_repos_list_pull_requests",
    description = "List pull requests in a repository"
)]
pub async fn list_pull_requests(
    connection: Connection,
    args: ListPullRequestsArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_repos_list_pull_requests(repository_id={}, status={:?}, top={:?})",
        args.repository_id,
        args.status,
        args.top
    );

    let criteria = PullRequestSearchCriteria {
        status: args.status,
        creator_id: non_empty(args.creator_id),
        reviewer_id: non_empty(args.reviewer_id),
    };

    let pull_requests = connection
        .list_pull_requests(&args.project, &args.repository_id, &criteria, args.top)
        .await?;
    Ok(pull_requests)
}
