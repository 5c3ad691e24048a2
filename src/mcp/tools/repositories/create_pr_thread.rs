use crate::azure::connection::Connection;
use crate::azure::models::{CommentThreadStatus, CommentType, NewComment, NewCommentThread};
use crate::mcp::tools::ToolError;
use crate::mcp::tools::support::deserialize_non_empty_string;
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrThreadArgs {
    /// Pull request ID
    pub pull_request_id: u32,
    /// Repository ID or name
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub repository_id: String,
    /// Project name or ID
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub project: String,
    /// Comment content
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub content: String,
    /// Thread status (default: active)
    #[serde(default)]
    pub status: Option<CommentThreadStatus>,
}

#[mcp_tool(
    name = "mcp_ado_repos_create_pr_thread",
    description = "Create a review thread on a pull request"
)]
pub async fn create_pr_thread(
    connection: Connection,
    args: CreatePrThreadArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_repos_create_pr_thread(pull_request_id={}, status={:?}, content_length={})",
        args.pull_request_id,
        args.status,
        args.content.len()
    );

    let thread = NewCommentThread {
        comments: vec![NewComment {
            content: args.content,
            comment_type: CommentType::Text,
        }],
        status: args.status.unwrap_or_default(),
    };

    let created = connection
        .create_thread(
            &args.project,
            &args.repository_id,
            args.pull_request_id,
            &thread,
        )
        .await?;
    Ok(created)
}
