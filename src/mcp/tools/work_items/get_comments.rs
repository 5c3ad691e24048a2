use crate::azure::connection::Connection;
use crate::mcp::tools::ToolError;
use crate::mcp::tools::support::deserialize_non_empty_string;
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCommentsArgs {
    /// Project name or ID
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub project: String,
    /// Work item ID
    pub work_item_id: u32,
    /// Maximum number of comments
    #[serde(default)]
    pub top: Option<u32>,
}

#[mcp_tool(
    name = "mcp_ado_work_items_get_comments",
    description = "Get comments for a work item"
)]
pub async fn get_comments(
    connection: Connection,
    args: GetCommentsArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_work_items_get_comments(work_item_id={}, top={:?})",
        args.work_item_id,
        args.top
    );

    let comments = connection
        .get_comments(&args.project, args.work_item_id, args.top)
        .await?;
    Ok(comments)
}
