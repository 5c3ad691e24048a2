use crate::azure::connection::Connection;
use crate::mcp::tools::ToolError;
use crate::mcp::tools::support::deserialize_non_empty_string;
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentArgs {
    /// Project name or ID
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub project: String,
    /// Work item ID
    pub work_item_id: u32,
    /// Comment text
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub text: String,
}

#[mcp_tool(
    name = "mcp_ado_work_items_add_comment",
    description = "Add a comment to a work item"
)]
pub async fn add_comment(connection: Connection, args: AddCommentArgs) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_work_items_add_comment(work_item_id={}, text_length={})",
        args.work_item_id,
        args.text.len()
    );

    let comment = connection
        .add_comment(&args.project, args.work_item_id, &args.text)
        .await?;
    Ok(comment)
}
