use crate::azure::connection::Connection;
use crate::azure::models::WorkItemExpand;
use crate::mcp::tools::ToolError;
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
pub struct GetWorkItemArgs {
    /// Work item ID
    pub id: u32,
    /// Expansion level for work item
    #[serde(default)]
    pub expand: Option<WorkItemExpand>,
}

#[mcp_tool(name = "mcp_ado_work_items_get", description = "Get work item by ID")]
pub async fn get_work_item(
    connection: Connection,
    args: GetWorkItemArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_work_items_get(id={}, expand={:?})",
        args.id,
        args.expand
    );
    let work_item = connection.get_work_item(args.id, args.expand).await?;
    Ok(work_item)
}
