use crate::azure::connection::Connection;
use crate::azure::models::WorkItemExpand;
use crate::mcp::tools::ToolError;
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
pub struct BatchGetWorkItemsArgs {
    /// Array of work item IDs
    pub ids: Vec<u32>,
    /// Expansion level
    #[serde(default)]
    pub expand: Option<WorkItemExpand>,
}

#[mcp_tool(
    name = "mcp_ado_work_items_batch_get",
    description = "Get multiple work items by IDs"
)]
pub async fn batch_get_work_items(
    connection: Connection,
    args: BatchGetWorkItemsArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_work_items_batch_get(ids={:?}, expand={:?})",
        args.ids,
        args.expand
    );
    if args.ids.is_empty() {
        return Ok(Value::Array(vec![]));
    }
    let work_items = connection.get_work_items(&args.ids, args.expand).await?;
    Ok(Value::Array(work_items))
}
