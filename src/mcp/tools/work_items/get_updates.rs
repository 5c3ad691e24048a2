use crate::azure::connection::Connection;
use crate::mcp::tools::ToolError;
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
pub struct GetUpdatesArgs {
    /// Work item ID
    pub id: u32,
    /// Maximum number of updates
    #[serde(default)]
    pub top: Option<u32>,
}

#[mcp_tool(
    name = "mcp_ado_work_items_get_updates",
    description = "Get revision history for a work item"
)]
pub async fn get_updates(connection: Connection, args: GetUpdatesArgs) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_work_items_get_updates(id={}, top={:?})",
        args.id,
        args.top
    );
    let updates = connection.get_updates(args.id, args.top).await?;
    Ok(Value::Array(updates))
}
