use crate::azure::connection::Connection;
use crate::mcp::tools::ToolError;
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize, JsonSchema)]
pub struct DeleteWorkItemArgs {
    /// Work item ID
    pub id: u32,
    /// Permanently destroy the work item (default: false)
    #[serde(default)]
    pub destroy: bool,
}

#[mcp_tool(name = "mcp_ado_work_items_delete", description = "Delete a work item")]
pub async fn delete_work_item(
    connection: Connection,
    args: DeleteWorkItemArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_work_items_delete(id={}, destroy={})",
        args.id,
        args.destroy
    );

    let result = connection.delete_work_item(args.id, args.destroy).await?;

    Ok(json!({
        "deleted": true,
        "id": args.id,
        "result": result,
    }))
}
