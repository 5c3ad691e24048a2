use crate::azure::connection::Connection;
use crate::mcp::tools::ToolError;
use crate::mcp::tools::support::FieldPatch;
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Deserialize, JsonSchema)]
pub struct UpdateWorkItemArgs {
    /// Work item ID
    pub id: u32,
    /// Fields to update as key-value pairs
    pub fields: Map<String, Value>,
}

#[mcp_tool(
    name = "mcp_ado_work_items_update",
    description = "Update an existing work item"
)]
pub async fn update_work_item(
    connection: Connection,
    args: UpdateWorkItemArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_work_items_update(id={}, fields={:?})",
        args.id,
        args.fields.keys().collect::<Vec<_>>()
    );

    if args.fields.is_empty() {
        return Err(ToolError::invalid(
            UPDATE_WORK_ITEM_TOOL,
            "`fields` must contain at least one field",
        ));
    }

    let document = FieldPatch::new().fields(args.fields).into_operations();
    let work_item = connection.update_work_item(args.id, &document).await?;
    Ok(work_item)
}
