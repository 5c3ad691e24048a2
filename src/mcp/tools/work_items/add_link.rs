use crate::azure::connection::Connection;
use crate::azure::models::JsonPatchOperation;
use crate::mcp::tools::ToolError;
use crate::mcp::tools::support::{deserialize_non_empty_string, link_type_reference, non_empty};
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddLinkArgs {
    /// Source work item ID
    pub id: u32,
    /// Target work item ID
    pub target_id: u32,
    /// Link type (e.g., Related, Parent, Child, or a reference name such as System.LinkTypes.Related)
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub link_type: String,
    /// Link comment
    #[serde(default)]
    pub comment: Option<String>,
}

/// Single `add` at `/relations/-`: appends the link without touching the
/// relations already on the work item.
pub fn relation_operation(target_url: String, link_type: &str, comment: Option<String>) -> JsonPatchOperation {
    let mut relation = json!({
        "rel": link_type_reference(link_type),
        "url": target_url,
    });
    if let Some(comment) = non_empty(comment) {
        relation["attributes"] = json!({ "comment": comment });
    }
    JsonPatchOperation::add("/relations/-", relation)
}

#[mcp_tool(
    name = "mcp_ado_work_items_add_link",
    description = "Add a link between work items"
)]
pub async fn add_link(connection: Connection, args: AddLinkArgs) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_work_items_add_link(id={}, target_id={}, link_type={})",
        args.id,
        args.target_id,
        args.link_type
    );

    let target_url = connection.work_item_url(args.target_id);
    let document = vec![relation_operation(target_url, &args.link_type, args.comment)];

    let work_item = connection.update_work_item(args.id, &document).await?;
    Ok(work_item)
}
