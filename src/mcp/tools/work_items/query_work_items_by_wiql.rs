use crate::azure::connection::Connection;
use crate::mcp::tools::ToolError;
use crate::mcp::tools::support::deserialize_non_empty_string;
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize, JsonSchema)]
pub struct QueryWorkItemsByWiqlArgs {
    /// Project name or ID
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub project: String,
    /// WIQL query string (e.g., "SELECT [System.Id] FROM WorkItems WHERE [System.State] = 'Active'")
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub query: String,
    /// Maximum number of results
    #[serde(default)]
    pub top: Option<u32>,
}

#[mcp_tool(
    name = "mcp_ado_work_items_query_by_wiql",
    description = "Query work items using WIQL (Work Item Query Language)"
)]
pub async fn query_work_items_by_wiql(
    connection: Connection,
    args: QueryWorkItemsByWiqlArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_work_items_query_by_wiql(project={}, query={}, top={:?})",
        args.project,
        args.query,
        args.top
    );

    let result = connection
        .query_by_wiql(&args.project, &args.query, args.top)
        .await?;

    let ids = result.ids();
    if ids.is_empty() {
        return Ok(serde_json::to_value(&result)?);
    }

    let work_items = connection.get_work_items(&ids, None).await?;

    Ok(json!({
        "query": result,
        "workItems": work_items,
    }))
}
