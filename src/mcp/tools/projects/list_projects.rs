use crate::azure::connection::Connection;
use crate::azure::models::ProjectStateFilter;
use crate::mcp::tools::ToolError;
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsArgs {
    /// Filter projects by state (default: all)
    #[serde(default)]
    pub state_filter: Option<ProjectStateFilter>,
    /// Maximum number of projects to return
    #[serde(default)]
    pub top: Option<u32>,
    /// Number of projects to skip
    #[serde(default)]
    pub skip: Option<u32>,
}

#[mcp_tool(
    name = "mcp_ado_core_list_projects",
    description = "List all projects in the Azure DevOps collection"
)]
pub async fn list_projects(
    connection: Connection,
    args: ListProjectsArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_core_list_projects(state_filter={:?}, top={:?}, skip={:?})",
        args.state_filter,
        args.top,
        args.skip
    );

    let projects = connection
        .get_projects(args.state_filter, args.top, args.skip)
        .await?;

    Ok(json!({
        "count": projects.len(),
        "projects": projects,
    }))
}
