use crate::azure::connection::Connection;
use crate::mcp::tools::ToolError;
use crate::mcp::tools::support::{FieldPatch, deserialize_non_empty_string};
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkItemArgs {
    /// Project name or ID
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub project: String,
    /// Work item type (e.g., Bug, Task, User Story)
    #[serde(rename = "type", deserialize_with = "deserialize_non_empty_string")]
    pub work_item_type: String,
    /// Work item title
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub title: String,
    /// Work item description
    #[serde(default)]
    pub description: Option<String>,
    /// Assigned to (email or display name)
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Area path
    #[serde(default)]
    pub area_path: Option<String>,
    /// Iteration path
    #[serde(default)]
    pub iteration_path: Option<String>,
    /// Additional fields as key-value pairs
    #[serde(default)]
    pub fields: Option<Map<String, Value>>,
}

impl CreateWorkItemArgs {
    pub fn into_document(self) -> (String, String, FieldPatch) {
        let patch = FieldPatch::new()
            .field("System.Title", self.title)
            .optional_field("System.Description", self.description)
            .optional_field("System.AssignedTo", self.assigned_to)
            .optional_field("System.AreaPath", self.area_path)
            .optional_field("System.IterationPath", self.iteration_path)
            .fields(self.fields.unwrap_or_default());
        (self.project, self.work_item_type, patch)
    }
}

#[mcp_tool(
    name = "mcp_ado_work_items_create",
    description = "Create a new work item"
)]
pub async fn create_work_item(
    connection: Connection,
    args: CreateWorkItemArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_work_items_create(project={}, type={}, title={:?})",
        args.project,
        args.work_item_type,
        args.title
    );

    let (project, work_item_type, patch) = args.into_document();
    let document = patch.into_operations();

    let work_item = connection
        .create_work_item(&project, &work_item_type, &document)
        .await?;
    Ok(work_item)
}
