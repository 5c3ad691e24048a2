// Core (projects) tools
pub mod list_projects;

pub use list_projects::{LIST_PROJECTS_TOOL, ListProjectsArgs, list_projects};

use crate::azure::connection::ConnectionProvider;
use crate::mcp::tools::{ToolDescriptor, ToolDomain, ToolError, invoke};
use async_trait::async_trait;
use rmcp::model::JsonObject;
use serde_json::Value;

/// Collection-level tools backed by the core API.
pub struct CoreTools;

#[async_trait]
impl ToolDomain for CoreTools {
    fn name(&self) -> &'static str {
        "core"
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![ToolDescriptor::new::<ListProjectsArgs>(LIST_PROJECTS_TOOL)]
    }

    async fn handle(
        &self,
        name: &str,
        args: JsonObject,
        provider: &ConnectionProvider,
    ) -> Option<Result<Value, ToolError>> {
        let result = match name {
            n if n == LIST_PROJECTS_TOOL.name => {
                invoke(LIST_PROJECTS_TOOL, args, provider, list_projects).await
            }
            _ => return None,
        };
        Some(result)
    }
}
