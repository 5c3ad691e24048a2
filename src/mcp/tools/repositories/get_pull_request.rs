use crate::azure::connection::Connection;
use crate::mcp::tools::ToolError;
use crate::mcp::tools::repositories::args::PullRequestArgs;
use mcp_tools_codegen::mcp_tool;
use serde_json::Value;

#[mcp_tool(
    name = "mcp_ado_repos_get_pull_request",
    description = "Get pull request details"
)]
pub async fn get_pull_request(
    connection: Connection,
    args: PullRequestArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_repos_get_pull_request(pull_request_id={}, repository_id={})",
        args.pull_request_id,
        args.repository_id
    );
    let pull_request = connection
        .get_pull_request(&args.project, &args.repository_id, args.pull_request_id)
        .await?;
    Ok(pull_request)
}
