use crate::azure::connection::Connection;
use crate::mcp::tools::ToolError;
use crate::mcp::tools::repositories::args::PullRequestArgs;
use mcp_tools_codegen::mcp_tool;
use serde_json::Value;

#[mcp_tool(
    name = "mcp_ado_repos_get_pr_threads",
    description = "Get review threads for a pull request"
)]
pub async fn get_pr_threads(
    connection: Connection,
    args: PullRequestArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_repos_get_pr_threads(pull_request_id={}, repository_id={})",
        args.pull_request_id,
        args.repository_id
    );
    let threads = connection
        .get_threads(&args.project, &args.repository_id, args.pull_request_id)
        .await?;
    Ok(threads)
}
