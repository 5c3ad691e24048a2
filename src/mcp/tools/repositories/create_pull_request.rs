use crate::azure::connection::Connection;
use crate::azure::models::{IdentityRef, NewPullRequest};
use crate::mcp::tools::ToolError;
use crate::mcp::tools::support::{deserialize_non_empty_string, non_empty};
use mcp_tools_codegen::mcp_tool;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePullRequestArgs {
    /// Repository ID or name
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub repository_id: String,
    /// Project name or ID
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub project: String,
    /// Source branch name
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub source_branch: String,
    /// Target branch name
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub target_branch: String,
    /// PR title
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub title: String,
    /// PR description
    #[serde(default)]
    pub description: Option<String>,
    /// Array of reviewer IDs
    #[serde(default)]
    pub reviewers: Option<Vec<String>>,
}

/// `main` becomes `refs/heads/main`; names already under `refs/` are kept.
pub fn branch_ref(branch: &str) -> String {
    if branch.starts_with("refs/") {
        branch.to_string()
    } else {
        format!("refs/heads/{}", branch)
    }
}

impl From<CreatePullRequestArgs> for NewPullRequest {
    fn from(args: CreatePullRequestArgs) -> Self {
        NewPullRequest {
            source_ref_name: branch_ref(&args.source_branch),
            target_ref_name: branch_ref(&args.target_branch),
            title: args.title,
            description: non_empty(args.description),
            reviewers: args
                .reviewers
                .unwrap_or_default()
                .into_iter()
                .filter(|id| !id.trim().is_empty())
                .map(|id| IdentityRef { id })
                .collect(),
        }
    }
}

#[mcp_tool(
    name = "mcp_ado_repos_create_pull_request",
    description = "Create a new pull request"
)]
pub async fn create_pull_request(
    connection: Connection,
    args: CreatePullRequestArgs,
) -> Result<Value, ToolError> {
    log::info!(
        "Tool invoked: mcp_ado_repos_create_pull_request(repository_id={}, source={}, target={})",
        args.repository_id,
        args.source_branch,
        args.target_branch
    );

    let project = args.project.clone();
    let repository_id = args.repository_id.clone();
    let pull_request = NewPullRequest::from(args);

    let created = connection
        .create_pull_request(&project, &repository_id, &pull_request)
        .await?;
    Ok(created)
}
