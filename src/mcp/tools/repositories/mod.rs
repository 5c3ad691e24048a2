// Repositories (pull requests) module
pub mod args;
pub mod create_pr_thread;
pub mod create_pull_request;
pub mod get_pr_threads;
pub mod get_pull_request;
pub mod list_pull_requests;
pub mod update_pull_request;

pub use args::PullRequestArgs;
pub use create_pr_thread::{CREATE_PR_THREAD_TOOL, CreatePrThreadArgs, create_pr_thread};
pub use create_pull_request::{
    CREATE_PULL_REQUEST_TOOL, CreatePullRequestArgs, create_pull_request,
};
pub use get_pr_threads::{GET_PR_THREADS_TOOL, get_pr_threads};
pub use get_pull_request::{GET_PULL_REQUEST_TOOL, get_pull_request};
pub use list_pull_requests::{LIST_PULL_REQUESTS_TOOL, ListPullRequestsArgs, list_pull_requests};
pub use update_pull_request::{
    UPDATE_PULL_REQUEST_TOOL, UpdatePullRequestArgs, update_pull_request,
};

use crate::azure::connection::ConnectionProvider;
use crate::mcp::tools::{ToolDescriptor, ToolDomain, ToolError, invoke};
use async_trait::async_trait;
use rmcp::model::JsonObject;
use serde_json::Value;

/// Git pull request tools.
pub struct RepositoryTools;

#[async_trait]
impl ToolDomain for RepositoryTools {
    fn name(&self) -> &'static str {
        "repositories"
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new::<ListPullRequestsArgs>(LIST_PULL_REQUESTS_TOOL),
            ToolDescriptor::new::<PullRequestArgs>(GET_PULL_REQUEST_TOOL),
            ToolDescriptor::new::<CreatePullRequestArgs>(CREATE_PULL_REQUEST_TOOL),
            ToolDescriptor::new::<UpdatePullRequestArgs>(UPDATE_PULL_REQUEST_TOOL),
            ToolDescriptor::new::<PullRequestArgs>(GET_PR_THREADS_TOOL),
            ToolDescriptor::new::<CreatePrThreadArgs>(CREATE_PR_THREAD_TOOL),
        ]
    }

    async fn handle(
        &self,
        name: &str,
        args: JsonObject,
        provider: &ConnectionProvider,
    ) -> Option<Result<Value, ToolError>> {
        let result = match name {
            n if n == LIST_PULL_REQUESTS_TOOL.name => {
                invoke(LIST_PULL_REQUESTS_TOOL, args, provider, list_pull_requests).await
            }
            n if n == GET_PULL_REQUEST_TOOL.name => {
                invoke(GET_PULL_REQUEST_TOOL, args, provider, get_pull_request).await
            }
            n if n == CREATE_PULL_REQUEST_TOOL.name => {
                invoke(CREATE_PULL_REQUEST_TOOL, args, provider, create_pull_request).await
            }
            n if n == UPDATE_PULL_REQUEST_TOOL.name => {
                invoke(UPDATE_PULL_REQUEST_TOOL, args, provider, update_pull_request).await
            }
            n if n == GET_PR_THREADS_TOOL.name => {
                invoke(GET_PR_THREADS_TOOL, args, provider, get_pr_threads).await
            }
            n if n == CREATE_PR_THREAD_TOOL.name => {
                invoke(CREATE_PR_THREAD_TOOL, args, provider, create_pr_thread).await
            }
            _ => return None,
        };
        Some(result)
    }
}
