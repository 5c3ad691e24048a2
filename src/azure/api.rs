//! The upstream surface the MCP tools are built on.
//!
//! Tools only ever talk to Azure DevOps through [`AzureDevOpsApi`], which keeps
//! them independent of HTTP details and lets tests swap in a mock.

use crate::azure::client::AzureError;
use crate::azure::models::{
    JsonPatchOperation, NewCommentThread, NewPullRequest, ProjectStateFilter,
    PullRequestSearchCriteria, PullRequestUpdate, TeamProjectReference, WiqlResponse,
    WorkItemExpand,
};
use async_trait::async_trait;
use serde_json::Value;

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait AzureDevOpsApi: Send + Sync {
    /// Canonical URL of a work item, as used in relation links.
    fn work_item_url(&self, id: u32) -> String;

    async fn get_projects(
        &self,
        state_filter: Option<ProjectStateFilter>,
        top: Option<u32>,
        skip: Option<u32>,
    ) -> Result<Vec<TeamProjectReference>, AzureError>;

    async fn list_pull_requests(
        &self,
        project: &str,
        repository_id: &str,
        criteria: &PullRequestSearchCriteria,
        top: Option<u32>,
    ) -> Result<Value, AzureError>;

    async fn get_pull_request(
        &self,
        project: &str,
        repository_id: &str,
        pull_request_id: u32,
    ) -> Result<Value, AzureError>;

    async fn create_pull_request(
        &self,
        project: &str,
        repository_id: &str,
        pull_request: &NewPullRequest,
    ) -> Result<Value, AzureError>;

    async fn update_pull_request(
        &self,
        project: &str,
        repository_id: &str,
        pull_request_id: u32,
        update: &PullRequestUpdate,
    ) -> Result<Value, AzureError>;

    async fn get_threads(
        &self,
        project: &str,
        repository_id: &str,
        pull_request_id: u32,
    ) -> Result<Value, AzureError>;

    async fn create_thread(
        &self,
        project: &str,
        repository_id: &str,
        pull_request_id: u32,
        thread: &NewCommentThread,
    ) -> Result<Value, AzureError>;

    async fn get_work_item(&self, id: u32, expand: Option<WorkItemExpand>)
    -> Result<Value, AzureError>;

    async fn get_work_items(
        &self,
        ids: &[u32],
        expand: Option<WorkItemExpand>,
    ) -> Result<Vec<Value>, AzureError>;

    async fn create_work_item(
        &self,
        project: &str,
        work_item_type: &str,
        document: &[JsonPatchOperation],
    ) -> Result<Value, AzureError>;

    async fn update_work_item(
        &self,
        id: u32,
        document: &[JsonPatchOperation],
    ) -> Result<Value, AzureError>;

    async fn delete_work_item(&self, id: u32, destroy: bool) -> Result<Value, AzureError>;

    async fn query_by_wiql(
        &self,
        project: &str,
        query: &str,
        top: Option<u32>,
    ) -> Result<WiqlResponse, AzureError>;

    async fn add_comment(
        &self,
        project: &str,
        work_item_id: u32,
        text: &str,
    ) -> Result<Value, AzureError>;

    async fn get_comments(
        &self,
        project: &str,
        work_item_id: u32,
        top: Option<u32>,
    ) -> Result<Value, AzureError>;

    async fn get_updates(&self, id: u32, top: Option<u32>) -> Result<Vec<Value>, AzureError>;
}
