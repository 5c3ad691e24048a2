use crate::azure::api::AzureDevOpsApi;
use crate::azure::models::{
    JsonPatchOperation, ListResponse, NewCommentThread, NewPullRequest, ProjectStateFilter,
    PullRequestSearchCriteria, PullRequestUpdate, TeamProjectReference, WiqlQuery, WiqlResponse,
    WorkItemExpand,
};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use urlencoding::encode;

pub const DEFAULT_API_VERSION: &str = "7.1";

/// Maximum number of ids the work items endpoint accepts per request.
const WORK_ITEMS_BATCH_SIZE: usize = 200;

#[derive(Error, Debug)]
pub enum AzureError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("Connection unavailable: {0}")]
    Unavailable(String),
}

/// REST client for an Azure DevOps Server collection authenticated with a PAT.
pub struct AzureDevOpsClient {
    client: Client,
    base_url: String,
    authorization: String,
    api_version: String,
}

impl AzureDevOpsClient {
    /// `base_url` is the collection URL, e.g. `https://tfs.company.com/DefaultCollection`.
    pub fn new(base_url: impl Into<String>, pat: &str, api_version: impl Into<String>) -> Self {
        let authorization = format!("Basic {}", STANDARD.encode(format!(":{}", pat)));
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            authorization,
            api_version: api_version.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, project: Option<&str>, path: &str) -> String {
        match project {
            Some(project) => format!("{}/{}/_apis/{}", self.base_url, encode(project), path),
            None => format!("{}/_apis/{}", self.base_url, path),
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("api-version", self.api_version.clone())]
    }

    /// Comment endpoints are only published as a preview API.
    fn preview_query(&self) -> Vec<(&'static str, String)> {
        vec![("api-version", format!("{}-preview.3", self.api_version))]
    }

    pub async fn request_with_content_type<T: DeserializeOwned>(
        &self,
        project: Option<&str>,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&(impl Serialize + ?Sized)>,
        content_type: &str,
    ) -> Result<T, AzureError> {
        let url = self.url(project, path);

        log::debug!("Request: {} {} {:?}", method, url, query);
        if let Some(b) = &body
            && let Ok(json) = serde_json::to_string_pretty(b)
        {
            log::debug!("Request body: {}", json);
        }

        let mut request = self
            .client
            .request(method, &url)
            .query(query)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json");

        if let Some(b) = body {
            request = request
                .header("Content-Type", content_type)
                .body(serde_json::to_vec(b)?);
        }

        let response = request.send().await?;
        let status = response.status();

        log::debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::debug!("Error response: {}", error_text);
            return Err(AzureError::ApiError {
                status: status.as_u16(),
                message: api_error_message(&error_text, status.canonical_reason()),
            });
        }

        let response_text = response.text().await?;
        log::debug!("Response body: {}", response_text);

        // 204 and friends carry no body; surface them as JSON null.
        let data = if response_text.trim().is_empty() {
            serde_json::from_value(Value::Null)?
        } else {
            serde_json::from_str(&response_text)?
        };
        Ok(data)
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        project: Option<&str>,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<T, AzureError> {
        self.request_with_content_type(project, method, path, query, body, "application/json")
            .await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        project: Option<&str>,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AzureError> {
        self.request(project, Method::GET, path, query, None::<&Value>)
            .await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        project: Option<&str>,
        path: &str,
        query: &[(&str, String)],
        body: &(impl Serialize + ?Sized),
    ) -> Result<T, AzureError> {
        self.request(project, Method::POST, path, query, Some(body))
            .await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        project: Option<&str>,
        path: &str,
        query: &[(&str, String)],
        body: &(impl Serialize + ?Sized),
    ) -> Result<T, AzureError> {
        self.request(project, Method::PATCH, path, query, Some(body))
            .await
    }

    pub async fn post_patch<T: DeserializeOwned>(
        &self,
        project: Option<&str>,
        path: &str,
        body: &[JsonPatchOperation],
    ) -> Result<T, AzureError> {
        self.request_with_content_type(
            project,
            Method::POST,
            path,
            &self.query(),
            Some(body),
            "application/json-patch+json",
        )
        .await
    }

    pub async fn patch_patch<T: DeserializeOwned>(
        &self,
        project: Option<&str>,
        path: &str,
        body: &[JsonPatchOperation],
    ) -> Result<T, AzureError> {
        self.request_with_content_type(
            project,
            Method::PATCH,
            path,
            &self.query(),
            Some(body),
            "application/json-patch+json",
        )
        .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        project: Option<&str>,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AzureError> {
        self.request(project, Method::DELETE, path, query, None::<&Value>)
            .await
    }
}

/// Azure DevOps wraps failures as `{"message": ..., "typeKey": ...}`; prefer
/// that message over the raw body.
fn api_error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body)
        && let Some(Value::String(message)) = map.get("message")
    {
        return message.clone();
    }
    if body.trim().is_empty() {
        reason.unwrap_or("empty response").to_string()
    } else {
        body.to_string()
    }
}

fn repository_path(repository_id: &str, rest: &str) -> String {
    format!("git/repositories/{}/{}", encode(repository_id), rest)
}

#[async_trait]
impl AzureDevOpsApi for AzureDevOpsClient {
    fn work_item_url(&self, id: u32) -> String {
        format!("{}/_apis/wit/workItems/{}", self.base_url, id)
    }

    async fn get_projects(
        &self,
        state_filter: Option<ProjectStateFilter>,
        top: Option<u32>,
        skip: Option<u32>,
    ) -> Result<Vec<TeamProjectReference>, AzureError> {
        let mut query = self.query();
        if let Some(state_filter) = state_filter {
            query.push(("stateFilter", state_filter.as_str().to_string()));
        }
        if let Some(top) = top {
            query.push(("$top", top.to_string()));
        }
        if let Some(skip) = skip {
            query.push(("$skip", skip.to_string()));
        }

        let response: ListResponse<TeamProjectReference> =
            self.get(None, "projects", &query).await?;
        Ok(response.value)
    }

    async fn list_pull_requests(
        &self,
        project: &str,
        repository_id: &str,
        criteria: &PullRequestSearchCriteria,
        top: Option<u32>,
    ) -> Result<Value, AzureError> {
        let mut query = self.query();
        if let Some(status) = criteria.status {
            query.push(("searchCriteria.status", status.as_str().to_string()));
        }
        if let Some(creator_id) = &criteria.creator_id {
            query.push(("searchCriteria.creatorId", creator_id.clone()));
        }
        if let Some(reviewer_id) = &criteria.reviewer_id {
            query.push(("searchCriteria.reviewerId", reviewer_id.clone()));
        }
        if let Some(top) = top {
            query.push(("$top", top.to_string()));
        }

        let path = repository_path(repository_id, "pullrequests");
        let response: ListResponse<Value> = self.get(Some(project), &path, &query).await?;
        Ok(Value::Array(response.value))
    }

    async fn get_pull_request(
        &self,
        project: &str,
        repository_id: &str,
        pull_request_id: u32,
    ) -> Result<Value, AzureError> {
        let path = repository_path(repository_id, &format!("pullrequests/{}", pull_request_id));
        self.get(Some(project), &path, &self.query()).await
    }

    async fn create_pull_request(
        &self,
        project: &str,
        repository_id: &str,
        pull_request: &NewPullRequest,
    ) -> Result<Value, AzureError> {
        let path = repository_path(repository_id, "pullrequests");
        self.post(Some(project), &path, &self.query(), pull_request)
            .await
    }

    async fn update_pull_request(
        &self,
        project: &str,
        repository_id: &str,
        pull_request_id: u32,
        update: &PullRequestUpdate,
    ) -> Result<Value, AzureError> {
        let path = repository_path(repository_id, &format!("pullrequests/{}", pull_request_id));
        self.patch(Some(project), &path, &self.query(), update)
            .await
    }

    async fn get_threads(
        &self,
        project: &str,
        repository_id: &str,
        pull_request_id: u32,
    ) -> Result<Value, AzureError> {
        let path = repository_path(
            repository_id,
            &format!("pullRequests/{}/threads", pull_request_id),
        );
        let response: ListResponse<Value> = self.get(Some(project), &path, &self.query()).await?;
        Ok(Value::Array(response.value))
    }

    async fn create_thread(
        &self,
        project: &str,
        repository_id: &str,
        pull_request_id: u32,
        thread: &NewCommentThread,
    ) -> Result<Value, AzureError> {
        let path = repository_path(
            repository_id,
            &format!("pullRequests/{}/threads", pull_request_id),
        );
        self.post(Some(project), &path, &self.query(), thread).await
    }

    async fn get_work_item(
        &self,
        id: u32,
        expand: Option<WorkItemExpand>,
    ) -> Result<Value, AzureError> {
        let mut query = self.query();
        if let Some(expand) = expand {
            query.push(("$expand", expand.as_str().to_string()));
        }
        self.get(None, &format!("wit/workitems/{}", id), &query)
            .await
    }

    async fn get_work_items(
        &self,
        ids: &[u32],
        expand: Option<WorkItemExpand>,
    ) -> Result<Vec<Value>, AzureError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut all_work_items = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(WORK_ITEMS_BATCH_SIZE) {
            let ids_str = chunk
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let mut query = self.query();
            query.push(("ids", ids_str));
            if let Some(expand) = expand {
                query.push(("$expand", expand.as_str().to_string()));
            }
            let response: ListResponse<Value> = self.get(None, "wit/workitems", &query).await?;
            all_work_items.extend(response.value);
        }

        Ok(all_work_items)
    }

    async fn create_work_item(
        &self,
        project: &str,
        work_item_type: &str,
        document: &[JsonPatchOperation],
    ) -> Result<Value, AzureError> {
        let path = format!("wit/workitems/${}", encode(work_item_type));
        self.post_patch(Some(project), &path, document).await
    }

    async fn update_work_item(
        &self,
        id: u32,
        document: &[JsonPatchOperation],
    ) -> Result<Value, AzureError> {
        self.patch_patch(None, &format!("wit/workitems/{}", id), document)
            .await
    }

    async fn delete_work_item(&self, id: u32, destroy: bool) -> Result<Value, AzureError> {
        let mut query = self.query();
        if destroy {
            query.push(("destroy", "true".to_string()));
        }
        self.delete(None, &format!("wit/workitems/{}", id), &query)
            .await
    }

    async fn query_by_wiql(
        &self,
        project: &str,
        query: &str,
        top: Option<u32>,
    ) -> Result<WiqlResponse, AzureError> {
        let mut params = self.query();
        if let Some(top) = top {
            params.push(("$top", top.to_string()));
        }
        let wiql = WiqlQuery {
            query: query.to_string(),
        };
        self.post(Some(project), "wit/wiql", &params, &wiql).await
    }

    async fn add_comment(
        &self,
        project: &str,
        work_item_id: u32,
        text: &str,
    ) -> Result<Value, AzureError> {
        let path = format!("wit/workItems/{}/comments", work_item_id);
        let body = serde_json::json!({ "text": text });
        self.post(Some(project), &path, &self.preview_query(), &body)
            .await
    }

    async fn get_comments(
        &self,
        project: &str,
        work_item_id: u32,
        top: Option<u32>,
    ) -> Result<Value, AzureError> {
        let path = format!("wit/workItems/{}/comments", work_item_id);
        let mut query = self.preview_query();
        if let Some(top) = top {
            query.push(("$top", top.to_string()));
        }
        self.get(Some(project), &path, &query).await
    }

    async fn get_updates(&self, id: u32, top: Option<u32>) -> Result<Vec<Value>, AzureError> {
        let mut query = self.query();
        if let Some(top) = top {
            query.push(("$top", top.to_string()));
        }
        let response: ListResponse<Value> = self
            .get(None, &format!("wit/workItems/{}/updates", id), &query)
            .await?;
        Ok(response.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::models::PullRequestStatusFilter;
    use httpmock::prelude::*;
    use serde_json::json;

    // base64(":secret")
    const AUTHORIZATION: &str = "Basic OnNlY3JldA==";

    fn create_test_client(server: &MockServer) -> AzureDevOpsClient {
        AzureDevOpsClient::new(
            format!("{}/DefaultCollection/", server.base_url()),
            "secret",
            DEFAULT_API_VERSION,
        )
    }

    #[tokio::test]
    async fn test_get_projects_sends_pat_and_filters() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/DefaultCollection/_apis/projects")
                .query_param("api-version", "7.1")
                .query_param("stateFilter", "wellFormed")
                .query_param("$top", "1")
                .header("Authorization", AUTHORIZATION);
            then.status(200).json_body(json!({
                "count": 1,
                "value": [{
                    "id": "p-1",
                    "name": "Fabrikam",
                    "state": "wellFormed",
                    "url": "https://tfs/_apis/projects/p-1",
                    "lastUpdateTime": "2024-01-01T00:00:00Z"
                }]
            }));
        });

        let client = create_test_client(&server);
        let projects = client
            .get_projects(Some(ProjectStateFilter::WellFormed), Some(1), None)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Fabrikam");
        assert_eq!(
            projects[0].last_update_time.as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
    }

    #[tokio::test]
    async fn test_api_error_uses_server_message() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/DefaultCollection/_apis/wit/workitems/7");
            then.status(404).json_body(json!({
                "message": "TF401232: Work item 7 does not exist.",
                "typeKey": "WorkItemUnauthorizedAccessException"
            }));
        });

        let client = create_test_client(&server);
        let err = client.get_work_item(7, None).await.unwrap_err();

        match err {
            AzureError::ApiError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "TF401232: Work item 7 does not exist.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_work_item_posts_patch_document() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/DefaultCollection/Fabrikam/_apis/wit/workitems/$Task")
                .header("Content-Type", "application/json-patch+json")
                .json_body(json!([
                    { "op": "add", "path": "/fields/System.Title", "value": "Write docs" }
                ]));
            then.status(200).json_body(json!({ "id": 12, "rev": 1 }));
        });

        let client = create_test_client(&server);
        let document = vec![JsonPatchOperation::add_field(
            "System.Title",
            json!("Write docs"),
        )];
        let created = client
            .create_work_item("Fabrikam", "Task", &document)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(created["id"], 12);
    }

    #[tokio::test]
    async fn test_get_work_items_splits_into_batches() {
        let server = MockServer::start();
        let ids: Vec<u32> = (1..=250).collect();
        let first: String = (1..=200).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
        let second: String = (201..=250).map(|i| i.to_string()).collect::<Vec<_>>().join(",");

        let first_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/DefaultCollection/_apis/wit/workitems")
                .query_param("ids", first.as_str());
            then.status(200)
                .json_body(json!({ "count": 2, "value": [{ "id": 1 }, { "id": 2 }] }));
        });
        let second_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/DefaultCollection/_apis/wit/workitems")
                .query_param("ids", second.as_str());
            then.status(200)
                .json_body(json!({ "count": 1, "value": [{ "id": 201 }] }));
        });

        let client = create_test_client(&server);
        let items = client.get_work_items(&ids, None).await.unwrap();

        first_mock.assert();
        second_mock.assert();
        assert_eq!(items.len(), 3);
    }

    #[tokio::test]
    async fn test_get_work_items_without_ids_skips_request() {
        let client = AzureDevOpsClient::new("http://127.0.0.1:9", "secret", DEFAULT_API_VERSION);
        let items = client.get_work_items(&[], None).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_delete_with_empty_body_yields_null() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path("/DefaultCollection/_apis/wit/workitems/5")
                .query_param("destroy", "true");
            then.status(204);
        });

        let client = create_test_client(&server);
        let result = client.delete_work_item(5, true).await.unwrap();

        mock.assert();
        assert!(result.is_null());
    }

    #[tokio::test]
    async fn test_list_pull_requests_maps_search_criteria() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/DefaultCollection/Fabrikam/_apis/git/repositories/web/pullrequests")
                .query_param("searchCriteria.status", "completed")
                .query_param("searchCriteria.reviewerId", "r-1")
                .query_param("$top", "5");
            then.status(200)
                .json_body(json!({ "count": 1, "value": [{ "pullRequestId": 3 }] }));
        });

        let client = create_test_client(&server);
        let criteria = PullRequestSearchCriteria {
            status: Some(PullRequestStatusFilter::Completed),
            reviewer_id: Some("r-1".to_string()),
            ..Default::default()
        };
        let prs = client
            .list_pull_requests("Fabrikam", "web", &criteria, Some(5))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(prs, json!([{ "pullRequestId": 3 }]));
    }

    #[tokio::test]
    async fn test_comments_use_preview_api_version() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/DefaultCollection/Fabrikam/_apis/wit/workItems/9/comments")
                .query_param("api-version", "7.1-preview.3")
                .json_body(json!({ "text": "Looks good" }));
            then.status(200).json_body(json!({ "id": 100, "text": "Looks good" }));
        });

        let client = create_test_client(&server);
        let comment = client.add_comment("Fabrikam", 9, "Looks good").await.unwrap();

        mock.assert();
        assert_eq!(comment["id"], 100);
    }

    #[test]
    fn test_work_item_url_is_collection_scoped() {
        let client = AzureDevOpsClient::new(
            "https://tfs.company.com/DefaultCollection/",
            "secret",
            DEFAULT_API_VERSION,
        );
        assert_eq!(
            client.work_item_url(42),
            "https://tfs.company.com/DefaultCollection/_apis/wit/workItems/42"
        );
    }
}
