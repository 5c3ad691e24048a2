// Work Items module
pub mod add_comment;
pub mod add_link;
pub mod batch_get_work_items;
pub mod create_work_item;
pub mod delete_work_item;
pub mod get_comments;
pub mod get_updates;
pub mod get_work_item;
pub mod query_work_items_by_wiql;
pub mod update_work_item;

// Re-export the public items
pub use add_comment::{ADD_COMMENT_TOOL, AddCommentArgs, add_comment};
pub use add_link::{ADD_LINK_TOOL, AddLinkArgs, add_link};
pub use batch_get_work_items::{
    BATCH_GET_WORK_ITEMS_TOOL, BatchGetWorkItemsArgs, batch_get_work_items,
};
pub use create_work_item::{CREATE_WORK_ITEM_TOOL, CreateWorkItemArgs, create_work_item};
pub use delete_work_item::{DELETE_WORK_ITEM_TOOL, DeleteWorkItemArgs, delete_work_item};
pub use get_comments::{GET_COMMENTS_TOOL, GetCommentsArgs, get_comments};
pub use get_updates::{GET_UPDATES_TOOL, GetUpdatesArgs, get_updates};
pub use get_work_item::{GET_WORK_ITEM_TOOL, GetWorkItemArgs, get_work_item};
pub use query_work_items_by_wiql::{
    QUERY_WORK_ITEMS_BY_WIQL_TOOL, QueryWorkItemsByWiqlArgs, query_work_items_by_wiql,
};
pub use update_work_item::{UPDATE_WORK_ITEM_TOOL, UpdateWorkItemArgs, update_work_item};

use crate::azure::connection::ConnectionProvider;
use crate::mcp::tools::{ToolDescriptor, ToolDomain, ToolError, invoke};
use async_trait::async_trait;
use rmcp::model::JsonObject;
use serde_json::Value;

/// Work item tracking tools.
pub struct WorkItemTools;

#[async_trait]
impl ToolDomain for WorkItemTools {
    fn name(&self) -> &'static str {
        "work-items"
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new::<GetWorkItemArgs>(GET_WORK_ITEM_TOOL),
            ToolDescriptor::new::<CreateWorkItemArgs>(CREATE_WORK_ITEM_TOOL),
            ToolDescriptor::new::<UpdateWorkItemArgs>(UPDATE_WORK_ITEM_TOOL),
            ToolDescriptor::new::<DeleteWorkItemArgs>(DELETE_WORK_ITEM_TOOL),
            ToolDescriptor::new::<QueryWorkItemsByWiqlArgs>(QUERY_WORK_ITEMS_BY_WIQL_TOOL),
            ToolDescriptor::new::<AddCommentArgs>(ADD_COMMENT_TOOL),
            ToolDescriptor::new::<GetCommentsArgs>(GET_COMMENTS_TOOL),
            ToolDescriptor::new::<AddLinkArgs>(ADD_LINK_TOOL),
            ToolDescriptor::new::<GetUpdatesArgs>(GET_UPDATES_TOOL),
            ToolDescriptor::new::<BatchGetWorkItemsArgs>(BATCH_GET_WORK_ITEMS_TOOL),
        ]
    }

    async fn handle(
        &self,
        name: &str,
        args: JsonObject,
        provider: &ConnectionProvider,
    ) -> Option<Result<Value, ToolError>> {
        let result = match name {
            n if n == GET_WORK_ITEM_TOOL.name => {
                invoke(GET_WORK_ITEM_TOOL, args, provider, get_work_item).await
            }
            n if n == CREATE_WORK_ITEM_TOOL.name => {
                invoke(CREATE_WORK_ITEM_TOOL, args, provider, create_work_item).await
            }
            n if n == UPDATE_WORK_ITEM_TOOL.name => {
                invoke(UPDATE_WORK_ITEM_TOOL, args, provider, update_work_item).await
            }
            n if n == DELETE_WORK_ITEM_TOOL.name => {
                invoke(DELETE_WORK_ITEM_TOOL, args, provider, delete_work_item).await
            }
            n if n == QUERY_WORK_ITEMS_BY_WIQL_TOOL.name => {
                invoke(
                    QUERY_WORK_ITEMS_BY_WIQL_TOOL,
                    args,
                    provider,
                    query_work_items_by_wiql,
                )
                .await
            }
            n if n == ADD_COMMENT_TOOL.name => {
                invoke(ADD_COMMENT_TOOL, args, provider, add_comment).await
            }
            n if n == GET_COMMENTS_TOOL.name => {
                invoke(GET_COMMENTS_TOOL, args, provider, get_comments).await
            }
            n if n == ADD_LINK_TOOL.name => invoke(ADD_LINK_TOOL, args, provider, add_link).await,
            n if n == GET_UPDATES_TOOL.name => {
                invoke(GET_UPDATES_TOOL, args, provider, get_updates).await
            }
            n if n == BATCH_GET_WORK_ITEMS_TOOL.name => {
                invoke(BATCH_GET_WORK_ITEMS_TOOL, args, provider, batch_get_work_items).await
            }
            _ => return None,
        };
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::api::MockAzureDevOpsApi;
    use crate::azure::models::{
        JsonPatchOperation, PatchOp, WiqlResponse, WorkItemExpand, WorkItemReference,
    };
    use serde_json::json;
    use std::sync::Arc;

    fn provider(api: MockAzureDevOpsApi) -> ConnectionProvider {
        ConnectionProvider::from_connection(Arc::new(api))
    }

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    async fn call(api: MockAzureDevOpsApi, name: &str, value: Value) -> Result<Value, ToolError> {
        WorkItemTools
            .handle(name, args(value), &provider(api))
            .await
            .expect("tool should be handled by the work items domain")
    }

    fn wiql_response(ids: &[u32]) -> WiqlResponse {
        let mut other = serde_json::Map::new();
        other.insert("queryType".to_string(), json!("flat"));
        WiqlResponse {
            work_items: Some(
                ids.iter()
                    .map(|id| WorkItemReference { id: *id, url: None })
                    .collect(),
            ),
            other,
        }
    }

    #[tokio::test]
    async fn test_unowned_name_is_not_handled() {
        let result = WorkItemTools
            .handle(
                "mcp_ado_repos_get_pull_request",
                JsonObject::new(),
                &provider(MockAzureDevOpsApi::new()),
            )
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_wiql_without_results_returns_raw_query() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_query_by_wiql()
            .withf(|project, query, top| project == "Fabrikam" && query.contains("SELECT") && *top == Some(5))
            .times(1)
            .returning(|_, _, _| Ok(wiql_response(&[])));
        api.expect_get_work_items().never();

        let result = call(
            api,
            "mcp_ado_work_items_query_by_wiql",
            json!({ "project": "Fabrikam", "query": "SELECT [System.Id] FROM WorkItems", "top": 5 }),
        )
        .await
        .unwrap();

        assert_eq!(result, json!({ "workItems": [], "queryType": "flat" }));
    }

    #[tokio::test]
    async fn test_wiql_with_results_fetches_full_work_items() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_query_by_wiql()
            .times(1)
            .returning(|_, _, _| Ok(wiql_response(&[3, 5, 8])));
        api.expect_get_work_items()
            .withf(|ids, expand| ids == [3, 5, 8] && expand.is_none())
            .times(1)
            .returning(|ids, _| Ok(ids.iter().map(|id| json!({ "id": id })).collect()));

        let result = call(
            api,
            "mcp_ado_work_items_query_by_wiql",
            json!({ "project": "Fabrikam", "query": "SELECT [System.Id] FROM WorkItems" }),
        )
        .await
        .unwrap();

        assert_eq!(result["workItems"].as_array().unwrap().len(), 3);
        assert_eq!(result["query"]["workItems"][1]["id"], 5);
    }

    #[tokio::test]
    async fn test_update_builds_single_add_operation() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_update_work_item()
            .withf(|id, document| {
                *id == 42
                    && document
                        == [JsonPatchOperation::add_field("System.Title", json!("X"))].as_slice()
            })
            .times(1)
            .returning(|id, _| Ok(json!({ "id": id, "rev": 2 })));

        let result = call(
            api,
            "mcp_ado_work_items_update",
            json!({ "id": 42, "fields": { "System.Title": "X" } }),
        )
        .await
        .unwrap();

        assert_eq!(result["rev"], 2);
    }

    #[tokio::test]
    async fn test_update_without_fields_is_rejected() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_update_work_item().never();

        let err = call(api, "mcp_ado_work_items_update", json!({ "id": 42, "fields": {} }))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_create_with_required_fields_only_sends_title() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_create_work_item()
            .withf(|project, work_item_type, document| {
                project == "Fabrikam"
                    && work_item_type == "User Story"
                    && document.len() == 1
                    && document[0].path == "/fields/System.Title"
            })
            .times(1)
            .returning(|_, _, _| Ok(json!({ "id": 1 })));

        call(
            api,
            "mcp_ado_work_items_create",
            json!({ "project": "Fabrikam", "type": "User Story", "title": "Checkout" }),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_create_with_assignee_adds_one_more_operation() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_create_work_item()
            .withf(|_, _, document| {
                let count = |path: &str| document.iter().filter(|op| op.path == path).count();
                document.len() == 2
                    && document.iter().all(|op| op.op == PatchOp::Add)
                    && count("/fields/System.Title") == 1
                    && count("/fields/System.AssignedTo") == 1
            })
            .times(1)
            .returning(|_, _, _| Ok(json!({ "id": 1 })));

        call(
            api,
            "mcp_ado_work_items_create",
            json!({
                "project": "Fabrikam",
                "type": "Bug",
                "title": "Crash",
                "assignedTo": "jamal@fabrikam.com",
                "description": ""
            }),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_add_link_appends_one_relation() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_work_item_url()
            .returning(|id| format!("https://tfs/DefaultCollection/_apis/wit/workItems/{id}"));
        api.expect_update_work_item()
            .withf(|id, document| {
                *id == 10
                    && document.len() == 1
                    && document[0].path == "/relations/-"
                    && document[0].value
                        == Some(json!({
                            "rel": "System.LinkTypes.Hierarchy-Reverse",
                            "url": "https://tfs/DefaultCollection/_apis/wit/workItems/20",
                            "attributes": { "comment": "epic" }
                        }))
            })
            .times(1)
            .returning(|_, _| Ok(json!({ "id": 10 })));

        call(
            api,
            "mcp_ado_work_items_add_link",
            json!({ "id": 10, "targetId": 20, "linkType": "Parent", "comment": "epic" }),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_delete_defaults_to_soft_delete() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_delete_work_item()
            .withf(|id, destroy| *id == 7 && !*destroy)
            .times(1)
            .returning(|id, _| Ok(json!({ "id": id, "code": 200 })));

        let result = call(api, "mcp_ado_work_items_delete", json!({ "id": 7 }))
            .await
            .unwrap();

        assert_eq!(result["deleted"], true);
        assert_eq!(result["id"], 7);
        assert_eq!(result["result"]["code"], 200);
    }

    #[tokio::test]
    async fn test_get_passes_expand_through() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_get_work_item()
            .withf(|id, expand| *id == 3 && *expand == Some(WorkItemExpand::Relations))
            .times(1)
            .returning(|id, _| Ok(json!({ "id": id, "relations": [] })));

        let result = call(
            api,
            "mcp_ado_work_items_get",
            json!({ "id": 3, "expand": "Relations" }),
        )
        .await
        .unwrap();

        assert_eq!(result["relations"], json!([]));
    }

    #[tokio::test]
    async fn test_invalid_expand_never_reaches_upstream() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_get_work_item().never();

        let err = call(api, "mcp_ado_work_items_get", json!({ "id": 3, "expand": "Everything" }))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("expand"), "{err}");
    }

    #[tokio::test]
    async fn test_wiql_link_query_is_returned_unchanged() {
        let raw = json!({
            "queryType": "oneHop",
            "workItemRelations": [{ "rel": null, "source": null, "target": { "id": 1 } }]
        });
        let response: WiqlResponse = serde_json::from_value(raw.clone()).unwrap();

        let mut api = MockAzureDevOpsApi::new();
        api.expect_query_by_wiql()
            .times(1)
            .returning(move |_, _, _| Ok(response.clone()));
        api.expect_get_work_items().never();

        let result = call(
            api,
            "mcp_ado_work_items_query_by_wiql",
            json!({ "project": "Fabrikam", "query": "SELECT [System.Id] FROM WorkItemLinks" }),
        )
        .await
        .unwrap();

        assert_eq!(result, raw);
    }

    #[tokio::test]
    async fn test_add_comment_posts_text() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_add_comment()
            .withf(|project, work_item_id, text| {
                project == "Fabrikam" && *work_item_id == 12 && text == "Looks good"
            })
            .times(1)
            .returning(|_, _, text| Ok(json!({ "id": 1, "text": text })));

        let result = call(
            api,
            "mcp_ado_work_items_add_comment",
            json!({ "project": "Fabrikam", "workItemId": 12, "text": "Looks good" }),
        )
        .await
        .unwrap();

        assert_eq!(result["text"], "Looks good");
    }

    #[tokio::test]
    async fn test_get_comments_passes_top() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_get_comments()
            .withf(|project, work_item_id, top| {
                project == "Fabrikam" && *work_item_id == 12 && *top == Some(3)
            })
            .times(1)
            .returning(|_, _, _| Ok(json!({ "totalCount": 1, "comments": [{ "id": 1 }] })));

        let result = call(
            api,
            "mcp_ado_work_items_get_comments",
            json!({ "project": "Fabrikam", "workItemId": 12, "top": 3 }),
        )
        .await
        .unwrap();

        assert_eq!(result["totalCount"], 1);
    }

    #[tokio::test]
    async fn test_get_updates_returns_revisions() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_get_updates()
            .withf(|id, top| *id == 9 && top.is_none())
            .times(1)
            .returning(|_, _| Ok(vec![json!({ "rev": 1 }), json!({ "rev": 2 })]));

        let result = call(api, "mcp_ado_work_items_get_updates", json!({ "id": 9 }))
            .await
            .unwrap();

        assert_eq!(result, json!([{ "rev": 1 }, { "rev": 2 }]));
    }

    #[tokio::test]
    async fn test_batch_get_fetches_requested_ids() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_get_work_items()
            .withf(|ids, expand| ids == [4, 6] && *expand == Some(WorkItemExpand::Fields))
            .times(1)
            .returning(|ids, _| Ok(ids.iter().map(|id| json!({ "id": id })).collect()));

        let result = call(
            api,
            "mcp_ado_work_items_batch_get",
            json!({ "ids": [4, 6], "expand": "Fields" }),
        )
        .await
        .unwrap();

        assert_eq!(result, json!([{ "id": 4 }, { "id": 6 }]));
    }

    #[tokio::test]
    async fn test_batch_get_without_ids_skips_upstream() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_get_work_items().never();

        let result = call(api, "mcp_ado_work_items_batch_get", json!({ "ids": [] }))
            .await
            .unwrap();

        assert_eq!(result, json!([]));
    }
}
