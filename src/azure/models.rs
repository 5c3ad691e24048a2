use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Project state filter accepted by the projects API.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStateFilter {
    #[default]
    All,
    WellFormed,
    Deleting,
    New,
    Unchanged,
}

impl ProjectStateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::WellFormed => "wellFormed",
            Self::Deleting => "deleting",
            Self::New => "new",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Pull request status used as a search filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PullRequestStatusFilter {
    Active,
    Abandoned,
    Completed,
    All,
}

impl PullRequestStatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Abandoned => "abandoned",
            Self::Completed => "completed",
            Self::All => "all",
        }
    }
}

/// Status a pull request can be moved to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PullRequestStatus {
    Active,
    Abandoned,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CommentThreadStatus {
    #[default]
    Active,
    Fixed,
    WontFix,
    Closed,
    ByDesign,
    Pending,
}

/// How much of a work item the server should return.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum WorkItemExpand {
    None,
    Relations,
    Fields,
    Links,
    All,
}

impl WorkItemExpand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Relations => "Relations",
            Self::Fields => "Fields",
            Self::Links => "Links",
            Self::All => "All",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub count: Option<u32>,
    pub value: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamProjectReference {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WiqlQuery {
    pub query: String,
}

/// Result of a WIQL query. Only the referenced ids are typed, everything else
/// the server returns (columns, sort order, as-of time) is carried through.
/// Link queries answer with `workItemRelations` and no `workItems` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WiqlResponse {
    #[serde(rename = "workItems", default, skip_serializing_if = "Option::is_none")]
    pub work_items: Option<Vec<WorkItemReference>>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, Value>,
}

impl WiqlResponse {
    pub fn ids(&self) -> Vec<u32> {
        self.work_items.iter().flatten().map(|wi| wi.id).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkItemReference {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Single operation of a JSON patch document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonPatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl JsonPatchOperation {
    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOp::Add,
            path: path.into(),
            value: Some(value),
            from: None,
        }
    }

    /// `add` of `value` at `/fields/{field}`.
    pub fn add_field(field: &str, value: Value) -> Self {
        Self::add(format!("/fields/{}", field), value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PullRequestSearchCriteria {
    pub status: Option<PullRequestStatusFilter>,
    pub creator_id: Option<String>,
    pub reviewer_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPullRequest {
    pub source_ref_name: String,
    pub target_ref_name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reviewers: Vec<IdentityRef>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IdentityRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PullRequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PullRequestStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PullRequestUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.title.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewCommentThread {
    pub comments: Vec<NewComment>,
    pub status: CommentThreadStatus,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    pub comment_type: CommentType,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CommentType {
    Text,
}
