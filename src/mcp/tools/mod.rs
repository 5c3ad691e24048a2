//! Tool domains exposed by the server.
//!
//! Each domain declares its tools with `#[mcp_tool]` on the handler function
//! and implements [`ToolDomain`] so the dispatcher can advertise and route them.

pub mod projects;
pub mod repositories;
pub mod support;
pub mod work_items;

use crate::azure::client::AzureError;
use crate::azure::connection::{Connection, ConnectionProvider};
use async_trait::async_trait;
use rmcp::model::JsonObject;
use rmcp::schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Name and description of a tool, emitted next to its handler by `#[mcp_tool]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
}

/// Static declaration of a tool: what clients see in `tools/list`.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Arc<JsonObject>,
}

impl ToolDescriptor {
    /// Descriptor whose input schema is generated from the argument type `A`.
    pub fn new<A: JsonSchema>(meta: ToolMeta) -> Self {
        Self {
            name: meta.name,
            description: meta.description,
            input_schema: Arc::new(support::schema_for::<A>()),
        }
    }

    pub fn to_tool(&self) -> rmcp::model::Tool {
        rmcp::model::Tool::new(self.name, self.description, self.input_schema.clone())
    }
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: &'static str, message: String },
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error(transparent)]
    Upstream(#[from] AzureError),
    #[error("Failed to serialize tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    pub fn invalid(tool: ToolMeta, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.name,
            message: message.into(),
        }
    }
}

/// A group of related tools sharing one upstream API area.
#[async_trait]
pub trait ToolDomain: Send + Sync {
    fn name(&self) -> &'static str;

    fn tools(&self) -> Vec<ToolDescriptor>;

    /// Executes `name` if this domain owns it, `None` otherwise.
    async fn handle(
        &self,
        name: &str,
        args: JsonObject,
        provider: &ConnectionProvider,
    ) -> Option<Result<Value, ToolError>>;
}

/// Validates `args` into the tool's parameter type, obtains the connection and
/// runs `handler`.
pub(crate) async fn invoke<A, F, Fut>(
    tool: ToolMeta,
    args: JsonObject,
    provider: &ConnectionProvider,
    handler: F,
) -> Result<Value, ToolError>
where
    A: DeserializeOwned + JsonSchema,
    F: FnOnce(Connection, A) -> Fut,
    Fut: Future<Output = Result<Value, ToolError>>,
{
    let args: A = support::parse_args(tool, args)?;
    let connection = provider.provide().await?;
    handler(connection, args).await
}
