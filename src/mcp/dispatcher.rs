//! Routes tool calls to the domain that declared the tool.

use crate::azure::connection::ConnectionProvider;
use crate::mcp::response::{error_response, success_response};
use crate::mcp::tools::projects::CoreTools;
use crate::mcp::tools::repositories::RepositoryTools;
use crate::mcp::tools::work_items::WorkItemTools;
use crate::mcp::tools::{ToolDescriptor, ToolDomain, ToolError};
use rmcp::model::{CallToolResult, JsonObject, Tool};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tool '{name}' is declared by both '{first}' and '{second}'")]
    DuplicateTool {
        name: String,
        first: &'static str,
        second: &'static str,
    },
}

/// Domains in registration order.
pub fn default_domains() -> Vec<Arc<dyn ToolDomain>> {
    vec![
        Arc::new(CoreTools),
        Arc::new(WorkItemTools),
        Arc::new(RepositoryTools),
    ]
}

pub struct Dispatcher {
    domains: Vec<Arc<dyn ToolDomain>>,
    descriptors: Vec<ToolDescriptor>,
    bindings: HashMap<&'static str, usize>,
    provider: ConnectionProvider,
}

impl Dispatcher {
    /// Resolves every declared tool name to its domain once, rejecting
    /// names declared more than once.
    pub fn new(
        domains: Vec<Arc<dyn ToolDomain>>,
        provider: ConnectionProvider,
    ) -> Result<Self, RegistryError> {
        let mut descriptors = Vec::new();
        let mut bindings: HashMap<&'static str, usize> = HashMap::new();

        for (index, domain) in domains.iter().enumerate() {
            for descriptor in domain.tools() {
                if let Some(&existing) = bindings.get(descriptor.name) {
                    return Err(RegistryError::DuplicateTool {
                        name: descriptor.name.to_string(),
                        first: domains[existing].name(),
                        second: domain.name(),
                    });
                }
                bindings.insert(descriptor.name, index);
                descriptors.push(descriptor);
            }
        }

        log::info!(
            "Configured {} tools across {} domains",
            descriptors.len(),
            domains.len()
        );

        Ok(Self {
            domains,
            descriptors,
            bindings,
            provider,
        })
    }

    pub fn with_default_domains(provider: ConnectionProvider) -> Result<Self, RegistryError> {
        Self::new(default_domains(), provider)
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        self.descriptors.iter().map(ToolDescriptor::to_tool).collect()
    }

    /// Executes `name` and wraps the outcome in the response envelope.
    /// Never fails: every error becomes an error-flagged result.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        match self.execute(name, arguments.unwrap_or_default()).await {
            Ok(value) => success_response(&value),
            Err(e) => {
                log::error!("Tool failed: {}: {}", name, e);
                error_response(e.to_string())
            }
        }
    }

    async fn execute(&self, name: &str, args: JsonObject) -> Result<serde_json::Value, ToolError> {
        let Some(&index) = self.bindings.get(name) else {
            return Err(ToolError::UnknownTool(name.to_string()));
        };

        let domain = &self.domains[index];
        log::debug!("Dispatching {} to domain {}", name, domain.name());

        domain
            .handle(name, args, &self.provider)
            .await
            .unwrap_or_else(|| Err(ToolError::UnknownTool(name.to_string())))
    }
}
