use crate::azure::api::AzureDevOpsApi;
use crate::azure::client::{AzureDevOpsClient, AzureError};
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;

/// Shared handle to the authenticated upstream session.
pub type Connection = Arc<dyn AzureDevOpsApi>;

type ProvideFn = dyn Fn() -> BoxFuture<'static, Result<Connection, AzureError>> + Send + Sync;

/// Zero-argument accessor handing out the current [`Connection`].
///
/// Tools never hold a connection themselves; they ask the provider on every
/// call, so swapping the session behind it needs no tool changes.
#[derive(Clone)]
pub struct ConnectionProvider {
    provide: Arc<ProvideFn>,
}

impl ConnectionProvider {
    pub fn new<F, Fut>(provide: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Connection, AzureError>> + Send + 'static,
    {
        Self {
            provide: Arc::new(move || provide().boxed()),
        }
    }

    /// Provider that always hands out the same, already established connection.
    pub fn from_connection(connection: Connection) -> Self {
        Self::new(move || {
            let connection = connection.clone();
            async move { Ok(connection) }
        })
    }

    pub async fn provide(&self) -> Result<Connection, AzureError> {
        (self.provide)().await
    }
}

/// Issues one cheap read so a misconfigured URL or token fails at startup
/// instead of on the first tool call.
pub async fn verify_connection(client: &AzureDevOpsClient) -> Result<usize, AzureError> {
    let projects = client
        .get_projects(None, Some(1), None)
        .await
        .map_err(|e| {
            AzureError::Unavailable(format!("Failed to connect to Azure DevOps Server: {}", e))
        })?;
    Ok(projects.len())
}

/// Establishes and verifies the session for `client`, returning a provider for it.
pub async fn connect(client: AzureDevOpsClient) -> Result<ConnectionProvider, AzureError> {
    log::info!("Creating Azure DevOps connection to {}", client.base_url());
    let project_count = verify_connection(&client).await?;
    log::info!(
        "Connection verified successfully (projects visible: {})",
        project_count
    );
    Ok(ConnectionProvider::from_connection(Arc::new(client)))
}
