//! The two externally callable operations.
//!
//! Typed variants (`list_state_files`, `read_state`) return [`TfstateResult`];
//! the string variants render either pretty JSON or an `"Error: "` line and
//! are the only place errors get stringified.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::OnceCell;

use crate::backends::s3::S3BackendFactory;
use crate::backends::{BackendFactory, StateBackend};
use crate::config::Settings;
use crate::error::TfstateResult;
use crate::terraform::{StateFileListing, StateSummary, normalize_and_filter};

pub struct TfstateTools {
    settings: Settings,
    factory: Arc<dyn BackendFactory>,
    backend: OnceCell<Arc<dyn StateBackend>>,
}

impl TfstateTools {
    pub fn new(settings: Settings) -> Self {
        Self::with_factory(settings, Arc::new(S3BackendFactory))
    }

    pub fn with_factory(settings: Settings, factory: Arc<dyn BackendFactory>) -> Self {
        Self {
            settings,
            factory,
            backend: OnceCell::new(),
        }
    }

    /// Lazily connects the backend. Concurrent first callers share one
    /// construction; a failed attempt leaves the cell empty for the next call.
    async fn backend(&self) -> TfstateResult<Arc<dyn StateBackend>> {
        let backend = self
            .backend
            .get_or_try_init(|| async {
                let config = self.settings.backend_config()?;
                tracing::info!(bucket = %config.bucket, "connecting state backend");
                self.factory.connect(&config).await
            })
            .await?;

        Ok(Arc::clone(backend))
    }

    pub async fn list_state_files(&self, prefix: &str) -> TfstateResult<StateFileListing> {
        let backend = self.backend().await?;
        let files = backend.list_states(prefix).await?;

        tracing::info!(bucket = %backend.bucket(), prefix, count = files.len(), "listed state files");

        Ok(StateFileListing::new(backend.bucket(), prefix, files))
    }

    pub async fn read_state(
        &self,
        tfstate_path: &str,
        search_query: Option<&str>,
    ) -> TfstateResult<StateSummary> {
        let backend = self.backend().await?;
        let document = backend.get_state(tfstate_path).await?;
        let summary = normalize_and_filter(&document, search_query);

        tracing::info!(
            path = tfstate_path,
            query = ?search_query,
            total_resources = summary.total_resources,
            "read state file"
        );

        Ok(summary)
    }

    pub async fn list_tfstate_files(&self, prefix: &str) -> String {
        render(self.list_state_files(prefix).await)
    }

    pub async fn read_tfstate(&self, tfstate_path: &str, search_query: Option<&str>) -> String {
        render(self.read_state(tfstate_path, search_query).await)
    }
}

impl std::fmt::Debug for TfstateTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfstateTools")
            .field("settings", &self.settings)
            .field("connected", &self.backend.initialized())
            .finish()
    }
}

fn render<T: Serialize>(result: TfstateResult<T>) -> String {
    match result {
        Ok(value) => serde_json::to_string_pretty(&value)
            .unwrap_or_else(|e| format!("Error: failed to serialize result: {}", e)),
        Err(err) => {
            tracing::warn!(error = %err, "tool call failed");
            err.to_tool_text()
        }
    }
}
