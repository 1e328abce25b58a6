mod client;
pub mod credentials;
mod error;

pub use client::S3Backend;
pub use credentials::{AuthMode, CredentialSource, DEFAULT_PROFILE, resolve_auth};

use std::sync::Arc;

use async_trait::async_trait;

use super::{BackendConfig, BackendFactory, StateBackend};
use crate::error::TfstateResult;

/// Opens [`S3Backend`] sessions from a [`BackendConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct S3BackendFactory;

#[async_trait]
impl BackendFactory for S3BackendFactory {
    async fn connect(&self, config: &BackendConfig) -> TfstateResult<Arc<dyn StateBackend>> {
        let backend = S3Backend::connect(config).await?;
        Ok(Arc::new(backend))
    }
}
