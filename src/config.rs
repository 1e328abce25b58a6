use std::time::Duration;

use crate::backends::{BackendConfig, CredentialSource};
use crate::error::{TfstateError, TfstateResult};

/// Startup configuration handed to the tool dispatcher by the CLI layer.
///
/// Flag-over-environment precedence is already applied by the time a value
/// lands here.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub credentials: CredentialSource,
    pub endpoint_url: Option<String>,
    pub operation_timeout: Option<Duration>,
}

impl Settings {
    /// Configured bucket, treating an empty value as unset.
    pub fn bucket_name(&self) -> Option<&str> {
        self.bucket.as_deref().filter(|b| !b.is_empty())
    }

    pub fn backend_config(&self) -> TfstateResult<BackendConfig> {
        let bucket = self
            .bucket_name()
            .ok_or(TfstateError::BucketNotConfigured)?;

        Ok(BackendConfig {
            bucket: bucket.to_string(),
            region: self.region.clone().filter(|r| !r.is_empty()),
            credentials: self.credentials.clone(),
            endpoint_url: self.endpoint_url.clone().filter(|e| !e.is_empty()),
            operation_timeout: self.operation_timeout,
        })
    }
}
