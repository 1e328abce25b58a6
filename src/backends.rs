pub mod s3;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{TfstateError, TfstateResult};
pub use s3::credentials::CredentialSource;

/// Suffix a key must carry to be reported as a state file.
pub const STATE_FILE_SUFFIX: &str = ".tfstate";

/// Read-only access to a store holding Terraform state files.
#[async_trait]
pub trait StateBackend: Send + Sync {
    /// Bucket (or container) this backend reads from.
    fn bucket(&self) -> &str;

    /// Keys under `prefix` that end in `.tfstate`, in store order.
    async fn list_states(&self, prefix: &str) -> TfstateResult<Vec<String>>;

    /// Full content of the state file at `path`, parsed as JSON.
    async fn get_state(&self, path: &str) -> TfstateResult<Value>;
}

/// Opens a backend session. Split from [`StateBackend`] so callers can defer
/// (and retry) construction.
#[async_trait]
pub trait BackendFactory: Send + Sync {
    async fn connect(&self, config: &BackendConfig) -> TfstateResult<Arc<dyn StateBackend>>;
}

#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub bucket: String,
    pub region: Option<String>,
    pub credentials: CredentialSource,
    /// NOTE: For S3-compatible stores (MinIO, LocalStack). Forces path-style addressing.
    pub endpoint_url: Option<String>,
    pub operation_timeout: Option<Duration>,
}

pub fn is_state_key(key: &str) -> bool {
    key.ends_with(STATE_FILE_SUFFIX)
}

/// Decodes raw object bytes into a state document.
///
/// Invalid UTF-8 is reported, never repaired. The root must be a JSON object.
pub fn parse_state_document(key: &str, bytes: &[u8]) -> TfstateResult<Value> {
    let invalid = |reason: String| TfstateError::InvalidStateFormat {
        key: key.to_string(),
        reason,
    };

    let text = std::str::from_utf8(bytes)
        .map_err(|e| invalid(format!("content is not valid UTF-8: {}", e)))?;

    let document: Value =
        serde_json::from_str(text).map_err(|e| invalid(format!("invalid JSON: {}", e)))?;

    if !document.is_object() {
        return Err(invalid("top-level value is not a JSON object".to_string()));
    }

    Ok(document)
}
