use async_trait::async_trait;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use serde_json::Value;

use super::credentials::{AuthMode, resolve_auth};
use super::error::{Target, classify};
use crate::backends::{BackendConfig, StateBackend, is_state_key, parse_state_document};
use crate::error::{TfstateError, TfstateResult};

const STATIC_PROVIDER_NAME: &str = "tfstate-static";

#[derive(Clone)]
pub struct S3Backend {
    client: Client,
    bucket: String,
}

impl S3Backend {
    /// Resolves credentials, builds the SDK client and checks that the
    /// credentials provider can actually produce credentials.
    pub async fn connect(config: &BackendConfig) -> TfstateResult<Self> {
        let auth = resolve_auth(&config.credentials);
        let sdk_config = load_sdk_config(config, &auth).await;

        verify_credentials(&sdk_config, &auth).await?;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&sdk_config);
        if config.endpoint_url.is_some() {
            s3_config = s3_config.force_path_style(true);
        }

        tracing::info!(
            bucket = %config.bucket,
            profile = ?auth.profile_name(),
            region = ?sdk_config.region(),
            "S3 backend ready"
        );

        Ok(Self::from_client(
            config.bucket.clone(),
            Client::from_conf(s3_config.build()),
        ))
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub fn from_client(bucket: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

async fn load_sdk_config(config: &BackendConfig, auth: &AuthMode) -> SdkConfig {
    // Retries stay with the caller.
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());

    loader = match auth {
        AuthMode::StaticKeys {
            access_key_id,
            secret_access_key,
            session_token,
        } => loader.credentials_provider(Credentials::new(
            access_key_id.clone(),
            secret_access_key.clone(),
            session_token.clone(),
            None,
            STATIC_PROVIDER_NAME,
        )),
        AuthMode::Profile(name) => loader.profile_name(name).credentials_provider(
            ProfileFileCredentialsProvider::builder()
                .profile_name(name)
                .build(),
        ),
    };

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }

    if let Some(endpoint_url) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint_url.clone());
    }

    if let Some(timeout) = config.operation_timeout {
        loader = loader.timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
    }

    loader.load().await
}

async fn verify_credentials(sdk_config: &SdkConfig, auth: &AuthMode) -> TfstateResult<()> {
    let provider =
        sdk_config
            .credentials_provider()
            .ok_or_else(|| TfstateError::CredentialsNotFound {
                reason: "no credentials provider configured".to_string(),
            })?;

    provider
        .provide_credentials()
        .await
        .map_err(|e| {
            let cause = DisplayErrorContext(e);
            TfstateError::CredentialsNotFound {
                reason: match auth.profile_name() {
                    Some(profile) => format!("profile '{}': {}", profile, cause),
                    None => cause.to_string(),
                },
            }
        })?;

    Ok(())
}

#[async_trait]
impl StateBackend for S3Backend {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn list_states(&self, prefix: &str) -> TfstateResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;
        let mut page = 0u32;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .set_prefix((!prefix.is_empty()).then(|| prefix.to_string()))
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| classify(e, Target::Bucket(&self.bucket)))?;

            page += 1;
            let before = keys.len();
            keys.extend(
                output
                    .contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .filter(|key| is_state_key(key))
                    .map(str::to_string),
            );

            tracing::debug!(
                bucket = %self.bucket,
                prefix,
                page,
                objects = output.contents().len(),
                state_files = keys.len() - before,
                "listed page"
            );

            match output
                .next_continuation_token()
                .filter(|token| !token.is_empty())
            {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        Ok(keys)
    }

    async fn get_state(&self, path: &str) -> TfstateResult<Value> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                classify(
                    e,
                    Target::Object {
                        bucket: &self.bucket,
                        key: path,
                    },
                )
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| TfstateError::Backend(format!("failed to read '{}': {}", path, e)))?
            .into_bytes();

        tracing::debug!(bucket = %self.bucket, path, bytes = bytes.len(), "fetched state file");

        parse_state_document(path, &bytes)
    }
}

impl std::fmt::Debug for S3Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Backend")
            .field("bucket", &self.bucket)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::CredentialSource;

    fn offline_client() -> Client {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
            .build();
        Client::from_conf(config)
    }

    #[test]
    fn test_from_client_keeps_bucket() {
        let backend = S3Backend::from_client("infra-states", offline_client());
        assert_eq!(backend.bucket(), "infra-states");
    }

    #[test]
    fn test_debug_only_shows_bucket() {
        let backend = S3Backend::from_client("infra-states", offline_client());
        let debug_output = format!("{:?}", backend);
        assert!(debug_output.contains("infra-states"));
        assert!(!debug_output.contains("AKIDTEST"));
    }

    #[tokio::test]
    async fn test_connect_with_static_keys_succeeds_offline() {
        let config = BackendConfig {
            bucket: "infra-states".to_string(),
            region: Some("eu-west-1".to_string()),
            credentials: CredentialSource {
                access_key_id: Some("AKIDTEST".to_string()),
                secret_access_key: Some("secret".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let backend = S3Backend::connect(&config).await.unwrap();
        assert_eq!(backend.bucket(), "infra-states");
    }
}
