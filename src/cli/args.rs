use std::time::Duration;

use clap::Parser;
use tfstate_mcp::{CredentialSource, Settings};

/// Serve Terraform state stored in S3 to MCP clients over stdio.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// S3 bucket holding the state files.
    #[arg(long, env = "TFSTATE_BUCKET_NAME")]
    pub bucket: Option<String>,

    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    #[arg(long, env = "AWS_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,

    /// Custom S3 endpoint (MinIO, LocalStack). Enables path-style addressing.
    #[arg(long, env = "AWS_ENDPOINT_URL_S3")]
    pub endpoint_url: Option<String>,

    /// Per-request timeout for S3 calls. Unbounded when unset.
    #[arg(long, env = "TFSTATE_OPERATION_TIMEOUT_SECS")]
    pub operation_timeout_secs: Option<u64>,
}

impl Cli {
    pub fn into_settings(self) -> Settings {
        Settings {
            bucket: self.bucket,
            region: self.region,
            credentials: CredentialSource {
                access_key_id: self.access_key_id,
                secret_access_key: self.secret_access_key,
                session_token: self.session_token,
                profile: self.profile,
            },
            endpoint_url: self.endpoint_url,
            operation_timeout: self.operation_timeout_secs.map(Duration::from_secs),
        }
    }
}
