use thiserror::Error;

pub type TfstateResult<T> = Result<T, TfstateError>;

/// Every failure the state access layer can report.
///
/// SECURITY: Messages must NEVER contain credential material (keys, secrets, session tokens).
#[derive(Debug, Error)]
pub enum TfstateError {
    #[error(
        "AWS credentials not found ({reason}). Set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY, \
         choose a profile with AWS_PROFILE, or configure the 'default' profile"
    )]
    CredentialsNotFound { reason: String },

    #[error(
        "bucket name is not configured: pass --bucket or set the TFSTATE_BUCKET_NAME environment variable"
    )]
    BucketNotConfigured,

    #[error("bucket '{bucket}' not found")]
    BucketNotFound { bucket: String },

    #[error("file '{key}' not found in bucket '{bucket}'")]
    ObjectNotFound { bucket: String, key: String },

    /// `target` names what was refused, e.g. "bucket 'x'" or "file 'y'".
    #[error("access denied to {target}")]
    AccessDenied { target: String },

    #[error("file '{key}' is not a valid state document: {reason}")]
    InvalidStateFormat { key: String, reason: String },

    #[error("S3 error: {0}")]
    Backend(String),
}

impl TfstateError {
    /// Text handed back across the tool-call boundary.
    pub fn to_tool_text(&self) -> String {
        format!("Error: {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_not_configured_mentions_env_var() {
        let err = TfstateError::BucketNotConfigured;
        assert!(err.to_string().contains("TFSTATE_BUCKET_NAME"));
    }

    #[test]
    fn test_bucket_not_found_display() {
        let err = TfstateError::BucketNotFound {
            bucket: "infra-states".to_string(),
        };
        assert_eq!(err.to_string(), "bucket 'infra-states' not found");
    }

    #[test]
    fn test_object_not_found_display() {
        let err = TfstateError::ObjectNotFound {
            bucket: "infra-states".to_string(),
            key: "prod/terraform.tfstate".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "file 'prod/terraform.tfstate' not found in bucket 'infra-states'"
        );
    }

    #[test]
    fn test_access_denied_display() {
        let err = TfstateError::AccessDenied {
            target: "bucket 'locked'".to_string(),
        };
        assert_eq!(err.to_string(), "access denied to bucket 'locked'");
    }

    #[test]
    fn test_credentials_not_found_has_remediation_hint() {
        let err = TfstateError::CredentialsNotFound {
            reason: "no providers in chain provided credentials".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("AWS_ACCESS_KEY_ID"));
        assert!(msg.contains("AWS_PROFILE"));
        assert!(msg.contains("no providers in chain"));
    }

    #[test]
    fn test_tool_text_is_prefixed() {
        let err = TfstateError::InvalidStateFormat {
            key: "bad.tfstate".to_string(),
            reason: "expected value at line 1 column 1".to_string(),
        };
        let text = err.to_tool_text();
        assert!(text.starts_with("Error: "));
        assert!(text.contains("bad.tfstate"));
    }

    #[test]
    fn test_backend_error_display() {
        let err = TfstateError::Backend("service unavailable".to_string());
        assert_eq!(err.to_string(), "S3 error: service unavailable");
    }
}
