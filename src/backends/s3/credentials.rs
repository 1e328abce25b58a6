//! Credential resolution for the S3 backend.
//!
//! Explicit keys win over a named profile, and a named profile wins over the
//! literal `default` profile. Region is configured separately and never
//! influences which mode is chosen.

/// Profile used when neither explicit keys nor a profile are configured.
pub const DEFAULT_PROFILE: &str = "default";

/// Raw credential inputs, typically sourced from `AWS_*` environment variables.
#[derive(Clone, Default, PartialEq)]
pub struct CredentialSource {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub profile: Option<String>,
}

/// How a session against the store gets authenticated.
#[derive(Clone, PartialEq)]
pub enum AuthMode {
    StaticKeys {
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    },
    Profile(String),
}

impl AuthMode {
    pub fn profile_name(&self) -> Option<&str> {
        match self {
            AuthMode::Profile(name) => Some(name),
            AuthMode::StaticKeys { .. } => None,
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn resolve_auth(source: &CredentialSource) -> AuthMode {
    if let (Some(access_key_id), Some(secret_access_key)) = (
        present(&source.access_key_id),
        present(&source.secret_access_key),
    ) {
        return AuthMode::StaticKeys {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            session_token: present(&source.session_token).map(str::to_string),
        };
    }

    let profile = present(&source.profile).unwrap_or(DEFAULT_PROFILE);
    AuthMode::Profile(profile.to_string())
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSource")
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("profile", &self.profile)
            .finish()
    }
}

impl std::fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMode::StaticKeys {
                access_key_id,
                session_token,
                ..
            } => f
                .debug_struct("StaticKeys")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"[REDACTED]")
                .field("session_token", &session_token.as_ref().map(|_| "[REDACTED]"))
                .finish(),
            AuthMode::Profile(name) => f.debug_tuple("Profile").field(name).finish(),
        }
    }
}
