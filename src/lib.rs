//! tfstate-mcp - read-only Terraform state access for tool-calling clients.
//!
//! Lists `.tfstate` files stored in S3 and returns a normalized, searchable
//! resource inventory for any one of them.

pub mod backends;
pub mod config;
pub mod error;
pub mod server;
pub mod terraform;
pub mod tools;

pub use backends::s3::{S3Backend, S3BackendFactory};
pub use backends::{BackendConfig, BackendFactory, CredentialSource, StateBackend};
pub use config::Settings;
pub use error::{TfstateError, TfstateResult};
pub use server::TfstateServer;
pub use terraform::{StateFileListing, StateSummary};
pub use tools::TfstateTools;
