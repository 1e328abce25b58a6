mod cli;

use clap::Parser;
use color_eyre::eyre::Result;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use tfstate_mcp::{TfstateServer, TfstateTools};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // stdout carries the MCP protocol; logs must stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = Cli::parse().into_settings();

    match settings.bucket_name() {
        Some(bucket) => tracing::info!(bucket, "serving Terraform state over stdio"),
        None => tracing::warn!(
            "no bucket configured; tool calls will fail until TFSTATE_BUCKET_NAME or --bucket is set"
        ),
    }

    let server = TfstateServer::new(TfstateTools::new(settings));
    let service = server.serve(rmcp::transport::stdio()).await?;
    let reason = service.waiting().await?;

    tracing::info!(?reason, "server stopped");

    Ok(())
}
