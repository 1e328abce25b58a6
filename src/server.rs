use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::tools::TfstateTools;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListTfstateFilesParams {
    /// Key prefix to search under, e.g. 'terraform/prod/'. Empty lists the whole bucket.
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadTfstateParams {
    /// Object key of the state file, e.g. 'terraform/prod/terraform.tfstate'.
    pub tfstate_path: String,
    /// Case-insensitive substring matched against resource type or name, e.g. 'aws_instance'.
    #[serde(default)]
    pub search_query: Option<String>,
}

/// Serves [`TfstateTools`] over MCP.
#[derive(Clone)]
pub struct TfstateServer {
    tools: Arc<TfstateTools>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TfstateServer {
    pub fn new(tools: TfstateTools) -> Self {
        Self {
            tools: Arc::new(tools),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "list_tfstate_files",
        description = "List every .tfstate file in the configured S3 bucket, optionally under a key prefix."
    )]
    async fn list_tfstate_files(
        &self,
        params: Parameters<ListTfstateFilesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let text = self.tools.list_tfstate_files(&params.0.prefix).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "read_tfstate",
        description = "Read a .tfstate file from the configured S3 bucket and return its metadata and resources, optionally filtered by resource type or name."
    )]
    async fn read_tfstate(
        &self,
        params: Parameters<ReadTfstateParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let ReadTfstateParams {
            tfstate_path,
            search_query,
        } = params.0;
        let text = self
            .tools
            .read_tfstate(&tfstate_path, search_query.as_deref())
            .await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for TfstateServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Read-only access to Terraform state stored in S3 (tools: list_tfstate_files, read_tfstate). \
                 Results are JSON text; failures are text starting with 'Error: '."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
