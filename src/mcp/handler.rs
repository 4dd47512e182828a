// src/mcp/handler.rs
// MCP ServerHandler implementation: protocol lifecycle methods

use super::ProductiveServer;

use rmcp::{
    ErrorData, ServerHandler,
    handler::server::tool::ToolCallContext,
    model::{
        CallToolRequestParams, CallToolResult, ListToolsResult, PaginatedRequestParams,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
};
use std::time::Instant;
use tracing::{info, warn};

const INSTRUCTIONS: &str = "Log time in Productive.io. Work down the hierarchy: \
list_projects -> list_project_deals(project_id) -> list_deal_services(deal_id) -> \
optionally list_project_tasks(project_id) -> create_time_entry(service_id, ...). \
create_time_entry only previews unless confirm=true; always show the preview to the user \
and wait for approval before confirming. person_id \"me\" means the configured user. \
Use timesheet_workflow when unsure what to call next.";

impl ServerHandler for ProductiveServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "productive-mcp".into(),
                title: Some("Productive.io timesheets".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        }))
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let tool_name = request.name.to_string();
            let start = Instant::now();

            let ctx = ToolCallContext::new(self, request, context);
            let result = self.tool_router.call(ctx).await;

            let duration_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(r) if r.is_error != Some(true) => {
                    info!(tool = %tool_name, duration_ms, "Tool call succeeded");
                }
                Ok(r) => {
                    let text = r
                        .content
                        .first()
                        .and_then(|c| c.as_text())
                        .map(|t| t.text.to_string())
                        .unwrap_or_default();
                    warn!(tool = %tool_name, duration_ms, error = %text, "Tool call failed");
                }
                Err(e) => {
                    warn!(tool = %tool_name, duration_ms, error = %e.message, "Tool call rejected");
                }
            }

            result
        }
    }
}
