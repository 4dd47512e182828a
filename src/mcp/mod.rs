// src/mcp/mod.rs
// MCP Server implementation

mod handler;
pub mod requests;
pub mod responses;

use crate::api::ProductiveGateway;
use crate::error::ProductiveError;
use crate::timesheet::ActorIdentity;
use crate::tools;
use crate::tools::ToolContext;
use requests::{
    CreateTimeEntryRequest, ListDealServicesRequest, ListProjectDealsRequest,
    ListProjectTasksRequest, ListProjectsRequest, ListTimeEntriesRequest, TimesheetStepRequest,
    TimesheetWorkflowRequest,
};
use responses::{
    CreateTimeEntryOutput, DealsOutput, Json, PersonOutput, ProjectsOutput, ServicesOutput,
    TasksOutput, TimeEntriesOutput, WorkflowOutput,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    tool, tool_router,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// MCP Server state
#[derive(Clone)]
pub struct ProductiveServer {
    gateway: Arc<dyn ProductiveGateway>,
    actor: ActorIdentity,
    tool_router: ToolRouter<Self>,
}

impl ProductiveServer {
    pub fn new(gateway: Arc<dyn ProductiveGateway>, actor: ActorIdentity) -> Self {
        Self {
            gateway,
            actor,
            tool_router: Self::tool_router(),
        }
    }
}

impl ToolContext for ProductiveServer {
    fn gateway(&self) -> &dyn ProductiveGateway {
        self.gateway.as_ref()
    }

    fn actor(&self) -> &ActorIdentity {
        &self.actor
    }
}

/// Turn a tool failure into the message the client sees.
///
/// Input problems are the caller's to fix and only show up at debug level;
/// failures past the point of sending a request are warned about.
fn tool_error(err: ProductiveError) -> String {
    if err.is_local() {
        debug!(error = %err, "Tool input rejected");
    } else {
        warn!(error = %err, "Productive request failed");
    }
    err.to_user_string()
}

#[tool_router]
impl ProductiveServer {
    #[tool(
        description = "List time entries. Filters: date, after, before, person_id (\"me\" = configured user), project_id, task_id, service_id, limit. Returns durations and a total."
    )]
    async fn list_time_entries(
        &self,
        Parameters(req): Parameters<ListTimeEntriesRequest>,
    ) -> Result<Json<TimeEntriesOutput>, String> {
        tools::list_time_entries(self, req)
            .await
            .map_err(tool_error)
    }

    #[tool(
        description = "Create a time entry. Without confirm=true returns a preview and saves nothing; show it to the user, then call again with the same parameters and confirm=true. Requires service_id and a note of at least 10 characters. time: 2h, 1.5 hours, 90m, 45 minutes. date: today, yesterday, YYYY-MM-DD."
    )]
    async fn create_time_entry(
        &self,
        Parameters(req): Parameters<CreateTimeEntryRequest>,
    ) -> Result<Json<CreateTimeEntryOutput>, String> {
        tools::create_time_entry(self, req)
            .await
            .map_err(tool_error)
    }

    #[tool(description = "Step 1: list active projects.")]
    async fn list_projects(
        &self,
        Parameters(req): Parameters<ListProjectsRequest>,
    ) -> Result<Json<ProjectsOutput>, String> {
        tools::list_projects(self, req).await.map_err(tool_error)
    }

    #[tool(
        description = "Step 2: list budgets/deals of a project. Requires project_id; budget_type: deal (1) or budget (2)."
    )]
    async fn list_project_deals(
        &self,
        Parameters(req): Parameters<ListProjectDealsRequest>,
    ) -> Result<Json<DealsOutput>, String> {
        tools::list_project_deals(self, req)
            .await
            .map_err(tool_error)
    }

    #[tool(description = "Step 3: list services of a budget/deal. Requires deal_id.")]
    async fn list_deal_services(
        &self,
        Parameters(req): Parameters<ListDealServicesRequest>,
    ) -> Result<Json<ServicesOutput>, String> {
        tools::list_deal_services(self, req)
            .await
            .map_err(tool_error)
    }

    #[tool(description = "Step 4 (optional): list tasks of a project. Requires project_id.")]
    async fn list_project_tasks(
        &self,
        Parameters(req): Parameters<ListProjectTasksRequest>,
    ) -> Result<Json<TasksOutput>, String> {
        tools::list_project_tasks(self, req)
            .await
            .map_err(tool_error)
    }

    #[tool(description = "Show which Productive person \"me\" refers to.")]
    async fn whoami(&self) -> Result<Json<PersonOutput>, String> {
        tools::whoami(self).await.map_err(tool_error)
    }

    #[tool(
        description = "Guided timesheet workflow: shows the five steps (project, budget, service, task, time_entry), which are done given the ids you pass, and the next tool to call."
    )]
    async fn timesheet_workflow(
        &self,
        Parameters(req): Parameters<TimesheetWorkflowRequest>,
    ) -> Result<Json<WorkflowOutput>, String> {
        tools::timesheet_workflow(req).map_err(tool_error)
    }

    #[tool(
        description = "Guidance for one workflow step (project, budget, service, task, time_entry). Redirects to the earliest step whose ids are missing."
    )]
    async fn timesheet_step(
        &self,
        Parameters(req): Parameters<TimesheetStepRequest>,
    ) -> Result<Json<WorkflowOutput>, String> {
        tools::timesheet_step(req).map_err(tool_error)
    }
}
