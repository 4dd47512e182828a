// src/mcp/requests.rs
// MCP tool request types

use rmcp::schemars;
use serde::Deserialize;

// ============================================================================
// Workflow steps 1-4: listings
// ============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListProjectsRequest {
    #[schemars(description = "Max results (1-200, default 30)")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListProjectDealsRequest {
    #[schemars(description = "Project ID from list_projects (required)")]
    pub project_id: String,
    #[schemars(description = "Filter by type: deal (1) or budget (2). Omit to list both")]
    pub budget_type: Option<String>,
    #[schemars(description = "Max results (1-200, default 30)")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListDealServicesRequest {
    #[schemars(description = "Budget/deal ID from list_project_deals (required)")]
    pub deal_id: String,
    #[schemars(description = "Max results (1-200, default 30)")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListProjectTasksRequest {
    #[schemars(description = "Project ID from list_projects (required)")]
    pub project_id: String,
    #[schemars(description = "Max results (1-200, default 30)")]
    pub limit: Option<i64>,
}

// ============================================================================
// Time entries
// ============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListTimeEntriesRequest {
    #[schemars(description = "Exact date (YYYY-MM-DD)")]
    pub date: Option<String>,
    #[schemars(description = "Entries on or after this date (YYYY-MM-DD)")]
    pub after: Option<String>,
    #[schemars(description = "Entries on or before this date (YYYY-MM-DD)")]
    pub before: Option<String>,
    #[schemars(description = "Person ID, or \"me\" for the configured user")]
    pub person_id: Option<String>,
    #[schemars(description = "Filter by project ID")]
    pub project_id: Option<String>,
    #[schemars(description = "Filter by task ID")]
    pub task_id: Option<String>,
    #[schemars(description = "Filter by service ID")]
    pub service_id: Option<String>,
    #[schemars(description = "Max results (1-200, default 30)")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Clone, Deserialize, schemars::JsonSchema)]
pub struct CreateTimeEntryRequest {
    #[schemars(description = "Date: today, yesterday or YYYY-MM-DD")]
    pub date: String,
    #[schemars(description = "Duration: 2h, 1.5 hours, 90m, 45 minutes, or a bare number of hours")]
    pub time: String,
    #[schemars(description = "Person ID, or \"me\" for the configured user")]
    pub person_id: String,
    #[schemars(description = "Service ID from list_deal_services (required)")]
    pub service_id: Option<String>,
    #[schemars(description = "Task ID from list_project_tasks (recommended)")]
    pub task_id: Option<String>,
    #[schemars(description = "Description of the work, at least 10 characters")]
    pub note: Option<String>,
    #[schemars(description = "Billable duration, same formats as time")]
    pub billable_time: Option<String>,
    #[schemars(
        description = "Set true only after the user approved the preview. Omitted or false returns a preview and saves nothing"
    )]
    pub confirm: Option<bool>,
}

// ============================================================================
// Guided workflow
// ============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct TimesheetWorkflowRequest {
    #[schemars(description = "Selected project ID, if any")]
    pub project_id: Option<String>,
    #[schemars(description = "Selected budget/deal ID, if any")]
    pub deal_id: Option<String>,
    #[schemars(description = "Selected service ID, if any")]
    pub service_id: Option<String>,
    #[schemars(description = "Selected task ID, if any")]
    pub task_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct TimesheetStepRequest {
    #[schemars(description = "Step: project, budget, service, task or time_entry")]
    pub step: String,
    #[schemars(description = "Selected project ID, if any")]
    pub project_id: Option<String>,
    #[schemars(description = "Selected budget/deal ID, if any")]
    pub deal_id: Option<String>,
    #[schemars(description = "Selected service ID, if any")]
    pub service_id: Option<String>,
    #[schemars(description = "Selected task ID, if any")]
    pub task_id: Option<String>,
}
