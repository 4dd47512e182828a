//! Structured output types for MCP tools.
//!
//! Each tool returns a wrapper struct with `action`, `message`, and optional typed `data`.
//! Using `Json<T>` return types, rmcp auto-infers `outputSchema` for each tool.
//! The root type is always an object (MCP requirement).

pub use rmcp::handler::server::wrapper::Json;
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Serialize, JsonSchema)]
pub struct ToolOutput<T> {
    pub action: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

// ============================================================================
// Listings
// ============================================================================

pub type ProjectsOutput = ToolOutput<ProjectsData>;

#[derive(Debug, Serialize, JsonSchema)]
pub struct ProjectsData {
    pub projects: Vec<ProjectItem>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ProjectItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

pub type DealsOutput = ToolOutput<DealsData>;

#[derive(Debug, Serialize, JsonSchema)]
pub struct DealsData {
    pub project_id: String,
    pub deals: Vec<DealItem>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct DealItem {
    pub id: String,
    pub name: String,
    /// "deal" or "budget"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

pub type ServicesOutput = ToolOutput<ServicesData>;

#[derive(Debug, Serialize, JsonSchema)]
pub struct ServicesData {
    pub deal_id: String,
    pub services: Vec<ServiceItem>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ServiceItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budgeted_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worked_time: Option<f64>,
}

pub type TasksOutput = ToolOutput<TasksData>;

#[derive(Debug, Serialize, JsonSchema)]
pub struct TasksData {
    pub project_id: String,
    pub tasks: Vec<TaskItem>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub closed: bool,
}

pub type PersonOutput = ToolOutput<PersonData>;

#[derive(Debug, Serialize, JsonSchema)]
pub struct PersonData {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ============================================================================
// Time entries
// ============================================================================

pub type TimeEntriesOutput = ToolOutput<TimeEntriesData>;

#[derive(Debug, Serialize, JsonSchema)]
pub struct TimeEntriesData {
    pub entries: Vec<TimeEntryItem>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// Sum of minutes across the returned page
    pub total_minutes: u32,
    pub total_duration: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct TimeEntryItem {
    pub id: String,
    pub date: String,
    pub minutes: u32,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

pub type CreateTimeEntryOutput = ToolOutput<CreateTimeEntryData>;

#[derive(Debug, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum CreateTimeEntryData {
    Preview(DraftData),
    Created(CreatedEntryData),
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct DraftData {
    pub date: String,
    pub minutes: u32,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_minutes: Option<u32>,
    pub person_id: String,
    pub service_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub note: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct CreatedEntryData {
    pub id: String,
    pub date: String,
    pub minutes: u32,
    pub duration: String,
    pub person_id: String,
    pub service_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

// ============================================================================
// Guided workflow
// ============================================================================

pub type WorkflowOutput = ToolOutput<WorkflowData>;

#[derive(Debug, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum WorkflowData {
    Overview(WorkflowOverviewData),
    Step(StepGuideData),
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct WorkflowOverviewData {
    pub steps: Vec<StepStatusItem>,
    pub next: StepGuideData,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct StepStatusItem {
    pub number: usize,
    pub step: String,
    /// done, next, pending or optional
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct StepGuideData {
    pub requested_step: String,
    pub step: String,
    pub step_number: usize,
    pub tool: String,
    pub arguments: serde_json::Value,
    pub instruction: String,
    pub missing: Vec<String>,
}
