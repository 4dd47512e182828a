//! Tool implementations for MCP.
//!
//! All tools are async functions that accept `&impl ToolContext` and return
//! `crate::Result<Json<...>>`. The MCP layer converts errors to user strings.

pub mod budgets;
pub mod projects;
pub mod time_entries;
pub mod workflow;

pub use budgets::{list_deal_services, list_project_deals};
pub use projects::{list_project_tasks, list_projects, whoami};
pub use time_entries::{create_time_entry, list_time_entries};
pub use workflow::{timesheet_step, timesheet_workflow};

use crate::api::ProductiveGateway;
use crate::timesheet::ActorIdentity;
use chrono::NaiveDate;

/// Common context required by all tools.
/// Implemented by ProductiveServer (MCP) and the test context.
pub trait ToolContext: Send + Sync {
    /// Upstream Productive API
    fn gateway(&self) -> &dyn ProductiveGateway;

    /// The configured "me"
    fn actor(&self) -> &ActorIdentity;

    /// Reference day for "today"/"yesterday"
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
