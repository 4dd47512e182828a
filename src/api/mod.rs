// src/api/mod.rs
// Productive API gateway: the only component that talks to the network

pub mod client;
pub mod filters;
pub mod types;

pub use client::ProductiveClient;
pub use filters::{
    DealFilter, ListFilter, ProjectFilter, ServiceFilter, TaskFilter, TimeEntryFilter, page_size,
};
pub use types::{Deal, NewTimeEntry, Page, Person, Project, Resource, Service, Task, TimeEntry};

use crate::error::Result;
use async_trait::async_trait;

/// Upstream operations the tools depend on.
///
/// Implemented by [`ProductiveClient`]; tests substitute an in-memory recorder.
/// Each call is a single request with no retries.
#[async_trait]
pub trait ProductiveGateway: Send + Sync {
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Page<Project>>;

    async fn list_deals(&self, filter: &DealFilter) -> Result<Page<Deal>>;

    async fn list_services(&self, filter: &ServiceFilter) -> Result<Page<Service>>;

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Page<Task>>;

    async fn list_time_entries(&self, filter: &TimeEntryFilter) -> Result<Page<TimeEntry>>;

    async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<TimeEntry>;

    async fn get_person(&self, id: &str) -> Result<Person>;
}
