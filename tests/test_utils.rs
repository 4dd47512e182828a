//! Test utilities for productive-mcp integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use productive::api::{
    Deal, DealFilter, NewTimeEntry, Page, Person, ProductiveGateway, Project, ProjectFilter,
    Service, ServiceFilter, Task, TaskFilter, TimeEntry, TimeEntryFilter,
};
use productive::timesheet::ActorIdentity;
use productive::tools::ToolContext;
use productive::{ProductiveError, Result};
use serde_json::json;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed reference day for "today"
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// Build a time entry resource the way Productive returns it
pub fn time_entry(id: &str, date: &str, minutes: u32, note: &str) -> TimeEntry {
    serde_json::from_value(json!({
        "id": id,
        "type": "time_entries",
        "attributes": { "date": date, "time": minutes, "note": note },
        "relationships": {
            "person": { "data": { "type": "people", "id": "42" } },
            "service": { "data": { "type": "services", "id": "S1" } }
        }
    }))
    .unwrap()
}

pub fn deal(id: &str, name: &str, budget: bool) -> Deal {
    serde_json::from_value(json!({
        "id": id,
        "type": "deals",
        "attributes": { "name": name, "budget": budget }
    }))
    .unwrap()
}

/// Value recorded in one of the gateway's `last_*_filter` slots
pub fn recorded<T: Clone>(slot: &Mutex<Option<T>>) -> T {
    slot.lock().unwrap().clone().expect("no call recorded")
}

/// In-memory gateway that records every call
#[derive(Default)]
pub struct MockGateway {
    pub created: Mutex<Vec<NewTimeEntry>>,
    pub create_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub entries: Vec<TimeEntry>,
    pub entries_total: Option<u64>,
    pub deals: Vec<Deal>,
    pub last_entry_filter: Mutex<Option<TimeEntryFilter>>,
    pub last_deal_filter: Mutex<Option<DealFilter>>,
    pub last_service_filter: Mutex<Option<ServiceFilter>>,
    pub last_task_filter: Mutex<Option<TaskFilter>>,
    /// When set, create_time_entry fails with a 422 carrying this detail
    pub reject_create: Option<String>,
}

impl MockGateway {
    pub fn create_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductiveGateway for MockGateway {
    async fn list_projects(&self, _filter: &ProjectFilter) -> Result<Page<Project>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Page::new(Vec::new()))
    }

    async fn list_deals(&self, filter: &DealFilter) -> Result<Page<Deal>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_deal_filter.lock().unwrap() = Some(filter.clone());
        Ok(Page::new(self.deals.clone()))
    }

    async fn list_services(&self, filter: &ServiceFilter) -> Result<Page<Service>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_service_filter.lock().unwrap() = Some(filter.clone());
        Ok(Page::new(Vec::new()))
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Page<Task>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_task_filter.lock().unwrap() = Some(filter.clone());
        Ok(Page::new(Vec::new()))
    }

    async fn list_time_entries(&self, filter: &TimeEntryFilter) -> Result<Page<TimeEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_entry_filter.lock().unwrap() = Some(filter.clone());
        let mut page = Page::new(self.entries.clone());
        if let Some(total) = self.entries_total {
            page = page.with_total(total);
        }
        Ok(page)
    }

    async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<TimeEntry> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(detail) = &self.reject_create {
            return Err(ProductiveError::UpstreamRejected {
                status: 422,
                detail: detail.clone(),
            });
        }
        self.created.lock().unwrap().push(entry.clone());
        Ok(time_entry(
            &format!("TE-{}", 1000 + n),
            &entry.date,
            entry.minutes,
            entry.note.as_deref().unwrap_or_default(),
        ))
    }

    async fn get_person(&self, id: &str) -> Result<Person> {
        Ok(serde_json::from_value(json!({
            "id": id,
            "type": "people",
            "attributes": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com"
            }
        }))
        .unwrap())
    }
}

/// Test context that implements ToolContext for integration testing
pub struct TestContext {
    pub gateway: MockGateway,
    actor: ActorIdentity,
}

impl TestContext {
    /// Context with person "42" behind "me"
    pub fn new() -> Self {
        Self::with_gateway(MockGateway::default())
    }

    pub fn with_gateway(gateway: MockGateway) -> Self {
        Self {
            gateway,
            actor: ActorIdentity::new(Some("42".to_string())),
        }
    }

    /// Context with no PRODUCTIVE_USER_ID
    pub fn without_actor() -> Self {
        Self {
            gateway: MockGateway::default(),
            actor: ActorIdentity::none(),
        }
    }
}

impl ToolContext for TestContext {
    fn gateway(&self) -> &dyn ProductiveGateway {
        &self.gateway
    }

    fn actor(&self) -> &ActorIdentity {
        &self.actor
    }

    fn today(&self) -> NaiveDate {
        today()
    }
}
