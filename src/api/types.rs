// src/api/types.rs
// JSON:API documents and resource attributes returned by Productive

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;

/// A JSON:API resource object
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<A> {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Optional in JSON:API; absent on some write responses
    #[serde(default)]
    pub attributes: A,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Value>,
}

impl<A> Resource<A> {
    /// Id of a to-one relationship, if present and non-null
    pub fn related_id(&self, name: &str) -> Option<&str> {
        self.relationships
            .get(name)?
            .data
            .as_ref()?
            .get("id")?
            .as_str()
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            total_count: None,
        }
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total_count = Some(total);
        self
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListDocument<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Meta {
    #[serde(default)]
    pub total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SingleDocument<T> {
    pub data: T,
}

impl<T> From<ListDocument<T>> for Page<T> {
    fn from(doc: ListDocument<T>) -> Self {
        Page {
            items: doc.data,
            total_count: doc.meta.total_count,
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub project_number: Option<String>,
    #[serde(default)]
    pub archived_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
    /// true for budgets, false for deals
    #[serde(default)]
    pub budget: Option<bool>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub budgeted_time: Option<f64>,
    #[serde(default)]
    pub worked_time: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskAttributes {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub closed: Option<bool>,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeEntryAttributes {
    #[serde(default)]
    pub date: String,
    /// Minutes worked
    #[serde(default)]
    pub time: u32,
    #[serde(default)]
    pub billable_time: Option<u32>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonAttributes {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl PersonAttributes {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

pub type Project = Resource<ProjectAttributes>;
pub type Deal = Resource<DealAttributes>;
pub type Service = Resource<ServiceAttributes>;
pub type Task = Resource<TaskAttributes>;
pub type TimeEntry = Resource<TimeEntryAttributes>;
pub type Person = Resource<PersonAttributes>;

// ============================================================================
// Create payloads
// ============================================================================

/// Everything needed to create one time entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTimeEntry {
    pub date: String,
    pub minutes: u32,
    pub billable_minutes: Option<u32>,
    pub note: Option<String>,
    pub person_id: String,
    pub service_id: String,
    pub task_id: Option<String>,
}

impl NewTimeEntry {
    /// JSON:API create document for `POST /time_entries`
    pub fn to_document(&self) -> Value {
        let mut attributes = json!({
            "date": self.date,
            "time": self.minutes,
        });
        if let Some(billable) = self.billable_minutes {
            attributes["billable_time"] = json!(billable);
        }
        if let Some(note) = &self.note {
            attributes["note"] = json!(note);
        }

        let mut relationships = json!({
            "person": { "data": { "type": "people", "id": self.person_id } },
            "service": { "data": { "type": "services", "id": self.service_id } },
        });
        if let Some(task) = &self.task_id {
            relationships["task"] = json!({ "data": { "type": "tasks", "id": task } });
        }

        json!({
            "data": {
                "type": "time_entries",
                "attributes": attributes,
                "relationships": relationships,
            }
        })
    }

    /// The stored record for this entry once Productive has assigned `id`
    pub fn into_record(self, id: String) -> TimeEntry {
        let mut relationships = HashMap::new();
        relationships.insert("person".to_string(), to_one("people", &self.person_id));
        relationships.insert("service".to_string(), to_one("services", &self.service_id));
        if let Some(task) = &self.task_id {
            relationships.insert("task".to_string(), to_one("tasks", task));
        }

        Resource {
            id,
            kind: "time_entries".to_string(),
            attributes: TimeEntryAttributes {
                date: self.date,
                time: self.minutes,
                billable_time: self.billable_minutes,
                note: self.note,
            },
            relationships,
        }
    }
}

fn to_one(kind: &str, id: &str) -> Relationship {
    Relationship {
        data: Some(json!({ "type": kind, "id": id })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_document_with_meta() {
        let body = r#"{
            "data": [
                {"id": "7", "type": "time_entries",
                 "attributes": {"date": "2026-10-16", "time": 90, "note": "Pairing"},
                 "relationships": {"service": {"data": {"type": "services", "id": "S1"}},
                                   "task": {"data": null}}}
            ],
            "meta": {"total_count": 41}
        }"#;
        let doc: ListDocument<TimeEntry> = serde_json::from_str(body).unwrap();
        let page: Page<TimeEntry> = doc.into();
        assert_eq!(page.total_count, Some(41));
        let entry = &page.items[0];
        assert_eq!(entry.attributes.time, 90);
        assert_eq!(entry.related_id("service"), Some("S1"));
        assert_eq!(entry.related_id("task"), None);
        assert_eq!(entry.related_id("person"), None);
    }

    #[test]
    fn test_list_document_without_meta() {
        let body =
            r#"{"data": [{"id": "1", "type": "projects", "attributes": {"name": "Website"}}]}"#;
        let doc: ListDocument<Project> = serde_json::from_str(body).unwrap();
        let page: Page<Project> = doc.into();
        assert_eq!(page.total_count, None);
        assert_eq!(page.items[0].attributes.name, "Website");
    }

    #[test]
    fn test_create_document_shape() {
        let entry = NewTimeEntry {
            date: "2026-10-16".into(),
            minutes: 120,
            billable_minutes: None,
            note: Some("Implemented caching layer".into()),
            person_id: "42".into(),
            service_id: "S1".into(),
            task_id: None,
        };
        let doc = entry.to_document();
        assert_eq!(doc["data"]["type"], "time_entries");
        assert_eq!(doc["data"]["attributes"]["time"], 120);
        assert!(doc["data"]["attributes"].get("billable_time").is_none());
        let relationships = &doc["data"]["relationships"];
        assert_eq!(relationships["person"]["data"]["id"], "42");
        assert_eq!(relationships["service"]["data"]["type"], "services");
        assert!(relationships.get("task").is_none());
    }

    #[test]
    fn test_create_document_with_task_and_billable() {
        let entry = NewTimeEntry {
            date: "2026-10-16".into(),
            minutes: 60,
            billable_minutes: Some(45),
            note: None,
            person_id: "42".into(),
            service_id: "S1".into(),
            task_id: Some("T3".into()),
        };
        let doc = entry.to_document();
        assert_eq!(doc["data"]["attributes"]["billable_time"], 45);
        assert_eq!(doc["data"]["relationships"]["task"]["data"]["id"], "T3");
    }

    #[test]
    fn test_resource_without_attributes() {
        let body = r#"{"data": {"id": "77", "type": "time_entries"}}"#;
        let doc: SingleDocument<TimeEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(doc.data.id, "77");
        assert_eq!(doc.data.attributes.time, 0);
        assert!(doc.data.relationships.is_empty());
    }

    #[test]
    fn test_into_record_keeps_relationships() {
        let entry = NewTimeEntry {
            date: "2026-10-16".into(),
            minutes: 90,
            billable_minutes: Some(60),
            note: Some("Sprint planning".into()),
            person_id: "42".into(),
            service_id: "S1".into(),
            task_id: Some("T3".into()),
        };
        let record = entry.into_record("77".into());
        assert_eq!(record.id, "77");
        assert_eq!(record.attributes.time, 90);
        assert_eq!(record.attributes.billable_time, Some(60));
        assert_eq!(record.related_id("person"), Some("42"));
        assert_eq!(record.related_id("service"), Some("S1"));
        assert_eq!(record.related_id("task"), Some("T3"));
    }

    #[test]
    fn test_person_full_name() {
        let p = PersonAttributes {
            first_name: "Ada".into(),
            last_name: "".into(),
            email: None,
        };
        assert_eq!(p.full_name(), "Ada");
    }
}
