// src/timesheet/gate.rs
// Time entry drafts and the preview-then-confirm write gate

use super::actor::ActorIdentity;
use super::date::{DateSpec, parse_date};
use super::duration::{format_minutes, parse_duration};
use super::hierarchy::{HierarchyContext, Selection, WorkflowStep};
use crate::api::NewTimeEntry;
use crate::error::{ProductiveError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::future::Future;

/// Notes shorter than this are rejected; Productive entries need a real description
pub const MIN_NOTE_CHARS: usize = 10;

/// Raw caller input for a time entry, before any parsing
#[derive(Debug, Clone, Default)]
pub struct DraftInput {
    pub date: String,
    pub time: String,
    pub person_id: String,
    pub service_id: Option<String>,
    pub task_id: Option<String>,
    pub note: Option<String>,
    pub billable_time: Option<String>,
    pub confirm: bool,
}

/// Fully normalized time entry, valid but not yet written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeEntryDraft {
    pub date: DateSpec,
    pub minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_minutes: Option<u32>,
    pub person_id: String,
    pub service_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub note: String,
    pub confirmed: bool,
    /// Soft problems shown to the caller; none of them block creation
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl TimeEntryDraft {
    /// Parse and validate caller input. Nothing here touches the network.
    pub fn build(input: DraftInput, today: NaiveDate, actor: &ActorIdentity) -> Result<Self> {
        let hierarchy =
            HierarchyContext::from_ids(None, None, input.service_id.clone(), input.task_id.clone());
        let service_id = hierarchy
            .required(WorkflowStep::TimeEntryCreation, Selection::Service)
            .map_err(|_| {
                ProductiveError::missing(
                    "service_id",
                    "every time entry must reference a service; pick one with list_deal_services",
                )
            })?
            .to_string();

        let note = validate_note(input.note.as_deref())?;

        if input.person_id.trim().is_empty() {
            return Err(ProductiveError::missing(
                "person_id",
                "pass a person id or \"me\"",
            ));
        }
        let person_id = actor.resolve(input.person_id.trim())?;

        let date = parse_date(&input.date, today)?;
        let minutes = parse_duration(&input.time)?;
        let billable_minutes = input
            .billable_time
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .map(parse_duration)
            .transpose()?;

        let mut warnings = Vec::new();
        if hierarchy.task_id.is_none() {
            warnings.push(
                "No task_id given: the entry will be booked on the service only. \
                 Use list_project_tasks to attach it to a task."
                    .to_string(),
            );
        }
        if minutes == 0 {
            warnings.push("Duration is 0 minutes.".to_string());
        }
        if let Some(billable) = billable_minutes
            && billable > minutes
        {
            warnings.push(format!(
                "Billable time ({}) exceeds worked time ({}).",
                format_minutes(billable),
                format_minutes(minutes)
            ));
        }

        Ok(Self {
            date,
            minutes,
            billable_minutes,
            person_id,
            service_id,
            task_id: hierarchy.task_id,
            note,
            confirmed: input.confirm,
            warnings,
        })
    }

    /// Re-check the invariants a draft must satisfy before it may be committed
    pub fn validate(&self) -> Result<()> {
        if self.service_id.trim().is_empty() {
            return Err(ProductiveError::missing(
                "service_id",
                "service id is blank",
            ));
        }
        if self.person_id.trim().is_empty() {
            return Err(ProductiveError::missing("person_id", "person id is blank"));
        }
        validate_note(Some(&self.note))?;
        // Explicit dates do not depend on the reference day
        parse_date(self.date.as_str(), NaiveDate::MIN)?;
        Ok(())
    }

    pub fn to_new_entry(&self) -> NewTimeEntry {
        NewTimeEntry {
            date: self.date.to_string(),
            minutes: self.minutes,
            billable_minutes: self.billable_minutes,
            note: Some(self.note.clone()),
            person_id: self.person_id.clone(),
            service_id: self.service_id.clone(),
            task_id: self.task_id.clone(),
        }
    }

    /// Human-readable summary of what would be written
    pub fn render_preview(&self) -> String {
        let mut out = String::from("Time entry preview (not saved yet)\n");
        self.push_fields(&mut out);
        if !self.warnings.is_empty() {
            out.push_str("\nWarnings:\n");
            for w in &self.warnings {
                out.push_str(&format!("  - {}\n", w));
            }
        }
        out.push_str(
            "\nTo save this entry, call create_time_entry again with the same parameters \
             and confirm=true.",
        );
        out
    }

    pub(crate) fn push_fields(&self, out: &mut String) {
        out.push_str(&format!("  Date: {}\n", self.date));
        out.push_str(&format!(
            "  Time: {} ({} minutes)\n",
            format_minutes(self.minutes),
            self.minutes
        ));
        if let Some(billable) = self.billable_minutes {
            out.push_str(&format!(
                "  Billable: {} ({} minutes)\n",
                format_minutes(billable),
                billable
            ));
        }
        out.push_str(&format!("  Person: {}\n", self.person_id));
        out.push_str(&format!("  Service: {}\n", self.service_id));
        out.push_str(&format!(
            "  Task: {}\n",
            self.task_id.as_deref().unwrap_or("(none)")
        ));
        out.push_str(&format!("  Note: {}\n", self.note));
    }
}

fn validate_note(note: Option<&str>) -> Result<String> {
    let note = note.map(str::trim).unwrap_or_default();
    let len = note.chars().count();
    if len < MIN_NOTE_CHARS {
        return Err(ProductiveError::missing(
            "note",
            format!(
                "a description of the work of at least {} characters is required (got {})",
                MIN_NOTE_CHARS, len
            ),
        ));
    }
    Ok(note.to_string())
}

/// Result of passing a draft through the gate
#[derive(Debug)]
pub enum GateOutcome<T> {
    /// Not confirmed: nothing was written
    Preview(String),
    /// Confirmed: the commit function ran once and returned this record
    Committed(T),
}

/// Preview or commit a draft.
///
/// Every call re-validates the whole draft; unconfirmed drafts never reach
/// `commit`, confirmed ones reach it exactly once.
pub async fn gate<T, F, Fut>(draft: &TimeEntryDraft, commit: F) -> Result<GateOutcome<T>>
where
    F: FnOnce(NewTimeEntry) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    draft.validate()?;

    if !draft.confirmed {
        return Ok(GateOutcome::Preview(draft.render_preview()));
    }

    let record = commit(draft.to_new_entry()).await?;
    Ok(GateOutcome::Committed(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn actor() -> ActorIdentity {
        ActorIdentity::new(Some("42".to_string()))
    }

    fn input(confirm: bool) -> DraftInput {
        DraftInput {
            date: "today".into(),
            time: "2h".into(),
            person_id: "me".into(),
            service_id: Some("S1".into()),
            task_id: None,
            note: Some("Implemented caching layer".into()),
            billable_time: None,
            confirm,
        }
    }

    #[test]
    fn test_build_normalizes() {
        let draft = TimeEntryDraft::build(input(false), today(), &actor()).unwrap();
        assert_eq!(draft.date.as_str(), "2026-10-16");
        assert_eq!(draft.minutes, 120);
        assert_eq!(draft.person_id, "42");
        assert_eq!(draft.service_id, "S1");
        assert!(!draft.confirmed);
    }

    #[test]
    fn test_missing_service_is_hard_failure() {
        let mut i = input(false);
        i.service_id = None;
        match TimeEntryDraft::build(i, today(), &actor()) {
            Err(ProductiveError::MissingRequiredField { field, .. }) => {
                assert_eq!(field, "service_id")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_task_is_warning() {
        let draft = TimeEntryDraft::build(input(false), today(), &actor()).unwrap();
        assert!(draft.warnings.iter().any(|w| w.contains("task_id")));

        let mut i = input(false);
        i.task_id = Some("T9".into());
        let draft = TimeEntryDraft::build(i, today(), &actor()).unwrap();
        assert!(draft.warnings.is_empty());
        assert_eq!(draft.task_id.as_deref(), Some("T9"));
    }

    #[test]
    fn test_short_note_rejected() {
        for note in [None, Some("fix"), Some("  short    ")] {
            let mut i = input(true);
            i.note = note.map(String::from);
            match TimeEntryDraft::build(i, today(), &actor()) {
                Err(ProductiveError::MissingRequiredField { field, .. }) => {
                    assert_eq!(field, "note")
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_me_without_actor() {
        let nobody = ActorIdentity::none();
        let err = TimeEntryDraft::build(input(false), today(), &nobody).unwrap_err();
        assert!(matches!(err, ProductiveError::NoActorConfigured));
    }

    #[test]
    fn test_billable_parsed_and_checked() {
        let mut i = input(false);
        i.task_id = Some("T1".into());
        i.billable_time = Some("150m".into());
        let draft = TimeEntryDraft::build(i, today(), &actor()).unwrap();
        assert_eq!(draft.billable_minutes, Some(150));
        assert!(draft.warnings.iter().any(|w| w.contains("exceeds")));
    }

    #[test]
    fn test_zero_duration_warns() {
        let mut i = input(false);
        i.time = "0m".into();
        let draft = TimeEntryDraft::build(i, today(), &actor()).unwrap();
        assert_eq!(draft.minutes, 0);
        assert!(draft.warnings.iter().any(|w| w.contains("0 minutes")));
    }

    #[test]
    fn test_preview_text() {
        let draft = TimeEntryDraft::build(input(false), today(), &actor()).unwrap();
        let text = draft.render_preview();
        assert!(text.contains("2h (120 minutes)"));
        assert!(text.contains("Person: 42"));
        assert!(text.contains("confirm=true"));
        assert!(text.contains("Warnings:"));
    }

    #[tokio::test]
    async fn test_gate_preview_never_commits() {
        let calls = AtomicUsize::new(0);
        let draft = TimeEntryDraft::build(input(false), today(), &actor()).unwrap();
        for _ in 0..3 {
            let outcome = gate(&draft, |_entry| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await
            .unwrap();
            assert!(matches!(outcome, GateOutcome::Preview(_)));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_gate_confirmed_commits_once() {
        let calls = AtomicUsize::new(0);
        let draft = TimeEntryDraft::build(input(true), today(), &actor()).unwrap();
        let outcome = gate(&draft, |entry| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(entry) }
        })
        .await
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        match outcome {
            GateOutcome::Committed(entry) => {
                assert_eq!(entry.minutes, 120);
                assert_eq!(entry.person_id, "42");
                assert_eq!(entry.service_id, "S1");
                assert_eq!(entry.date, "2026-10-16");
            }
            GateOutcome::Preview(_) => panic!("expected commit"),
        }
    }

    #[tokio::test]
    async fn test_gate_revalidates_tampered_draft() {
        let calls = AtomicUsize::new(0);
        let mut draft = TimeEntryDraft::build(input(true), today(), &actor()).unwrap();
        draft.note = "tiny".into();
        let result = gate(&draft, |_entry| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
