// src/tools/time_entries.rs
// Listing and creating time entries

use crate::api::{TimeEntry, TimeEntryFilter, page_size};
use crate::error::Result;
use crate::mcp::requests::{CreateTimeEntryRequest, ListTimeEntriesRequest};
use crate::mcp::responses::{
    CreateTimeEntryData, CreateTimeEntryOutput, CreatedEntryData, DraftData, Json,
    TimeEntriesData, TimeEntriesOutput, TimeEntryItem,
};
use crate::timesheet::{DraftInput, GateOutcome, TimeEntryDraft, format_minutes, gate};
use crate::tools::ToolContext;
use tracing::info;

/// List time entries matching the given filters.
///
/// Filters go upstream unchanged apart from `person_id="me"`, which becomes the
/// configured person id.
pub async fn list_time_entries<C: ToolContext>(
    ctx: &C,
    req: ListTimeEntriesRequest,
) -> Result<Json<TimeEntriesOutput>> {
    let filter = TimeEntryFilter {
        date: req.date,
        after: req.after,
        before: req.before,
        person_id: ctx.actor().resolve_opt(req.person_id.as_deref())?,
        project_id: req.project_id,
        task_id: req.task_id,
        service_id: req.service_id,
        page_size: page_size(req.limit)?,
    };

    let page = ctx.gateway().list_time_entries(&filter).await?;
    let total_minutes = page
        .items
        .iter()
        .fold(0u32, |acc, e| acc.saturating_add(e.attributes.time));

    if page.items.is_empty() {
        return Ok(Json(TimeEntriesOutput {
            action: "list_time_entries".into(),
            message: "No time entries found.".into(),
            data: Some(TimeEntriesData {
                entries: Vec::new(),
                total: 0,
                total_count: page.total_count,
                total_minutes: 0,
                total_duration: format_minutes(0),
            }),
        }));
    }

    let mut response = format!("{} time entries", page.items.len());
    if let Some(count) = page.total_count {
        response.push_str(&format!(" (of {})", count));
    }
    response.push_str(&format!(", total {}:\n", format_minutes(total_minutes)));

    let entries: Vec<TimeEntryItem> = page.items.iter().map(entry_item).collect();
    for e in &entries {
        response.push_str(&format!("  [{}] {} {}", e.id, e.date, e.duration));
        if let Some(note) = &e.note {
            response.push_str(&format!(" - {}", note));
        }
        response.push('\n');
    }

    Ok(Json(TimeEntriesOutput {
        action: "list_time_entries".into(),
        message: response,
        data: Some(TimeEntriesData {
            total: entries.len(),
            entries,
            total_count: page.total_count,
            total_minutes,
            total_duration: format_minutes(total_minutes),
        }),
    }))
}

fn entry_item(entry: &TimeEntry) -> TimeEntryItem {
    let a = &entry.attributes;
    TimeEntryItem {
        id: entry.id.clone(),
        date: a.date.clone(),
        minutes: a.time,
        duration: format_minutes(a.time),
        billable_minutes: a.billable_time,
        note: a.note.clone().filter(|n| !n.trim().is_empty()),
        person_id: entry.related_id("person").map(String::from),
        service_id: entry.related_id("service").map(String::from),
        task_id: entry.related_id("task").map(String::from),
    }
}

/// Preview or create a time entry.
///
/// Without `confirm=true` this returns a preview and writes nothing. With it,
/// the validated entry is posted exactly once.
pub async fn create_time_entry<C: ToolContext>(
    ctx: &C,
    req: CreateTimeEntryRequest,
) -> Result<Json<CreateTimeEntryOutput>> {
    let input = DraftInput {
        date: req.date,
        time: req.time,
        person_id: req.person_id,
        service_id: req.service_id,
        task_id: req.task_id,
        note: req.note,
        billable_time: req.billable_time,
        confirm: req.confirm.unwrap_or(false),
    };
    let draft = TimeEntryDraft::build(input, ctx.today(), ctx.actor())?;

    let gateway = ctx.gateway();
    let outcome = gate(&draft, |entry| async move {
        gateway.create_time_entry(&entry).await
    })
    .await?;

    match outcome {
        GateOutcome::Preview(message) => Ok(Json(CreateTimeEntryOutput {
            action: "preview".into(),
            message,
            data: Some(CreateTimeEntryData::Preview(DraftData {
                date: draft.date.to_string(),
                minutes: draft.minutes,
                duration: format_minutes(draft.minutes),
                billable_minutes: draft.billable_minutes,
                person_id: draft.person_id,
                service_id: draft.service_id,
                task_id: draft.task_id,
                note: draft.note,
                warnings: draft.warnings,
            })),
        })),
        GateOutcome::Committed(created) => {
            info!(
                entry_id = %created.id,
                service_id = %draft.service_id,
                minutes = draft.minutes,
                "Created time entry"
            );

            let mut message = format!("Time entry {} created.\n", created.id);
            draft.push_fields(&mut message);

            Ok(Json(CreateTimeEntryOutput {
                action: "created".into(),
                message,
                data: Some(CreateTimeEntryData::Created(CreatedEntryData {
                    id: created.id,
                    date: draft.date.to_string(),
                    minutes: draft.minutes,
                    duration: format_minutes(draft.minutes),
                    person_id: draft.person_id,
                    service_id: draft.service_id,
                    task_id: draft.task_id,
                })),
            }))
        }
    }
}
