// src/tools/projects.rs
// Workflow steps 1 and 4 (projects, tasks) and the configured identity

use crate::api::{ProjectFilter, TaskFilter, page_size};
use crate::error::{ProductiveError, Result};
use crate::mcp::requests::{ListProjectTasksRequest, ListProjectsRequest};
use crate::mcp::responses::{
    Json, PersonData, PersonOutput, ProjectItem, ProjectsData, ProjectsOutput, TaskItem,
    TasksData, TasksOutput,
};
use crate::timesheet::{HierarchyContext, Selection, WorkflowStep};
use crate::tools::ToolContext;

/// List active projects
pub async fn list_projects<C: ToolContext>(
    ctx: &C,
    req: ListProjectsRequest,
) -> Result<Json<ProjectsOutput>> {
    let filter = ProjectFilter {
        page_size: page_size(req.limit)?,
    };
    let page = ctx.gateway().list_projects(&filter).await?;

    let projects: Vec<ProjectItem> = page
        .items
        .into_iter()
        .map(|p| ProjectItem {
            id: p.id,
            name: p.attributes.name,
            number: p.attributes.project_number,
        })
        .collect();

    let message = if projects.is_empty() {
        "No active projects found.".to_string()
    } else {
        let mut response = format!("{} projects:\n", projects.len());
        for p in &projects {
            match &p.number {
                Some(n) => response.push_str(&format!("  [{}] {} (#{})\n", p.id, p.name, n)),
                None => response.push_str(&format!("  [{}] {}\n", p.id, p.name)),
            }
        }
        response.push_str("\nNext: pick one and call list_project_deals with its project_id.");
        response
    };

    Ok(Json(ProjectsOutput {
        action: "list_projects".into(),
        message,
        data: Some(ProjectsData {
            total: projects.len(),
            projects,
            total_count: page.total_count,
        }),
    }))
}

/// List tasks of a project
pub async fn list_project_tasks<C: ToolContext>(
    ctx: &C,
    req: ListProjectTasksRequest,
) -> Result<Json<TasksOutput>> {
    let hierarchy = HierarchyContext::from_ids(Some(req.project_id), None, None, None);
    let project_id = hierarchy
        .required(WorkflowStep::TaskSelection, Selection::Project)?
        .to_string();

    let filter = TaskFilter {
        project_id: project_id.clone(),
        page_size: page_size(req.limit)?,
    };
    let page = ctx.gateway().list_tasks(&filter).await?;

    let tasks: Vec<TaskItem> = page
        .items
        .into_iter()
        .map(|t| TaskItem {
            id: t.id,
            title: t.attributes.title,
            closed: t.attributes.closed.unwrap_or(false),
        })
        .collect();

    let message = if tasks.is_empty() {
        format!(
            "No tasks found for project {}. Tasks are optional: \
             create_time_entry works with a service_id alone.",
            project_id
        )
    } else {
        let mut response = format!("{} tasks for project {}:\n", tasks.len(), project_id);
        for t in &tasks {
            let status = if t.closed { " (closed)" } else { "" };
            response.push_str(&format!("  [{}] {}{}\n", t.id, t.title, status));
        }
        response
    };

    Ok(Json(TasksOutput {
        action: "list_project_tasks".into(),
        message,
        data: Some(TasksData {
            project_id,
            total: tasks.len(),
            tasks,
            total_count: page.total_count,
        }),
    }))
}

/// Show the person "me" resolves to
pub async fn whoami<C: ToolContext>(ctx: &C) -> Result<Json<PersonOutput>> {
    let id = ctx
        .actor()
        .person_id()
        .ok_or(ProductiveError::NoActorConfigured)?;
    let person = ctx.gateway().get_person(id).await?;

    let name = person.attributes.full_name();
    let mut message = format!("\"me\" is person {}: {}", person.id, name);
    if let Some(email) = &person.attributes.email {
        message.push_str(&format!(" <{}>", email));
    }

    Ok(Json(PersonOutput {
        action: "whoami".into(),
        message,
        data: Some(PersonData {
            id: person.id,
            name,
            email: person.attributes.email,
        }),
    }))
}
