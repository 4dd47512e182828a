// src/timesheet/guide.rs
// Advisory text for walking a caller through the timesheet steps

use super::hierarchy::{HierarchyContext, Selection, WorkflowStep};
use serde_json::{Map, Value, json};

/// Recommended next call for one workflow step
#[derive(Debug, Clone, PartialEq)]
pub struct StepGuide {
    /// Step the caller asked about
    pub requested: WorkflowStep,
    /// Step the caller should actually do now (an earlier one if ancestors are missing)
    pub step: WorkflowStep,
    pub tool: &'static str,
    pub arguments: Map<String, Value>,
    pub instruction: String,
    /// Fields the requested step needs but the caller has not supplied
    pub missing: Vec<&'static str>,
}

impl StepGuide {
    pub fn redirected(&self) -> bool {
        self.requested != self.step
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.redirected() {
            out.push_str(&format!(
                "Cannot do the {} step yet: missing {}.\n",
                self.requested,
                self.missing.join(", ")
            ));
        }
        out.push_str(&format!(
            "Step {} of 5 ({}): {}\n",
            self.step.number(),
            self.step,
            self.instruction
        ));
        out.push_str(&format!(
            "Next call: {}({})",
            self.tool,
            Value::Object(self.arguments.clone())
        ));
        out
    }
}

/// Where a step stands given the caller's known identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Done,
    Next,
    Pending,
    Optional,
}

impl StepState {
    pub fn label(self) -> &'static str {
        match self {
            StepState::Done => "done",
            StepState::Next => "next",
            StepState::Pending => "pending",
            StepState::Optional => "optional",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepStatus {
    pub step: WorkflowStep,
    pub state: StepState,
    pub selected: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WorkflowOverview {
    pub steps: Vec<StepStatus>,
    pub next: StepGuide,
}

impl WorkflowOverview {
    pub fn render(&self) -> String {
        let mut out = String::from("Timesheet workflow:\n");
        for s in &self.steps {
            let marker = match s.state {
                StepState::Done => "[x]",
                StepState::Next => "[>]",
                StepState::Pending | StepState::Optional => "[ ]",
            };
            out.push_str(&format!("  {} {}. {}", marker, s.step.number(), s.step));
            if let Some(id) = &s.selected {
                out.push_str(&format!(" = {}", id));
            }
            if s.state == StepState::Optional {
                out.push_str(" (optional)");
            }
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.next.render());
        out
    }
}

/// Guidance for `requested`, redirecting to the earliest step whose output is missing.
pub fn guide_step(requested: WorkflowStep, ctx: &HierarchyContext) -> StepGuide {
    let missing: Vec<&'static str> = ctx
        .missing_for(requested)
        .iter()
        .map(|s| s.field())
        .collect();

    let mut step = requested;
    while let Some(&first_missing) = ctx.missing_for(step).first() {
        step = first_missing.producer();
    }

    let (tool, arguments, instruction) = recommendation(step, ctx);
    StepGuide {
        requested,
        step,
        tool,
        arguments,
        instruction,
        missing,
    }
}

/// Status of every step plus guidance for the next one
pub fn overview(ctx: &HierarchyContext) -> WorkflowOverview {
    let next_step = ctx.next_step();
    let steps = WorkflowStep::ALL
        .iter()
        .map(|&step| {
            let selected = step.produces().and_then(|s| ctx.get(s)).map(String::from);
            // A selection only counts once everything above it is known too
            let state = if selected.is_some() && ctx.missing_for(step).is_empty() {
                StepState::Done
            } else if step == next_step {
                StepState::Next
            } else if step.is_optional() {
                StepState::Optional
            } else {
                StepState::Pending
            };
            StepStatus {
                step,
                state,
                selected,
            }
        })
        .collect();

    WorkflowOverview {
        steps,
        next: guide_step(next_step, ctx),
    }
}

const PROJECT_INSTRUCTION: &str = "List projects and ask the user which one the work \
belongs to. Keep its id as project_id.";

const ENTRY_INSTRUCTION: &str = "Collect date, duration and a note, then call \
create_time_entry without confirm to get a preview. Show it to the user and repeat the same \
call with confirm=true only after they approve.";

fn recommendation(
    step: WorkflowStep,
    ctx: &HierarchyContext,
) -> (&'static str, Map<String, Value>, String) {
    let id = |s: Selection| ctx.get(s).unwrap_or_default().to_string();
    let mut args = Map::new();

    match step {
        WorkflowStep::ProjectSelection => ("list_projects", args, PROJECT_INSTRUCTION.to_string()),
        WorkflowStep::BudgetSelection => {
            args.insert("project_id".into(), json!(id(Selection::Project)));
            (
                "list_project_deals",
                args,
                format!(
                    "List the budgets and deals of project {} and let the user pick one. \
                     Keep its id as deal_id. Pass budget_type=budget or budget_type=deal \
                     to narrow the list.",
                    id(Selection::Project)
                ),
            )
        }
        WorkflowStep::ServiceSelection => {
            args.insert("deal_id".into(), json!(id(Selection::Deal)));
            (
                "list_deal_services",
                args,
                format!(
                    "List the services of deal {} and let the user pick the kind of work. \
                     Keep its id as service_id.",
                    id(Selection::Deal)
                ),
            )
        }
        WorkflowStep::TaskSelection => {
            args.insert("project_id".into(), json!(id(Selection::Project)));
            let mut text = format!(
                "Optionally list the tasks of project {} and let the user pick one as task_id.",
                id(Selection::Project)
            );
            if ctx.can_create_entry() {
                text.push_str(
                    " If the work is not tied to a task, go straight to create_time_entry.",
                );
            }
            ("list_project_tasks", args, text)
        }
        WorkflowStep::TimeEntryCreation => {
            args.insert("service_id".into(), json!(id(Selection::Service)));
            if let Some(task) = ctx.get(Selection::Task) {
                args.insert("task_id".into(), json!(task));
            }
            args.insert("person_id".into(), json!("me"));
            args.insert("date".into(), json!("today"));
            args.insert("time".into(), json!("<duration, e.g. 2h or 90m>"));
            args.insert(
                "note".into(),
                json!("<what was done, at least 10 characters>"),
            );
            ("create_time_entry", args, ENTRY_INSTRUCTION.to_string())
        }
    }
}
