// src/timesheet/hierarchy.rs
// Project -> Budget/Deal -> Service -> Task -> Time entry dependency rules

use crate::error::{ProductiveError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Identifier produced by one workflow step and consumed by later ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    Project,
    Deal,
    Service,
    Task,
}

impl Selection {
    pub fn field(self) -> &'static str {
        match self {
            Selection::Project => "project_id",
            Selection::Deal => "deal_id",
            Selection::Service => "service_id",
            Selection::Task => "task_id",
        }
    }

    /// Step that yields this identifier
    pub fn producer(self) -> WorkflowStep {
        match self {
            Selection::Project => WorkflowStep::ProjectSelection,
            Selection::Deal => WorkflowStep::BudgetSelection,
            Selection::Service => WorkflowStep::ServiceSelection,
            Selection::Task => WorkflowStep::TaskSelection,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    ProjectSelection,
    BudgetSelection,
    ServiceSelection,
    TaskSelection,
    TimeEntryCreation,
}

impl WorkflowStep {
    pub const ALL: [WorkflowStep; 5] = [
        WorkflowStep::ProjectSelection,
        WorkflowStep::BudgetSelection,
        WorkflowStep::ServiceSelection,
        WorkflowStep::TaskSelection,
        WorkflowStep::TimeEntryCreation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WorkflowStep::ProjectSelection => "project",
            WorkflowStep::BudgetSelection => "budget",
            WorkflowStep::ServiceSelection => "service",
            WorkflowStep::TaskSelection => "task",
            WorkflowStep::TimeEntryCreation => "time_entry",
        }
    }

    /// 1-based position in the workflow
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// Identifiers that must already be known before this step can run
    pub fn requires(self) -> &'static [Selection] {
        match self {
            WorkflowStep::ProjectSelection => &[],
            WorkflowStep::BudgetSelection => &[Selection::Project],
            WorkflowStep::ServiceSelection => &[Selection::Deal],
            WorkflowStep::TaskSelection => &[Selection::Project],
            WorkflowStep::TimeEntryCreation => &[Selection::Service],
        }
    }

    pub fn produces(self) -> Option<Selection> {
        match self {
            WorkflowStep::ProjectSelection => Some(Selection::Project),
            WorkflowStep::BudgetSelection => Some(Selection::Deal),
            WorkflowStep::ServiceSelection => Some(Selection::Service),
            WorkflowStep::TaskSelection => Some(Selection::Task),
            WorkflowStep::TimeEntryCreation => None,
        }
    }

    /// Task selection is advisory; every other step blocks progress
    pub fn is_optional(self) -> bool {
        self == WorkflowStep::TaskSelection
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkflowStep {
    type Err = ProductiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "project" | "projects" | "project_selection" | "1" => {
                Ok(WorkflowStep::ProjectSelection)
            }
            "budget" | "deal" | "budgets" | "deals" | "budget_selection" | "2" => {
                Ok(WorkflowStep::BudgetSelection)
            }
            "service" | "services" | "service_selection" | "3" => {
                Ok(WorkflowStep::ServiceSelection)
            }
            "task" | "tasks" | "task_selection" | "4" => Ok(WorkflowStep::TaskSelection),
            "time_entry" | "entry" | "time" | "time_entry_creation" | "5" => {
                Ok(WorkflowStep::TimeEntryCreation)
            }
            other => Err(ProductiveError::InvalidInputShape(format!(
                "unknown workflow step '{}'; use project, budget, service, task or time_entry",
                other
            ))),
        }
    }
}

/// Kind of billing container beneath a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    Deal = 1,
    Budget = 2,
}

impl BudgetType {
    /// Value sent as `filter[budget_type]`
    pub fn filter_value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            BudgetType::Deal => "deal",
            BudgetType::Budget => "budget",
        }
    }
}

impl FromStr for BudgetType {
    type Err = ProductiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "deal" | "deals" => Ok(BudgetType::Deal),
            "2" | "budget" | "budgets" => Ok(BudgetType::Budget),
            other => Err(ProductiveError::InvalidInputShape(format!(
                "unknown budget_type '{}'. Use deal (1) or budget (2), or omit for both",
                other
            ))),
        }
    }
}

/// Identifiers the caller has selected so far.
///
/// Rebuilt from request parameters on every call; nothing is kept between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl HierarchyContext {
    /// Build from raw optional ids, treating blank strings as absent
    pub fn from_ids(
        project_id: Option<String>,
        deal_id: Option<String>,
        service_id: Option<String>,
        task_id: Option<String>,
    ) -> Self {
        fn clean(id: Option<String>) -> Option<String> {
            id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            project_id: clean(project_id),
            deal_id: clean(deal_id),
            service_id: clean(service_id),
            task_id: clean(task_id),
        }
    }

    pub fn get(&self, selection: Selection) -> Option<&str> {
        match selection {
            Selection::Project => self.project_id.as_deref(),
            Selection::Deal => self.deal_id.as_deref(),
            Selection::Service => self.service_id.as_deref(),
            Selection::Task => self.task_id.as_deref(),
        }
    }

    pub fn has(&self, selection: Selection) -> bool {
        self.get(selection).is_some()
    }

    /// Required ancestors of `step` that are not present
    pub fn missing_for(&self, step: WorkflowStep) -> Vec<Selection> {
        step.requires()
            .iter()
            .copied()
            .filter(|s| !self.has(*s))
            .collect()
    }

    /// Check that every ancestor `step` requires is present
    pub fn require(&self, step: WorkflowStep) -> Result<()> {
        match self.missing_for(step).first() {
            None => Ok(()),
            Some(missing) => Err(ProductiveError::missing(
                missing.field(),
                format!(
                    "the {} step needs a {} from the {} step",
                    step,
                    missing.field(),
                    missing.producer()
                ),
            )),
        }
    }

    /// Return the required ancestor value, failing like [`require`](Self::require)
    pub fn required(&self, step: WorkflowStep, selection: Selection) -> Result<&str> {
        self.require(step)?;
        self.get(selection).ok_or_else(|| {
            ProductiveError::missing(selection.field(), format!("required by the {} step", step))
        })
    }

    pub fn can_create_entry(&self) -> bool {
        self.missing_for(WorkflowStep::TimeEntryCreation).is_empty()
    }

    /// First step whose identifier is still unknown.
    ///
    /// Walks the steps in order; the optional task step is only suggested while
    /// a project is known to list tasks from.
    pub fn next_step(&self) -> WorkflowStep {
        for step in WorkflowStep::ALL {
            let Some(produced) = step.produces() else {
                return step;
            };
            if self.has(produced) {
                continue;
            }
            if step.is_optional() && !self.has(Selection::Project) {
                continue;
            }
            return step;
        }
        WorkflowStep::TimeEntryCreation
    }
}
