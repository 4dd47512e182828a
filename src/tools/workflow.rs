// src/tools/workflow.rs
// Guided timesheet workflow: advisory only, never calls upstream

use crate::error::Result;
use crate::mcp::requests::{TimesheetStepRequest, TimesheetWorkflowRequest};
use crate::mcp::responses::{
    Json, StepGuideData, StepStatusItem, WorkflowData, WorkflowOutput, WorkflowOverviewData,
};
use crate::timesheet::{HierarchyContext, StepGuide, WorkflowStep, guide_step, overview};
use serde_json::Value;

/// Overview of all five steps and the recommended next call
pub fn timesheet_workflow(req: TimesheetWorkflowRequest) -> Result<Json<WorkflowOutput>> {
    let hierarchy =
        HierarchyContext::from_ids(req.project_id, req.deal_id, req.service_id, req.task_id);
    let ov = overview(&hierarchy);

    let steps = ov
        .steps
        .iter()
        .map(|s| StepStatusItem {
            number: s.step.number(),
            step: s.step.name().to_string(),
            state: s.state.label().to_string(),
            selected: s.selected.clone(),
        })
        .collect();

    Ok(Json(WorkflowOutput {
        action: "workflow".into(),
        message: ov.render(),
        data: Some(WorkflowData::Overview(WorkflowOverviewData {
            steps,
            next: guide_data(&ov.next),
        })),
    }))
}

/// Guidance for one named step, redirected to the earliest missing ancestor
pub fn timesheet_step(req: TimesheetStepRequest) -> Result<Json<WorkflowOutput>> {
    let requested: WorkflowStep = req.step.parse()?;
    let hierarchy =
        HierarchyContext::from_ids(req.project_id, req.deal_id, req.service_id, req.task_id);
    let guide = guide_step(requested, &hierarchy);

    Ok(Json(WorkflowOutput {
        action: "step".into(),
        message: guide.render(),
        data: Some(WorkflowData::Step(guide_data(&guide))),
    }))
}

fn guide_data(guide: &StepGuide) -> StepGuideData {
    StepGuideData {
        requested_step: guide.requested.name().to_string(),
        step: guide.step.name().to_string(),
        step_number: guide.step.number(),
        tool: guide.tool.to_string(),
        arguments: Value::Object(guide.arguments.clone()),
        instruction: guide.instruction.clone(),
        missing: guide.missing.iter().map(|m| m.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_fresh_start() {
        let out = timesheet_workflow(TimesheetWorkflowRequest::default()).unwrap();
        let Some(WorkflowData::Overview(data)) = &out.0.data else {
            panic!("expected overview");
        };
        assert_eq!(data.steps.len(), 5);
        assert_eq!(data.next.tool, "list_projects");
    }

    #[test]
    fn test_step_redirects_to_missing_ancestor() {
        let out = timesheet_step(TimesheetStepRequest {
            step: "time_entry".into(),
            ..Default::default()
        })
        .unwrap();
        let Some(WorkflowData::Step(data)) = &out.0.data else {
            panic!("expected step guide");
        };
        assert_eq!(data.requested_step, "time_entry");
        assert_ne!(data.step, "time_entry");
        assert!(data.missing.contains(&"service_id".to_string()));
    }

    #[test]
    fn test_step_unknown_name() {
        let err = timesheet_step(TimesheetStepRequest {
            step: "invoice".into(),
            ..Default::default()
        })
        .err().unwrap();
        assert!(matches!(err, crate::ProductiveError::InvalidInputShape(_)));
    }
}
