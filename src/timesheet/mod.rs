//! Timesheet workflow engine.
//!
//! Pure validation and normalization for booking time in Productive: duration
//! and date parsing, `"me"` resolution, the project -> budget -> service ->
//! task -> entry dependency rules, and the preview/confirm gate. Nothing in
//! here performs I/O; the tool layer feeds it caller input and gateway results.

pub mod actor;
pub mod date;
pub mod duration;
pub mod gate;
pub mod guide;
pub mod hierarchy;

pub use actor::{ActorIdentity, resolve_actor};
pub use date::{DateSpec, parse_date};
pub use duration::{format_minutes, parse_duration};
pub use gate::{DraftInput, GateOutcome, TimeEntryDraft, gate};
pub use guide::{StepGuide, WorkflowOverview, guide_step, overview};
pub use hierarchy::{BudgetType, HierarchyContext, Selection, WorkflowStep};
