pub mod activity;
pub mod activity_validation;
pub mod calculations;
pub mod calendar;
pub mod cash_flow;
pub mod error;
pub mod export;
pub mod graph;
pub mod metadata;
pub mod persistence;
pub mod planner;
pub mod schedule;
pub mod templates;

pub use activity::{Activity, ActivityRecord, ScheduledActivity};
pub use calendar::{WorkCalendar, WorkCalendarConfig};
pub use cash_flow::{CashFlowEntry, CashFlowProjector, CashFlowSeries};
pub use error::{ScheduleError, ScheduleResult};
pub use export::{CashFlowRow, GanttBar, ScheduleReport, ScheduleRow};
pub use graph::{ActivityGraph, GraphBuilder};
pub use metadata::ProjectMetadata;
pub use persistence::{PersistenceError, ProjectFile};
pub use planner::{ProjectPlan, SchedulePlanner};
pub use schedule::{Schedule, ScheduleSummary};
pub use templates::{BuildingPhase, PhaseEstimate};
