use crate::activity::ActivityRecord;
use crate::calendar::WorkCalendar;
use crate::cash_flow::{CashFlowProjector, CashFlowSeries};
use crate::error::ScheduleError;
use crate::export::ScheduleReport;
use crate::graph::GraphBuilder;
use crate::metadata::ProjectMetadata;
use crate::schedule::Schedule;
use tracing::{debug, info, warn};

/// Everything one planning run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPlan {
    pub schedule: Schedule,
    pub cash_flow: CashFlowSeries,
    pub report: ScheduleReport,
}

/// Runs graph construction, both passes, float analysis, cash-flow
/// projection and report assembly in order. Any failure aborts the run.
pub struct SchedulePlanner {
    metadata: ProjectMetadata,
}

impl SchedulePlanner {
    pub fn new(metadata: ProjectMetadata) -> Self {
        Self { metadata }
    }

    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    /// Builds the network only. Used to validate an activity set without scheduling it.
    pub fn validate(&self, records: &[ActivityRecord]) -> Result<(), ScheduleError> {
        GraphBuilder::new(records).build().map(|_| ())
    }

    pub fn plan(&self, records: &[ActivityRecord]) -> Result<ProjectPlan, ScheduleError> {
        info!(
            project = %self.metadata.project_name,
            activities = records.len(),
            "planning schedule"
        );
        let calendar: WorkCalendar = self.metadata.work_calendar()?;

        let graph = GraphBuilder::new(records).build()?;
        for ix in graph.graph().node_indices() {
            if graph.len() > 1 && !graph.has_predecessors(ix) && !graph.has_successors(ix) {
                warn!(activity = %graph.node(ix).id, "activity has no dependencies in either direction");
            }
        }

        let schedule = Schedule::compute(&graph)?;
        debug!(duration = schedule.project_duration(), "passes complete");

        let cash_flow =
            CashFlowProjector::new(&calendar, self.metadata.project_start_date).project(&schedule)?;
        let report = ScheduleReport::new(&self.metadata, &calendar, &schedule, &cash_flow)?;

        info!(
            duration = schedule.project_duration(),
            critical_path = %report.critical_path_label(),
            months = cash_flow.len(),
            "schedule planned"
        );
        Ok(ProjectPlan {
            schedule,
            cash_flow,
            report,
        })
    }
}
