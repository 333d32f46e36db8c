use crate::activity::{ActivityRecord, ScheduledActivity};
use crate::calculations::{BackwardPass, CriticalPathTracer, FloatAnalysis, ForwardPass};
use crate::error::ScheduleError;
use crate::graph::{ActivityGraph, GraphBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub activity_count: usize,
    pub critical_count: usize,
    pub critical_path: Vec<String>,
    pub project_duration: i64,
    pub total_budget: f64,
    pub max_total_float: i64,
}

impl ScheduleSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("activities={}", self.activity_count));
        parts.push(format!("critical={}", self.critical_count));
        parts.push(format!("duration={}d", self.project_duration));
        parts.push(format!("budget={:.2}", self.total_budget));
        if self.max_total_float > 0 {
            parts.push(format!("max_float={}d", self.max_total_float));
        }
        if !self.critical_path.is_empty() {
            parts.push(format!("path={}", self.critical_path.join("->")));
        }
        parts.join(" ")
    }
}

/// Result of the forward pass, backward pass and float analysis over one
/// activity network. Read-only once computed; recompute from scratch when
/// the activity set changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    activities: Vec<ScheduledActivity>,
    index: HashMap<String, usize>,
    project_duration: i64,
    critical_path: Vec<String>,
}

impl Schedule {
    pub fn from_records(records: &[ActivityRecord]) -> Result<Self, ScheduleError> {
        let graph = GraphBuilder::new(records).build()?;
        Self::compute(&graph)
    }

    pub fn compute(graph: &ActivityGraph) -> Result<Self, ScheduleError> {
        let early = ForwardPass::new(graph).execute()?;
        let project_duration = early.project_duration();
        let late = BackwardPass::new(graph).execute(project_duration);
        let floats = FloatAnalysis::compute(graph, &early, &late, project_duration)?;
        let path = CriticalPathTracer::new(graph, &early, &floats).trace(project_duration)?;

        let id_of = |ix: petgraph::graph::NodeIndex| graph.node(ix).id.clone();

        let mut activities = Vec::with_capacity(graph.len());
        let mut index = HashMap::with_capacity(graph.len());
        for &node_ix in graph.topological_order() {
            let activity = graph.node(node_ix);
            let i = node_ix.index();
            index.insert(activity.id.clone(), activities.len());
            activities.push(ScheduledActivity {
                id: activity.id.clone(),
                name: activity.name.clone(),
                duration_days: activity.duration_days,
                predecessors: activity.predecessors.clone(),
                successors: graph.successors(node_ix).into_iter().map(id_of).collect(),
                budgeted_cost: activity.budgeted_cost,
                earliest_start: early.starts[i],
                earliest_finish: early.finishes[i],
                latest_start: late.starts[i],
                latest_finish: late.finishes[i],
                total_float: floats.total_float[i],
                free_float: floats.free_float[i],
                is_critical: floats.is_critical[i],
            });
        }

        let critical_path: Vec<String> = path.into_iter().map(id_of).collect();
        debug!(
            critical = floats.critical_count(),
            path_len = critical_path.len(),
            "float analysis complete"
        );

        Ok(Self {
            activities,
            index,
            project_duration,
            critical_path,
        })
    }

    /// Activities in topological order.
    pub fn activities(&self) -> &[ScheduledActivity] {
        &self.activities
    }

    pub fn activity(&self, id: &str) -> Option<&ScheduledActivity> {
        self.index.get(id).map(|&i| &self.activities[i])
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn project_duration(&self) -> i64 {
        self.project_duration
    }

    pub fn critical_path(&self) -> &[String] {
        &self.critical_path
    }

    pub fn critical_activities(&self) -> impl Iterator<Item = &ScheduledActivity> + '_ {
        self.activities.iter().filter(|a| a.is_critical)
    }

    pub fn total_budget(&self) -> f64 {
        self.activities.iter().map(|a| a.budgeted_cost).sum()
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            activity_count: self.activities.len(),
            critical_count: self.critical_activities().count(),
            critical_path: self.critical_path.clone(),
            project_duration: self.project_duration,
            total_budget: self.total_budget(),
            max_total_float: self
                .activities
                .iter()
                .map(|a| a.total_float)
                .max()
                .unwrap_or(0),
        }
    }
}
