use crate::error::ScheduleError;
use crate::graph::ActivityGraph;
use petgraph::Direction;
use tracing::debug;

/// Earliest start/finish day offsets indexed by `NodeIndex::index()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyDates {
    pub starts: Vec<i64>,
    pub finishes: Vec<i64>,
}

impl EarlyDates {
    /// Largest earliest finish, or 0 for an empty network.
    pub fn project_duration(&self) -> i64 {
        self.finishes.iter().copied().max().unwrap_or(0)
    }
}

pub struct ForwardPass<'a> {
    graph: &'a ActivityGraph,
}

impl<'a> ForwardPass<'a> {
    pub fn new(graph: &'a ActivityGraph) -> Self {
        Self { graph }
    }

    /// Fails with `InvalidDuration` naming the activity whose finish
    /// would overflow the day counter.
    pub fn execute(&self) -> Result<EarlyDates, ScheduleError> {
        let n = self.graph.len();
        let mut starts = vec![0_i64; n];
        let mut finishes = vec![0_i64; n];

        // Predecessors are always finalized first in topological order.
        for &node_ix in self.graph.topological_order() {
            let early_start = self
                .graph
                .graph()
                .neighbors_directed(node_ix, Direction::Incoming)
                .map(|pred_ix| finishes[pred_ix.index()])
                .max()
                .unwrap_or(0)
                .max(0);
            let activity = self.graph.node(node_ix);
            let early_finish = early_start
                .checked_add(activity.duration_days)
                .ok_or_else(|| ScheduleError::InvalidDuration {
                    activity: activity.id.clone(),
                    duration_days: activity.duration_days,
                })?;

            starts[node_ix.index()] = early_start;
            finishes[node_ix.index()] = early_finish;
        }

        let dates = EarlyDates { starts, finishes };
        debug!(
            project_duration = dates.project_duration(),
            "forward pass complete"
        );
        Ok(dates)
    }
}
