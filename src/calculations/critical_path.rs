//! Reconstruction of a single critical chain from the float analysis.
//!
//! A critical activity that is not terminal always has at least one critical
//! successor starting exactly at its finish, so a greedy walk from a critical
//! entry activity reaches the project finish. Among several candidates the
//! walk takes the lowest id, which keeps the output stable across runs.

use super::{EarlyDates, FloatAnalysis};
use crate::error::ScheduleError;
use crate::graph::ActivityGraph;
use petgraph::graph::NodeIndex;

pub struct CriticalPathTracer<'a> {
    graph: &'a ActivityGraph,
    early: &'a EarlyDates,
    floats: &'a FloatAnalysis,
}

impl<'a> CriticalPathTracer<'a> {
    pub fn new(graph: &'a ActivityGraph, early: &'a EarlyDates, floats: &'a FloatAnalysis) -> Self {
        Self {
            graph,
            early,
            floats,
        }
    }

    pub fn trace(&self, project_duration: i64) -> Result<Vec<NodeIndex>, ScheduleError> {
        if self.graph.is_empty() {
            return Ok(Vec::new());
        }

        let start = self
            .graph
            .entry_points()
            .into_iter()
            .find(|ix| self.is_critical(*ix))
            .ok_or(ScheduleError::EmptyCriticalPath)?;

        let mut path = vec![start];
        let mut current = start;
        // successors() is sorted by id, so the first match is the tie-break winner
        while let Some(next) = self
            .graph
            .successors(current)
            .into_iter()
            .find(|succ| {
                self.is_critical(*succ)
                    && self.early.starts[succ.index()] == self.early.finishes[current.index()]
            })
        {
            path.push(next);
            current = next;
        }

        if self.early.finishes[current.index()] != project_duration {
            return Err(ScheduleError::EmptyCriticalPath);
        }
        Ok(path)
    }

    fn is_critical(&self, ix: NodeIndex) -> bool {
        self.floats.is_critical[ix.index()]
    }
}
