use super::{EarlyDates, LateDates};
use crate::error::ScheduleError;
use crate::graph::ActivityGraph;
use petgraph::Direction;

/// Total float, free float and criticality indexed by `NodeIndex::index()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatAnalysis {
    pub total_float: Vec<i64>,
    pub free_float: Vec<i64>,
    pub is_critical: Vec<bool>,
}

impl FloatAnalysis {
    pub fn compute(
        graph: &ActivityGraph,
        early: &EarlyDates,
        late: &LateDates,
        project_duration: i64,
    ) -> Result<Self, ScheduleError> {
        let n = graph.len();
        let mut total_float = Vec::with_capacity(n);
        let mut free_float = Vec::with_capacity(n);
        let mut is_critical = Vec::with_capacity(n);

        for node_ix in graph.graph().node_indices() {
            let i = node_ix.index();
            let tf = late.starts[i] - early.starts[i];
            if tf < 0 {
                return Err(ScheduleError::NegativeFloat {
                    activity: graph.node(node_ix).id.clone(),
                    total_float: tf,
                });
            }

            let next_start = graph
                .graph()
                .neighbors_directed(node_ix, Direction::Outgoing)
                .map(|succ_ix| early.starts[succ_ix.index()])
                .min()
                .unwrap_or(project_duration);

            total_float.push(tf);
            free_float.push(next_start - early.finishes[i]);
            is_critical.push(tf == 0);
        }

        Ok(Self {
            total_float,
            free_float,
            is_critical,
        })
    }

    pub fn critical_count(&self) -> usize {
        self.is_critical.iter().filter(|c| **c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_float_is_rejected() {
        let records = vec![crate::activity::ActivityRecord::new("A", "A", 5)];
        let graph = crate::graph::GraphBuilder::new(&records).build().unwrap();
        let early = EarlyDates {
            starts: vec![3],
            finishes: vec![8],
        };
        let late = LateDates {
            starts: vec![0],
            finishes: vec![5],
        };
        let err = FloatAnalysis::compute(&graph, &early, &late, 8).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::NegativeFloat {
                activity: "A".into(),
                total_float: -3
            }
        );
    }
}
