use crate::graph::ActivityGraph;
use petgraph::Direction;
use tracing::debug;

/// Latest start/finish day offsets indexed by `NodeIndex::index()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LateDates {
    pub starts: Vec<i64>,
    pub finishes: Vec<i64>,
}

pub struct BackwardPass<'a> {
    graph: &'a ActivityGraph,
}

impl<'a> BackwardPass<'a> {
    pub fn new(graph: &'a ActivityGraph) -> Self {
        Self { graph }
    }

    pub fn execute(&self, project_duration: i64) -> LateDates {
        let n = self.graph.len();
        let mut starts = vec![project_duration; n];
        let mut finishes = vec![project_duration; n];

        // Reverse topological order: successors are settled first
        for &node_ix in self.graph.topological_order().iter().rev() {
            let late_finish = self
                .graph
                .graph()
                .neighbors_directed(node_ix, Direction::Outgoing)
                .map(|succ_ix| starts[succ_ix.index()])
                .min()
                .unwrap_or(project_duration);
            let duration = self.graph.node(node_ix).duration_days;

            finishes[node_ix.index()] = late_finish;
            starts[node_ix.index()] = late_finish - duration;
        }

        debug!(activities = n, project_duration, "backward pass complete");
        LateDates { starts, finishes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityRecord;
    use crate::calculations::ForwardPass;
    use crate::graph::GraphBuilder;

    #[test]
    fn terminal_activities_finish_at_project_end() {
        // A -> B (long), A -> C (short, terminal)
        let records = vec![
            ActivityRecord::new("A", "A", 2),
            ActivityRecord::new("B", "B", 10).with_predecessors(["A"]),
            ActivityRecord::new("C", "C", 3).with_predecessors(["A"]),
        ];
        let graph = GraphBuilder::new(&records).build().unwrap();
        let early = ForwardPass::new(&graph).execute().unwrap();
        let late = BackwardPass::new(&graph).execute(early.project_duration());

        let c = graph.index_of("C").unwrap().index();
        let a = graph.index_of("A").unwrap().index();
        assert_eq!((late.starts[c], late.finishes[c]), (9, 12));
        assert_eq!((late.starts[a], late.finishes[a]), (0, 2));
    }
}
