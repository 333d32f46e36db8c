use super::ActivityGraph;
use crate::activity::{Activity, ActivityRecord};
use crate::activity_validation;
use crate::error::ScheduleError;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

pub struct GraphBuilder<'a> {
    records: &'a [ActivityRecord],
}

impl<'a> GraphBuilder<'a> {
    pub fn new(records: &'a [ActivityRecord]) -> Self {
        Self { records }
    }

    pub fn build(&self) -> Result<ActivityGraph, ScheduleError> {
        // Step 1: Field checks and id uniqueness
        activity_validation::validate_record_collection(self.records)?;

        // Step 2: Nodes
        let mut graph: DiGraph<Activity, ()> = DiGraph::with_capacity(self.records.len(), 0);
        let mut id_to_index: HashMap<String, NodeIndex> =
            HashMap::with_capacity(self.records.len());
        for record in self.records {
            let node_ix = graph.add_node(Activity::from_record(record));
            id_to_index.insert(record.id.clone(), node_ix);
        }

        // Step 3: Edges pred -> activity
        for node_ix in graph.node_indices().collect::<Vec<_>>() {
            let predecessors = graph[node_ix].predecessors.clone();
            for pred_id in predecessors {
                let pred_ix = id_to_index.get(&pred_id).copied().ok_or_else(|| {
                    ScheduleError::UnknownPredecessor {
                        activity: graph[node_ix].id.clone(),
                        predecessor: pred_id.clone(),
                    }
                })?;
                graph.add_edge(pred_ix, node_ix, ());
            }
        }

        // Step 4: Topological order, failing on cycles
        let topological_order = Self::topological_order(&graph)?;

        debug!(
            activities = graph.node_count(),
            dependencies = graph.edge_count(),
            "activity graph built"
        );

        Ok(ActivityGraph {
            graph,
            id_to_index,
            topological_order,
        })
    }

    /// Kahn's algorithm with the ready set keyed by id.
    fn topological_order(graph: &DiGraph<Activity, ()>) -> Result<Vec<NodeIndex>, ScheduleError> {
        let mut in_degree: Vec<usize> = graph
            .node_indices()
            .map(|ix| graph.neighbors_directed(ix, Direction::Incoming).count())
            .collect();

        let mut ready: BTreeMap<&str, NodeIndex> = graph
            .node_indices()
            .filter(|ix| in_degree[ix.index()] == 0)
            .map(|ix| (graph[ix].id.as_str(), ix))
            .collect();

        let mut order = Vec::with_capacity(graph.node_count());
        while let Some((_, node_ix)) = ready.pop_first() {
            order.push(node_ix);
            for succ_ix in graph.neighbors_directed(node_ix, Direction::Outgoing) {
                let degree = &mut in_degree[succ_ix.index()];
                *degree -= 1;
                if *degree == 0 {
                    ready.insert(graph[succ_ix].id.as_str(), succ_ix);
                }
            }
        }

        if order.len() < graph.node_count() {
            let activity = Self::cycle_member(graph, &in_degree);
            return Err(ScheduleError::CyclicDependency { activity });
        }

        Ok(order)
    }

    /// Every leftover node still has a leftover predecessor, so walking
    /// predecessors from any of them must revisit a node on a cycle.
    fn cycle_member(graph: &DiGraph<Activity, ()>, in_degree: &[usize]) -> String {
        let leftover = |ix: &NodeIndex| in_degree[ix.index()] > 0;

        let start = graph
            .node_indices()
            .filter(leftover)
            .min_by(|a, b| graph[*a].id.cmp(&graph[*b].id));
        let Some(mut current) = start else {
            return String::new();
        };

        let mut visited = HashSet::new();
        while visited.insert(current) {
            let next = graph
                .neighbors_directed(current, Direction::Incoming)
                .filter(leftover)
                .min_by(|a, b| graph[*a].id.cmp(&graph[*b].id));
            match next {
                Some(pred) => current = pred,
                None => break,
            }
        }
        graph[current].id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, duration: i64, preds: &[&str]) -> ActivityRecord {
        ActivityRecord::new(id, id, duration).with_predecessors(preds.iter().copied())
    }

    #[test]
    fn cycle_report_skips_downstream_activities() {
        // Z hangs off the B <-> C loop but is not part of it.
        let records = vec![
            rec("A", 1, &[]),
            rec("B", 1, &["A", "C"]),
            rec("C", 1, &["B"]),
            rec("Z", 1, &["C"]),
        ];
        let err = GraphBuilder::new(&records).build().unwrap_err();
        match err {
            ScheduleError::CyclicDependency { activity } => {
                assert!(activity == "B" || activity == "C", "got {activity}")
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let records = vec![rec("A", 1, &["A"])];
        assert_eq!(
            GraphBuilder::new(&records).build().unwrap_err(),
            ScheduleError::CyclicDependency {
                activity: "A".into()
            }
        );
    }

    #[test]
    fn topological_order_breaks_ties_by_id() {
        let records = vec![rec("c", 1, &[]), rec("b", 1, &[]), rec("a", 1, &["c"])];
        let graph = GraphBuilder::new(&records).build().unwrap();
        let ids: Vec<&str> = graph.activities().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
