use serde::{Deserialize, Serialize};

/// A raw activity row as handed over by the input-collection stage.
///
/// Fields are loosely checked here; [`crate::graph::GraphBuilder`] validates
/// them once and turns them into [`Activity`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "durationDays")]
    pub duration_days: i64,
    #[serde(default, alias = "predecessorIds")]
    pub predecessor_ids: Vec<String>,
    #[serde(default, alias = "budgetedCost")]
    pub budgeted_cost: f64,
}

impl ActivityRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration_days: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration_days,
            predecessor_ids: Vec::new(),
            budgeted_cost: 0.0,
        }
    }

    pub fn with_predecessors<I, S>(mut self, predecessors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessor_ids = predecessors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cost(mut self, budgeted_cost: f64) -> Self {
        self.budgeted_cost = budgeted_cost;
        self
    }
}

/// A validated activity owned by an [`crate::graph::ActivityGraph`].
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub duration_days: i64,
    /// Sorted, de-duplicated predecessor ids.
    pub predecessors: Vec<String>,
    pub budgeted_cost: f64,
}

impl Activity {
    pub(crate) fn from_record(record: &ActivityRecord) -> Self {
        let name = if record.name.trim().is_empty() {
            record.id.clone()
        } else {
            record.name.clone()
        };
        let mut predecessors = record.predecessor_ids.clone();
        predecessors.sort();
        predecessors.dedup();
        Self {
            id: record.id.clone(),
            name,
            duration_days: record.duration_days,
            predecessors,
            budgeted_cost: record.budgeted_cost,
        }
    }

    pub fn is_milestone(&self) -> bool {
        self.duration_days == 0
    }
}

/// An activity together with every value derived by the CPM passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledActivity {
    pub id: String,
    pub name: String,
    pub duration_days: i64,
    pub predecessors: Vec<String>,
    pub successors: Vec<String>,
    pub budgeted_cost: f64,
    pub earliest_start: i64,
    pub earliest_finish: i64,
    pub latest_start: i64,
    pub latest_finish: i64,
    pub total_float: i64,
    pub free_float: i64,
    pub is_critical: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accepts_camel_case_keys() {
        let json = r#"{"id":"B","durationDays":3,"predecessorIds":["A"],"budgetedCost":1500.0}"#;
        let record: ActivityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record,
            ActivityRecord::new("B", "", 3)
                .with_predecessors(["A"])
                .with_cost(1500.0)
        );
    }

    #[test]
    fn activity_defaults_name_and_dedups_predecessors() {
        let record = ActivityRecord::new("D", "  ", 1).with_predecessors(["C", "B", "C"]);
        let activity = Activity::from_record(&record);
        assert_eq!(activity.name, "D");
        assert_eq!(activity.predecessors, vec!["B".to_string(), "C".to_string()]);
    }
}
