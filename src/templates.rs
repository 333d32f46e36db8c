//! The standard six-phase building network.

use crate::activity::ActivityRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildingPhase {
    Excavation,
    Foundation,
    Structure,
    Brickwork,
    Roofing,
    Finishing,
}

impl BuildingPhase {
    pub const ALL: [BuildingPhase; 6] = [
        BuildingPhase::Excavation,
        BuildingPhase::Foundation,
        BuildingPhase::Structure,
        BuildingPhase::Brickwork,
        BuildingPhase::Roofing,
        BuildingPhase::Finishing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingPhase::Excavation => "Excavation",
            BuildingPhase::Foundation => "Foundation",
            BuildingPhase::Structure => "Structure",
            BuildingPhase::Brickwork => "Brickwork",
            BuildingPhase::Roofing => "Roofing",
            BuildingPhase::Finishing => "Finishing",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str().eq_ignore_ascii_case(value))
    }

    pub fn predecessors(&self) -> &'static [BuildingPhase] {
        match self {
            BuildingPhase::Excavation => &[],
            BuildingPhase::Foundation => &[BuildingPhase::Excavation],
            BuildingPhase::Structure => &[BuildingPhase::Foundation],
            BuildingPhase::Brickwork | BuildingPhase::Roofing => &[BuildingPhase::Structure],
            BuildingPhase::Finishing => &[BuildingPhase::Brickwork, BuildingPhase::Roofing],
        }
    }

    fn typical_duration_days(&self) -> i64 {
        match self {
            BuildingPhase::Excavation => 10,
            BuildingPhase::Foundation => 20,
            BuildingPhase::Structure => 45,
            BuildingPhase::Brickwork => 30,
            BuildingPhase::Roofing => 15,
            BuildingPhase::Finishing => 40,
        }
    }

    /// Share of the total budget; the six weights sum to one.
    fn budget_weight(&self) -> f64 {
        match self {
            BuildingPhase::Excavation => 0.05,
            BuildingPhase::Foundation => 0.15,
            BuildingPhase::Structure => 0.35,
            BuildingPhase::Brickwork => 0.15,
            BuildingPhase::Roofing => 0.10,
            BuildingPhase::Finishing => 0.20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseEstimate {
    pub duration_days: i64,
    pub budgeted_cost: f64,
}

/// Activity records for the six phases. Phases without an estimate stay in
/// the network as zero-duration, zero-cost milestones.
pub fn building_activities(estimates: &BTreeMap<BuildingPhase, PhaseEstimate>) -> Vec<ActivityRecord> {
    BuildingPhase::ALL
        .iter()
        .map(|phase| {
            let estimate = estimates.get(phase).copied().unwrap_or(PhaseEstimate {
                duration_days: 0,
                budgeted_cost: 0.0,
            });
            ActivityRecord::new(phase.as_str(), phase.as_str(), estimate.duration_days)
                .with_predecessors(phase.predecessors().iter().map(|p| p.as_str()))
                .with_cost(estimate.budgeted_cost)
        })
        .collect()
}

pub fn default_estimates(total_budget: f64) -> BTreeMap<BuildingPhase, PhaseEstimate> {
    let mut estimates = BTreeMap::new();
    let mut allocated = 0.0;
    for phase in BuildingPhase::ALL {
        let budgeted_cost = if phase == BuildingPhase::Finishing {
            total_budget - allocated
        } else {
            total_budget * phase.budget_weight()
        };
        allocated += budgeted_cost;
        estimates.insert(
            phase,
            PhaseEstimate {
                duration_days: phase.typical_duration_days(),
                budgeted_cost,
            },
        );
    }
    estimates
}
