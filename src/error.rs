use thiserror::Error;

/// Failures raised while building or scheduling an activity network.
///
/// Validation variants come from caller-supplied records and are detected
/// before any pass runs. `NegativeFloat` and `EmptyCriticalPath` signal a
/// defect in the engine itself, see [`ScheduleError::is_internal`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("activity record #{position} has an empty id")]
    EmptyActivityId { position: usize },

    #[error("duplicate activity id '{activity}'")]
    DuplicateActivity { activity: String },

    #[error("activity '{activity}' references unknown predecessor '{predecessor}'")]
    UnknownPredecessor {
        activity: String,
        predecessor: String,
    },

    #[error("activity '{activity}' is part of a cyclic dependency")]
    CyclicDependency { activity: String },

    #[error("activity '{activity}' has negative duration {duration_days}")]
    InvalidDuration { activity: String, duration_days: i64 },

    #[error("activity '{activity}' has invalid budgeted cost {cost} (must be finite and non-negative)")]
    InvalidCost { activity: String, cost: f64 },

    #[error("internal error: activity '{activity}' computed negative total float {total_float}")]
    NegativeFloat { activity: String, total_float: i64 },

    #[error("internal error: no critical path could be traced through a non-empty schedule")]
    EmptyCriticalPath,

    #[error("invalid work calendar: {0}")]
    InvalidCalendar(String),
}

impl ScheduleError {
    /// The activity the error points at, when there is one.
    pub fn activity_id(&self) -> Option<&str> {
        match self {
            ScheduleError::DuplicateActivity { activity }
            | ScheduleError::UnknownPredecessor { activity, .. }
            | ScheduleError::CyclicDependency { activity }
            | ScheduleError::InvalidDuration { activity, .. }
            | ScheduleError::InvalidCost { activity, .. }
            | ScheduleError::NegativeFloat { activity, .. } => Some(activity),
            ScheduleError::EmptyActivityId { .. }
            | ScheduleError::EmptyCriticalPath
            | ScheduleError::InvalidCalendar(_) => None,
        }
    }

    /// True for consistency failures that cannot be fixed by editing the input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ScheduleError::NegativeFloat { .. } | ScheduleError::EmptyCriticalPath
        )
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
