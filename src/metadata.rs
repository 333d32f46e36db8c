use crate::calendar::{WorkCalendar, WorkCalendarConfig};
use crate::error::ScheduleError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Project-level settings that sit around the activity set.
///
/// Only `project_start_date` and `calendar` influence computed values, and
/// only when day offsets are turned into calendar months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMetadata {
    pub project_name: String,
    pub project_description: String,
    pub project_start_date: NaiveDate,
    /// Label printed next to amounts; never used in arithmetic.
    pub currency: String,
    pub calendar: WorkCalendarConfig,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            project_name: "New Project".to_string(),
            project_description: "No description".to_string(),
            project_start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            currency: "AED".to_string(),
            calendar: WorkCalendarConfig::default(),
        }
    }
}

impl ProjectMetadata {
    pub fn work_calendar(&self) -> Result<WorkCalendar, ScheduleError> {
        WorkCalendar::from_config(&self.calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let metadata: ProjectMetadata =
            serde_json::from_str(r#"{"project_name":"Villa","project_start_date":"2025-03-01"}"#)
                .unwrap();
        assert_eq!(metadata.project_name, "Villa");
        assert_eq!(
            metadata.project_start_date,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert_eq!(metadata.currency, "AED");
        assert!(metadata.work_calendar().unwrap().is_continuous());
    }
}
