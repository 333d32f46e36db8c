use crate::activity::ActivityRecord;
use crate::error::ScheduleError;
use std::collections::HashSet;

pub fn validate_record(position: usize, record: &ActivityRecord) -> Result<(), ScheduleError> {
    if record.id.trim().is_empty() {
        return Err(ScheduleError::EmptyActivityId { position });
    }

    if record.duration_days < 0 {
        return Err(ScheduleError::InvalidDuration {
            activity: record.id.clone(),
            duration_days: record.duration_days,
        });
    }

    if !record.budgeted_cost.is_finite() || record.budgeted_cost < 0.0 {
        return Err(ScheduleError::InvalidCost {
            activity: record.id.clone(),
            cost: record.budgeted_cost,
        });
    }

    Ok(())
}

/// Field checks for every record, then id uniqueness across the set.
pub fn validate_record_collection(records: &[ActivityRecord]) -> Result<(), ScheduleError> {
    let mut seen_ids = HashSet::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        validate_record(position, record)?;
        if !seen_ids.insert(record.id.as_str()) {
            return Err(ScheduleError::DuplicateActivity {
                activity: record.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_duration() {
        let record = ActivityRecord::new("A", "Excavation", -2);
        assert_eq!(
            validate_record(0, &record),
            Err(ScheduleError::InvalidDuration {
                activity: "A".into(),
                duration_days: -2
            })
        );
    }

    #[test]
    fn rejects_nan_cost() {
        let record = ActivityRecord::new("A", "Excavation", 2).with_cost(f64::NAN);
        assert!(matches!(
            validate_record(0, &record),
            Err(ScheduleError::InvalidCost { .. })
        ));
    }

    #[test]
    fn rejects_blank_id_with_position() {
        let records = vec![
            ActivityRecord::new("A", "ok", 1),
            ActivityRecord::new(" ", "blank", 1),
        ];
        assert_eq!(
            validate_record_collection(&records),
            Err(ScheduleError::EmptyActivityId { position: 1 })
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let records = vec![
            ActivityRecord::new("A", "first", 1),
            ActivityRecord::new("A", "second", 2),
        ];
        assert_eq!(
            validate_record_collection(&records),
            Err(ScheduleError::DuplicateActivity {
                activity: "A".into()
            })
        );
    }
}
