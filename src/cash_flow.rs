//! Monthly planned expenditure derived from the earliest-start schedule.
//!
//! Each activity spreads its budget evenly over the days of its earliest
//! window. Summing those spreads per calendar month gives the planned
//! amounts, and their running total traces the S-curve.

use crate::calendar::WorkCalendar;
use crate::error::ScheduleError;
use crate::schedule::Schedule;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    /// 1-based month number counted from the project start month.
    pub month_index: u32,
    /// First day of the calendar month.
    pub period_start: NaiveDate,
    pub planned_amount: f64,
    pub cumulative_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CashFlowSeries {
    entries: Vec<CashFlowEntry>,
}

impl CashFlowSeries {
    pub fn entries(&self) -> &[CashFlowEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries
            .last()
            .map(|e| e.cumulative_amount)
            .unwrap_or(0.0)
    }

    /// Month with the largest planned spend; the earliest wins a tie.
    pub fn peak_month(&self) -> Option<&CashFlowEntry> {
        self.entries.iter().fold(None, |best, entry| match best {
            Some(b) if b.planned_amount >= entry.planned_amount => Some(b),
            _ => Some(entry),
        })
    }
}

pub struct CashFlowProjector<'a> {
    calendar: &'a WorkCalendar,
    project_start: NaiveDate,
}

impl<'a> CashFlowProjector<'a> {
    pub fn new(calendar: &'a WorkCalendar, project_start: NaiveDate) -> Self {
        Self {
            calendar,
            project_start,
        }
    }

    pub fn project(&self, schedule: &Schedule) -> Result<CashFlowSeries, ScheduleError> {
        // A zero-length project still occupies day 0.
        let span = schedule.project_duration().max(1) as usize;
        let dates = self.calendar.working_dates(self.project_start, span)?;
        let month_of_day: Vec<usize> = dates
            .iter()
            .map(|date| Self::month_offset(self.project_start, *date))
            .collect();
        let month_count = month_of_day.last().map(|m| m + 1).unwrap_or(1);

        let mut planned = vec![0.0_f64; month_count];
        for activity in schedule.activities() {
            let cost = activity.budgeted_cost;
            if cost == 0.0 {
                continue;
            }

            if activity.duration_days == 0 {
                let day = (activity.earliest_start as usize).min(span - 1);
                planned[month_of_day[day]] += cost;
                continue;
            }

            let start = activity.earliest_start as usize;
            let finish = activity.earliest_finish as usize;
            let per_day = cost / activity.duration_days as f64;
            let mut allocated = 0.0;
            let mut day = start;
            while day < finish {
                let month = month_of_day[day];
                let mut end = day;
                while end < finish && month_of_day[end] == month {
                    end += 1;
                }
                // The final chunk takes the remainder so the activity books exactly its budget.
                let share = if end == finish {
                    cost - allocated
                } else {
                    per_day * (end - day) as f64
                };
                planned[month] += share;
                allocated += share;
                day = end;
            }
        }

        let mut cumulative = 0.0;
        let mut entries = Vec::with_capacity(month_count);
        for (offset, amount) in planned.into_iter().enumerate() {
            cumulative += amount;
            entries.push(CashFlowEntry {
                month_index: offset as u32 + 1,
                period_start: Self::month_start(self.project_start, offset)?,
                planned_amount: amount,
                cumulative_amount: cumulative,
            });
        }

        if schedule.total_budget() == 0.0 && !schedule.is_empty() {
            warn!("no activity carries a budgeted cost; cash flow is flat");
        }
        debug!(months = entries.len(), total = cumulative, "cash flow projected");
        Ok(CashFlowSeries { entries })
    }

    fn month_offset(start: NaiveDate, date: NaiveDate) -> usize {
        let months = (date.year() - start.year()) * 12 + date.month() as i32 - start.month() as i32;
        months.max(0) as usize
    }

    fn month_start(start: NaiveDate, offset: usize) -> Result<NaiveDate, ScheduleError> {
        let zero_based = start.year() * 12 + start.month0() as i32 + offset as i32;
        NaiveDate::from_ymd_opt(zero_based.div_euclid(12), zero_based.rem_euclid(12) as u32 + 1, 1)
            .ok_or_else(|| {
                ScheduleError::InvalidCalendar(format!("month {offset} after {start} is out of range"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityRecord;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn activity_straddling_month_end_splits_by_days() {
        // 10 days from Jan 27: 5 days in January, 5 in February.
        let records = vec![ActivityRecord::new("A", "A", 10).with_cost(1000.0)];
        let schedule = Schedule::from_records(&records).unwrap();
        let calendar = WorkCalendar::default();
        let series = CashFlowProjector::new(&calendar, d(2025, 1, 27))
            .project(&schedule)
            .unwrap();

        assert_eq!(series.len(), 2);
        let jan = &series.entries()[0];
        let feb = &series.entries()[1];
        assert_eq!(jan.period_start, d(2025, 1, 1));
        assert_eq!(feb.period_start, d(2025, 2, 1));
        assert!((jan.planned_amount - 500.0).abs() < 1e-9);
        assert!((feb.planned_amount - 500.0).abs() < 1e-9);
        assert!((series.total() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn month_start_rolls_over_year_end() {
        let start = d(2025, 11, 15);
        assert_eq!(CashFlowProjector::month_start(start, 2).unwrap(), d(2026, 1, 1));
    }

    #[test]
    fn peak_month_prefers_first_of_equal_amounts() {
        let series = CashFlowSeries {
            entries: vec![
                CashFlowEntry {
                    month_index: 1,
                    period_start: d(2025, 1, 1),
                    planned_amount: 5.0,
                    cumulative_amount: 5.0,
                },
                CashFlowEntry {
                    month_index: 2,
                    period_start: d(2025, 2, 1),
                    planned_amount: 5.0,
                    cumulative_amount: 10.0,
                },
            ],
        };
        assert_eq!(series.peak_month().unwrap().month_index, 1);
    }
}
