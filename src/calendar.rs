use crate::error::ScheduleError;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maps the engine's integer day offsets onto calendar dates.
///
/// The scheduling arithmetic never looks at dates. Only the cash-flow
/// projector and the exporter convert offsets, counting day `n` as the
/// `n`-th available date on or after the project start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendar {
    holidays: HashSet<NaiveDate>,
    non_working_days: HashSet<Weekday>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalendarConfig {
    #[serde(default = "WorkCalendarConfig::all_weekdays")]
    working_days: Vec<Weekday>,
    #[serde(default)]
    holidays: Vec<NaiveDate>,
}

/// Every date is a working date.
impl Default for WorkCalendar {
    fn default() -> Self {
        Self::continuous()
    }
}

impl WorkCalendar {
    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn continuous() -> Self {
        Self {
            holidays: HashSet::new(),
            non_working_days: HashSet::new(),
        }
    }

    /// Calendar with the given rest days, e.g. `[Weekday::Fri]` for a
    /// six-day site week.
    pub fn with_rest_days<I>(rest_days: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = Weekday>,
    {
        let non_working_days: HashSet<Weekday> = rest_days.into_iter().collect();
        if non_working_days.len() == Self::ALL_WEEKDAYS.len() {
            return Err(ScheduleError::InvalidCalendar(
                "at least one working weekday is required".into(),
            ));
        }
        Ok(Self {
            holidays: HashSet::new(),
            non_working_days,
        })
    }

    pub fn custom<I, J>(working_days: I, holidays: J) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let config = WorkCalendarConfig::new(working_days, holidays);
        Self::from_config(&config)
    }

    pub fn from_config(config: &WorkCalendarConfig) -> Result<Self, ScheduleError> {
        let working_set: HashSet<Weekday> = config.working_days.iter().copied().collect();
        if working_set.is_empty() {
            return Err(ScheduleError::InvalidCalendar(
                "at least one working weekday is required".into(),
            ));
        }
        let non_working_days = Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !working_set.contains(day))
            .collect();

        let mut calendar = Self {
            holidays: HashSet::new(),
            non_working_days,
        };
        calendar.add_holidays(config.holidays());
        Ok(calendar)
    }

    pub fn to_config(&self) -> WorkCalendarConfig {
        WorkCalendarConfig::from(self)
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    pub fn add_holidays(&mut self, dates: &[NaiveDate]) {
        self.holidays.extend(dates);
    }

    /// Same month/day for every year in the range; invalid dates (Feb 30) are skipped.
    pub fn add_recurring_holiday(&mut self, month: u32, day: u32, start_year: i32, end_year: i32) {
        for year in start_year..=end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
    }

    pub fn set_working_days(&mut self, days: &[Weekday]) -> Result<(), ScheduleError> {
        if days.is_empty() {
            return Err(ScheduleError::InvalidCalendar(
                "at least one working weekday is required".into(),
            ));
        }
        self.non_working_days = Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !days.contains(day))
            .collect();
        Ok(())
    }

    pub fn is_continuous(&self) -> bool {
        self.holidays.is_empty() && self.non_working_days.is_empty()
    }

    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.holidays.contains(&date) && !self.non_working_days.contains(&date.weekday())
    }

    /// First available date on or after `from`.
    pub fn first_available_on_or_after(&self, from: NaiveDate) -> Result<NaiveDate, ScheduleError> {
        let mut current = from;
        while !self.is_available(current) {
            current = Self::step(current)?;
        }
        Ok(current)
    }

    /// Date of day offset `offset`, counted in available days from `start`.
    pub fn date_for_offset(&self, start: NaiveDate, offset: i64) -> Result<NaiveDate, ScheduleError> {
        Self::ensure_in_range(start, offset.max(0) as u64)?;
        let mut current = self.first_available_on_or_after(start)?;
        for _ in 0..offset {
            current = self.first_available_on_or_after(Self::step(current)?)?;
        }
        Ok(current)
    }

    /// Dates of day offsets `0..count`, in order.
    pub fn working_dates(&self, start: NaiveDate, count: usize) -> Result<Vec<NaiveDate>, ScheduleError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        Self::ensure_in_range(start, count as u64 - 1)?;
        let mut dates = Vec::with_capacity(count);
        let mut current = self.first_available_on_or_after(start)?;
        dates.push(current);
        while dates.len() < count {
            current = self.first_available_on_or_after(Self::step(current)?)?;
            dates.push(current);
        }
        Ok(dates)
    }

    /// Count available days in the inclusive range.
    pub fn count_available_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_available(*d))
            .count() as i64
    }

    /// Offsets count at least one calendar day each, so `days` past the
    /// last representable date can never be reached.
    fn ensure_in_range(start: NaiveDate, days: u64) -> Result<(), ScheduleError> {
        start
            .checked_add_days(Days::new(days))
            .map(|_| ())
            .ok_or_else(|| {
                ScheduleError::InvalidCalendar(format!("{days} days after {start} is out of range"))
            })
    }

    fn step(date: NaiveDate) -> Result<NaiveDate, ScheduleError> {
        date.succ_opt()
            .ok_or_else(|| ScheduleError::InvalidCalendar(format!("no date follows {date}")))
    }
}

impl WorkCalendarConfig {
    pub fn new<I, J>(working_days: I, holidays: J) -> Self
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let mut working: Vec<Weekday> = working_days.into_iter().collect();
        working.sort_by_key(|wd| wd.num_days_from_monday());
        working.dedup();

        let mut holidays: Vec<NaiveDate> = holidays.into_iter().collect();
        holidays.sort();
        holidays.dedup();

        Self {
            working_days: working,
            holidays,
        }
    }

    pub fn working_days(&self) -> &[Weekday] {
        &self.working_days
    }

    pub fn holidays(&self) -> &[NaiveDate] {
        &self.holidays
    }

    fn all_weekdays() -> Vec<Weekday> {
        WorkCalendar::ALL_WEEKDAYS.to_vec()
    }
}

impl Default for WorkCalendarConfig {
    fn default() -> Self {
        WorkCalendarConfig::from(&WorkCalendar::default())
    }
}

impl From<&WorkCalendar> for WorkCalendarConfig {
    fn from(calendar: &WorkCalendar) -> Self {
        let working = WorkCalendar::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !calendar.non_working_days.contains(day));
        WorkCalendarConfig::new(working, calendar.holidays.iter().copied())
    }
}
