use crate::calendar::WorkCalendar;
use crate::cash_flow::CashFlowSeries;
use crate::error::ScheduleError;
use crate::metadata::ProjectMetadata;
use crate::schedule::Schedule;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of the exported schedule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub id: String,
    pub name: String,
    pub duration_days: i64,
    pub earliest_start: i64,
    pub earliest_finish: i64,
    pub latest_start: i64,
    pub latest_finish: i64,
    pub total_float: i64,
    pub free_float: i64,
    pub is_critical: bool,
    pub budgeted_cost: f64,
    pub start_date: NaiveDate,
    /// Last working date the activity occupies (its start date for milestones).
    pub finish_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowRow {
    pub month_index: u32,
    /// `YYYY-MM`
    pub month: String,
    pub planned_amount: f64,
    pub cumulative_amount: f64,
    pub cumulative_percent: f64,
}

/// Bar geometry for a CPM Gantt chart: the work bar starts at the earliest
/// start and the float bar, if any, hangs off the earliest finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttBar {
    pub id: String,
    pub name: String,
    pub start: i64,
    pub duration: i64,
    pub float_start: i64,
    pub float_days: i64,
    pub is_critical: bool,
}

/// Everything the report and chart renderers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub project_name: String,
    pub project_start_date: NaiveDate,
    pub currency: String,
    pub project_duration_days: i64,
    pub total_budget: f64,
    pub activities: Vec<ScheduleRow>,
    pub critical_path: Vec<String>,
    pub cash_flow: Vec<CashFlowRow>,
}

impl ScheduleReport {
    pub fn new(
        metadata: &ProjectMetadata,
        calendar: &WorkCalendar,
        schedule: &Schedule,
        cash_flow: &CashFlowSeries,
    ) -> Result<Self, ScheduleError> {
        let start = metadata.project_start_date;
        let span = schedule.project_duration().max(1) as usize;
        let dates = calendar.working_dates(start, span + 1)?;
        let date_at = |offset: i64| dates[(offset.max(0) as usize).min(span)];

        let activities = schedule
            .activities()
            .iter()
            .map(|a| ScheduleRow {
                id: a.id.clone(),
                name: a.name.clone(),
                duration_days: a.duration_days,
                earliest_start: a.earliest_start,
                earliest_finish: a.earliest_finish,
                latest_start: a.latest_start,
                latest_finish: a.latest_finish,
                total_float: a.total_float,
                free_float: a.free_float,
                is_critical: a.is_critical,
                budgeted_cost: a.budgeted_cost,
                start_date: date_at(a.earliest_start),
                finish_date: date_at((a.earliest_finish - 1).max(a.earliest_start)),
            })
            .collect();

        let total = cash_flow.total();
        let cash_flow = cash_flow
            .entries()
            .iter()
            .map(|e| CashFlowRow {
                month_index: e.month_index,
                month: e.period_start.format("%Y-%m").to_string(),
                planned_amount: e.planned_amount,
                cumulative_amount: e.cumulative_amount,
                cumulative_percent: if total > 0.0 {
                    e.cumulative_amount / total * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        Ok(Self {
            project_name: metadata.project_name.clone(),
            project_start_date: start,
            currency: metadata.currency.clone(),
            project_duration_days: schedule.project_duration(),
            total_budget: schedule.total_budget(),
            activities,
            critical_path: schedule.critical_path().to_vec(),
            cash_flow,
        })
    }

    pub fn critical_path_label(&self) -> String {
        self.critical_path.join(" → ")
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} days, {:.2} {}, critical path {}",
            self.project_name,
            self.project_duration_days,
            self.total_budget,
            self.currency,
            self.critical_path_label()
        )
    }

    pub fn gantt_bars(&self) -> Vec<GanttBar> {
        self.activities
            .iter()
            .map(|row| GanttBar {
                id: row.id.clone(),
                name: row.name.clone(),
                start: row.earliest_start,
                duration: row.duration_days,
                float_start: row.earliest_finish,
                float_days: row.total_float,
                is_critical: row.is_critical,
            })
            .collect()
    }

    pub fn schedule_frame(&self) -> PolarsResult<DataFrame> {
        let rows = &self.activities;
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        let i64_col = |f: fn(&ScheduleRow) -> i64| rows.iter().map(f).collect::<Vec<i64>>();
        let start_dates: Vec<i32> = rows.iter().map(|r| date_to_i32(r.start_date)).collect();
        let finish_dates: Vec<i32> = rows.iter().map(|r| date_to_i32(r.finish_date)).collect();

        DataFrame::new(vec![
            Series::new(PlSmallStr::from_static("id"), ids).into_column(),
            Series::new(PlSmallStr::from_static("name"), names).into_column(),
            Series::new(PlSmallStr::from_static("duration_days"), i64_col(|r| r.duration_days))
                .into_column(),
            Series::new(PlSmallStr::from_static("earliest_start"), i64_col(|r| r.earliest_start))
                .into_column(),
            Series::new(PlSmallStr::from_static("earliest_finish"), i64_col(|r| r.earliest_finish))
                .into_column(),
            Series::new(PlSmallStr::from_static("latest_start"), i64_col(|r| r.latest_start))
                .into_column(),
            Series::new(PlSmallStr::from_static("latest_finish"), i64_col(|r| r.latest_finish))
                .into_column(),
            Series::new(PlSmallStr::from_static("total_float"), i64_col(|r| r.total_float))
                .into_column(),
            Series::new(PlSmallStr::from_static("free_float"), i64_col(|r| r.free_float))
                .into_column(),
            Series::new(
                PlSmallStr::from_static("is_critical"),
                rows.iter().map(|r| r.is_critical).collect::<Vec<bool>>(),
            )
            .into_column(),
            Series::new(
                PlSmallStr::from_static("budgeted_cost"),
                rows.iter().map(|r| r.budgeted_cost).collect::<Vec<f64>>(),
            )
            .into_column(),
            Series::new(PlSmallStr::from_static("early_start_date"), start_dates)
                .cast(&DataType::Date)?
                .into_column(),
            Series::new(PlSmallStr::from_static("early_finish_date"), finish_dates)
                .cast(&DataType::Date)?
                .into_column(),
        ])
    }

    pub fn cash_flow_frame(&self) -> PolarsResult<DataFrame> {
        let rows = &self.cash_flow;
        let f64_col = |f: fn(&CashFlowRow) -> f64| rows.iter().map(f).collect::<Vec<f64>>();

        DataFrame::new(vec![
            Series::new(
                PlSmallStr::from_static("month_index"),
                rows.iter().map(|r| r.month_index as i64).collect::<Vec<i64>>(),
            )
            .into_column(),
            Series::new(
                PlSmallStr::from_static("month"),
                rows.iter().map(|r| r.month.as_str()).collect::<Vec<&str>>(),
            )
            .into_column(),
            Series::new(PlSmallStr::from_static("planned_amount"), f64_col(|r| r.planned_amount))
                .into_column(),
            Series::new(
                PlSmallStr::from_static("cumulative_amount"),
                f64_col(|r| r.cumulative_amount),
            )
            .into_column(),
            Series::new(
                PlSmallStr::from_static("cumulative_percent"),
                f64_col(|r| r.cumulative_percent),
            )
            .into_column(),
        ])
    }
}

fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    (date - epoch).num_days() as i32
}
