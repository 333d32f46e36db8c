use super::{PersistenceError, PersistenceResult};
use crate::activity::ActivityRecord;
use crate::export::ScheduleReport;
use crate::metadata::ProjectMetadata;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// On-disk project: optional metadata plus the activity records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub metadata: ProjectMetadata,
    pub activities: Vec<ActivityRecord>,
}

pub fn load_project_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<ProjectFile> {
    let file = File::open(path)?;
    let project: ProjectFile = serde_json::from_reader(file)?;
    Ok(project)
}

pub fn save_project_to_json<P: AsRef<Path>>(project: &ProjectFile, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, project)?;
    Ok(())
}

/// Reads a bare [`ProjectMetadata`] document, e.g. a `--config` file.
pub fn load_metadata_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<ProjectMetadata> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

pub fn save_report_to_json<P: AsRef<Path>>(report: &ScheduleReport, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

#[derive(Serialize, Deserialize)]
struct ActivityCsvRecord {
    id: String,
    #[serde(default)]
    name: String,
    duration_days: String,
    #[serde(default)]
    predecessor_ids: String,
    #[serde(default)]
    budgeted_cost: String,
}

impl ActivityCsvRecord {
    fn into_record(self) -> PersistenceResult<ActivityRecord> {
        let duration_days = parse_i64(&self.duration_days)?.ok_or_else(|| {
            PersistenceError::InvalidData(format!("activity '{}' has no duration_days", self.id))
        })?;
        let budgeted_cost = parse_f64(&self.budgeted_cost)?.unwrap_or(0.0);
        Ok(ActivityRecord::new(self.id.trim(), self.name, duration_days)
            .with_predecessors(split_ids(&self.predecessor_ids))
            .with_cost(budgeted_cost))
    }
}

pub fn load_activities_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<ActivityRecord>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for row in reader.deserialize::<ActivityCsvRecord>() {
        records.push(row?.into_record()?);
    }

    if records.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no activities".into(),
        ));
    }
    Ok(records)
}

pub fn save_schedule_table_to_csv<P: AsRef<Path>>(
    report: &ScheduleReport,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &report.activities {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_cash_flow_to_csv<P: AsRef<Path>>(report: &ScheduleReport, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &report.cash_flow {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_i64(input: &str) -> PersistenceResult<Option<i64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    input
        .trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid integer '{input}': {e}")))
}

fn parse_f64(input: &str) -> PersistenceResult<Option<f64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    input
        .trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid number '{input}': {e}")))
}

fn split_ids(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
