use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use super::{PersistenceError, PersistenceResult};
use crate::project::Project;
use crate::task::{Dependency, DependencyKind, Task};
use crate::validation::validate_project;

/// Write the whole project, calendars and calculated dates included, as a
/// JSON snapshot.
pub fn save_project_to_json<P: AsRef<Path>>(project: &Project, path: P) -> PersistenceResult<()> {
    validate_project(project).map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, project)?;
    Ok(())
}

pub fn load_project_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Project> {
    let file = File::open(path)?;
    let project: Project = serde_json::from_reader(file)?;
    validate_project(&project).map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
    Ok(project)
}

#[derive(Serialize, Deserialize)]
struct TaskCsvRecord {
    name: String,
    level: u32,
    is_milestone: bool,
    start: String,
    end: String,
    date: String,
    duration: i64,
    link: String,
    calendar: String,
    dependencies: String,
    calculated_start: String,
    calculated_end: String,
}

impl From<&Task> for TaskCsvRecord {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            level: task.level,
            is_milestone: task.is_milestone,
            start: format_date(task.start),
            end: format_date(task.end),
            date: format_date(task.date),
            duration: task.duration,
            link: task.link.clone().unwrap_or_default(),
            calendar: task.calendar.clone().unwrap_or_default(),
            dependencies: join_dependencies(&task.dependencies),
            calculated_start: format_date(task.calculated_start),
            calculated_end: format_date(task.calculated_end),
        }
    }
}

impl TaskCsvRecord {
    fn into_task(self) -> PersistenceResult<Task> {
        let mut task = Task::new(self.name, self.level);
        task.is_milestone = self.is_milestone;
        task.start = parse_date(&self.start)?;
        task.end = parse_date(&self.end)?;
        task.date = parse_date(&self.date)?;
        task.duration = self.duration;
        task.link = parse_string_option(self.link);
        task.calendar = parse_string_option(self.calendar);
        task.dependencies = split_dependencies(&self.dependencies);
        task.calculated_start = parse_date(&self.calculated_start)?;
        task.calculated_end = parse_date(&self.calculated_end)?;
        Ok(task)
    }
}

/// Encode tasks as flat CSV records. Calendars are not carried; CSV is a
/// task-level export for spreadsheets.
pub fn tasks_to_csv_string(project: &Project) -> PersistenceResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for task in &project.tasks {
        writer.serialize(TaskCsvRecord::from(task))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| PersistenceError::InvalidData(format!("csv buffer: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| PersistenceError::InvalidData(format!("csv output not utf-8: {e}")))
}

pub fn save_tasks_to_csv<P: AsRef<Path>>(project: &Project, path: P) -> PersistenceResult<()> {
    let csv = tasks_to_csv_string(project)?;
    std::fs::write(path, csv)?;
    Ok(())
}

pub fn load_tasks_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Task>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut tasks = Vec::new();
    for record in reader.deserialize::<TaskCsvRecord>() {
        let record = record?;
        tasks.push(record.into_task()?);
    }

    if tasks.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no tasks".into(),
        ));
    }

    Ok(tasks)
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_date(input: &str) -> PersistenceResult<Option<NaiveDate>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}

fn join_dependencies(dependencies: &[Dependency]) -> String {
    dependencies
        .iter()
        .map(|dep| format!("{}:{}", dep.task, dep.kind.as_str()))
        .collect::<Vec<_>>()
        .join(";")
}

fn split_dependencies(input: &str) -> Vec<Dependency> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    input
        .split(';')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            // The text after the last colon is the kind; a bare name means
            // finish-to-start.
            match part.rsplit_once(':') {
                Some((task, kind)) => {
                    Some(Dependency::new(task, DependencyKind::from_label(kind)))
                }
                None => Some(Dependency::new(part, DependencyKind::FinishToStart)),
            }
        })
        .collect()
}

fn parse_string_option(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
