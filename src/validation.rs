use std::collections::HashSet;
use std::fmt;

use crate::project::Project;

const MAX_TASK_NAME_LEN: usize = 200;

#[derive(Debug, Clone)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Structural checks run between parsing and resolution: the resolver
/// assumes unique names and existing dependency/calendar targets.
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    let calendar_names: HashSet<&str> = project
        .calendars
        .iter()
        .map(|cal| cal.name.as_str())
        .collect();

    let mut seen_names = HashSet::with_capacity(project.tasks.len());
    for task in &project.tasks {
        if task.name.is_empty() {
            return Err(ValidationError::new("task has empty name"));
        }
        if task.name.chars().count() > MAX_TASK_NAME_LEN {
            return Err(ValidationError::new(format!(
                "task name exceeds {MAX_TASK_NAME_LEN} characters"
            )));
        }
        if !seen_names.insert(task.name.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate task name: {}",
                task.name
            )));
        }
        if task.duration < 0 {
            return Err(ValidationError::new(format!(
                "task \"{}\" has negative duration {}",
                task.name, task.duration
            )));
        }
        if let Some(calendar) = &task.calendar {
            if !calendar_names.contains(calendar.as_str()) {
                return Err(ValidationError::new(format!(
                    "task \"{}\" references unknown calendar: {calendar}",
                    task.name
                )));
            }
        }
    }

    // Dependency targets are checked against the full task list, so forward
    // references are fine.
    let task_names: HashSet<&str> = project.tasks.iter().map(|t| t.name.as_str()).collect();
    for task in &project.tasks {
        for dep in &task.dependencies {
            if !task_names.contains(dep.task.as_str()) {
                return Err(ValidationError::new(format!(
                    "task \"{}\" depends on non-existent task: {}",
                    task.name, dep.task
                )));
            }
        }
    }

    Ok(())
}
