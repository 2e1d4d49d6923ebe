use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::fmt;

use crate::calendar::Calendar;
use crate::project::Project;
use crate::task::{CandidateBucket, Task, TargetField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A task depends on itself, directly or transitively.
    CircularDependency(String),
    /// A dependency names a task that does not exist in the project.
    DependencyNotFound(String),
    /// A task's dependencies produced neither a start nor an end candidate.
    UnresolvedDependency(String),
    /// A task has no explicit start, no milestone date, and no dependencies.
    MissingSchedule(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::CircularDependency(name) => {
                write!(f, "circular dependency detected involving task: {name}")
            }
            ResolveError::DependencyNotFound(name) => {
                write!(f, "dependency not found: {name}")
            }
            ResolveError::UnresolvedDependency(name) => {
                write!(f, "task {name} has dependencies but no resolvable start or end")
            }
            ResolveError::MissingSchedule(name) => {
                write!(f, "task {name} has no start date, milestone date, or dependencies")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Per-task progress through one `resolve` call. `InProgress` marks the
/// active recursion chain; re-entering it is the cycle trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskState {
    Unresolved,
    InProgress,
    Resolved,
}

/// Assign calculated start/end dates to every task in the project.
///
/// Tasks are processed in document order; dependencies are resolved
/// recursively on demand. On success every task carries both calculated
/// dates. On failure the project's partial mutations must not be rendered.
pub fn resolve(project: &mut Project) -> Result<(), ResolveError> {
    let task_index: HashMap<String, usize> = project
        .tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| (task.name.clone(), idx))
        .collect();

    let calendar_index: HashMap<String, Calendar> = project
        .calendars
        .iter()
        .map(|cal| (cal.name.clone(), cal.clone()))
        .collect();

    let project_default = project.default_calendar().cloned();

    // Tasks carrying both calculated dates stay untouched on re-resolution.
    let mut states: Vec<TaskState> = project
        .tasks
        .iter()
        .map(|task| {
            if task.calculated_start.is_some() && task.calculated_end.is_some() {
                TaskState::Resolved
            } else {
                TaskState::Unresolved
            }
        })
        .collect();

    for idx in 0..project.tasks.len() {
        resolve_task(
            &mut project.tasks,
            idx,
            &task_index,
            &calendar_index,
            project_default.as_ref(),
            &mut states,
        )?;
    }

    Ok(())
}

fn resolve_task(
    tasks: &mut Vec<Task>,
    idx: usize,
    task_index: &HashMap<String, usize>,
    calendar_index: &HashMap<String, Calendar>,
    project_default: Option<&Calendar>,
    states: &mut Vec<TaskState>,
) -> Result<(), ResolveError> {
    match states[idx] {
        TaskState::Resolved => return Ok(()),
        TaskState::InProgress => {
            return Err(ResolveError::CircularDependency(tasks[idx].name.clone()));
        }
        TaskState::Unresolved => {}
    }

    states[idx] = TaskState::InProgress;
    let result = compute_dates(tasks, idx, task_index, calendar_index, project_default, states);
    // The task leaves the active chain on every exit path.
    states[idx] = if result.is_ok() {
        TaskState::Resolved
    } else {
        TaskState::Unresolved
    };
    result
}

fn compute_dates(
    tasks: &mut Vec<Task>,
    idx: usize,
    task_index: &HashMap<String, usize>,
    calendar_index: &HashMap<String, Calendar>,
    project_default: Option<&Calendar>,
    states: &mut Vec<TaskState>,
) -> Result<(), ResolveError> {
    let calendar = effective_calendar(
        tasks[idx].calendar.as_deref(),
        calendar_index,
        project_default,
    );
    let duration = tasks[idx].duration;

    // Explicit start date wins over everything else.
    if let Some(start) = tasks[idx].start {
        let end = if duration > 0 {
            calendar.add_business_days(start, duration)
        } else if let Some(end) = tasks[idx].end {
            end
        } else {
            start
        };
        tasks[idx].calculated_start = Some(start);
        tasks[idx].calculated_end = Some(end);
        return Ok(());
    }

    // Milestone pinned to a single date.
    if let Some(date) = tasks[idx].date {
        tasks[idx].calculated_start = Some(date);
        tasks[idx].calculated_end = Some(date);
        return Ok(());
    }

    // Derive from dependencies.
    if !tasks[idx].dependencies.is_empty() {
        let dependencies = tasks[idx].dependencies.clone();
        let mut start_candidate: Option<NaiveDate> = None;
        let mut end_candidate: Option<NaiveDate> = None;

        for dep in &dependencies {
            let target = *task_index
                .get(&dep.task)
                .ok_or_else(|| ResolveError::DependencyNotFound(dep.task.clone()))?;

            resolve_task(tasks, target, task_index, calendar_index, project_default, states)?;

            let (field, bucket) = dep.kind.constraint();
            let anchor = match field {
                TargetField::Start => tasks[target].calculated_start,
                TargetField::End => tasks[target].calculated_end,
            };
            let Some(date) = anchor else { continue };

            let candidate = match bucket {
                CandidateBucket::Start => &mut start_candidate,
                CandidateBucket::End => &mut end_candidate,
            };
            *candidate = Some(candidate.map_or(date, |held| held.max(date)));
        }

        let (start, end) = match (start_candidate, end_candidate) {
            // A start candidate always wins, even when an end candidate is
            // also present; no consistency check between the two.
            (Some(start), _) => {
                let end = if duration > 0 {
                    calendar.add_business_days(start, duration)
                } else {
                    start
                };
                (start, end)
            }
            // End-constrained: the start is placed by plain calendar-day
            // subtraction, not business-day arithmetic.
            (None, Some(end)) => {
                let start = if duration > 0 {
                    end - Duration::days(duration)
                } else {
                    end
                };
                (start, end)
            }
            (None, None) => {
                return Err(ResolveError::UnresolvedDependency(tasks[idx].name.clone()));
            }
        };

        tasks[idx].calculated_start = Some(start);
        tasks[idx].calculated_end = Some(end);
        return Ok(());
    }

    Err(ResolveError::MissingSchedule(tasks[idx].name.clone()))
}

/// Calendar lookup chain: the task's named calendar, then the project
/// default, then the built-in Sat/Sun calendar.
fn effective_calendar(
    task_calendar: Option<&str>,
    calendar_index: &HashMap<String, Calendar>,
    project_default: Option<&Calendar>,
) -> Calendar {
    task_calendar
        .and_then(|name| calendar_index.get(name))
        .or(project_default)
        .cloned()
        .unwrap_or_else(Calendar::built_in_default)
}
