use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a dependency ties this task's schedule to its target's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DependencyKind {
    FinishToStart,
    StartToStart,
    FinishToFinish,
    StartToFinish,
}

/// Which date of the dependency target a kind reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    Start,
    End,
}

/// Which candidate bucket of the dependent task a kind feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateBucket {
    Start,
    End,
}

impl DependencyKind {
    /// Mapping from kind to (target field read, candidate bucket fed).
    /// Finish/start-to-start constrain when the task may begin;
    /// finish/start-to-finish constrain when it must end.
    pub fn constraint(self) -> (TargetField, CandidateBucket) {
        match self {
            DependencyKind::FinishToStart => (TargetField::End, CandidateBucket::Start),
            DependencyKind::StartToStart => (TargetField::Start, CandidateBucket::Start),
            DependencyKind::FinishToFinish => (TargetField::End, CandidateBucket::End),
            DependencyKind::StartToFinish => (TargetField::Start, CandidateBucket::End),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DependencyKind::FinishToStart => "finish-to-start",
            DependencyKind::StartToStart => "start-to-start",
            DependencyKind::FinishToFinish => "finish-to-finish",
            DependencyKind::StartToFinish => "start-to-finish",
        }
    }

    /// Parse a textual kind. Anything unrecognized is an alias for
    /// finish-to-start rather than an error.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "start-to-start" => DependencyKind::StartToStart,
            "finish-to-finish" => DependencyKind::FinishToFinish,
            "start-to-finish" => DependencyKind::StartToFinish,
            _ => DependencyKind::FinishToStart,
        }
    }
}

impl Default for DependencyKind {
    fn default() -> Self {
        DependencyKind::FinishToStart
    }
}

impl From<String> for DependencyKind {
    fn from(value: String) -> Self {
        DependencyKind::from_label(&value)
    }
}

impl From<DependencyKind> for String {
    fn from(value: DependencyKind) -> Self {
        value.as_str().to_string()
    }
}

/// A scheduling link to another task, by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub task: String,
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn new(task: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            task: task.into(),
            kind,
        }
    }
}

/// A task or milestone row of the project plan.
///
/// `calculated_start` / `calculated_end` are the resolver's output; they are
/// `None` until resolution and write-once afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    /// Heading level of the source document (2 = H2, 3 = H3, ...);
    /// 0 for milestones.
    pub level: u32,
    pub is_milestone: bool,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Explicit single date, used by milestones.
    pub date: Option<NaiveDate>,
    /// Duration in whole days; 0 means instantaneous.
    pub duration: i64,
    pub link: Option<String>,
    /// Name of the calendar governing this task's duration arithmetic.
    pub calendar: Option<String>,
    pub dependencies: Vec<Dependency>,
    pub calculated_start: Option<NaiveDate>,
    pub calculated_end: Option<NaiveDate>,
}

impl Task {
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
            is_milestone: false,
            start: None,
            end: None,
            date: None,
            duration: 0,
            link: None,
            calendar: None,
            dependencies: Vec::new(),
            calculated_start: None,
            calculated_end: None,
        }
    }

    pub fn milestone(name: impl Into<String>) -> Self {
        let mut task = Self::new(name, 0);
        task.is_milestone = true;
        task
    }

    /// True when the task's timing comes from its dependencies rather than
    /// an explicit date.
    pub fn is_calculated(&self) -> bool {
        self.start.is_none() && self.date.is_none() && !self.dependencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn unknown_kind_aliases_to_finish_to_start() {
        assert_eq!(
            DependencyKind::from_label("blocked-by"),
            DependencyKind::FinishToStart
        );
        assert_eq!(DependencyKind::from_label(""), DependencyKind::FinishToStart);
        assert_eq!(
            DependencyKind::from_label("start-to-finish"),
            DependencyKind::StartToFinish
        );
    }

    #[test]
    fn kind_labels_round_trip() {
        for kind in [
            DependencyKind::FinishToStart,
            DependencyKind::StartToStart,
            DependencyKind::FinishToFinish,
            DependencyKind::StartToFinish,
        ] {
            assert_eq!(DependencyKind::from_label(kind.as_str()), kind);
        }
    }

    #[test]
    fn is_calculated_requires_dependencies_and_no_dates() {
        let mut task = Task::new("Build", 2);
        assert!(!task.is_calculated());

        task.dependencies
            .push(Dependency::new("Design", DependencyKind::FinishToStart));
        assert!(task.is_calculated());

        task.start = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(!task.is_calculated());
    }
}
