use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::task::Task;

/// The parsed project plan: tasks in document order plus the calendars they
/// reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub tasks: Vec<Task>,
    pub calendars: Vec<Calendar>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
            calendars: Vec::new(),
        }
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn calendar(&self, name: &str) -> Option<&Calendar> {
        self.calendars.iter().find(|c| c.name == name)
    }

    /// The first calendar flagged as the project default, if any.
    pub fn default_calendar(&self) -> Option<&Calendar> {
        self.calendars.iter().find(|c| c.is_default)
    }
}
