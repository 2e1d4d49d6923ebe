use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Working-day configuration: weekend weekdays plus holiday dates.
///
/// A calendar built with [`Calendar::new`] has no weekends and no holidays,
/// so every day counts as a working day until configured otherwise. Only the
/// built-in fallback carries the Sat/Sun weekend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub name: String,
    pub is_default: bool,
    pub weekends: HashSet<Weekday>,
    pub holidays: HashSet<NaiveDate>,
}

impl Calendar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_default: false,
            weekends: HashSet::new(),
            holidays: HashSet::new(),
        }
    }

    /// The fallback calendar used when neither the task nor the project
    /// names one: Sat/Sun weekends, no holidays.
    pub fn built_in_default() -> Self {
        Self {
            name: "default".to_string(),
            is_default: false,
            weekends: HashSet::from([Weekday::Sat, Weekday::Sun]),
            holidays: HashSet::new(),
        }
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    pub fn set_weekends(&mut self, days: impl IntoIterator<Item = Weekday>) {
        self.weekends = days.into_iter().collect();
    }

    /// Check whether a date is a working day under this calendar.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !self.weekends.contains(&date.weekday()) && !self.holidays.contains(&date)
    }

    /// Advance `days` working days from `start`, scanning one calendar day
    /// at a time. `start` itself is never counted; the returned date is
    /// always a working day. Callers guard the `days == 0` case.
    pub fn add_business_days(&self, start: NaiveDate, days: i64) -> NaiveDate {
        let mut current = start;
        let mut remaining = days;

        while remaining > 0 {
            current = current + Duration::days(1);
            if self.is_business_day(current) {
                remaining -= 1;
            }
        }

        current
    }
}
