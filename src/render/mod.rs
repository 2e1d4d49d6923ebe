use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;

use crate::project::Project;

pub mod confluence;
pub mod html;
pub mod svg;

pub use confluence::render_confluence;
pub use html::render_html;
pub use svg::render_svg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No task in the project carries calculated dates.
    EmptySchedule,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::EmptySchedule => write!(f, "no tasks with calculated dates"),
        }
    }
}

impl std::error::Error for RenderError {}

pub(crate) const PIXELS_PER_DAY: f64 = 25.0;
pub(crate) const ROW_HEIGHT: i64 = 40;

// Name-column text metrics: 30px of the 200px column go to indentation and
// padding, and Arial 13px averages about 7px per character.
const MAX_NAME_WIDTH: f64 = 170.0;
const AVG_CHAR_WIDTH: f64 = 7.0;
const ELLIPSIS: &str = "...";

/// Smallest calculated start and largest calculated end across the project.
pub(crate) fn date_range(project: &Project) -> Option<(NaiveDate, NaiveDate)> {
    let mut min: Option<NaiveDate> = None;
    let mut max: Option<NaiveDate> = None;

    for task in &project.tasks {
        if let Some(start) = task.calculated_start {
            min = Some(min.map_or(start, |held| held.min(start)));
        }
        if let Some(end) = task.calculated_end {
            max = Some(max.map_or(end, |held| held.max(end)));
        }
    }

    Some((min?, max?))
}

/// Chart span in days, clamped to 1 so single-day projects keep finite
/// geometry.
pub(crate) fn span_days(min: NaiveDate, max: NaiveDate) -> f64 {
    ((max - min).num_days() as f64).max(1.0)
}

pub(crate) fn day_offset(date: NaiveDate, min: NaiveDate) -> f64 {
    (date - min).num_days() as f64
}

/// Short date label, e.g. `Jan 2`.
pub(crate) fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

pub(crate) fn date_range_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", short_date(start), short_date(end))
}

pub(crate) fn indent_px(level: u32) -> i64 {
    if level >= 2 {
        ((level - 2) * 20) as i64
    } else {
        0
    }
}

/// Bar fill by heading level; deeper levels fade toward the background.
pub(crate) fn color_for_level(level: u32) -> &'static str {
    match level {
        3 => "#7eb0e8",
        4 => "#a8c9ed",
        _ => "#4a90e2",
    }
}

/// Truncate a task name to the pixel width left after indentation.
pub(crate) fn truncate_name(name: &str, level: u32) -> String {
    let available = MAX_NAME_WIDTH - indent_px(level) as f64;
    let max_chars = (available / AVG_CHAR_WIDTH) as usize;

    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return ELLIPSIS.to_string();
    }

    let truncated: String = name.chars().take(max_chars - ELLIPSIS.len()).collect();
    format!("{}{ELLIPSIS}", truncated.trim_end())
}

pub(crate) fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) struct TimelineCell {
    pub x: f64,
    pub width: f64,
    pub label: String,
}

/// Header cells for the chart timeline: month cells for spans over 60 days,
/// otherwise Monday-aligned week cells. `origin_x` is the pixel position of
/// the timeline's left edge.
pub(crate) fn timeline_cells(
    min: NaiveDate,
    max: NaiveDate,
    timeline_width: f64,
    origin_x: f64,
) -> Vec<TimelineCell> {
    let total_days = span_days(min, max);
    let mut cells = Vec::new();

    if total_days > 60.0 {
        let mut current = NaiveDate::from_ymd_opt(min.year(), min.month(), 1)
            .unwrap_or(min);
        while current <= max {
            let month_start = current;
            let month_end = next_month(month_start);

            let visible_start = month_start.max(min);
            let visible_end = month_end.min(max);
            let start_offset = day_offset(visible_start, min);
            let end_offset = day_offset(visible_end, min);

            cells.push(TimelineCell {
                x: origin_x + (start_offset / total_days) * timeline_width,
                width: ((end_offset - start_offset) / total_days) * timeline_width,
                label: month_start.format("%b %Y").to_string(),
            });

            current = month_end;
        }
    } else {
        let mut current = min - Duration::days(min.weekday().num_days_from_monday() as i64);
        while current <= max {
            let week_start = current;
            let week_end = week_start + Duration::days(7);

            let visible_start = week_start.max(min);
            let visible_end = week_end.min(max);
            let start_offset = day_offset(visible_start, min);
            let end_offset = day_offset(visible_end, min);

            // week_end is exclusive; the label shows the last covered day.
            let display_end = (week_end - Duration::days(1)).min(max);

            cells.push(TimelineCell {
                x: origin_x + (start_offset / total_days) * timeline_width,
                width: ((end_offset - start_offset) / total_days) * timeline_width,
                label: date_range_label(week_start, display_end),
            });

            current = week_end;
        }
    }

    cells
}

fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}
