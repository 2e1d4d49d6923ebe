use chrono::{NaiveDate, Weekday};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::calendar::Calendar;
use crate::project::Project;
use crate::task::{Dependency, DependencyKind, Task};

/// Parse a markdown project plan into a [`Project`].
///
/// The document format: the H1 heading names the project, every other
/// heading opens a task (headings prefixed `Calendar:` open a calendar
/// instead), a paragraph starting with bold text opens a milestone, and GFM
/// tables attach properties, dependencies, or calendar settings to whatever
/// was opened last. Malformed content is skipped, never fatal.
pub fn parse(source: &str) -> Project {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);

    let mut doc = DocumentParser::new();
    for event in Parser::new_ext(source, options) {
        doc.handle_event(event);
    }
    doc.project
}

struct DocumentParser {
    project: Project,
    current_task: Option<usize>,
    current_calendar: Option<usize>,

    buffer: String,
    heading_level: Option<u32>,
    in_paragraph: bool,
    strong_open: bool,
    milestone_name: Option<String>,

    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    cells: Vec<String>,
}

impl DocumentParser {
    fn new() -> Self {
        Self {
            project: Project::default(),
            current_task: None,
            current_calendar: None,
            buffer: String::new(),
            heading_level: None,
            in_paragraph: false,
            strong_open: false,
            milestone_name: None,
            headers: Vec::new(),
            rows: Vec::new(),
            cells: Vec::new(),
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.handle_start(tag),
            Event::End(tag_end) => self.handle_end(tag_end),
            Event::Text(text) => self.buffer.push_str(&text),
            Event::Code(text) => self.buffer.push_str(&text),
            Event::SoftBreak | Event::HardBreak => self.buffer.push(' '),
            _ => {}
        }
    }

    fn handle_start(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { level, .. } => {
                self.buffer.clear();
                self.heading_level = Some(heading_to_level(level));
            }
            Tag::Paragraph => {
                self.buffer.clear();
                self.in_paragraph = true;
                self.milestone_name = None;
            }
            Tag::Strong => {
                // A paragraph that opens with bold text declares a milestone.
                if self.in_paragraph && self.buffer.trim().is_empty() {
                    self.buffer.clear();
                    self.strong_open = true;
                }
            }
            Tag::Table(_) => {
                self.headers.clear();
                self.rows.clear();
                self.cells.clear();
            }
            Tag::TableHead | Tag::TableRow => self.cells.clear(),
            Tag::TableCell => self.buffer.clear(),
            _ => {}
        }
    }

    fn handle_end(&mut self, tag_end: TagEnd) {
        match tag_end {
            TagEnd::Heading(_) => {
                let text = self.buffer.trim().to_string();
                let level = self.heading_level.take().unwrap_or(2);
                self.buffer.clear();
                self.finish_heading(text, level);
            }
            TagEnd::Strong => {
                if self.strong_open {
                    self.milestone_name = Some(self.buffer.trim().to_string());
                    self.strong_open = false;
                    self.buffer.clear();
                }
            }
            TagEnd::Paragraph => {
                if let Some(name) = self.milestone_name.take() {
                    if !name.is_empty() {
                        self.project.tasks.push(Task::milestone(name));
                        self.current_task = Some(self.project.tasks.len() - 1);
                        self.current_calendar = None;
                    }
                }
                self.in_paragraph = false;
                self.buffer.clear();
            }
            TagEnd::TableCell => {
                self.cells.push(self.buffer.trim().to_string());
                self.buffer.clear();
            }
            TagEnd::TableHead => {
                self.headers = std::mem::take(&mut self.cells);
            }
            TagEnd::TableRow => {
                self.rows.push(std::mem::take(&mut self.cells));
            }
            TagEnd::Table => self.finish_table(),
            _ => {}
        }
    }

    fn finish_heading(&mut self, text: String, level: u32) {
        if level == 1 {
            self.project.name = text;
            self.current_task = None;
            self.current_calendar = None;
        } else if let Some(name) = text.strip_prefix("Calendar:") {
            self.project.calendars.push(Calendar::new(name.trim()));
            self.current_calendar = Some(self.project.calendars.len() - 1);
            self.current_task = None;
        } else {
            self.project.tasks.push(Task::new(text, level));
            self.current_task = Some(self.project.tasks.len() - 1);
            self.current_calendar = None;
        }
    }

    fn finish_table(&mut self) {
        let rows = std::mem::take(&mut self.rows);
        let headers = std::mem::take(&mut self.headers);
        if headers.len() < 2 {
            return;
        }

        match (headers[0].as_str(), headers[1].as_str()) {
            ("Property", "Value") => self.apply_property_table(&rows),
            ("Depends On", "Type") => self.apply_dependency_table(&rows),
            ("Type", "Value") => self.apply_calendar_table(&rows),
            _ => {}
        }
    }

    fn apply_property_table(&mut self, rows: &[Vec<String>]) {
        let Some(idx) = self.current_task else { return };
        let task = &mut self.project.tasks[idx];

        for row in rows {
            let [key, value, ..] = row.as_slice() else { continue };
            match key.as_str() {
                "Start" => {
                    if let Some(date) = parse_date(value) {
                        task.start = Some(date);
                    }
                }
                "End" => {
                    if let Some(date) = parse_date(value) {
                        task.end = Some(date);
                    }
                }
                "Date" => {
                    if let Some(date) = parse_date(value) {
                        task.date = Some(date);
                    }
                }
                "Duration" => task.duration = parse_duration(value),
                "Link" => task.link = Some(value.clone()),
                "Calendar" => task.calendar = Some(value.clone()),
                _ => {}
            }
        }
    }

    fn apply_dependency_table(&mut self, rows: &[Vec<String>]) {
        let Some(idx) = self.current_task else { return };
        let task = &mut self.project.tasks[idx];

        for row in rows {
            let Some(target) = row.first() else { continue };
            if target.is_empty() || target == "-" {
                continue;
            }
            let kind = match row.get(1) {
                Some(label) if !label.is_empty() => DependencyKind::from_label(label),
                _ => DependencyKind::FinishToStart,
            };
            task.dependencies.push(Dependency::new(target.clone(), kind));
        }
    }

    fn apply_calendar_table(&mut self, rows: &[Vec<String>]) {
        let Some(idx) = self.current_calendar else { return };
        let calendar = &mut self.project.calendars[idx];

        for row in rows {
            let [key, value, ..] = row.as_slice() else { continue };
            match key.as_str() {
                "Default" => calendar.is_default = value.eq_ignore_ascii_case("true"),
                "Weekends" => calendar.set_weekends(parse_weekdays(value)),
                "Holiday" => {
                    if let Some(date) = parse_date(value) {
                        calendar.add_holiday(date);
                    }
                }
                _ => {}
            }
        }
    }
}

fn heading_to_level(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Lenient date parsing: the first matching format wins, anything else is
/// silently ignored by the callers.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%B %d, %Y",
        "%b %d, %Y",
        "%d %B %Y",
    ];

    let value = value.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Duration strings use a single-letter unit suffix: `10d` or `2w`.
/// Unparseable values become 0.
pub fn parse_duration(value: &str) -> i64 {
    let value = value.trim();
    let Some(unit) = value.chars().last() else {
        return 0;
    };
    let number = &value[..value.len() - unit.len_utf8()];
    let Ok(count) = number.parse::<i64>() else {
        return 0;
    };
    match unit {
        'd' => count,
        'w' => count * 7,
        _ => 0,
    }
}

/// Comma-separated weekday names; only the first three letters matter, so
/// `Saturday`, `Sat`, and `sat` all work.
pub fn parse_weekdays(value: &str) -> Vec<Weekday> {
    value
        .split(',')
        .filter_map(|part| {
            let day: String = part.trim().chars().take(3).collect();
            match day.to_ascii_lowercase().as_str() {
                "mon" => Some(Weekday::Mon),
                "tue" => Some(Weekday::Tue),
                "wed" => Some(Weekday::Wed),
                "thu" => Some(Weekday::Thu),
                "fri" => Some(Weekday::Fri),
                "sat" => Some(Weekday::Sat),
                "sun" => Some(Weekday::Sun),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_units() {
        assert_eq!(parse_duration("10d"), 10);
        assert_eq!(parse_duration("2w"), 14);
        assert_eq!(parse_duration(" 3d "), 3);
        assert_eq!(parse_duration("5"), 0);
        assert_eq!(parse_duration("5h"), 0);
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("d"), 0);
    }

    #[test]
    fn weekday_names_match_on_prefix() {
        assert_eq!(
            parse_weekdays("Sat, Sunday"),
            vec![Weekday::Sat, Weekday::Sun]
        );
        assert_eq!(parse_weekdays("fri"), vec![Weekday::Fri]);
        assert!(parse_weekdays("noday").is_empty());
    }

    #[test]
    fn date_formats() {
        let want = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("2024-01-15"), Some(want));
        assert_eq!(parse_date("2024/01/15"), Some(want));
        assert_eq!(parse_date("01/15/2024"), Some(want));
        assert_eq!(parse_date("January 15, 2024"), Some(want));
        assert_eq!(parse_date("not a date"), None);
    }
}
