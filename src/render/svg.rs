use crate::project::Project;
use crate::task::Task;

use super::{
    color_for_level, date_range, date_range_label, day_offset, escape_markup, indent_px, span_days,
    timeline_cells, truncate_name, RenderError, TimelineCell, PIXELS_PER_DAY, ROW_HEIGHT,
};

const NAME_COLUMN_X: i64 = 20;
const NAME_COLUMN_WIDTH: i64 = 200;
const TIMELINE_X: i64 = 220;
const HEADER_HEIGHT: i64 = 90;
const MIN_TIMELINE_WIDTH: i64 = 800;

// A rotated 10x10 milestone square has a corner radius of 10*sqrt(2)/2, so
// the timeline keeps this much padding to stop diamonds clipping the edges.
const MILESTONE_RADIUS: f64 = 7.07;

/// Render the project as a standalone SVG Gantt chart.
pub fn render_svg(project: &Project) -> Result<String, RenderError> {
    let (min, max) = date_range(project).ok_or(RenderError::EmptySchedule)?;
    let total_days = span_days(min, max);

    let timeline_width = ((total_days * PIXELS_PER_DAY) as i64).max(MIN_TIMELINE_WIDTH);
    let effective_width = timeline_width as f64 - MILESTONE_RADIUS * 2.0;

    let total_height = HEADER_HEIGHT + project.tasks.len() as i64 * ROW_HEIGHT + 20;
    let total_width = TIMELINE_X + timeline_width + 20;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{total_width}\" height=\"{total_height}\" viewBox=\"0 0 {total_width} {total_height}\">\n"
    ));
    out.push_str(&format!(
        "  <rect width=\"{total_width}\" height=\"{total_height}\" fill=\"#ffffff\"/>\n"
    ));
    out.push_str(&format!(
        "  <text x=\"20\" y=\"30\" font-family=\"Arial, sans-serif\" font-size=\"20\" font-weight=\"bold\" fill=\"#333\">{}</text>\n",
        escape_markup(&project.name)
    ));

    // Header: name-column cell plus timeline cells.
    out.push_str(&format!(
        "  <rect x=\"{NAME_COLUMN_X}\" y=\"50\" width=\"{NAME_COLUMN_WIDTH}\" height=\"40\" fill=\"none\" stroke=\"#eee\"/>\n"
    ));
    for cell in timeline_cells(min, max, effective_width, TIMELINE_X as f64) {
        push_header_cell(&mut out, &cell, 50);
    }

    for (row, task) in project.tasks.iter().enumerate() {
        let y = HEADER_HEIGHT + row as i64 * ROW_HEIGHT;
        push_task_row(&mut out, task, y, min, total_days, effective_width);
    }

    out.push_str("</svg>\n");
    Ok(out)
}

pub(crate) fn push_header_cell(out: &mut String, cell: &TimelineCell, y: i64) {
    out.push_str(&format!(
        "  <rect x=\"{:.2}\" y=\"{y}\" width=\"{:.2}\" height=\"40\" fill=\"none\" stroke=\"#eee\"/>\n",
        cell.x, cell.width
    ));
    out.push_str(&format!(
        "  <text x=\"{:.2}\" y=\"{}\" font-family=\"Arial, sans-serif\" font-size=\"12\" font-weight=\"600\" fill=\"#333\" dx=\"5\">{}</text>\n",
        cell.x,
        y + 25,
        escape_markup(&cell.label)
    ));
}

fn push_task_row(
    out: &mut String,
    task: &Task,
    y: i64,
    min: chrono::NaiveDate,
    total_days: f64,
    effective_width: f64,
) {
    out.push_str("  <g class=\"task-row\">\n");

    // Name cell.
    let (name_x, display_name, name_style) = if task.is_milestone {
        (
            NAME_COLUMN_X + 10,
            truncate_name(&task.name, 0),
            " font-style=\"italic\" fill=\"#666\"",
        )
    } else {
        (
            NAME_COLUMN_X + 10 + indent_px(task.level),
            truncate_name(&task.name, task.level),
            " fill=\"#333\"",
        )
    };
    out.push_str(&format!(
        "    <rect x=\"{NAME_COLUMN_X}\" y=\"{y}\" width=\"{NAME_COLUMN_WIDTH}\" height=\"{ROW_HEIGHT}\" fill=\"none\" stroke=\"#eee\"/>\n"
    ));
    out.push_str(&format!(
        "    <text x=\"{name_x}\" y=\"{}\" font-family=\"Arial, sans-serif\" font-size=\"13\"{name_style}>{}</text>\n",
        y + 25,
        escape_markup(&display_name)
    ));

    // Timeline cell background.
    out.push_str(&format!(
        "    <rect x=\"{TIMELINE_X}\" y=\"{y}\" width=\"{:.2}\" height=\"{ROW_HEIGHT}\" fill=\"none\" stroke=\"#eee\"/>\n",
        effective_width + MILESTONE_RADIUS * 2.0
    ));

    if let (Some(start), Some(end)) = (task.calculated_start, task.calculated_end) {
        let bar_left = (day_offset(start, min) / total_days) * effective_width;
        let bar_width =
            (((day_offset(end, min) - day_offset(start, min)) / total_days) * effective_width)
                .max(5.0);

        // Diamonds extend past their anchor, so bars sit slightly inset.
        let bar_x = TIMELINE_X as f64 + bar_left + (MILESTONE_RADIUS - 5.0);

        if task.is_milestone {
            let center_x = bar_x + 5.0;
            let center_y = y + 21;
            out.push_str(&format!(
                "    <rect x=\"{bar_x:.2}\" y=\"{}\" width=\"10\" height=\"10\" fill=\"#e74c3c\" transform=\"rotate(45 {center_x:.2} {center_y})\"/>\n",
                y + 16
            ));
        } else {
            out.push_str(&format!(
                "    <rect x=\"{bar_x:.2}\" y=\"{}\" width=\"{bar_width:.2}\" height=\"28\" fill=\"{}\" rx=\"3\"/>\n",
                y + 6,
                color_for_level(task.level)
            ));
            out.push_str(&format!(
                "    <text x=\"{:.2}\" y=\"{}\" font-family=\"Arial, sans-serif\" font-size=\"10\" fill=\"white\">{}</text>\n",
                bar_x + 5.0,
                y + 24,
                escape_markup(&date_range_label(start, end))
            ));
        }
    }

    out.push_str("  </g>\n");
}
