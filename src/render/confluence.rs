use crate::project::Project;
use crate::task::Task;

use super::svg::push_header_cell;
use super::{
    color_for_level, date_range, day_offset, escape_markup, indent_px, span_days, timeline_cells,
    truncate_name, RenderError, PIXELS_PER_DAY, ROW_HEIGHT,
};

const TASK_COLUMN_WIDTH: i64 = 220;
const HEADER_HEIGHT: i64 = 40;
const MIN_TIMELINE_WIDTH: i64 = 800;
const MILESTONE_RADIUS: f64 = 7.07;

/// Render an HTML snippet for a Confluence HTML macro: a sticky task-name
/// column next to a horizontally scrollable timeline.
pub fn render_confluence(project: &Project) -> Result<String, RenderError> {
    let (min, max) = date_range(project).ok_or(RenderError::EmptySchedule)?;
    let total_days = span_days(min, max);

    let timeline_width = ((total_days * PIXELS_PER_DAY) as i64).max(MIN_TIMELINE_WIDTH);
    let effective_width = timeline_width as f64 - MILESTONE_RADIUS * 2.0;
    let total_height = HEADER_HEIGHT + project.tasks.len() as i64 * ROW_HEIGHT;

    let task_column = task_column_svg(project, total_height);
    let timeline = timeline_svg(project, min, max, timeline_width, effective_width, total_height);

    Ok(format!(
        r#"<div style="display: flex; max-width: 100%; overflow-x: auto; border: 1px solid #ddd; background: white;">
    <div style="position: sticky; left: 0; z-index: 10; background: white; border-right: 2px solid #e0e0e0; flex-shrink: 0;">
{task_column}    </div>

    <div style="flex: 1; overflow-x: auto;">
{timeline}    </div>
</div>

<div style="margin-top: 20px; padding: 15px; background: #f5f5f5; border-left: 4px solid #4a90e2; font-family: Arial, sans-serif; font-size: 14px;">
    <strong>To use in Confluence:</strong>
    <ol style="margin: 10px 0; padding-left: 20px;">
        <li>Copy all the HTML above (from &lt;div style="display: flex"...&gt; to &lt;/div&gt;)</li>
        <li>In Confluence, insert the <strong>HTML macro</strong></li>
        <li>Paste the HTML into the macro</li>
        <li>Save the page</li>
    </ol>
    <p style="margin: 10px 0 0 0; color: #666;">
        <em>Note: The task names column will stay fixed while you scroll the timeline horizontally.</em>
    </p>
</div>
"#
    ))
}

fn task_column_svg(project: &Project, total_height: i64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{TASK_COLUMN_WIDTH}\" height=\"{total_height}\">\n"
    ));
    out.push_str(&format!(
        "  <rect x=\"0\" y=\"0\" width=\"{TASK_COLUMN_WIDTH}\" height=\"{HEADER_HEIGHT}\" fill=\"#f8f9fa\" stroke=\"#eee\"/>\n"
    ));
    out.push_str(&format!(
        "  <text x=\"10\" y=\"25\" font-family=\"Arial, sans-serif\" font-size=\"13\" font-weight=\"600\" fill=\"#333\">{}</text>\n",
        escape_markup(&project.name)
    ));

    for (row, task) in project.tasks.iter().enumerate() {
        let y = HEADER_HEIGHT + row as i64 * ROW_HEIGHT;
        let (x, name, style) = if task.is_milestone {
            (10, truncate_name(&task.name, 0), " font-style=\"italic\" fill=\"#666\"")
        } else {
            (
                10 + indent_px(task.level),
                truncate_name(&task.name, task.level),
                " fill=\"#333\"",
            )
        };
        out.push_str(&format!(
            "  <rect x=\"0\" y=\"{y}\" width=\"{TASK_COLUMN_WIDTH}\" height=\"{ROW_HEIGHT}\" fill=\"none\" stroke=\"#eee\"/>\n"
        ));
        out.push_str(&format!(
            "  <text x=\"{x}\" y=\"{}\" font-family=\"Arial, sans-serif\" font-size=\"13\"{style}>{}</text>\n",
            y + 25,
            escape_markup(&name)
        ));
    }

    out.push_str("  </svg>\n");
    out
}

fn timeline_svg(
    project: &Project,
    min: chrono::NaiveDate,
    max: chrono::NaiveDate,
    timeline_width: i64,
    effective_width: f64,
    total_height: i64,
) -> String {
    let total_days = span_days(min, max);

    let mut out = String::new();
    out.push_str(&format!(
        "  <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{timeline_width}\" height=\"{total_height}\">\n"
    ));

    for cell in timeline_cells(min, max, effective_width, 0.0) {
        push_header_cell(&mut out, &cell, 0);
    }

    for (row, task) in project.tasks.iter().enumerate() {
        let y = HEADER_HEIGHT + row as i64 * ROW_HEIGHT;
        out.push_str(&format!(
            "  <rect x=\"0\" y=\"{y}\" width=\"{timeline_width}\" height=\"{ROW_HEIGHT}\" fill=\"none\" stroke=\"#eee\"/>\n"
        ));
        push_bar(&mut out, task, y, min, total_days, effective_width);
    }

    out.push_str("  </svg>\n");
    out
}

fn push_bar(
    out: &mut String,
    task: &Task,
    y: i64,
    min: chrono::NaiveDate,
    total_days: f64,
    effective_width: f64,
) {
    let (Some(start), Some(end)) = (task.calculated_start, task.calculated_end) else {
        return;
    };

    let bar_left = (day_offset(start, min) / total_days) * effective_width;
    let bar_width =
        (((day_offset(end, min) - day_offset(start, min)) / total_days) * effective_width).max(5.0);
    let bar_x = bar_left + (MILESTONE_RADIUS - 5.0);

    if task.is_milestone {
        let center_x = bar_x + 5.0;
        let center_y = y + 21;
        out.push_str(&format!(
            "  <rect x=\"{bar_x:.2}\" y=\"{}\" width=\"10\" height=\"10\" fill=\"#e74c3c\" transform=\"rotate(45 {center_x:.2} {center_y})\"/>\n",
            y + 16
        ));
    } else {
        out.push_str(&format!(
            "  <rect x=\"{bar_x:.2}\" y=\"{}\" width=\"{bar_width:.2}\" height=\"28\" fill=\"{}\" rx=\"3\"/>\n",
            y + 6,
            color_for_level(task.level)
        ));
    }
}
