use crate::project::Project;

use super::{date_range, date_range_label, day_offset, escape_markup, span_days, RenderError,
    PIXELS_PER_DAY};

const TASK_COLUMN_WIDTH: i64 = 220;
const MIN_TIMELINE_WIDTH: i64 = 1000;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Gantt Chart</title>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
            padding: 20px;
            background: #f5f5f5;
        }

        .container {
            min-width: {min_width}px;
            width: fit-content;
            max-width: 100%;
            margin: 0 auto;
            background: white;
            border-radius: 8px;
            box-shadow: 0 2px 8px rgba(0,0,0,0.1);
            padding: 20px;
        }

        .gantt-wrapper {
            overflow-x: auto;
            overflow-y: visible;
        }

        h1 {
            margin-bottom: 30px;
            color: #333;
        }

        .gantt {
            display: grid;
            grid-template-columns: 200px 1fr;
            gap: 0;
            border: 1px solid #ddd;
            overflow: visible;
        }

        .gantt-header {
            display: contents;
        }

        .gantt-header-task,
        .gantt-header-timeline {
            background: #f8f9fa;
            padding: 10px;
            font-weight: 600;
            border-bottom: 2px solid #ddd;
        }

        .task-row {
            display: contents;
        }

        .task-name {
            padding: 10px;
            border-bottom: 1px solid #eee;
            background: white;
            min-height: 40px;
        }

        .task-name.level-2 {
            font-weight: 600;
            padding-left: 10px;
        }

        .task-name.level-3 {
            padding-left: 30px;
        }

        .task-name.level-4 {
            padding-left: 50px;
        }

        .task-name.milestone {
            font-style: italic;
            color: #666;
            padding: 15px 10px;
        }

        .task-name a {
            color: #0066cc;
            text-decoration: none;
            font-size: 0.9em;
            margin-left: 5px;
        }

        .task-timeline {
            padding: 10px;
            border-bottom: 1px solid #eee;
            position: relative;
            background: white;
            overflow: visible;
            min-height: 40px;
        }

        .task-bar {
            position: absolute;
            height: 24px;
            top: 50%;
            transform: translateY(-50%);
            border-radius: 4px;
            background: #4a90e2;
            display: flex;
            align-items: center;
            padding: 0 8px;
            color: white;
            font-size: 0.85em;
            white-space: nowrap;
        }

        .task-bar.level-2 {
            background: #4a90e2;
        }

        .task-bar.level-3 {
            background: #7eb0e8;
        }

        .task-bar.level-4 {
            background: #a8c9ed;
        }

        .task-bar.milestone {
            width: 12px !important;
            height: 12px;
            border-radius: 50%;
            background: #e74c3c;
            transform: translateY(-50%) rotate(45deg);
            padding: 0;
        }

        .legend {
            margin-top: 20px;
            padding: 15px;
            background: #f8f9fa;
            border-radius: 4px;
        }

        .legend-item {
            display: inline-block;
            margin-right: 20px;
            font-size: 0.9em;
        }

        .legend-color {
            display: inline-block;
            width: 20px;
            height: 12px;
            margin-right: 5px;
            border-radius: 2px;
            vertical-align: middle;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>

        <div class="gantt-wrapper">
            <div class="gantt">
                <div class="gantt-header">
                    <div class="gantt-header-task">Task</div>
                    <div class="gantt-header-timeline">Timeline</div>
                </div>
"#;

const PAGE_FOOT: &str = r#"            </div>
        </div>

        <div class="legend">
            <div class="legend-item">
                <span class="legend-color" style="background: #4a90e2;"></span>
                H2 Tasks
            </div>
            <div class="legend-item">
                <span class="legend-color" style="background: #7eb0e8;"></span>
                H3 Tasks
            </div>
            <div class="legend-item">
                <span class="legend-color" style="background: #e74c3c; width: 12px; height: 12px; transform: rotate(45deg);"></span>
                Milestones
            </div>
        </div>
    </div>
</body>
</html>
"#;

/// Render the project as a self-contained HTML page.
pub fn render_html(project: &Project) -> Result<String, RenderError> {
    let (min, max) = date_range(project).ok_or(RenderError::EmptySchedule)?;
    let total_days = span_days(min, max);

    // Keep short projects readable rather than squeezing them into a sliver.
    let timeline_width = ((total_days * PIXELS_PER_DAY) as i64).max(MIN_TIMELINE_WIDTH);
    let min_width = TASK_COLUMN_WIDTH + timeline_width;

    let title = escape_markup(&project.name);
    let mut out = PAGE_HEAD
        .replace("{title}", &title)
        .replace("{min_width}", &min_width.to_string());

    for task in &project.tasks {
        let row_class = if task.is_milestone {
            "milestone".to_string()
        } else {
            format!("level-{}", task.level)
        };

        let link = match &task.link {
            Some(url) => format!(
                " <a href=\"{}\" target=\"_blank\">&#128279;</a>",
                escape_markup(url)
            ),
            None => String::new(),
        };

        let (bar_left, bar_width, label) =
            if let (Some(start), Some(end)) = (task.calculated_start, task.calculated_end) {
                let left = (day_offset(start, min) / total_days) * 100.0;
                let width = (((day_offset(end, min) - day_offset(start, min)) / total_days)
                    * 100.0)
                    .max(0.5);
                let label = if task.is_milestone {
                    String::new()
                } else {
                    escape_markup(&date_range_label(start, end))
                };
                (left, width, label)
            } else {
                (0.0, 0.0, String::new())
            };

        out.push_str(&format!(
            r#"                <div class="task-row">
                    <div class="task-name {row_class}">
                        {name}{link}
                    </div>
                    <div class="task-timeline">
                        <div class="task-bar {row_class}"
                             style="left: {bar_left:.4}%; width: {bar_width:.4}%;">
                            {label}
                        </div>
                    </div>
                </div>
"#,
            name = escape_markup(&task.name),
        ));
    }

    out.push_str(PAGE_FOOT);
    Ok(out)
}
