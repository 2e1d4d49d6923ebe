use chrono::NaiveDate;
use gantt_tool::parser::parse;
use gantt_tool::render::render_svg;
use gantt_tool::resolve;
use gantt_tool::validation::validate_project;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn full_pipeline_simple_project() {
    let input = r#"# Software Project

## Design Phase

| Property | Value |
|----------|-------|
| Start | 2024-01-01 |
| Duration | 10d |

## Implementation

| Property | Value |
|----------|-------|
| Duration | 15d |

| Depends On | Type |
|------------|------|
| Design Phase | finish-to-start |

**Launch**

| Property | Value |
|----------|-------|
| Date | 2024-02-01 |
"#;

    let mut project = parse(input);
    validate_project(&project).unwrap();
    resolve(&mut project).unwrap();

    // Every task carries both calculated dates after a successful resolve.
    for task in &project.tasks {
        assert!(task.calculated_start.is_some(), "{} missing start", task.name);
        assert!(task.calculated_end.is_some(), "{} missing end", task.name);
    }

    // No calendars in the document, so the built-in Sat/Sun calendar
    // drives the arithmetic: Jan 1 + 10 business days = Jan 15 (Monday).
    let design = project.task("Design Phase").unwrap();
    assert_eq!(design.calculated_end, Some(d(2024, 1, 15)));

    let implementation = project.task("Implementation").unwrap();
    assert_eq!(implementation.calculated_start, design.calculated_end);

    let svg = render_svg(&project).unwrap();
    assert!(svg.contains("Software Project"));
    assert!(svg.contains("Design Phase"));
    assert!(svg.contains("Implementation"));
    assert!(svg.contains("Launch"));
}

#[test]
fn full_pipeline_validation_failure() {
    let input = "# Project\n\n## Task A\n\n## Task A\n";

    let project = parse(input);
    let err = validate_project(&project).unwrap_err();
    assert!(err.to_string().contains("duplicate task name"));
}

#[test]
fn full_pipeline_cycle_failure() {
    let input = r#"# Project

## Task A

| Depends On | Type |
|------------|------|
| Task B | finish-to-start |

## Task B

| Depends On | Type |
|------------|------|
| Task A | finish-to-start |
"#;

    let mut project = parse(input);
    validate_project(&project).unwrap();
    let err = resolve(&mut project).unwrap_err();
    assert!(err.to_string().contains("circular dependency"));
}

#[test]
fn full_pipeline_sample_file() {
    let Ok(input) = std::fs::read_to_string("demos/sample-project.md") else {
        return; // sample not present in this checkout
    };

    let mut project = parse(&input);
    validate_project(&project).unwrap();
    resolve(&mut project).unwrap();

    assert_eq!(project.name, "Website Relaunch");
    assert!(project.tasks.iter().any(|t| t.is_milestone));
    for task in &project.tasks {
        assert!(task.calculated_start.is_some());
        assert!(task.calculated_end.is_some());
    }

    let svg = render_svg(&project).unwrap();
    assert!(svg.len() > 1000, "SVG output seems too small: {}", svg.len());
}
