use chrono::NaiveDate;
use gantt_tool::persistence::{
    load_project_from_json, load_tasks_from_csv, save_project_to_json, save_tasks_to_csv,
    tasks_to_csv_string,
};
use gantt_tool::{resolve, Calendar, Dependency, DependencyKind, Project, Task};
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_project() -> Project {
    let mut design = Task::new("Design", 2);
    design.start = Some(d(2024, 1, 1));
    design.duration = 5;

    let mut build = Task::new("Build", 2);
    build.duration = 10;
    build.link = Some("https://example.com/build".to_string());
    build
        .dependencies
        .push(Dependency::new("Design", DependencyKind::FinishToStart));
    build
        .dependencies
        .push(Dependency::new("Design", DependencyKind::StartToStart));

    let mut cal = Calendar::new("no-weekends");
    cal.is_default = true;
    cal.add_holiday(d(2024, 12, 25));

    let mut project = Project::new("Exported");
    project.tasks = vec![design, build];
    project.calendars = vec![cal];
    project
}

#[test]
fn json_round_trip_preserves_project() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("project.json");

    let mut project = sample_project();
    resolve(&mut project).unwrap();

    save_project_to_json(&project, &path).unwrap();
    let loaded = load_project_from_json(&path).unwrap();

    assert_eq!(loaded, project);
}

#[test]
fn json_save_rejects_invalid_project() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");

    let mut project = sample_project();
    project.tasks.push(Task::new("Design", 2)); // duplicate name

    let err = save_project_to_json(&project, &path).unwrap_err();
    assert!(err.to_string().contains("duplicate task name"));
}

#[test]
fn csv_round_trip_preserves_tasks() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.csv");

    let mut project = sample_project();
    resolve(&mut project).unwrap();

    save_tasks_to_csv(&project, &path).unwrap();
    let tasks = load_tasks_from_csv(&path).unwrap();

    assert_eq!(tasks, project.tasks);
}

#[test]
fn csv_encodes_dependency_kinds() {
    let csv = tasks_to_csv_string(&sample_project()).unwrap();
    assert!(csv.contains("Design:finish-to-start;Design:start-to-start"));
}

#[test]
fn csv_with_no_tasks_is_invalid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    let project = Project::new("Empty");
    save_tasks_to_csv(&project, &path).unwrap();

    let err = load_tasks_from_csv(&path).unwrap_err();
    assert!(err.to_string().contains("no tasks"));
}

#[test]
fn csv_rejects_bad_dates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");

    std::fs::write(
        &path,
        "name,level,is_milestone,start,end,date,duration,link,calendar,dependencies,calculated_start,calculated_end\n\
         Design,2,false,01-01-2024,,,5,,,,,\n",
    )
    .unwrap();

    let err = load_tasks_from_csv(&path).unwrap_err();
    assert!(err.to_string().contains("invalid date"));
}
