use gantt_tool::validation::validate_project;
use gantt_tool::{Calendar, Dependency, DependencyKind, Project, Task};

fn project_with_tasks(tasks: Vec<Task>) -> Project {
    let mut project = Project::new("Test");
    project.tasks = tasks;
    project
}

#[test]
fn valid_project_passes() {
    let project = project_with_tasks(vec![Task::new("Task A", 2), Task::new("Task B", 2)]);
    assert!(validate_project(&project).is_ok());
}

#[test]
fn empty_task_name_rejected() {
    let project = project_with_tasks(vec![Task::new("", 2)]);
    let err = validate_project(&project).unwrap_err();
    assert_eq!(err.to_string(), "task has empty name");
}

#[test]
fn duplicate_task_names_rejected() {
    let project = project_with_tasks(vec![Task::new("Task A", 2), Task::new("Task A", 3)]);
    let err = validate_project(&project).unwrap_err();
    assert_eq!(err.to_string(), "duplicate task name: Task A");
}

#[test]
fn overlong_task_name_rejected() {
    let project = project_with_tasks(vec![Task::new("A".repeat(201), 2)]);
    let err = validate_project(&project).unwrap_err();
    assert_eq!(err.to_string(), "task name exceeds 200 characters");
}

#[test]
fn dependency_on_missing_task_rejected() {
    let mut task = Task::new("Task A", 2);
    task.dependencies
        .push(Dependency::new("Task B", DependencyKind::FinishToStart));
    let project = project_with_tasks(vec![task]);

    let err = validate_project(&project).unwrap_err();
    assert_eq!(
        err.to_string(),
        "task \"Task A\" depends on non-existent task: Task B"
    );
}

#[test]
fn forward_dependency_references_are_allowed() {
    let mut first = Task::new("Task A", 2);
    first
        .dependencies
        .push(Dependency::new("Task B", DependencyKind::FinishToStart));
    let project = project_with_tasks(vec![first, Task::new("Task B", 2)]);

    assert!(validate_project(&project).is_ok());
}

#[test]
fn unknown_calendar_reference_rejected() {
    let mut task = Task::new("Task A", 2);
    task.calendar = Some("US-2024".to_string());
    let project = project_with_tasks(vec![task]);

    let err = validate_project(&project).unwrap_err();
    assert_eq!(
        err.to_string(),
        "task \"Task A\" references unknown calendar: US-2024"
    );
}

#[test]
fn known_calendar_reference_passes() {
    let mut task = Task::new("Task A", 2);
    task.calendar = Some("US-2024".to_string());
    let mut project = project_with_tasks(vec![task]);
    project.calendars = vec![Calendar::new("US-2024")];

    assert!(validate_project(&project).is_ok());
}

#[test]
fn negative_duration_rejected() {
    let mut task = Task::new("Task A", 2);
    task.duration = -5;
    let project = project_with_tasks(vec![task]);

    let err = validate_project(&project).unwrap_err();
    assert_eq!(err.to_string(), "task \"Task A\" has negative duration -5");
}
