//! Unit tests for grouping tasks into status board columns.

use crate::project::domain::ProjectId;
use crate::task::domain::{StatusBoard, Task, TaskChanges, TaskStatus, TaskTitle};
use mockable::DefaultClock;
use rstest::rstest;

fn task_in(project_id: Option<ProjectId>, title: &str, status: TaskStatus) -> Task {
    Task::new(
        TaskTitle::new(title).expect("valid title"),
        TaskChanges {
            project_id: Some(project_id),
            status: Some(status),
            ..TaskChanges::default()
        },
        &DefaultClock,
    )
}

#[rstest]
fn groups_project_tasks_into_ordered_columns() {
    let project_id = ProjectId::new();
    let tasks = vec![
        task_in(Some(project_id), "a", TaskStatus::Completed),
        task_in(Some(project_id), "b", TaskStatus::NotStarted),
        task_in(Some(ProjectId::new()), "elsewhere", TaskStatus::NotStarted),
        task_in(Some(project_id), "c", TaskStatus::Completed),
        task_in(None, "loose", TaskStatus::Testing),
    ];

    let board = StatusBoard::group(Some(project_id), &tasks);

    let statuses: Vec<TaskStatus> = board.columns().iter().map(|c| c.status()).collect();
    assert_eq!(statuses, TaskStatus::ORDER.to_vec());
    assert_eq!(board.total(), 3);
    assert_eq!(board.completed(), 2);

    let completed_titles: Vec<&str> = board
        .column(TaskStatus::Completed)
        .expect("completed column")
        .tasks()
        .iter()
        .map(|task| task.title().as_str())
        .collect();
    assert_eq!(completed_titles, vec!["a", "c"]);
}

#[rstest]
fn empty_board_still_has_every_column() {
    let board = StatusBoard::group(Some(ProjectId::new()), std::iter::empty::<&Task>());

    assert_eq!(board.columns().len(), TaskStatus::ORDER.len());
    assert_eq!(board.total(), 0);
    assert_eq!(board.completed(), 0);
}
