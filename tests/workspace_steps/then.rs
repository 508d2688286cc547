//! Then steps for workspace BDD scenarios.

use super::world::{WorkspaceWorld, run_async};
use rstest_bdd_macros::then;
use taskflow::task::domain::TaskStatus;
use taskflow::workspace::{MissingReference, MoveOutcome};

#[then(r#""{project}" has a team of {size:usize}"#)]
fn project_team_size(
    world: &WorkspaceWorld,
    project: String,
    size: usize,
) -> Result<(), eyre::Report> {
    let project_id = world.project_id(&project)?;
    let stored = run_async(world.workspace()?.project(project_id))
        .ok_or_else(|| eyre::eyre!("project {project:?} is gone"))?;
    eyre::ensure!(
        stored.team_size() == size && stored.assigned_members().len() == size,
        "expected a team of {size}, found {} listing {:?}",
        stored.team_size(),
        stored.assigned_members()
    );
    Ok(())
}

#[then(r#""{member}" has a project count of {count:usize}"#)]
fn member_project_count(
    world: &WorkspaceWorld,
    member: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let member_id = world.member_id(&member)?;
    let stored = run_async(world.workspace()?.member(member_id))
        .ok_or_else(|| eyre::eyre!("team member {member:?} is gone"))?;
    eyre::ensure!(
        stored.project_count() == count && stored.assigned_projects().len() == count,
        "expected {count} projects, found {} listing {:?}",
        stored.project_count(),
        stored.assigned_projects()
    );
    Ok(())
}

#[then(r#"the task "{title}" belongs to no project"#)]
fn task_without_project(world: &WorkspaceWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let stored = run_async(world.workspace()?.task(task_id))
        .ok_or_else(|| eyre::eyre!("task {title:?} is gone"))?;
    eyre::ensure!(
        stored.project_id().is_none(),
        "task still references {:?}",
        stored.project_id()
    );
    Ok(())
}

#[then("the integrity report is clean")]
fn integrity_clean(world: &WorkspaceWorld) -> Result<(), eyre::Report> {
    let violations = run_async(world.workspace()?.integrity_report());
    eyre::ensure!(violations.is_empty(), "unexpected violations: {violations:?}");
    Ok(())
}

#[then("the integrity report lists {count:usize} problem")]
fn integrity_problems(world: &WorkspaceWorld, count: usize) -> Result<(), eyre::Report> {
    let violations = run_async(world.workspace()?.integrity_report());
    eyre::ensure!(
        violations.len() == count,
        "expected {count} violations, found {violations:?}"
    );
    Ok(())
}

#[then("the last change reports a missing project")]
fn missing_project_reported(world: &WorkspaceWorld) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no reconciliation report recorded"))?;
    eyre::ensure!(
        report
            .missing
            .iter()
            .any(|missing| matches!(missing, MissingReference::Project(_))),
        "expected a missing project, found {:?}",
        report.missing
    );
    eyre::ensure!(!report.changed, "a refused change must not modify records");
    Ok(())
}

#[then(r#""{title}" has status "{status}""#)]
fn task_status(world: &WorkspaceWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task_id = world.task_id(&title)?;
    let stored = run_async(world.workspace()?.task(task_id))
        .ok_or_else(|| eyre::eyre!("task {title:?} is gone"))?;
    eyre::ensure!(
        stored.status() == expected,
        "expected status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then(r#""{title}" has progress {value:u8}"#)]
fn task_progress(world: &WorkspaceWorld, title: String, value: u8) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let stored = run_async(world.workspace()?.task(task_id))
        .ok_or_else(|| eyre::eyre!("task {title:?} is gone"))?;
    let progress = stored.progress().map(|progress| progress.value());
    eyre::ensure!(
        progress == Some(value),
        "expected progress {value}, found {progress:?}"
    );
    Ok(())
}

#[then(r#"the "{status}" column of "{project}" holds {count:usize} task"#)]
fn column_size(
    world: &WorkspaceWorld,
    status: String,
    project: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let column_status = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let project_id = world.project_id(&project)?;
    let board = run_async(world.workspace()?.board(Some(project_id)));
    let column = board
        .column(column_status)
        .ok_or_else(|| eyre::eyre!("board has no {status} column"))?;
    eyre::ensure!(
        column.tasks().len() == count,
        "expected {count} tasks in {status}, found {}",
        column.tasks().len()
    );
    Ok(())
}

#[then("the move is rejected")]
fn move_rejected(world: &WorkspaceWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no move recorded"))?;
    eyre::ensure!(
        matches!(outcome, MoveOutcome::Rejected(_)),
        "expected a rejected move, got {outcome:?}"
    );
    Ok(())
}
