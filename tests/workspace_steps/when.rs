//! When steps for workspace BDD scenarios.

use super::world::{WorkspaceWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskflow::project::domain::ProjectId;
use taskflow::task::domain::{TaskMove, TaskStatus};

#[when(r#""{member}" is assigned to "{project}""#)]
fn assign_member(
    world: &mut WorkspaceWorld,
    member: String,
    project: String,
) -> Result<(), eyre::Report> {
    let member_id = world.member_id(&member)?;
    let project_id = world.project_id(&project)?;
    let report = run_async(world.workspace()?.assign_member(member_id, project_id))
        .wrap_err("assign member")?;
    world.last_report = Some(report);
    Ok(())
}

#[when(r#""{member}" is assigned to a project that does not exist"#)]
fn assign_member_to_missing_project(
    world: &mut WorkspaceWorld,
    member: String,
) -> Result<(), eyre::Report> {
    let member_id = world.member_id(&member)?;
    let report = run_async(world.workspace()?.assign_member(member_id, ProjectId::new()))
        .wrap_err("assign member to missing project")?;
    world.last_report = Some(report);
    Ok(())
}

#[when(r#""{member}" is removed from "{project}""#)]
fn remove_member(
    world: &mut WorkspaceWorld,
    member: String,
    project: String,
) -> Result<(), eyre::Report> {
    let member_id = world.member_id(&member)?;
    let project_id = world.project_id(&project)?;
    let report = run_async(world.workspace()?.remove_member(member_id, project_id))
        .wrap_err("remove member")?;
    world.last_report = Some(report);
    Ok(())
}

#[when(r#"the project "{name}" is deleted"#)]
fn delete_project(world: &mut WorkspaceWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id(&name)?;
    let removed =
        run_async(world.workspace()?.delete_project(project_id)).wrap_err("delete project")?;
    eyre::ensure!(removed.is_some(), "project {name:?} was not deleted");
    Ok(())
}

#[when(r#"the team member "{name}" is deleted"#)]
fn delete_member(world: &mut WorkspaceWorld, name: String) -> Result<(), eyre::Report> {
    let member_id = world.member_id(&name)?;
    let removed =
        run_async(world.workspace()?.delete_member(member_id)).wrap_err("delete team member")?;
    eyre::ensure!(removed.is_some(), "team member {name:?} was not deleted");
    Ok(())
}

#[when("references are repaired")]
fn repair_references(world: &mut WorkspaceWorld) -> Result<(), eyre::Report> {
    let report =
        run_async(world.workspace()?.repair_references()).wrap_err("repair references")?;
    world.last_report = Some(report);
    Ok(())
}

#[when(r#""{title}" is dropped on the "{status}" column of "{project}""#)]
fn drop_task(
    world: &mut WorkspaceWorld,
    title: String,
    status: String,
    project: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let project_id = world.project_id(&project)?;
    let destination = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let request = TaskMove::new(task_id, destination).dropped_on(Some(project_id));
    let outcome = run_async(world.workspace()?.move_task(request)).wrap_err("move task")?;
    world.last_move = Some(outcome);
    Ok(())
}
