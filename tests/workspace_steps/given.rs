//! Given steps for workspace BDD scenarios.

use super::world::{WorkspaceWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskflow::task::domain::TransitionPolicy;
use taskflow::workspace::{
    CreateMemberRequest, CreateProjectRequest, CreateTaskRequest, WorkspacePolicy,
};

#[given("an empty workspace")]
fn empty_workspace(world: &mut WorkspaceWorld) -> Result<(), eyre::Report> {
    world.open(WorkspacePolicy::default())
}

#[given("an empty workspace without cascading deletes")]
fn empty_workspace_without_cascade(world: &mut WorkspaceWorld) -> Result<(), eyre::Report> {
    world.open(WorkspacePolicy::default().with_cascade_deletes(false))
}

#[given("an empty workspace where completion sets full progress")]
fn empty_workspace_filling_progress(world: &mut WorkspaceWorld) -> Result<(), eyre::Report> {
    world.open(WorkspacePolicy::default().with_transition(TransitionPolicy {
        complete_sets_full_progress: true,
    }))
}

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut WorkspaceWorld, name: String) -> Result<(), eyre::Report> {
    let project = run_async(
        world
            .workspace()?
            .create_project(CreateProjectRequest::new(name.as_str())),
    )
    .wrap_err("create project for scenario")?;
    world.projects.insert(name, project.id());
    Ok(())
}

#[given(r#"a team member named "{name}""#)]
fn member_named(world: &mut WorkspaceWorld, name: String) -> Result<(), eyre::Report> {
    let member = run_async(
        world
            .workspace()?
            .create_member(CreateMemberRequest::new(name.as_str(), "Frontend Developer")),
    )
    .wrap_err("create team member for scenario")?;
    world.members.insert(name, member.id());
    Ok(())
}

#[given(r#""{member}" is already assigned to "{project}""#)]
fn member_already_assigned(
    world: &mut WorkspaceWorld,
    member: String,
    project: String,
) -> Result<(), eyre::Report> {
    let member_id = world.member_id(&member)?;
    let project_id = world.project_id(&project)?;
    let report = run_async(world.workspace()?.assign_member(member_id, project_id))
        .wrap_err("assign member in scenario setup")?;
    eyre::ensure!(report.is_complete(), "setup assignment missed {:?}", report.missing);
    Ok(())
}

#[given(r#"a task titled "{title}" in "{project}""#)]
fn task_in_project(
    world: &mut WorkspaceWorld,
    title: String,
    project: String,
) -> Result<(), eyre::Report> {
    let project_id = world.project_id(&project)?;
    let task = run_async(
        world
            .workspace()?
            .create_task(CreateTaskRequest::new(title.as_str()).with_project(project_id)),
    )
    .wrap_err("create task for scenario")?;
    world.tasks.insert(title, task.id());
    Ok(())
}
