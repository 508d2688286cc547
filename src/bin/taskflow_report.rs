//! Prints a dashboard report for a taskflow workspace.
//!
//! Usage:
//!
//! ```text
//! taskflow-report [--config <path>] [--json] [--strict]
//! ```
//!
//! Without `--config` every setting takes its default, which reads state
//! from `.taskflow/state.json`. `--strict` exits with an error after
//! printing when the integrity audit finds problems.

use camino::Utf8PathBuf;
use clap::Parser;
use minijinja::{Environment, context};
use mockable::{Clock, DefaultClock};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use taskflow::config::{Config, ConfigError};
use taskflow::project::domain::ProjectStatus;
use taskflow::storage::ports::{KeyValueStore, StorageError};
use taskflow::telemetry::{self, TelemetryError};
use taskflow::task::domain::StatusBoard;
use taskflow::workspace::{DashboardSummary, IntegrityViolation, Workspace, WorkspaceError};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::warn;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const TEXT_TEMPLATE: &str = "\
Projects: {{ summary.totalProjects }} ({{ summary.activeProjects }} active)
Tasks: {{ summary.completedTasks }}/{{ summary.totalTasks }} completed
Team members: {{ summary.totalTeamMembers }}
Overall progress: {{ summary.overallProgress }}%

Tasks by status:
{% for column in columns %}  {{ column.label }}: {{ column.count }}
{% endfor %}{% if projects %}
Projects:
{% for project in projects %}  {{ project.name }} [{{ project.status }}] {{ project.progress }}%, \
{{ project.team }} members, {{ project.completed }}/{{ project.tasks }} tasks done
{% endfor %}{% endif %}
{% if problems %}Integrity: {{ problems | length }} problem(s)
{% for problem in problems %}  - {{ problem }}
{% endfor %}{% else %}Integrity: ok
{% endif %}";

#[derive(Debug, Error)]
enum ReportError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("logging init failed: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to open storage: {0}")]
    Storage(#[from] StorageError),
    #[error("failed to load workspace: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("failed to render report: {0}")]
    Render(#[from] minijinja::Error),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Output(#[source] io::Error),
    #[error("integrity audit found {0} problem(s)")]
    Inconsistent(usize),
}

#[derive(Debug, Parser)]
#[command(version, about = "Print a dashboard report for a taskflow workspace")]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Fail when the integrity audit reports problems.
    #[arg(long)]
    strict: bool,
}

/// One status column of the text report.
#[derive(Debug, Serialize)]
struct ColumnLine {
    label: &'static str,
    count: usize,
}

/// One line of the per-project table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectLine {
    name: String,
    status: ProjectStatus,
    progress: u8,
    team: usize,
    tasks: usize,
    completed: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    summary: DashboardSummary,
    projects: Vec<ProjectLine>,
    violations: Vec<IntegrityViolation>,
}

impl Report {
    async fn collect<S, C>(workspace: &Workspace<S, C>) -> Self
    where
        S: KeyValueStore,
        C: Clock + Send + Sync,
    {
        let state = workspace.snapshot().await;
        let projects = state
            .projects()
            .list()
            .iter()
            .map(|project| {
                let board = StatusBoard::group(Some(project.id()), state.tasks().list());
                ProjectLine {
                    name: project.name().to_string(),
                    status: project.status(),
                    progress: project.progress().value(),
                    team: project.team_size(),
                    tasks: board.total(),
                    completed: board.completed(),
                }
            })
            .collect();

        Self {
            summary: workspace.summary().await,
            projects,
            violations: workspace.integrity_report().await,
        }
    }

    fn render_text(&self) -> Result<String, minijinja::Error> {
        let mut environment = Environment::new();
        environment.add_template("report", TEXT_TEMPLATE)?;
        let problems: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        let columns: Vec<ColumnLine> = self
            .summary
            .tasks_by_status
            .iter()
            .map(|entry| ColumnLine {
                label: entry.status.label(),
                count: entry.count,
            })
            .collect();
        environment.get_template("report")?.render(context! {
            summary => &self.summary,
            columns => columns,
            projects => &self.projects,
            problems => problems,
        })
    }

    fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn main() -> Result<(), BoxError> {
    run(&Cli::parse()).map_err(Into::into)
}

fn run(cli: &Cli) -> Result<(), ReportError> {
    let config = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    telemetry::init(config.logging.filter.as_deref())?;

    let runtime = build_runtime()?;
    let report = runtime.block_on(async {
        let store = config.storage.open()?;
        let workspace =
            Workspace::open(Arc::new(store), Arc::new(DefaultClock), config.policy()).await?;
        Ok::<_, ReportError>(Report::collect(&workspace).await)
    })?;

    let rendered = if cli.json {
        report.render_json()?
    } else {
        report.render_text()?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").map_err(ReportError::Output)?;

    let problems = report.violations.len();
    if cli.strict && problems > 0 {
        warn!(problems, "integrity audit failed");
        return Err(ReportError::Inconsistent(problems));
    }
    Ok(())
}

fn build_runtime() -> Result<tokio::runtime::Runtime, ReportError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ReportError::RuntimeInit)
}
