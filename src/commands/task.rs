//! Task management command: create, list, show, edit and delete tasks.
//!
//! Creation and editing run every start date through the scheduling engine,
//! so the dependency constraint is enforced in exactly one place. The
//! policy comes from the configuration file unless `--policy` overrides it.

use crate::db::tasks::Tasks;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::schedule::{self, SchedulePolicy, StartCandidate};
use crate::libs::task::{clamp_percent, Task, TaskFilter, TaskStatus};
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_info, msg_print, msg_success};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: Option<TaskCommand>,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a new task
    Create {
        /// Task name
        name: String,
        /// Phase the task belongs to
        #[arg(short, long)]
        phase: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// Duration in days
        #[arg(short, long)]
        duration: Option<i64>,
        /// Person responsible
        #[arg(short, long)]
        responsible: Option<String>,
        /// Percent complete
        #[arg(long, default_value_t = 0.0)]
        percent: f64,
        /// Milestone label (marks the task as a zero-length event)
        #[arg(short, long)]
        milestone: Option<String>,
        /// Parent task (id or name)
        #[arg(long)]
        parent: Option<String>,
        /// Predecessor task (id or name)
        #[arg(long)]
        depends_on: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Mark as an external task
        #[arg(long)]
        external: bool,
        /// Mark as an external milestone
        #[arg(long)]
        external_milestone: bool,
        /// Dependency policy override for this invocation
        #[arg(long, value_enum)]
        policy: Option<SchedulePolicy>,
    },
    /// List tasks
    List {
        /// Only tasks in this phase
        #[arg(short, long)]
        phase: Option<String>,
        /// Only tasks with this status
        #[arg(short, long, value_enum)]
        status: Option<TaskStatus>,
    },
    /// Show a single task
    Show {
        /// Task id or name
        task: String,
    },
    /// Edit a task
    Edit {
        /// Task id or name
        task: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New phase
        #[arg(long)]
        phase: Option<String>,
        /// New start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// New duration in days
        #[arg(long)]
        duration: Option<i64>,
        /// New percent complete
        #[arg(long)]
        percent: Option<f64>,
        /// New responsible
        #[arg(long)]
        responsible: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
        /// New milestone label
        #[arg(long)]
        milestone: Option<String>,
        /// New parent task (id or name)
        #[arg(long)]
        parent: Option<String>,
        /// New predecessor task (id or name)
        #[arg(long)]
        depends_on: Option<String>,
        /// Dependency policy override for this invocation
        #[arg(long, value_enum)]
        policy: Option<SchedulePolicy>,
    },
    /// Delete a task
    Delete {
        /// Task id or name
        task: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Field values for a task about to be created.
#[derive(Debug)]
struct NewTask {
    name: String,
    phase: Option<String>,
    start: Option<String>,
    duration: Option<i64>,
    responsible: Option<String>,
    percent: f64,
    milestone: Option<String>,
    parent: Option<String>,
    depends_on: Option<String>,
    notes: Option<String>,
    external_task: bool,
    external_milestone: bool,
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    match args.command {
        Some(TaskCommand::Create {
            name,
            phase,
            start,
            duration,
            responsible,
            percent,
            milestone,
            parent,
            depends_on,
            notes,
            external,
            external_milestone,
            policy,
        }) => handle_create(
            NewTask {
                name,
                phase,
                start,
                duration,
                responsible,
                percent,
                milestone,
                parent,
                depends_on,
                notes,
                external_task: external,
                external_milestone,
            },
            policy,
        ),
        Some(TaskCommand::List { phase, status }) => handle_list(phase, status),
        Some(TaskCommand::Show { task }) => handle_show(task),
        Some(TaskCommand::Edit {
            task,
            name,
            phase,
            start,
            duration,
            percent,
            responsible,
            notes,
            milestone,
            parent,
            depends_on,
            policy,
        }) => handle_edit(
            task, name, phase, start, duration, percent, responsible, notes, milestone, parent, depends_on, policy,
        ),
        Some(TaskCommand::Delete { task, yes }) => handle_delete(task, yes),
        None => handle_interactive(),
    }
}

fn handle_create(new: NewTask, policy: Option<SchedulePolicy>) -> Result<()> {
    let mut tasks_db = Tasks::new()?;
    let policy = match policy {
        Some(policy) => policy,
        None => Config::read()?.default_policy(),
    };

    let parent = match &new.parent {
        Some(ident) => Some(resolve_task_ref(&mut tasks_db, ident)?.id.unwrap()),
        None => None,
    };
    let depends_on = match &new.depends_on {
        Some(ident) => Some(resolve_task_ref(&mut tasks_db, ident)?.id.unwrap()),
        None => None,
    };

    let desired_start = parse_start(new.start.as_deref())?;
    if let Some(days) = new.duration {
        if days < 0 {
            msg_bail_anyhow!(Message::InvalidDuration(days.to_string()));
        }
    }

    let snapshot = tasks_db.fetch(TaskFilter::All)?;
    let candidate = StartCandidate {
        start: desired_start,
        depends_on,
    };
    let start = schedule::resolve_start(&candidate, &snapshot, policy)?;
    if desired_start != Some(start) {
        msg_info!(Message::StartAdjusted(start.to_string()));
    }

    let mut task = Task::new(&new.name, Some(start.to_string()), new.duration.map(|d| d.to_string()));
    task.phase = new.phase.filter(|p| !p.trim().is_empty());
    task.responsible = new.responsible.filter(|r| !r.trim().is_empty());
    task.milestone = new.milestone.filter(|m| !m.trim().is_empty());
    task.notes = new.notes.filter(|n| !n.trim().is_empty());
    task.parent = parent;
    task.depends_on = depends_on;
    task.external_task = new.external_task;
    task.external_milestone = new.external_milestone;
    task.set_percent(new.percent);

    tasks_db.insert(&task)?;
    msg_success!(Message::TaskCreated(task.name));
    Ok(())
}

fn handle_list(phase: Option<String>, status: Option<TaskStatus>) -> Result<()> {
    let mut tasks_db = Tasks::new()?;
    let filter = match (phase, status) {
        (Some(phase), _) => TaskFilter::Phase(phase),
        (None, Some(status)) => TaskFilter::Status(status),
        (None, None) => TaskFilter::All,
    };
    let tasks = tasks_db.fetch(filter)?;

    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(Message::TasksHeader, true);
    View::tasks(&tasks)?;
    Ok(())
}

fn handle_show(ident: String) -> Result<()> {
    let mut tasks_db = Tasks::new()?;
    let task = resolve_task_ref(&mut tasks_db, &ident)?;
    View::tasks(std::slice::from_ref(&task))?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_edit(
    ident: String,
    name: Option<String>,
    phase: Option<String>,
    start: Option<String>,
    duration: Option<i64>,
    percent: Option<f64>,
    responsible: Option<String>,
    notes: Option<String>,
    milestone: Option<String>,
    parent: Option<String>,
    depends_on: Option<String>,
    policy: Option<SchedulePolicy>,
) -> Result<()> {
    let mut tasks_db = Tasks::new()?;
    let policy = match policy {
        Some(policy) => policy,
        None => Config::read()?.default_policy(),
    };
    let mut task = resolve_task_ref(&mut tasks_db, &ident)?;
    let id = task.id.unwrap();

    if let Some(name) = name {
        task.name = name;
    }
    if let Some(phase) = phase {
        task.phase = Some(phase).filter(|p| !p.trim().is_empty());
    }
    if let Some(start) = start {
        // The subject task is held to a stricter standard than the rest of
        // the collection: its own start must parse.
        let parsed = parse_start(Some(start.as_str()))?.ok_or_else(|| msg_error_anyhow!(Message::InvalidDate(start.clone())))?;
        task.start = Some(parsed.to_string());
    }
    if let Some(days) = duration {
        if days < 0 {
            msg_bail_anyhow!(Message::InvalidDuration(days.to_string()));
        }
        task.duration = Some(days.to_string());
    }
    if let Some(responsible) = responsible {
        task.responsible = Some(responsible).filter(|r| !r.trim().is_empty());
    }
    if let Some(notes) = notes {
        task.notes = Some(notes).filter(|n| !n.trim().is_empty());
    }
    if let Some(milestone) = milestone {
        task.milestone = Some(milestone).filter(|m| !m.trim().is_empty());
    }
    if let Some(ident) = parent {
        let target = resolve_task_ref(&mut tasks_db, &ident)?;
        task.parent = target.id;
    }
    if let Some(ident) = depends_on {
        let target = resolve_task_ref(&mut tasks_db, &ident)?;
        if target.id == Some(id) {
            msg_bail_anyhow!(Message::DependencyOnSelf);
        }
        task.depends_on = target.id;
    }
    if let Some(percent) = percent {
        let percent = clamp_percent(percent);
        task.percent_complete = percent;
        if percent >= 100.0 {
            task.status = TaskStatus::Completed;
        } else if percent > 0.0 && task.status == TaskStatus::NotStarted {
            task.status = TaskStatus::InProgress;
        }
    }

    // Enforce the dependency constraint on the edited record. Legacy rows
    // whose start never parsed stay untouched until a real date is set.
    if task.depends_on.is_some() {
        if let Some(current_start) = task.start_date() {
            let snapshot = tasks_db.fetch(TaskFilter::All)?;
            let candidate = StartCandidate {
                start: Some(current_start),
                depends_on: task.depends_on,
            };
            let resolved = schedule::resolve_start(&candidate, &snapshot, policy)?;
            if resolved != current_start {
                task.start = Some(resolved.to_string());
                msg_info!(Message::StartAdjusted(resolved.to_string()));
            }
        }
    }

    tasks_db.update(&task)?;
    msg_success!(Message::TaskUpdated(task.name));
    Ok(())
}

fn handle_delete(ident: String, yes: bool) -> Result<()> {
    let mut tasks_db = Tasks::new()?;
    let task = resolve_task_ref(&mut tasks_db, &ident)?;

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.name.clone()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::DeleteCancelled);
        return Ok(());
    }

    tasks_db.delete(task.id.unwrap())?;
    msg_success!(Message::TaskDeleted(task.name));
    Ok(())
}

/// Interactive creation: prompt for every field, empty answers meaning
/// "none".
fn handle_interactive() -> Result<()> {
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme).with_prompt(Message::PromptTaskName.to_string()).interact_text()?;
    let phase: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskPhase.to_string())
        .allow_empty(true)
        .interact_text()?;
    let start: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskStart.to_string())
        .allow_empty(true)
        .validate_with(|input: &String| {
            if input.trim().is_empty() || NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").is_ok() {
                Ok(())
            } else {
                Err(Message::InvalidDate(input.clone()).to_string())
            }
        })
        .interact_text()?;
    let duration: u64 = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDuration.to_string())
        .default(1)
        .interact_text()?;
    let responsible: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskResponsible.to_string())
        .allow_empty(true)
        .interact_text()?;
    let percent: f64 = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskPercent.to_string())
        .default(0.0)
        .interact_text()?;
    let milestone: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskMilestone.to_string())
        .allow_empty(true)
        .interact_text()?;
    let parent: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskParent.to_string())
        .allow_empty(true)
        .interact_text()?;
    let depends_on: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDependsOn.to_string())
        .allow_empty(true)
        .interact_text()?;
    let notes: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskNotes.to_string())
        .allow_empty(true)
        .interact_text()?;

    let non_empty = |s: String| if s.trim().is_empty() { None } else { Some(s) };
    handle_create(
        NewTask {
            name,
            phase: non_empty(phase),
            start: non_empty(start),
            duration: Some(duration as i64),
            responsible: non_empty(responsible),
            percent,
            milestone: non_empty(milestone),
            parent: non_empty(parent),
            depends_on: non_empty(depends_on),
            notes: non_empty(notes),
            external_task: false,
            external_milestone: false,
        },
        None,
    )
}

/// Validates an optional start date argument. `None` passes through;
/// invalid text is an error for the task being scheduled.
fn parse_start(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None => Ok(None),
        Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| msg_error_anyhow!(Message::InvalidDate(s.to_string()))),
    }
}

/// Resolves a task reference given as an id or a name. Names must be
/// unique; ambiguity is an error that lists the matching ids.
pub fn resolve_task_ref(tasks_db: &mut Tasks, ident: &str) -> Result<Task> {
    if let Ok(id) = ident.parse::<i64>() {
        return match tasks_db.get_by_id(id)? {
            Some(task) => Ok(task),
            None => Err(msg_error_anyhow!(Message::TaskNotFound(ident.to_string()))),
        };
    }

    let mut matches = tasks_db.get_by_name(ident)?;
    match matches.len() {
        0 => Err(msg_error_anyhow!(Message::TaskNotFound(ident.to_string()))),
        1 => Ok(matches.remove(0)),
        _ => {
            let ids = matches
                .iter()
                .filter_map(|t| t.id.map(|id| format!("id {}", id)))
                .collect::<Vec<_>>()
                .join(", ");
            Err(msg_error_anyhow!(Message::TaskNameAmbiguous(ident.to_string(), ids)))
        }
    }
}
