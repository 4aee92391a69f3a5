//! Schedule command: the computed project schedule and critical path.
//!
//! Renders the flattened schedule with finish dates and critical-path
//! markers. The view always shows the dependency-consistent schedule (start
//! dates auto-advanced past their dependencies); the store is only touched
//! when `--apply` is given.

use crate::db::tasks::Tasks;
use crate::libs::config::Config;
use crate::libs::gantt;
use crate::libs::messages::Message;
use crate::libs::schedule;
use crate::libs::task::TaskFilter;
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Persist the auto-advanced start dates to the store
    #[arg(short, long)]
    apply: bool,
    /// Hide external tasks and milestones
    #[arg(long)]
    hide_external: bool,
}

pub fn cmd(args: ScheduleArgs) -> Result<()> {
    let mut tasks_db = Tasks::new()?;
    let config = Config::read()?;
    let hide_external = args.hide_external || config.hide_external();

    let mut tasks = tasks_db.fetch(TaskFilter::All)?;
    let shifts = schedule::reschedule(&tasks)?;

    if shifts.is_empty() {
        msg_success!(Message::ScheduleUpToDate);
    } else {
        msg_warning!(Message::ScheduleShifts(shifts.len()));
        if args.apply {
            for shift in &shifts {
                tasks_db.set_start(shift.id, shift.to)?;
            }
            msg_success!(Message::ScheduleApplied(shifts.len()));
        } else {
            msg_info!(Message::ScheduleApplyHint);
        }
    }

    // Display the consistent schedule whether or not it was persisted.
    for shift in &shifts {
        if let Some(task) = tasks.iter_mut().find(|t| t.id == Some(shift.id)) {
            task.start = Some(shift.to.to_string());
        }
    }

    let rows = gantt::layout(&tasks, hide_external)?;
    if rows.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(Message::ScheduleHeader, true);
    View::schedule(&rows)?;
    Ok(())
}
