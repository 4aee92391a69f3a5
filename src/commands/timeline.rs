use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::libs::task::TaskFilter;
use crate::libs::timeline;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct TimelineArgs {}

pub fn cmd(_args: TimelineArgs) -> Result<()> {
    let mut tasks_db = Tasks::new()?;
    let tasks = tasks_db.fetch(TaskFilter::All)?;
    let items = timeline::timeline(&tasks);

    if items.is_empty() {
        msg_info!(Message::NoTimelineItems);
        return Ok(());
    }

    msg_print!(Message::TimelineHeader, true);
    View::timeline(&items)?;
    Ok(())
}
