use super::gantt::GanttRow;
use super::task::Task;
use super::timeline::TimelineItem;
use crate::db::phases::Phase;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "PHASE", "STATUS", "%", "START", "DAYS", "DEPENDS ON", "RESPONSIBLE"]);
        for task in tasks {
            table.add_row(row![
                task.id.unwrap_or(0),
                task.name,
                task.phase.as_deref().unwrap_or("-"),
                task.status.as_str(),
                format!("{:.0}", task.percent_complete),
                task.start.as_deref().unwrap_or("-"),
                task.duration_days(),
                task.depends_on.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
                task.responsible.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn schedule(rows: &[GanttRow]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TASK", "START", "FINISH", "DAYS", "%", "CRITICAL"]);
        for entry in rows {
            if entry.is_phase {
                table.add_row(row!["", format!("◼ {}", entry.name), "", "", "", "", ""]);
                continue;
            }
            let indent = "  ".repeat(entry.depth.saturating_sub(1));
            let marker = if entry.milestone { "◆ " } else { "" };
            let label = format!("{}{}{}", indent, marker, entry.name);
            table.add_row(row![
                entry.id.unwrap_or(0),
                label,
                entry.start.map(|d| d.to_string()).unwrap_or_default(),
                entry.finish.map(|d| d.to_string()).unwrap_or_default(),
                entry.duration,
                format!("{:.0}", entry.percent_complete),
                if entry.critical { "*" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn timeline(items: &[TimelineItem]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "NAME", "KIND"]);
        for item in items {
            table.add_row(row![item.date, item.name, item.kind.as_str()]);
        }
        table.printstd();

        Ok(())
    }

    pub fn phases(phases: &[Phase]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "CREATED"]);
        for phase in phases {
            table.add_row(row![
                phase.id.unwrap_or(0),
                phase.name,
                phase.created_at.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();

        Ok(())
    }
}
