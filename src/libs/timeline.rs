use super::task::{Task, TaskStatus};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKind {
    Milestone,
    Phase,
}

impl TimelineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineKind::Milestone => "milestone",
            TimelineKind::Phase => "phase",
        }
    }
}

/// A dated point on the project timeline.
#[derive(Debug, Clone)]
pub struct TimelineItem {
    pub name: String,
    pub date: NaiveDate,
    pub kind: TimelineKind,
}

/// Derives the timeline: every dated task that is a milestone or has been
/// started, sorted ascending by date. Milestones show their label when one
/// is set.
pub fn timeline(tasks: &[Task]) -> Vec<TimelineItem> {
    let mut items: Vec<TimelineItem> = tasks
        .iter()
        .filter(|t| {
            t.milestone.as_deref().is_some_and(|m| !m.trim().is_empty())
                || t.status == TaskStatus::Completed
                || t.status == TaskStatus::InProgress
        })
        .filter_map(|t| {
            let date = t.start_date()?;
            let (name, kind) = match t.milestone.as_deref().map(str::trim) {
                Some(label) if !label.is_empty() => (label.to_string(), TimelineKind::Milestone),
                _ => (t.name.clone(), TimelineKind::Phase),
            };
            Some(TimelineItem { name, date, kind })
        })
        .collect();
    items.sort_by_key(|item| item.date);
    items
}
