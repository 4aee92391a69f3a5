use chrono::{Duration, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Derived task state, computed from `percent_complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 100.0 {
            TaskStatus::Completed
        } else if percent > 0.0 {
            TaskStatus::InProgress
        } else {
            TaskStatus::NotStarted
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "Completed" => TaskStatus::Completed,
            "In Progress" => TaskStatus::InProgress,
            _ => TaskStatus::NotStarted,
        }
    }
}

/// A project task.
///
/// `start` and `duration` are kept as raw text: legacy databases contain
/// values that do not parse, and such records must survive a round trip
/// through the store. Use [`Task::start_date`] and [`Task::duration_days`]
/// for the lenient typed views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub name: String,
    pub phase: Option<String>,
    pub start: Option<String>,
    pub duration: Option<String>,
    pub responsible: Option<String>,
    pub status: TaskStatus,
    pub percent_complete: f64,
    pub milestone: Option<String>,
    pub parent: Option<i64>,
    pub depends_on: Option<i64>,
    pub notes: Option<String>,
    pub external_task: bool,
    pub external_milestone: bool,
    pub created_at: Option<String>,
}

impl Task {
    pub fn new(name: &str, start: Option<String>, duration: Option<String>) -> Self {
        Task {
            id: None,
            name: name.to_string(),
            phase: None,
            start,
            duration,
            responsible: None,
            status: TaskStatus::NotStarted,
            percent_complete: 0.0,
            milestone: None,
            parent: None,
            depends_on: None,
            notes: None,
            external_task: false,
            external_milestone: false,
            created_at: None,
        }
    }

    /// Start date, if the stored text parses as an ISO `YYYY-MM-DD` date.
    pub fn start_date(&self) -> Option<NaiveDate> {
        let raw = self.start.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// Duration in days. Empty, unparsable or negative values count as 0.
    pub fn duration_days(&self) -> i64 {
        self.duration
            .as_deref()
            .and_then(|d| d.trim().parse::<i64>().ok())
            .filter(|d| *d >= 0)
            .unwrap_or(0)
    }

    /// A milestone is a zero-length point event.
    pub fn is_milestone(&self) -> bool {
        self.milestone.as_deref().is_some_and(|m| !m.trim().is_empty()) || self.external_milestone
    }

    /// Finish date: `start + duration`, with milestones collapsing to their
    /// start date.
    pub fn finish_date(&self) -> Option<NaiveDate> {
        let start = self.start_date()?;
        if self.is_milestone() {
            Some(start)
        } else {
            Some(start + Duration::days(self.duration_days()))
        }
    }

    /// Applies a percent change, clamping to [0, 100] and recomputing the
    /// derived status.
    pub fn set_percent(&mut self, percent: f64) {
        self.percent_complete = clamp_percent(percent);
        self.status = TaskStatus::from_percent(self.percent_complete);
    }
}

pub fn clamp_percent(percent: f64) -> f64 {
    percent.clamp(0.0, 100.0)
}

#[derive(Debug, Clone)]
pub enum TaskFilter {
    All,
    Phase(String),
    Status(TaskStatus),
    ByIds(Vec<i64>),
}
