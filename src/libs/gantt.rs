//! Gantt layout: flattens the task collection into ordered display rows.
//!
//! This is the data side of a Gantt chart only. Rows come out grouped by
//! phase (first-seen order), parents before their children with the nesting
//! depth recorded, and with computed finish dates and a critical-path flag.
//! Drawing the rows is left to whatever view consumes them.
//!
//! Tasks whose start date does not parse are left out of the layout; they
//! still exist in the store and still take part in critical-path
//! computation.

use super::schedule::{self, ScheduleError};
use super::task::{clamp_percent, Task};
use chrono::NaiveDate;
use std::collections::HashSet;

const NO_PHASE: &str = "No Phase";

/// One row of the flattened schedule: either a phase header or a task.
#[derive(Debug, Clone)]
pub struct GanttRow {
    /// Task id; `None` for phase header rows.
    pub id: Option<i64>,
    pub name: String,
    /// Nesting depth below the phase header; 0 for the header itself.
    pub depth: usize,
    pub start: Option<NaiveDate>,
    pub finish: Option<NaiveDate>,
    pub duration: i64,
    pub percent_complete: f64,
    pub milestone: bool,
    pub external_task: bool,
    pub external_milestone: bool,
    pub critical: bool,
    pub is_phase: bool,
}

impl GanttRow {
    fn phase_header(name: &str) -> Self {
        GanttRow {
            id: None,
            name: name.to_string(),
            depth: 0,
            start: None,
            finish: None,
            duration: 0,
            percent_complete: 0.0,
            milestone: false,
            external_task: false,
            external_milestone: false,
            critical: false,
            is_phase: true,
        }
    }
}

/// Flattens tasks into ordered rows.
///
/// The critical path is computed over the full collection before any
/// filtering, so hiding external tasks does not change which chain is
/// critical. Fails only when the dependency graph is cyclic.
pub fn layout(tasks: &[Task], hide_external: bool) -> Result<Vec<GanttRow>, ScheduleError> {
    let critical = schedule::critical_path(tasks)?;

    let visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| !hide_external || (!t.external_task && !t.external_milestone))
        .collect();

    // Phases in first-seen order.
    let mut phase_order: Vec<String> = Vec::new();
    for task in &visible {
        let phase = phase_name(task);
        if !phase_order.iter().any(|p| p == &phase) {
            phase_order.push(phase);
        }
    }

    let mut rows = Vec::new();
    for phase in &phase_order {
        let phase_tasks: Vec<&Task> = visible.iter().copied().filter(|t| &phase_name(t) == phase).collect();
        let phase_ids: HashSet<i64> = phase_tasks.iter().filter_map(|t| t.id).collect();

        rows.push(GanttRow::phase_header(phase));

        // Top level: no parent, or a parent outside this phase (orphans
        // still render rather than vanish).
        for task in phase_tasks
            .iter()
            .filter(|t| t.parent.is_none_or(|p| !phase_ids.contains(&p)))
        {
            collect(task, &phase_tasks, &critical, 1, &mut rows);
        }
    }
    Ok(rows)
}

fn phase_name(task: &Task) -> String {
    match task.phase.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => NO_PHASE.to_string(),
    }
}

fn collect(task: &Task, phase_tasks: &[&Task], critical: &HashSet<i64>, depth: usize, rows: &mut Vec<GanttRow>) {
    // Unparsable start: nothing to draw and no anchor for children.
    let Some(start) = task.start_date() else {
        return;
    };
    rows.push(GanttRow {
        id: task.id,
        name: task.name.clone(),
        depth,
        start: Some(start),
        finish: task.finish_date(),
        duration: task.duration_days(),
        percent_complete: clamp_percent(task.percent_complete),
        milestone: task.is_milestone(),
        external_task: task.external_task,
        external_milestone: task.external_milestone,
        critical: task.id.is_some_and(|id| critical.contains(&id)),
        is_phase: false,
    });

    let Some(id) = task.id else { return };
    for child in phase_tasks.iter().filter(|t| t.parent == Some(id)) {
        collect(child, phase_tasks, critical, depth + 1, rows);
    }
}
