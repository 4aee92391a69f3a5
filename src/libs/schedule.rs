//! Dependency-aware scheduling and critical-path computation.
//!
//! This is the one place where dependency constraints are interpreted. The
//! functions here are pure: they take a snapshot of the task collection,
//! never touch the database, and leave persistence to the caller.
//!
//! ## Policies
//!
//! A task must not start before its dependency has finished
//! (`dep.start + dep.duration`). Two enforcement behaviors exist in the
//! wild and both are supported as explicit, caller-selected policies:
//!
//! - [`SchedulePolicy::Reject`]: a conflicting start date is refused with
//!   [`ScheduleError::DependencyViolation`] carrying the earliest legal date.
//! - [`SchedulePolicy::AutoAdvance`]: a conflicting (or absent) start date
//!   is silently moved to the dependency's end.
//!
//! The default policy comes from the configuration file; commands accept
//! `--policy` to override it per invocation.
//!
//! ## Leniency
//!
//! The engine is strict about the task it is asked to schedule and lenient
//! about everyone else: a dependency whose start or duration does not parse
//! imposes no constraint, and unparsable durations count as 0 days. This
//! keeps legacy data with garbage fields loadable.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use planr::libs::schedule::{self, SchedulePolicy, StartCandidate};
//! use planr::libs::task::Task;
//! use chrono::NaiveDate;
//!
//! let tasks: Vec<Task> = vec![];
//! let candidate = StartCandidate {
//!     start: NaiveDate::from_ymd_opt(2025, 1, 3),
//!     depends_on: Some(1),
//! };
//! let start = schedule::resolve_start(&candidate, &tasks, SchedulePolicy::AutoAdvance)?;
//! let critical = schedule::critical_path(&tasks)?;
//! # Ok::<(), planr::libs::schedule::ScheduleError>(())
//! ```

use super::task::Task;
use chrono::{Duration, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors produced by scheduling decisions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The requested start precedes the dependency's end. Carries the
    /// earliest acceptable date so the caller can surface it.
    #[error("task cannot start before its dependency is complete (must start on or after {not_before})")]
    DependencyViolation { not_before: NaiveDate },

    /// A start date is required and neither the caller nor a dependency
    /// supplies one.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A task transitively depends on itself.
    #[error("cyclic dependency detected at task '{0}'")]
    CyclicDependency(String),
}

/// Dependency-constraint enforcement behavior, selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SchedulePolicy {
    /// Refuse conflicting start dates; the caller must resubmit.
    Reject,
    /// Silently advance conflicting (or absent) start dates.
    #[default]
    AutoAdvance,
}

/// The scheduling request for one task being created or edited.
#[derive(Debug, Clone, Copy, Default)]
pub struct StartCandidate {
    /// Desired start date, if the caller provided one.
    pub start: Option<NaiveDate>,
    /// Id of the single predecessor task, if any.
    pub depends_on: Option<i64>,
}

/// A start-date adjustment computed by [`reschedule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartShift {
    pub id: i64,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// The end of a dependency: `start + duration`, or `None` when the record
/// has no parseable start. Unparsable durations count as 0 days.
fn dependency_end(dep: &Task) -> Option<NaiveDate> {
    Some(dep.start_date()? + Duration::days(dep.duration_days()))
}

/// Resolves the start date for a candidate task under the given policy.
///
/// When `depends_on` is unset, or names no task in the snapshot, or the
/// dependency has no parseable start, there is no constraint and the
/// desired start is returned unchanged (`MissingField` if absent).
/// Otherwise the policy decides what happens to a start that precedes the
/// dependency's end.
///
/// Resolving an already-valid start is idempotent: the same input yields
/// the same date on every call.
pub fn resolve_start(candidate: &StartCandidate, tasks: &[Task], policy: SchedulePolicy) -> Result<NaiveDate, ScheduleError> {
    let constraint = candidate
        .depends_on
        .and_then(|dep_id| tasks.iter().find(|t| t.id == Some(dep_id)))
        .and_then(dependency_end);

    let not_before = match constraint {
        Some(date) => date,
        None => return candidate.start.ok_or(ScheduleError::MissingField("start")),
    };

    match policy {
        SchedulePolicy::Reject => {
            let start = candidate.start.ok_or(ScheduleError::MissingField("start"))?;
            if start < not_before {
                Err(ScheduleError::DependencyViolation { not_before })
            } else {
                Ok(start)
            }
        }
        SchedulePolicy::AutoAdvance => Ok(match candidate.start {
            Some(start) if start >= not_before => start,
            _ => not_before,
        }),
    }
}

/// Computes the length in days of the longest dependency chain ending at
/// every task: `longest(t) = duration(t) + longest(predecessor(t))`.
///
/// Each task has at most one predecessor, so the graph is a forest of
/// chains. Results are memoized; a visited set turns a cyclic chain into
/// [`ScheduleError::CyclicDependency`] instead of unbounded recursion.
fn chain_lengths(tasks: &[Task]) -> Result<HashMap<i64, i64>, ScheduleError> {
    let by_id: HashMap<i64, &Task> = tasks.iter().filter_map(|t| t.id.map(|id| (id, t))).collect();
    let mut memo: HashMap<i64, i64> = HashMap::new();

    fn longest(
        id: i64,
        by_id: &HashMap<i64, &Task>,
        memo: &mut HashMap<i64, i64>,
        visiting: &mut HashSet<i64>,
    ) -> Result<i64, ScheduleError> {
        if let Some(&len) = memo.get(&id) {
            return Ok(len);
        }
        if !visiting.insert(id) {
            return Err(ScheduleError::CyclicDependency(by_id[&id].name.clone()));
        }
        let task = by_id[&id];
        // A dependency outside the snapshot imposes no constraint.
        let dep_len = match task.depends_on.filter(|dep| by_id.contains_key(dep)) {
            Some(dep) => longest(dep, by_id, memo, visiting)?,
            None => 0,
        };
        visiting.remove(&id);
        let len = task.duration_days() + dep_len;
        memo.insert(id, len);
        Ok(len)
    }

    for task in tasks {
        if let Some(id) = task.id {
            let mut visiting = HashSet::new();
            longest(id, &by_id, &mut memo, &mut visiting)?;
        }
    }
    Ok(memo)
}

/// Returns the ids of the tasks on the critical path: the chain reached by
/// following `depends_on` links back from the task with the longest chain
/// length.
///
/// Ties resolve to the first task in collection order (first-seen wins),
/// which keeps the result deterministic for a store snapshot. Tasks with
/// unparsable start dates still participate; only durations matter here.
pub fn critical_path(tasks: &[Task]) -> Result<HashSet<i64>, ScheduleError> {
    let lengths = chain_lengths(tasks)?;
    let by_id: HashMap<i64, &Task> = tasks.iter().filter_map(|t| t.id.map(|id| (id, t))).collect();

    let mut best: Option<(i64, i64)> = None;
    for task in tasks {
        if let Some(id) = task.id {
            let len = lengths[&id];
            if best.is_none_or(|(_, max)| len > max) {
                best = Some((id, len));
            }
        }
    }

    let mut path = HashSet::new();
    let mut cursor = best.map(|(id, _)| id);
    while let Some(id) = cursor {
        path.insert(id);
        cursor = by_id
            .get(&id)
            .and_then(|t| t.depends_on)
            .filter(|dep| by_id.contains_key(dep) && !path.contains(dep));
    }
    Ok(path)
}

/// Auto-advances the whole collection to a dependency-consistent schedule.
///
/// Repeatedly moves any task whose start precedes its dependency's end to
/// that end, until a fixed point is reached (chains propagate in however
/// many passes they need). Tasks whose own start does not parse are
/// skipped, as are constraints from dependencies without a parseable start.
///
/// Returns the net shifts relative to the input snapshot, in collection
/// order. Persisting them is the caller's responsibility.
pub fn reschedule(tasks: &[Task]) -> Result<Vec<StartShift>, ScheduleError> {
    // A cyclic chain would never reach a fixed point.
    chain_lengths(tasks)?;

    let mut starts: HashMap<i64, NaiveDate> = tasks
        .iter()
        .filter_map(|t| Some((t.id?, t.start_date()?)))
        .collect();
    let durations: HashMap<i64, i64> = tasks.iter().filter_map(|t| Some((t.id?, t.duration_days()))).collect();
    let original = starts.clone();

    let mut changed = true;
    while changed {
        changed = false;
        for task in tasks {
            let (Some(id), Some(dep)) = (task.id, task.depends_on) else {
                continue;
            };
            if !starts.contains_key(&id) || !starts.contains_key(&dep) {
                continue;
            }
            let dep_end = starts[&dep] + Duration::days(durations[&dep]);
            if starts[&id] < dep_end {
                starts.insert(id, dep_end);
                changed = true;
            }
        }
    }

    Ok(tasks
        .iter()
        .filter_map(|t| {
            let id = t.id?;
            let from = *original.get(&id)?;
            let to = starts[&id];
            (to != from).then_some(StartShift { id, from, to })
        })
        .collect())
}
