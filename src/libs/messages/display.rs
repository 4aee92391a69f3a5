//! Display implementation for planr application messages.
//!
//! All user-facing text lives here, keyed by the [`Message`] enum. Keeping
//! the catalog in one place gives consistent wording across commands and
//! makes parameter interpolation type-safe.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(name) => format!("Task '{}' created", name),
            Message::TaskUpdated(name) => format!("Task '{}' updated", name),
            Message::TaskDeleted(name) => format!("Task '{}' deleted", name),
            Message::TaskNotFound(ident) => format!("Task '{}' not found", ident),
            Message::TaskNameAmbiguous(name, candidates) => {
                format!("Multiple tasks are named '{}' ({}). Use the id instead", name, candidates)
            }
            Message::TasksHeader => "📋 Tasks".to_string(),
            Message::NoTasksFound => "No tasks found".to_string(),
            Message::ConfirmDeleteTask(name) => format!("Delete task '{}'?", name),
            Message::DeleteCancelled => "Nothing deleted".to_string(),
            Message::StartAdjusted(date) => format!("Start date moved to {} to respect the dependency", date),
            Message::InvalidDate(raw) => format!("'{}' is not a valid date (expected YYYY-MM-DD)", raw),
            Message::InvalidDuration(raw) => format!("'{}' is not a valid duration (expected a non-negative number of days)", raw),
            Message::DependencyOnSelf => "A task cannot depend on itself".to_string(),

            // === PHASE MESSAGES ===
            Message::PhaseCreated(name) => format!("Phase '{}' created", name),
            Message::PhaseDeleted(name) => format!("Phase '{}' deleted", name),
            Message::PhaseNotFound(ident) => format!("Phase '{}' not found", ident),
            Message::PhaseAlreadyExists(name) => format!("Phase '{}' already exists", name),
            Message::PhaseListHeader => "📁 Phases".to_string(),
            Message::NoPhasesFound => "No phases found".to_string(),
            Message::ConfirmDeletePhase(name) => format!("Delete phase '{}'?", name),

            // === SCHEDULE MESSAGES ===
            Message::ScheduleHeader => "🗓 Project schedule".to_string(),
            Message::ScheduleUpToDate => "Schedule already satisfies every dependency".to_string(),
            Message::ScheduleShifts(count) => format!("{} task(s) start before their dependency ends", count),
            Message::ScheduleApplyHint => "Run with --apply to persist the adjusted start dates".to_string(),
            Message::ScheduleApplied(count) => format!("Adjusted start dates saved for {} task(s)", count),

            // === TIMELINE MESSAGES ===
            Message::TimelineHeader => "📅 Project timeline".to_string(),
            Message::NoTimelineItems => "No dated milestones or active tasks yet".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigModuleSchedule => "Scheduling settings".to_string(),
            Message::ConfigModuleDisplay => "Display settings".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptDefaultPolicy => "Default dependency policy (reject / auto-advance)".to_string(),
            Message::PromptHideExternal => "Hide external tasks and milestones by default".to_string(),
            Message::PromptTaskName => "Task name".to_string(),
            Message::PromptTaskPhase => "Phase (empty for none)".to_string(),
            Message::PromptTaskStart => "Start date (YYYY-MM-DD)".to_string(),
            Message::PromptTaskDuration => "Duration in days".to_string(),
            Message::PromptTaskResponsible => "Responsible (empty for none)".to_string(),
            Message::PromptTaskPercent => "Percent complete".to_string(),
            Message::PromptTaskMilestone => "Milestone label (empty for none)".to_string(),
            Message::PromptTaskParent => "Parent task id or name (empty for none)".to_string(),
            Message::PromptTaskDependsOn => "Depends on task id or name (empty for none)".to_string(),
            Message::PromptTaskNotes => "Notes (empty for none)".to_string(),
        };
        write!(f, "{}", text)
    }
}
