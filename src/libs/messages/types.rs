#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(String),
    TaskNotFound(String),
    TaskNameAmbiguous(String, String),
    TasksHeader,
    NoTasksFound,
    ConfirmDeleteTask(String),
    DeleteCancelled,
    StartAdjusted(String),
    InvalidDate(String),
    InvalidDuration(String),
    DependencyOnSelf,

    // === PHASE MESSAGES ===
    PhaseCreated(String),
    PhaseDeleted(String),
    PhaseNotFound(String),
    PhaseAlreadyExists(String),
    PhaseListHeader,
    NoPhasesFound,
    ConfirmDeletePhase(String),

    // === SCHEDULE MESSAGES ===
    ScheduleHeader,
    ScheduleUpToDate,
    ScheduleShifts(usize),
    ScheduleApplyHint,
    ScheduleApplied(usize),

    // === TIMELINE MESSAGES ===
    TimelineHeader,
    NoTimelineItems,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleSchedule,
    ConfigModuleDisplay,

    // === PROMPTS ===
    PromptSelectModules,
    PromptDefaultPolicy,
    PromptHideExternal,
    PromptTaskName,
    PromptTaskPhase,
    PromptTaskStart,
    PromptTaskDuration,
    PromptTaskResponsible,
    PromptTaskPercent,
    PromptTaskMilestone,
    PromptTaskParent,
    PromptTaskDependsOn,
    PromptTaskNotes,
}
