#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use planr::libs::schedule::{critical_path, reschedule, resolve_start, SchedulePolicy, ScheduleError, StartCandidate};
    use planr::libs::task::Task;
    use std::collections::HashSet;

    fn task(id: i64, name: &str, start: Option<&str>, duration: Option<&str>, depends_on: Option<i64>) -> Task {
        let mut task = Task::new(name, start.map(String::from), duration.map(String::from));
        task.id = Some(id);
        task.depends_on = depends_on;
        task
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_auto_advance_moves_start_past_dependency_end() {
        let tasks = vec![task(1, "A", Some("2025-01-01"), Some("5"), None)];
        let candidate = StartCandidate {
            start: Some(date(2025, 1, 3)),
            depends_on: Some(1),
        };

        let start = resolve_start(&candidate, &tasks, SchedulePolicy::AutoAdvance).unwrap();
        assert_eq!(start, date(2025, 1, 6));
    }

    #[test]
    fn test_reject_reports_earliest_legal_date() {
        let tasks = vec![task(1, "A", Some("2025-01-01"), Some("5"), None)];
        let candidate = StartCandidate {
            start: Some(date(2025, 1, 3)),
            depends_on: Some(1),
        };

        let err = resolve_start(&candidate, &tasks, SchedulePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::DependencyViolation {
                not_before: date(2025, 1, 6)
            }
        );
    }

    #[test]
    fn test_reject_accepts_start_at_dependency_end() {
        let tasks = vec![task(1, "A", Some("2025-01-01"), Some("5"), None)];
        let candidate = StartCandidate {
            start: Some(date(2025, 1, 6)),
            depends_on: Some(1),
        };

        let start = resolve_start(&candidate, &tasks, SchedulePolicy::Reject).unwrap();
        assert_eq!(start, date(2025, 1, 6));
    }

    #[test]
    fn test_auto_advance_supplies_missing_start_from_dependency() {
        let tasks = vec![task(1, "A", Some("2025-01-01"), Some("5"), None)];
        let candidate = StartCandidate {
            start: None,
            depends_on: Some(1),
        };

        let start = resolve_start(&candidate, &tasks, SchedulePolicy::AutoAdvance).unwrap();
        assert_eq!(start, date(2025, 1, 6));
    }

    #[test]
    fn test_missing_start_without_dependency_is_an_error() {
        let candidate = StartCandidate::default();

        let err = resolve_start(&candidate, &[], SchedulePolicy::AutoAdvance).unwrap_err();
        assert_eq!(err, ScheduleError::MissingField("start"));
    }

    #[test]
    fn test_unresolvable_dependency_returns_desired_start() {
        let candidate = StartCandidate {
            start: Some(date(2025, 3, 1)),
            depends_on: Some(42),
        };

        let start = resolve_start(&candidate, &[], SchedulePolicy::Reject).unwrap();
        assert_eq!(start, date(2025, 3, 1));
    }

    #[test]
    fn test_dependency_with_garbage_start_imposes_no_constraint() {
        let tasks = vec![task(1, "A", Some("not-a-date"), Some("5"), None)];
        let candidate = StartCandidate {
            start: Some(date(2025, 1, 2)),
            depends_on: Some(1),
        };

        let start = resolve_start(&candidate, &tasks, SchedulePolicy::Reject).unwrap();
        assert_eq!(start, date(2025, 1, 2));
    }

    #[test]
    fn test_dependency_with_garbage_duration_counts_as_zero_days() {
        let tasks = vec![task(1, "A", Some("2025-01-10"), Some("soon"), None)];
        let candidate = StartCandidate {
            start: Some(date(2025, 1, 2)),
            depends_on: Some(1),
        };

        let start = resolve_start(&candidate, &tasks, SchedulePolicy::AutoAdvance).unwrap();
        assert_eq!(start, date(2025, 1, 10));
    }

    #[test]
    fn test_resolve_start_is_idempotent() {
        let tasks = vec![task(1, "A", Some("2025-01-01"), Some("5"), None)];
        let candidate = StartCandidate {
            start: Some(date(2025, 1, 3)),
            depends_on: Some(1),
        };

        let first = resolve_start(&candidate, &tasks, SchedulePolicy::AutoAdvance).unwrap();
        let resolved = StartCandidate {
            start: Some(first),
            depends_on: Some(1),
        };
        let second = resolve_start(&resolved, &tasks, SchedulePolicy::AutoAdvance).unwrap();
        assert_eq!(first, second);

        // The already-valid date also survives the reject policy unchanged.
        let third = resolve_start(&resolved, &tasks, SchedulePolicy::Reject).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn test_critical_path_single_chain() {
        let tasks = vec![
            task(1, "A", Some("2025-01-01"), Some("1"), None),
            task(2, "B", Some("2025-01-02"), Some("1"), Some(1)),
            task(3, "C", Some("2025-01-03"), Some("1"), Some(2)),
        ];

        let critical = critical_path(&tasks).unwrap();
        assert_eq!(critical, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn test_critical_path_picks_longer_of_two_chains() {
        let tasks = vec![
            task(1, "A", Some("2025-01-01"), Some("1"), None),
            task(2, "B", Some("2025-01-02"), Some("1"), Some(1)),
            task(3, "X", Some("2025-01-01"), Some("4"), None),
            task(4, "Y", Some("2025-01-05"), Some("4"), Some(3)),
        ];

        let critical = critical_path(&tasks).unwrap();
        assert_eq!(critical, HashSet::from([3, 4]));
    }

    #[test]
    fn test_critical_path_tie_breaks_first_seen() {
        let tasks = vec![
            task(1, "A", Some("2025-01-01"), Some("2"), None),
            task(2, "B", Some("2025-01-03"), Some("2"), Some(1)),
            task(3, "X", Some("2025-01-01"), Some("2"), None),
            task(4, "Y", Some("2025-01-03"), Some("2"), Some(3)),
        ];

        let critical = critical_path(&tasks).unwrap();
        assert_eq!(critical, HashSet::from([1, 2]));
    }

    #[test]
    fn test_critical_path_survives_unparsable_start() {
        let tasks = vec![
            task(1, "A", Some("not-a-date"), Some("3"), None),
            task(2, "B", Some("2025-01-04"), Some("1"), Some(1)),
        ];

        let critical = critical_path(&tasks).unwrap();
        assert_eq!(critical, HashSet::from([1, 2]));
    }

    #[test]
    fn test_critical_path_detects_cycle() {
        let tasks = vec![
            task(1, "A", Some("2025-01-01"), Some("1"), Some(2)),
            task(2, "B", Some("2025-01-02"), Some("1"), Some(1)),
        ];

        let err = critical_path(&tasks).unwrap_err();
        assert!(matches!(err, ScheduleError::CyclicDependency(_)));
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let tasks = vec![task(1, "A", Some("2025-01-01"), Some("1"), Some(1))];

        let err = critical_path(&tasks).unwrap_err();
        assert_eq!(err, ScheduleError::CyclicDependency("A".to_string()));
    }

    #[test]
    fn test_reschedule_reaches_fixed_point_on_chain() {
        let tasks = vec![
            task(1, "A", Some("2025-01-01"), Some("2"), None),
            task(2, "B", Some("2025-01-01"), Some("2"), Some(1)),
            task(3, "C", Some("2025-01-01"), Some("1"), Some(2)),
        ];

        let shifts = reschedule(&tasks).unwrap();
        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].id, 2);
        assert_eq!(shifts[0].to, date(2025, 1, 3));
        assert_eq!(shifts[1].id, 3);
        assert_eq!(shifts[1].to, date(2025, 1, 5));
    }

    #[test]
    fn test_reschedule_noop_when_consistent() {
        let tasks = vec![
            task(1, "A", Some("2025-01-01"), Some("2"), None),
            task(2, "B", Some("2025-01-03"), Some("2"), Some(1)),
        ];

        assert!(reschedule(&tasks).unwrap().is_empty());
    }

    #[test]
    fn test_reschedule_skips_unparsable_starts() {
        let tasks = vec![
            task(1, "A", Some("2025-01-01"), Some("2"), None),
            task(2, "B", Some("garbage"), Some("2"), Some(1)),
        ];

        assert!(reschedule(&tasks).unwrap().is_empty());
    }

    #[test]
    fn test_reschedule_rejects_cycles() {
        let tasks = vec![
            task(1, "A", Some("2025-01-01"), Some("1"), Some(2)),
            task(2, "B", Some("2025-01-02"), Some("1"), Some(1)),
        ];

        assert!(matches!(reschedule(&tasks).unwrap_err(), ScheduleError::CyclicDependency(_)));
    }
}
