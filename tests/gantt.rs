#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use planr::libs::gantt::layout;
    use planr::libs::task::Task;

    fn task(id: i64, name: &str, phase: Option<&str>, start: &str, duration: &str) -> Task {
        let mut task = Task::new(name, Some(start.to_string()), Some(duration.to_string()));
        task.id = Some(id);
        task.phase = phase.map(String::from);
        task
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_layout_groups_by_phase_in_first_seen_order() {
        let tasks = vec![
            task(1, "Dig", Some("Groundwork"), "2025-01-01", "2"),
            task(2, "Design", Some("Planning"), "2025-01-01", "3"),
            task(3, "Pour", Some("Groundwork"), "2025-01-03", "2"),
        ];

        let rows = layout(&tasks, false).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Groundwork", "Dig", "Pour", "Planning", "Design"]);
        assert!(rows[0].is_phase);
        assert!(rows[3].is_phase);
    }

    #[test]
    fn test_layout_indents_children_below_parents() {
        let parent = task(1, "Build", Some("Work"), "2025-01-01", "10");
        let mut child = task(2, "Walls", Some("Work"), "2025-01-02", "3");
        child.parent = Some(1);

        let rows = layout(&[parent, child], false).unwrap();
        assert_eq!(rows[1].name, "Build");
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[2].name, "Walls");
        assert_eq!(rows[2].depth, 2);
    }

    #[test]
    fn test_layout_computes_finish_dates() {
        let tasks = vec![task(1, "A", None, "2025-01-01", "5")];

        let rows = layout(&tasks, false).unwrap();
        assert_eq!(rows[0].name, "No Phase");
        assert_eq!(rows[1].start, Some(date(2025, 1, 1)));
        assert_eq!(rows[1].finish, Some(date(2025, 1, 6)));
    }

    #[test]
    fn test_milestone_rows_are_zero_length() {
        let mut milestone = task(1, "Handover", None, "2025-02-01", "5");
        milestone.milestone = Some("Handover complete".to_string());

        let rows = layout(&[milestone], false).unwrap();
        assert!(rows[1].milestone);
        assert_eq!(rows[1].finish, Some(date(2025, 2, 1)));
    }

    #[test]
    fn test_layout_excludes_unparsable_start_without_failing() {
        let tasks = vec![
            task(1, "Good", None, "2025-01-01", "1"),
            task(2, "Bad", None, "not-a-date", "1"),
        ];

        let rows = layout(&tasks, false).unwrap();
        assert!(rows.iter().all(|r| r.name != "Bad"));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_layout_marks_critical_rows() {
        let mut chained = task(2, "B", None, "2025-01-03", "2");
        chained.depends_on = Some(1);
        let tasks = vec![task(1, "A", None, "2025-01-01", "2"), chained, task(3, "Lone", None, "2025-01-01", "1")];

        let rows = layout(&tasks, false).unwrap();
        let critical: Vec<&str> = rows.iter().filter(|r| r.critical).map(|r| r.name.as_str()).collect();
        assert_eq!(critical, vec!["A", "B"]);
    }

    #[test]
    fn test_hide_external_filters_rows_but_not_critical_path() {
        let mut external = task(1, "Vendor", None, "2025-01-01", "9");
        external.external_task = true;
        let tasks = vec![external, task(2, "Ours", None, "2025-01-01", "1")];

        let rows = layout(&tasks, true).unwrap();
        assert!(rows.iter().all(|r| r.name != "Vendor"));
        // The hidden task still owns the longest chain, so nothing visible
        // is marked critical.
        assert!(rows.iter().all(|r| !r.critical));
    }
}
