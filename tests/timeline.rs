#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use planr::libs::task::Task;
    use planr::libs::timeline::{timeline, TimelineKind};

    fn task(name: &str, start: Option<&str>) -> Task {
        Task::new(name, start.map(String::from), Some("1".to_string()))
    }

    #[test]
    fn test_timeline_collects_milestones_and_started_tasks() {
        let mut kickoff = task("Kickoff", Some("2025-01-05"));
        kickoff.milestone = Some("Project kickoff".to_string());

        let mut active = task("Build", Some("2025-01-02"));
        active.set_percent(40.0);

        let idle = task("Later", Some("2025-03-01"));

        let items = timeline(&[kickoff, active, idle]);
        assert_eq!(items.len(), 2);
        // Sorted by date, earliest first.
        assert_eq!(items[0].name, "Build");
        assert_eq!(items[0].kind, TimelineKind::Phase);
        assert_eq!(items[1].name, "Project kickoff");
        assert_eq!(items[1].kind, TimelineKind::Milestone);
        assert_eq!(items[1].date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    }

    #[test]
    fn test_timeline_skips_undated_items() {
        let mut undated = task("Someday", None);
        undated.milestone = Some("Someday".to_string());
        let mut junk = task("Junk", Some("not-a-date"));
        junk.set_percent(100.0);

        assert!(timeline(&[undated, junk]).is_empty());
    }
}
