#[cfg(test)]
mod tests {
    use planr::db::phases::{Phase, Phases};
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct PhaseTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for PhaseTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            PhaseTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(PhaseTestContext)]
    #[test]
    fn test_phase_create_and_list(_ctx: &mut PhaseTestContext) {
        let mut phases = Phases::new().unwrap();

        phases.create(&Phase::new("Planning".to_string())).unwrap();
        phases.create(&Phase::new("Construction".to_string())).unwrap();

        let listed = phases.list().unwrap();
        assert_eq!(listed.len(), 2);
        // Creation order, not alphabetical.
        assert_eq!(listed[0].name, "Planning");
        assert_eq!(listed[1].name, "Construction");
    }

    #[test_context(PhaseTestContext)]
    #[test]
    fn test_phase_lookup(_ctx: &mut PhaseTestContext) {
        let mut phases = Phases::new().unwrap();

        let id = phases.create(&Phase::new("Planning".to_string())).unwrap();
        assert!(phases.get_by_name("Planning").unwrap().is_some());
        assert!(phases.get_by_name("Missing").unwrap().is_none());
        assert_eq!(phases.get_by_id(id).unwrap().unwrap().name, "Planning");
    }

    #[test_context(PhaseTestContext)]
    #[test]
    fn test_phase_delete(_ctx: &mut PhaseTestContext) {
        let mut phases = Phases::new().unwrap();

        let id = phases.create(&Phase::new("Planning".to_string())).unwrap();
        phases.delete(id).unwrap();
        assert!(phases.list().unwrap().is_empty());

        // Deleting again reports the missing phase.
        assert!(phases.delete(id).is_err());
    }

    #[test_context(PhaseTestContext)]
    #[test]
    fn test_duplicate_phase_name_is_rejected(_ctx: &mut PhaseTestContext) {
        let mut phases = Phases::new().unwrap();

        phases.create(&Phase::new("Planning".to_string())).unwrap();
        assert!(phases.create(&Phase::new("Planning".to_string())).is_err());
    }
}
