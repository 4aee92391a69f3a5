#[cfg(test)]
mod tests {
    use planr::libs::config::{Config, DisplayConfig, ScheduleConfig};
    use planr::libs::schedule::SchedulePolicy;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct ConfigTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_config_falls_back_to_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert!(config.schedule.is_none());
        assert_eq!(config.default_policy(), SchedulePolicy::AutoAdvance);
        assert!(!config.hide_external());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_config_round_trip(_ctx: &mut ConfigTestContext) {
        let config = Config {
            schedule: Some(ScheduleConfig {
                policy: SchedulePolicy::Reject,
            }),
            display: Some(DisplayConfig { hide_external: true }),
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded.default_policy(), SchedulePolicy::Reject);
        assert!(loaded.hide_external());
    }
}
