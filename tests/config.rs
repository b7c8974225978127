#[cfg(test)]
mod tests {
    use ponto::libs::config::{Config, ProfileConfig, StorageBackend, StorageConfig, WorkConfig, CONFIG_FILE_NAME};
    use ponto::libs::hours::LunchPolicy;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join(CONFIG_FILE_NAME);
            ConfigTestContext { _temp_dir: temp_dir, path }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.work(), WorkConfig::default());
        assert_eq!(config.work().lunch_policy, LunchPolicy::Fixed { minutes: 60 });
        assert_eq!(config.work().daily_threshold, 528);
        assert_eq!(config.backend(), StorageBackend::Database);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        let config = Config {
            work: Some(WorkConfig {
                lunch_policy: LunchPolicy::None,
                daily_threshold: 480,
                overtime_threshold: 600,
            }),
            profile: Some(ProfileConfig {
                user_id: "u-17".to_string(),
                employee_name: "Ana Souza".to_string(),
            }),
            storage: Some(StorageConfig {
                backend: StorageBackend::Local,
            }),
        };
        config.save_to(&ctx.path).unwrap();

        let read = Config::read_from(&ctx.path).unwrap();
        assert_eq!(read, config);
        assert_eq!(read.backend(), StorageBackend::Local);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_hand_written_file(ctx: &mut ConfigTestContext) {
        std::fs::write(
            &ctx.path,
            r#"{
                "work": { "lunch_policy": { "fixed": { "minutes": 30 } }, "daily_threshold": 528, "overtime_threshold": 540 },
                "storage": { "backend": "local" }
            }"#,
        )
        .unwrap();

        let config = Config::read_from(&ctx.path).unwrap();
        assert_eq!(config.work().lunch_policy, LunchPolicy::Fixed { minutes: 30 });
        assert_eq!(config.work().overtime_threshold, 540);
        assert!(config.profile.is_none());
        assert_eq!(config.backend(), StorageBackend::Local);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_empty_sections_are_not_written(ctx: &mut ConfigTestContext) {
        Config::default().save_to(&ctx.path).unwrap();
        let raw = std::fs::read_to_string(&ctx.path).unwrap();
        assert_eq!(raw.trim(), "{}");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.path, "{ not json").unwrap();
        assert!(Config::read_from(&ctx.path).is_err());
    }
}
