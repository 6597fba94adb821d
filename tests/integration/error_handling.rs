// tests/error_handling.rs

#[path = "../common/mod.rs"]
mod common;

use chrono::{TimeZone, Utc};
use common::{init_tracing, task_file};
use qwix::config::{SchedulerSection, load_and_validate};
use qwix::errors::QwixError;
use qwix::types::Priority;

#[test]
fn test_duplicate_id_returns_config_error() {
    let file = task_file(
        r#"
[[task]]
id = "a"
title = "First"

[[task]]
id = "a"
title = "Second"
"#,
    );

    match load_and_validate(file.path()) {
        Err(QwixError::ConfigError(msg)) => assert!(msg.contains("duplicate task id 'a'")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_self_dependency_returns_config_error() {
    let file = task_file(
        r#"
[[task]]
id = "loop"
title = "Loop"
dependencies = ["loop"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(QwixError::ConfigError(msg)) => {
            assert!(msg.contains("loop"));
            assert!(msg.contains("itself"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_negative_spread_factor_returns_config_error() {
    let file = task_file(
        r#"
[scheduler]
spread_factor = -1.0
"#,
    );

    match load_and_validate(file.path()) {
        Err(QwixError::ConfigError(msg)) => assert!(msg.contains("spread_factor")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_unknown_priority_returns_toml_error() {
    let file = task_file(
        r#"
[[task]]
id = "a"
title = "A"
priority = "urgent"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(QwixError::TomlError(_))
    ));
}

#[test]
fn test_malformed_toml_returns_toml_error() {
    let file = task_file("[[task]\nid = ");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(QwixError::TomlError(_))
    ));
}

#[test]
fn test_missing_file_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("Qwix.toml");
    assert!(matches!(
        load_and_validate(&missing),
        Err(QwixError::IoError(_))
    ));
}

#[test]
fn test_dangling_dependencies_and_cycles_only_warn() {
    init_tracing();
    let file = task_file(
        r#"
[scheduler]
spread_factor = 0.5
iterations = 2

[[task]]
id = "a"
title = "A"
priority = "low"
deadline = "2026-10-20T12:00:00Z"
dependencies = ["b"]

[[task]]
id = "b"
title = "B"
dependencies = ["a", "missing"]
estimated_minutes = 45
tags = ["home"]
"#,
    );

    let loaded = load_and_validate(file.path()).unwrap();

    assert_eq!(loaded.scheduler.activation_config().spread_factor, 0.5);
    assert_eq!(loaded.scheduler.activation_config().iterations, 2);
    assert_eq!(loaded.scheduler.upcoming_window_hours, 48);

    let ids: Vec<&str> = loaded.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);

    let a = loaded.get_task("a").unwrap();
    assert_eq!(a.priority, Priority::Low);
    assert_eq!(
        a.deadline,
        Some(Utc.with_ymd_and_hms(2026, 10, 20, 12, 0, 0).unwrap())
    );

    let b = loaded.get_task("b").unwrap();
    assert_eq!(b.priority, Priority::Medium);
    assert_eq!(b.estimated_minutes, Some(45));
    assert!(!b.completed);
    assert_eq!(b.tags, vec!["home".to_string()]);
}

#[test]
fn test_empty_file_is_an_empty_task_list() {
    let file = task_file("");
    let loaded = load_and_validate(file.path()).unwrap();
    assert!(loaded.tasks().is_empty());
    assert_eq!(loaded.scheduler, SchedulerSection::default());
}
