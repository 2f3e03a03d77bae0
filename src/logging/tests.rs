//! Tests for the logging setup

use super::*;
use tempfile::TempDir;

#[test]
fn test_log_level_display() {
    assert_eq!(LogLevel::Trace.to_string(), "trace");
    assert_eq!(LogLevel::Debug.to_string(), "debug");
    assert_eq!(LogLevel::Info.to_string(), "info");
    assert_eq!(LogLevel::Warn.to_string(), "warn");
    assert_eq!(LogLevel::Error.to_string(), "error");
    assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, LogLevel::Info);
    assert_eq!(config.format, LogFormat::Text);
    assert_eq!(config.output, LogOutput::Console);
    assert_eq!(config.rotation, LogRotation::Daily);
    assert_eq!(config.file_name, DEFAULT_LOG_FILE);
    assert!(config.include_target);
    assert!(config.writes_console());
    assert!(!config.writes_file());
    assert_eq!(config.directory(), std::path::PathBuf::from("logs"));
}

#[test]
fn test_logging_config_builder() {
    let config = LoggingConfig::new()
        .with_level(LogLevel::Debug)
        .with_format(LogFormat::Json)
        .with_output(LogOutput::Both)
        .with_log_directory("/tmp/tokenizer-logs")
        .with_file_name("fts.log")
        .with_rotation(LogRotation::Hourly)
        .with_target(false)
        .with_thread_id(true)
        .with_file_info(true)
        .with_module_level("simple_tokenizer::pinyin", LogLevel::Trace);

    assert_eq!(config.level, LogLevel::Debug);
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.writes_console());
    assert!(config.writes_file());
    assert_eq!(config.file_name, "fts.log");
    assert_eq!(config.rotation, LogRotation::Hourly);
    assert!(!config.include_target);
    assert!(config.include_thread_id);
    assert!(config.include_file_info);
    assert_eq!(
        config.module_levels.get("simple_tokenizer::pinyin"),
        Some(&LogLevel::Trace)
    );
}

#[test]
fn test_logging_config_development() {
    let config = LoggingConfig::development();
    assert_eq!(config.level, LogLevel::Debug);
    assert_eq!(config.output, LogOutput::Console);
    assert!(config.include_file_info);
}

#[test]
fn test_logging_config_from_partial_json() {
    let config: LoggingConfig =
        serde_json::from_str(r#"{ "level": "warn", "output": "file", "rotation": "never" }"#)
            .unwrap();
    assert_eq!(config.level, LogLevel::Warn);
    assert_eq!(config.output, LogOutput::File);
    assert_eq!(config.rotation, LogRotation::Never);
    assert_eq!(config.file_name, DEFAULT_LOG_FILE);
    assert!(config.include_target);
}

#[test]
fn test_logging_config_serialization_roundtrip() {
    let config = LoggingConfig::new()
        .with_format(LogFormat::Json)
        .with_module_level("simple_tokenizer::segment", LogLevel::Error);
    let json = serde_json::to_string(&config).unwrap();
    let parsed: LoggingConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_build_env_filter_with_module_levels() {
    let config = LoggingConfig::new()
        .with_level(LogLevel::Warn)
        .with_module_level("simple_tokenizer::pinyin", LogLevel::Trace)
        .with_module_level("simple_tokenizer::index", LogLevel::Debug);
    let filter = build_env_filter(&config).unwrap().to_string();
    assert!(filter.contains("simple_tokenizer::pinyin=trace"));
    assert!(filter.contains("simple_tokenizer::index=debug"));
    assert!(filter.contains("warn"));
}

#[test]
fn test_init_logging_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("logs");
    let config = LoggingConfig::new()
        .with_output(LogOutput::File)
        .with_rotation(LogRotation::Never)
        .with_log_directory(&log_dir);

    let guard = init_logging(config.clone()).unwrap();
    assert_eq!(guard.log_directory(), Some(&log_dir));
    tracing::info!("written to file");
    drop(guard);

    let log_file = log_dir.join(DEFAULT_LOG_FILE);
    let content = std::fs::read_to_string(log_file).unwrap();
    assert!(content.contains("written to file"));

    // only one global subscriber per process
    let err = init_logging(config).unwrap_err();
    assert!(matches!(err, LoggingError::InitializationError(_)));
}
