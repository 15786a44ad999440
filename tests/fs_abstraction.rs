// tests/fs_abstraction.rs

use confcheck::config::{Format, Loader};
use confcheck::fs::mock::MockFileSystem;
use confcheck::schema::{SchemaName, Validator};
use confcheck::value::Value;
use confcheck_test_utils::builders::{MappingBuilder, valid_config};

#[test]
fn loader_reads_through_mock_fs() {
    let fs = MockFileSystem::new();
    fs.add_file("conf/logs.toml", "save = \"yes\"\npath = \"./out/run.json\"\n");

    let raw = Loader::new(&fs).load("./conf/logs.toml", Format::Toml).unwrap();
    let logs = Validator::new(&fs).validate(&raw, &SchemaName::Logs.schema()).unwrap();

    assert_eq!(logs["save"], Value::Bool(true));
    assert_eq!(logs["path"], Value::Path("./out/run.json".into()));
}

#[test]
fn log_path_check_sees_mock_files() {
    let fs = MockFileSystem::new();
    fs.add_file("my/logs.json", "[]");
    let validator = Validator::new(&fs);

    let raw = MappingBuilder::new().bool("save", true).str("path", "./my/logs.json").build();
    let err = validator.validate(&raw, &SchemaName::Logs.schema()).unwrap_err();

    assert_eq!(err.len(), 1);
    assert_eq!(err.errors[0].path, "path");
    assert_eq!(err.errors[0].reason, "./my/logs.json already exists");
}

#[test]
fn log_path_check_rejects_existing_directories() {
    let fs = MockFileSystem::new();
    fs.add_dir("my");

    let raw = MappingBuilder::new().str("path", "my").build();
    let err = Validator::new(&fs)
        .validate(&raw, &SchemaName::Logs.schema())
        .unwrap_err();
    assert_eq!(err.errors[0].reason, "my already exists");
}

#[test]
fn full_config_error_carries_nested_path() {
    let fs = MockFileSystem::new();
    fs.add_file("logs/taken.json", "");

    let raw = valid_config("logs/taken.json");
    let err = Validator::new(&fs)
        .validate(&raw, &SchemaName::Config.schema())
        .unwrap_err();

    assert_eq!(err.len(), 1);
    assert_eq!(err.errors[0].path, "logs.path");
    assert_eq!(err.schema, "Config");
}
