use crossgen_mappers::{ConfigError, PipelineConfig};
use std::fs;

#[test]
fn loads_a_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crossgen.toml");
    fs::write(
        &path,
        r#"
package = "com.example.shared"
prefix = "Td"

[source]
container = "org.drinkless.tdlib.TdApi"

[wiring]
batch_size = 250
module_type = "com.example.di.Module"
module_function = "com.example.di.module"

[wrappers]
kit = "SharedKit"
"#,
    )
    .unwrap();

    let config = PipelineConfig::load(&path).unwrap();
    assert_eq!(config.package, "com.example.shared");
    assert_eq!(config.prefix, "Td");
    assert_eq!(config.source.container.as_deref(), Some("org.drinkless.tdlib.TdApi"));
    assert_eq!(config.wiring.batch_size, 250);
    assert_eq!(config.wiring.module_type, "com.example.di.Module");
    assert_eq!(config.wiring.module_function, "com.example.di.module");
    assert_eq!(config.wiring.module_base, "instanceGettersModule");
    assert_eq!(config.wrappers.kit, "SharedKit");
    assert_eq!(config.wrappers.suffix, "Box");
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, PipelineConfig::default());
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crossgen.toml");
    fs::write(&path, "[wiring\nbatch_size = 3\n").unwrap();
    assert!(matches!(PipelineConfig::load(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn empty_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crossgen.toml");
    fs::write(&path, "[interfaces]\nfile_name = \"\"\n").unwrap();
    let err = PipelineConfig::load(&path).unwrap_err();
    assert_eq!(err.to_string(), "`interfaces.file_name` must not be empty");
}

#[test]
fn directory_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        PipelineConfig::load(dir.path()),
        Err(ConfigError::Read { .. })
    ));
}
