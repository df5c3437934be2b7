// tests/config_resolution.rs

use monitdir_test_utils::init_tracing;

use std::error::Error;
use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;

use monitdir::cli::CliArgs;
use monitdir::config::resolve_config;
use monitdir::errors::MonitdirError;
use monitdir::types::{Action, DirErrorPolicy};

type TestResult = Result<(), Box<dyn Error>>;

fn args_for(dir: &std::path::Path) -> CliArgs {
    CliArgs {
        directory: Some(dir.to_string_lossy().into_owned()),
        ..Default::default()
    }
}

#[tokio::test]
async fn pass_filename_with_print_is_rejected_before_monitoring() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let args = CliArgs {
        pass_filename: true,
        ..args_for(dir.path())
    };

    // `run` never gets as far as a snapshot or the loop.
    let result = monitdir::run(args).await;
    match result {
        Err(MonitdirError::ConfigError(msg)) => assert!(msg.contains("pass-filename")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
    Ok(())
}

#[test]
fn missing_directory_flag_is_a_config_error() {
    init_tracing();

    let err = resolve_config(&CliArgs::default()).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn directory_is_made_absolute() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let dotted = dir.path().join(".");

    let cfg = resolve_config(&args_for(&dotted))?;
    assert!(cfg.directory.is_absolute());
    assert_eq!(cfg.directory, dir.path().canonicalize()?);
    Ok(())
}

#[test]
fn config_file_supplies_values_and_cli_overrides_them() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[monitor]
directory = {:?}
interval = 10
action = "notify"
pass_filename = true
on_dir_error = "skip"
max_stabilize_samples = 30
"#,
        dir.path().to_string_lossy()
    )?;

    let from_file = resolve_config(&CliArgs {
        config: Some(file.path().to_string_lossy().into_owned()),
        ..Default::default()
    })?;
    assert_eq!(from_file.interval, Duration::from_secs(10));
    assert_eq!(
        from_file.action,
        Action::Execute {
            command: "notify".to_string(),
            pass_filename: true
        }
    );
    assert_eq!(from_file.on_dir_error, DirErrorPolicy::Skip);
    assert_eq!(from_file.max_stabilize_samples, Some(30));

    let overridden = resolve_config(&CliArgs {
        config: Some(file.path().to_string_lossy().into_owned()),
        interval: Some(2),
        execute: Some("rsync -a".to_string()),
        ..Default::default()
    })?;
    assert_eq!(overridden.interval, Duration::from_secs(2));
    assert_eq!(
        overridden.action,
        Action::Execute {
            command: "rsync -a".to_string(),
            pass_filename: true
        }
    );
    Ok(())
}

#[test]
fn unknown_config_keys_are_rejected() -> TestResult {
    init_tracing();

    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[monitor]
directory = "/tmp"
intervall = 3
"#
    )?;

    let err = resolve_config(&CliArgs {
        config: Some(file.path().to_string_lossy().into_owned()),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, MonitdirError::TomlError(_)));
    assert!(err.is_config_error());
    Ok(())
}

#[test]
fn missing_config_file_is_a_config_error_naming_the_path() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("monitdir.toml");

    let err = resolve_config(&CliArgs {
        config: Some(missing.to_string_lossy().into_owned()),
        ..args_for(dir.path())
    })
    .unwrap_err();

    match &err {
        MonitdirError::ConfigError(msg) => {
            assert!(msg.contains("cannot read config file"));
            assert!(msg.contains("monitdir.toml"));
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
    assert!(err.is_config_error());
    Ok(())
}
