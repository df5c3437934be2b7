// tests/snapshot_real_fs.rs

use monitdir_test_utils::init_tracing;

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use monitdir::errors::MonitdirError;
use monitdir::fs::RealFileSystem;
use monitdir::snapshot::{capture, diff};

type TestResult = Result<(), Box<dyn Error>>;

/// One file and one subdirectory holding one file.
fn sample_tree() -> std::io::Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("top.txt"), b"top")?;
    fs::create_dir(dir.path().join("nested"))?;
    fs::write(dir.path().join("nested").join("inner.txt"), b"inner")?;
    Ok(dir)
}

#[test]
fn non_recursive_lists_file_and_subdirectory() -> TestResult {
    init_tracing();
    let dir = sample_tree()?;

    let snap = capture(&RealFileSystem, dir.path(), false)?;

    let names: Vec<_> = snap.entries().iter().cloned().collect();
    assert_eq!(names, vec![PathBuf::from("nested"), PathBuf::from("top.txt")]);
    Ok(())
}

#[test]
fn recursive_lists_files_only() -> TestResult {
    init_tracing();
    let dir = sample_tree()?;
    fs::remove_file(dir.path().join("top.txt"))?;

    let snap = capture(&RealFileSystem, dir.path(), true)?;

    let names: Vec<_> = snap.entries().iter().cloned().collect();
    assert_eq!(names, vec![PathBuf::from("nested").join("inner.txt")]);
    Ok(())
}

#[test]
fn total_size_ignores_nested_contents() -> TestResult {
    init_tracing();
    let dir = sample_tree()?;

    let before = capture(&RealFileSystem, dir.path(), true)?;
    fs::write(dir.path().join("nested").join("inner.txt"), vec![0u8; 4096])?;
    let after = capture(&RealFileSystem, dir.path(), true)?;

    assert_eq!(before.total_size(), after.total_size());

    fs::write(dir.path().join("top.txt"), vec![0u8; 100])?;
    let grown = capture(&RealFileSystem, dir.path(), true)?;
    assert_eq!(grown.total_size(), after.total_size() + 97);
    Ok(())
}

#[test]
fn polling_twice_without_changes_is_idempotent() -> TestResult {
    init_tracing();
    let dir = sample_tree()?;

    for recursive in [false, true] {
        let first = capture(&RealFileSystem, dir.path(), recursive)?;
        let second = capture(&RealFileSystem, dir.path(), recursive)?;
        let third = capture(&RealFileSystem, dir.path(), recursive)?;

        assert!(diff(&first, &second).is_empty());
        assert!(diff(&second, &third).is_empty());
    }
    Ok(())
}

#[test]
fn add_then_remove_is_a_net_no_op() -> TestResult {
    init_tracing();
    let dir = sample_tree()?;
    let baseline = capture(&RealFileSystem, dir.path(), false)?;

    fs::write(dir.path().join("X"), b"x")?;
    let middle = capture(&RealFileSystem, dir.path(), false)?;
    fs::remove_file(dir.path().join("X"))?;
    let end = capture(&RealFileSystem, dir.path(), false)?;

    let mid_changes = diff(&baseline, &middle);
    assert_eq!(mid_changes.added.iter().collect::<Vec<_>>(), vec![&PathBuf::from("X")]);
    assert!(mid_changes.removed.is_empty());
    assert!(diff(&baseline, &end).is_empty());
    Ok(())
}

#[test]
fn relative_directory_is_resolved() -> TestResult {
    init_tracing();
    let dir = sample_tree()?;
    let via_dot = dir.path().join(".").join("nested").join("..");

    let a = capture(&RealFileSystem, dir.path(), false)?;
    let b = capture(&RealFileSystem, &via_dot, false)?;
    assert!(a.same_entries(&b));
    Ok(())
}

#[test]
fn deleted_directory_is_an_access_error() -> TestResult {
    init_tracing();
    let dir = sample_tree()?;
    let path = dir.path().to_path_buf();
    drop(dir);

    let err = capture(&RealFileSystem, &path, false).unwrap_err();
    assert!(matches!(err, MonitdirError::DirectoryAccess { .. }));
    Ok(())
}
