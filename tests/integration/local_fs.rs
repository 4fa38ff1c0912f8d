use color_eyre::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

use folderstat::engine::function::{Count, LatestModified, Stats, TotalSize};
use folderstat::engine::helpers::{file_count, file_last_modified};
use folderstat::engine::{AggregationError, Aggregator, LocalFileSystem, LocalFsError};
use folderstat::models::{AggregationKind, AggregationRequest, AggregationResult};
use folderstat::utils::system_time_to_timestamp;

/// Create a test file with specific content
async fn create_test_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, content).await?;
    Ok(())
}

/// a/ 2 files, a/b/ 3 files, a/b/c/ 1 file, plus an empty folder
async fn setup_test_tree(root: &Path) -> Result<()> {
    create_test_file(&root.join("one.txt"), b"1").await?;
    create_test_file(&root.join("two.txt"), b"22").await?;
    create_test_file(&root.join("b/three.txt"), b"333").await?;
    create_test_file(&root.join("b/four.txt"), b"4444").await?;
    create_test_file(&root.join("b/five.txt"), b"55555").await?;
    create_test_file(&root.join("b/c/six.txt"), b"666666").await?;
    fs::create_dir_all(root.join("empty")).await?;
    Ok(())
}

fn modified(path: &Path) -> i64 {
    system_time_to_timestamp(std::fs::metadata(path).and_then(|m| m.modified())).unwrap_or(0)
}

#[tokio::test]
async fn test_count_on_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().to_path_buf();
    setup_test_tree(&root).await?;

    let local = LocalFileSystem::new();
    let aggregator = Aggregator::new();

    assert_eq!(aggregator.aggregate(&local, &root, false, &Count)?, 2);
    assert_eq!(aggregator.aggregate(&local, &root, true, &Count)?, 6);
    assert_eq!(aggregator.aggregate(&local, &root.join("b"), true, &Count)?, 4);
    assert_eq!(aggregator.aggregate(&local, &root.join("empty"), true, &Count)?, 0);
    Ok(())
}

#[tokio::test]
async fn test_size_and_stats_on_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().to_path_buf();
    setup_test_tree(&root).await?;

    let local = LocalFileSystem::new();
    let aggregator = Aggregator::new();

    assert_eq!(aggregator.aggregate(&local, &root, false, &TotalSize)?, 3);
    assert_eq!(aggregator.aggregate(&local, &root, true, &TotalSize)?, 21);

    let stats = aggregator.aggregate(&local, &root, true, &Stats)?;
    assert_eq!(stats.files, 6);
    assert_eq!(stats.folders, 3);
    assert_eq!(stats.total_size, 21);
    assert_eq!(stats.latest_modified, aggregator.aggregate(&local, &root, true, &LatestModified)?);
    Ok(())
}

#[tokio::test]
async fn test_latest_modified_matches_newest_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().to_path_buf();
    setup_test_tree(&root).await?;

    let expected_flat = modified(&root.join("one.txt")).max(modified(&root.join("two.txt")));
    let expected_deep = [
        "one.txt",
        "two.txt",
        "b/three.txt",
        "b/four.txt",
        "b/five.txt",
        "b/c/six.txt",
    ]
    .iter()
    .map(|name| modified(&root.join(name)))
    .max()
    .unwrap_or(0);

    let local = LocalFileSystem::new();
    assert_eq!(file_last_modified(&local, Some(&root), Some(false))?, expected_flat);
    assert_eq!(file_last_modified(&local, Some(&root), None)?, expected_deep);
    assert_eq!(file_last_modified(&local, Some(&root.join("empty")), None)?, 0);
    Ok(())
}

#[tokio::test]
async fn test_helpers_use_call_site_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().to_path_buf();
    setup_test_tree(&root).await?;

    let local = LocalFileSystem::new();
    assert_eq!(file_count(&local, Some(&root), None)?, 2);
    assert_eq!(file_count(&local, Some(&root), Some(true))?, 6);
    assert!(matches!(
        file_count(&local, None, None),
        Err(AggregationError::InvalidArgument { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_run_with_request() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().to_path_buf();
    setup_test_tree(&root).await?;

    let local = LocalFileSystem::new();
    let request = AggregationRequest::new(AggregationKind::Count).recursive(true);
    let result = Aggregator::new().run(&local, Some(&root), &request)?;

    assert_eq!(result, AggregationResult::Count(6));
    assert_eq!(result.as_integer(), Some(6));
    Ok(())
}

#[test]
fn test_missing_folder_propagates_backend_error() {
    let local = LocalFileSystem::new();
    let missing = PathBuf::from("/definitely/not/here/folderstat");

    let err = Aggregator::new()
        .aggregate(&local, &missing, false, &Count)
        .unwrap_err();
    // Identity is resolved first when cycle detection is on.
    assert!(matches!(
        err,
        AggregationError::Collaborator(LocalFsError::Resolve { .. })
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_cycle_is_detected_when_following_links() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().to_path_buf();
    setup_test_tree(&root).await?;
    std::os::unix::fs::symlink(&root, root.join("b/c/loop"))?;

    // Links are ignored by default.
    let plain = LocalFileSystem::new();
    assert_eq!(Aggregator::new().aggregate(&plain, &root, true, &Count)?, 6);

    let following = LocalFileSystem::new().follow_links(true);
    let err = Aggregator::new()
        .aggregate(&following, &root, true, &Count)
        .unwrap_err();
    assert!(matches!(err, AggregationError::CycleDetected { .. }));
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlinked_folder_is_counted_when_following_links() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let outside = TempDir::new()?;
    let root = temp_dir.path().to_path_buf();
    create_test_file(&root.join("local.txt"), b"L").await?;
    create_test_file(&outside.path().join("linked.txt"), b"X").await?;
    std::os::unix::fs::symlink(outside.path(), root.join("shared"))?;

    let following = LocalFileSystem::new().follow_links(true);
    assert_eq!(Aggregator::new().aggregate(&following, &root, true, &Count)?, 2);
    Ok(())
}
