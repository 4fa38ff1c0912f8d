//! Reducers the engine folds over a folder tree.
//!
//! A reducer maps every file to a value and merges values with an
//! associative, commutative `combine`. Adding a new statistic means adding a
//! reducer here; the traversal itself stays untouched.

use std::fmt;

use folderstat_models::FolderStats;

use crate::FolderSource;

pub trait AggregationFunction<S: FolderSource + ?Sized> {
    type Output: Copy + fmt::Debug;

    fn name(&self) -> &'static str;

    /// Value of a folder level that holds no files.
    fn empty(&self) -> Self::Output;

    /// # Errors
    ///
    /// Propagates any error the source raises while reading file metadata.
    fn file_value(&self, source: &S, file: &S::File) -> Result<Self::Output, S::Error>;

    /// Extra contribution of each subfolder the walk descends into.
    fn folder_value(&self) -> Option<Self::Output> {
        None
    }

    fn combine(&self, acc: Self::Output, value: Self::Output) -> Self::Output;
}

/// Number of files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

impl<S: FolderSource + ?Sized> AggregationFunction<S> for Count {
    type Output = u64;

    fn name(&self) -> &'static str {
        "count"
    }

    fn empty(&self) -> u64 {
        0
    }

    fn file_value(&self, _source: &S, _file: &S::File) -> Result<u64, S::Error> {
        Ok(1)
    }

    fn combine(&self, acc: u64, value: u64) -> u64 {
        acc.saturating_add(value)
    }
}

/// Newest modification timestamp, `0` when no file is in scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestModified;

impl<S: FolderSource + ?Sized> AggregationFunction<S> for LatestModified {
    type Output = i64;

    fn name(&self) -> &'static str {
        "last-modified"
    }

    fn empty(&self) -> i64 {
        0
    }

    fn file_value(&self, source: &S, file: &S::File) -> Result<i64, S::Error> {
        source.modification_timestamp(file)
    }

    fn combine(&self, acc: i64, value: i64) -> i64 {
        acc.max(value)
    }
}

/// Sum of file sizes in bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalSize;

impl<S: FolderSource + ?Sized> AggregationFunction<S> for TotalSize {
    type Output = u64;

    fn name(&self) -> &'static str {
        "size"
    }

    fn empty(&self) -> u64 {
        0
    }

    fn file_value(&self, source: &S, file: &S::File) -> Result<u64, S::Error> {
        source.file_size(file)
    }

    fn combine(&self, acc: u64, value: u64) -> u64 {
        acc.saturating_add(value)
    }
}

/// All of the above in one pass, plus the number of subfolders walked.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats;

impl<S: FolderSource + ?Sized> AggregationFunction<S> for Stats {
    type Output = FolderStats;

    fn name(&self) -> &'static str {
        "stats"
    }

    fn empty(&self) -> FolderStats {
        FolderStats::default()
    }

    fn file_value(&self, source: &S, file: &S::File) -> Result<FolderStats, S::Error> {
        Ok(FolderStats {
            files: 1,
            folders: 0,
            total_size: source.file_size(file)?,
            latest_modified: source.modification_timestamp(file)?,
        })
    }

    fn folder_value(&self) -> Option<FolderStats> {
        Some(FolderStats {
            folders: 1,
            ..FolderStats::default()
        })
    }

    fn combine(&self, acc: FolderStats, value: FolderStats) -> FolderStats {
        acc.merge(value)
    }
}
