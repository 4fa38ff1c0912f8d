//! Entry points shaped like the template helpers hosts call.
//!
//! `file_count` looks at the folder itself by default while
//! `file_last_modified` covers the whole subtree; pass `Some(..)` to override.
//! Resolving a folder from surrounding context is up to the caller.

use folderstat_models::AggregationKind;

use crate::function::{Count, LatestModified};
use crate::{AggregationError, Aggregator, FolderSource};

/// Number of files in `folder`.
///
/// # Errors
///
/// Returns [`AggregationError::InvalidArgument`] when `folder` is `None`;
/// see [`Aggregator::aggregate`] for the rest.
pub fn file_count<S>(
    source: &S,
    folder: Option<&S::Folder>,
    recursive: Option<bool>,
) -> Result<u64, AggregationError<S::Error>>
where
    S: FolderSource + ?Sized,
{
    let recursive = recursive.unwrap_or(AggregationKind::Count.default_recursive());
    Aggregator::new().aggregate_optional(source, folder, recursive, &Count)
}

/// Unix timestamp of the newest file in `folder`, `0` if there is none.
///
/// # Errors
///
/// Returns [`AggregationError::InvalidArgument`] when `folder` is `None`;
/// see [`Aggregator::aggregate`] for the rest.
pub fn file_last_modified<S>(
    source: &S,
    folder: Option<&S::Folder>,
    recursive: Option<bool>,
) -> Result<i64, AggregationError<S::Error>>
where
    S: FolderSource + ?Sized,
{
    let recursive = recursive.unwrap_or(AggregationKind::LatestModified.default_recursive());
    Aggregator::new().aggregate_optional(source, folder, recursive, &LatestModified)
}
