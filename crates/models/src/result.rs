use serde::{Deserialize, Serialize};
use std::fmt;

use crate::FolderStats;

/// Outcome of a dynamically selected aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum AggregationResult {
    Count(u64),
    LatestModified(i64),
    TotalSize(u64),
    Stats(FolderStats),
}

impl AggregationResult {
    /// The scalar value, or `None` for composite results.
    #[allow(clippy::cast_possible_wrap)]
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match *self {
            Self::Count(n) | Self::TotalSize(n) => Some(n as i64),
            Self::LatestModified(ts) => Some(ts),
            Self::Stats(_) => None,
        }
    }
}

impl fmt::Display for AggregationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) | Self::TotalSize(n) => write!(f, "{n}"),
            Self::LatestModified(ts) => write!(f, "{ts}"),
            Self::Stats(stats) => write!(
                f,
                "files={} folders={} size={} latest={}",
                stats.files, stats.folders, stats.total_size, stats.latest_modified
            ),
        }
    }
}
