use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The built-in aggregations a caller can select at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationKind {
    Count,
    LatestModified,
    TotalSize,
    Stats,
}

impl AggregationKind {
    pub const ALL: [Self; 4] = [Self::Count, Self::LatestModified, Self::TotalSize, Self::Stats];

    /// Recursion used when the caller does not say otherwise.
    ///
    /// Counting looks at the folder itself only, while the latest
    /// modification time covers the whole subtree.
    #[must_use]
    pub const fn default_recursive(self) -> bool {
        match self {
            Self::Count | Self::TotalSize => false,
            Self::LatestModified | Self::Stats => true,
        }
    }
}

impl FromStr for AggregationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "last-modified" | "latest-modified" => Ok(Self::LatestModified),
            "size" | "total-size" => Ok(Self::TotalSize),
            "stats" => Ok(Self::Stats),
            _ => Err(format!("Unknown aggregation: {s}")),
        }
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => write!(f, "count"),
            Self::LatestModified => write!(f, "last-modified"),
            Self::TotalSize => write!(f, "size"),
            Self::Stats => write!(f, "stats"),
        }
    }
}
