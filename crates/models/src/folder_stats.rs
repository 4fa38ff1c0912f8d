use serde::{Deserialize, Serialize};

/// Composite statistics for a folder subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderStats {
    pub files: u64,
    /// Subfolders descended into; always zero for a non-recursive walk.
    pub folders: u64,
    pub total_size: u64,
    /// Unix seconds of the newest file, `0` when no file was seen.
    pub latest_modified: i64,
}

impl FolderStats {
    /// Folds another subtree into this one.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            files: self.files.saturating_add(other.files),
            folders: self.folders.saturating_add(other.folders),
            total_size: self.total_size.saturating_add(other.total_size),
            latest_modified: self.latest_modified.max(other.latest_modified),
        }
    }
}
