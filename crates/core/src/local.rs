use std::io;
use std::path::{Path, PathBuf};

use folderstat_config::Settings;
use folderstat_utils::{is_hidden, system_time_to_timestamp};
use tracing::trace;
use walkdir::{DirEntry, WalkDir};

use crate::FolderSource;

#[derive(Debug, thiserror::Error)]
pub enum LocalFsError {
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("Failed to resolve {path:?}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Not a directory: {path:?}")]
    NotADirectory { path: PathBuf },
}

/// Folders and files on the local filesystem.
///
/// Symlinks are skipped unless `follow_links` is set; when followed, a link
/// to a folder counts as a subfolder and its identity is the link target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem {
    follow_links: bool,
    skip_hidden: bool,
}

impl LocalFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    #[must_use]
    pub const fn skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    #[must_use]
    pub const fn from_settings(settings: &Settings) -> Self {
        Self {
            follow_links: settings.follow_links,
            skip_hidden: settings.skip_hidden_files,
        }
    }

    fn entries(&self, folder: &Path) -> Result<Vec<DirEntry>, LocalFsError> {
        let metadata = std::fs::metadata(folder).map_err(|source| LocalFsError::Resolve {
            path: folder.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(LocalFsError::NotADirectory {
                path: folder.to_path_buf(),
            });
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links)
        {
            let entry = entry?;
            if self.skip_hidden && is_hidden(entry.path()) {
                trace!("Skipping hidden entry {:?}", entry.path());
                continue;
            }
            entries.push(entry);
        }
        Ok(entries)
    }
}

impl FolderSource for LocalFileSystem {
    type Folder = PathBuf;
    type File = DirEntry;
    type FolderId = PathBuf;
    type Error = LocalFsError;

    fn folder_id(&self, folder: &PathBuf) -> Result<PathBuf, LocalFsError> {
        std::fs::canonicalize(folder).map_err(|source| LocalFsError::Resolve {
            path: folder.clone(),
            source,
        })
    }

    fn folder_path(&self, folder: &PathBuf) -> String {
        folder.display().to_string()
    }

    fn list_files(&self, folder: &PathBuf) -> Result<Vec<DirEntry>, LocalFsError> {
        Ok(self
            .entries(folder)?
            .into_iter()
            .filter(|e| e.file_type().is_file())
            .collect())
    }

    fn list_subfolders(&self, folder: &PathBuf) -> Result<Vec<PathBuf>, LocalFsError> {
        Ok(self
            .entries(folder)?
            .into_iter()
            .filter(|e| e.file_type().is_dir())
            .map(DirEntry::into_path)
            .collect())
    }

    fn modification_timestamp(&self, file: &DirEntry) -> Result<i64, LocalFsError> {
        let metadata = file.metadata()?;
        Ok(system_time_to_timestamp(metadata.modified()).unwrap_or(0))
    }

    fn file_size(&self, file: &DirEntry) -> Result<u64, LocalFsError> {
        Ok(file.metadata()?.len())
    }
}
