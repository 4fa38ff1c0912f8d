//! The read-only view of a folder tree that the engine walks.
//!
//! Storage backends implement [`FolderSource`]; the engine never touches a
//! folder or file except through these calls, so a fake tree in memory and a
//! real filesystem are interchangeable.

use std::fmt;
use std::hash::Hash;

/// Lists files and subfolders of a folder and exposes per-file metadata.
///
/// Implementations must tolerate concurrent reads if the same source is
/// shared between threads. Listings may come back in any order; every
/// aggregation is order-independent.
pub trait FolderSource {
    type Folder;
    type File;
    /// Stable identity of a folder, used to recognise a folder that is
    /// reached again while it is still being walked.
    type FolderId: Eq + Hash + Clone + fmt::Debug;
    type Error: std::error::Error + 'static;

    /// # Errors
    ///
    /// Returns an error if the backend cannot resolve the folder's identity.
    fn folder_id(&self, folder: &Self::Folder) -> Result<Self::FolderId, Self::Error>;

    /// Human-readable location of `folder`, used in logs and error messages.
    fn folder_path(&self, folder: &Self::Folder) -> String;

    /// Files directly inside `folder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be listed.
    fn list_files(&self, folder: &Self::Folder) -> Result<Vec<Self::File>, Self::Error>;

    /// Folders directly inside `folder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be listed.
    fn list_subfolders(&self, folder: &Self::Folder) -> Result<Vec<Self::Folder>, Self::Error>;

    /// Modification time of `file` in unix seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the file's metadata cannot be read.
    fn modification_timestamp(&self, file: &Self::File) -> Result<i64, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the file's metadata cannot be read.
    fn file_size(&self, file: &Self::File) -> Result<u64, Self::Error>;
}
