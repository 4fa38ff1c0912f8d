//! A folder tree held entirely in memory.
//!
//! Useful for tests and benchmarks, and for hosts that already have their
//! folder structure loaded. Folders live in an arena and may be linked into
//! any graph, cycles included.

use std::fmt;

use ahash::AHashSet;

use crate::FolderSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoryFolderId(usize);

impl fmt::Display for MemoryFolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    pub name: String,
    pub size: u64,
    pub modified: i64,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, size: u64, modified: i64) -> Self {
        Self {
            name: name.into(),
            size,
            modified,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("Folder {0} does not exist")]
    UnknownFolder(MemoryFolderId),

    #[error("Listing {path} failed")]
    ListingFailed { path: String },
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<MemoryFolderId>,
    files: Vec<MemoryFile>,
    children: Vec<MemoryFolderId>,
}

#[derive(Debug, Clone)]
pub struct MemoryTree {
    nodes: Vec<Node>,
    failing: AHashSet<MemoryFolderId>,
}

impl MemoryTree {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node {
                name: root_name.into(),
                parent: None,
                files: Vec::new(),
                children: Vec::new(),
            }],
            failing: AHashSet::new(),
        }
    }

    #[must_use]
    pub const fn root(&self) -> MemoryFolderId {
        MemoryFolderId(0)
    }

    /// Creates a new folder below `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::UnknownFolder`] if `parent` is not in this tree.
    pub fn add_folder(&mut self, parent: MemoryFolderId, name: impl Into<String>) -> Result<MemoryFolderId, MemoryError> {
        self.node(parent)?;
        let id = MemoryFolderId(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            parent: Some(parent),
            files: Vec::new(),
            children: Vec::new(),
        });
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`MemoryError::UnknownFolder`] if `folder` is not in this tree.
    pub fn add_file(&mut self, folder: MemoryFolderId, file: MemoryFile) -> Result<(), MemoryError> {
        self.node_mut(folder)?.files.push(file);
        Ok(())
    }

    /// Adds files with the given modification times and zero size.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::UnknownFolder`] if `folder` is not in this tree.
    pub fn add_files_modified_at(&mut self, folder: MemoryFolderId, timestamps: &[i64]) -> Result<(), MemoryError> {
        let node = self.node_mut(folder)?;
        for (idx, &modified) in timestamps.iter().enumerate() {
            node.files.push(MemoryFile::new(format!("file{idx}"), 0, modified));
        }
        Ok(())
    }

    /// Makes an existing folder appear as a subfolder of `parent` as well.
    ///
    /// This is how links, mounts and cycles are modelled.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::UnknownFolder`] if either folder is not in this tree.
    pub fn link_subfolder(&mut self, parent: MemoryFolderId, child: MemoryFolderId) -> Result<(), MemoryError> {
        self.node(child)?;
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Every later listing of `folder` fails with [`MemoryError::ListingFailed`].
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::UnknownFolder`] if `folder` is not in this tree.
    pub fn fail_listing(&mut self, folder: MemoryFolderId) -> Result<(), MemoryError> {
        self.node(folder)?;
        self.failing.insert(folder);
        Ok(())
    }

    fn node(&self, id: MemoryFolderId) -> Result<&Node, MemoryError> {
        self.nodes.get(id.0).ok_or(MemoryError::UnknownFolder(id))
    }

    fn node_mut(&mut self, id: MemoryFolderId) -> Result<&mut Node, MemoryError> {
        self.nodes.get_mut(id.0).ok_or(MemoryError::UnknownFolder(id))
    }

    fn listable(&self, id: MemoryFolderId) -> Result<&Node, MemoryError> {
        if self.failing.contains(&id) {
            return Err(MemoryError::ListingFailed {
                path: self.path_of(id),
            });
        }
        self.node(id)
    }

    fn path_of(&self, id: MemoryFolderId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        // Parent pointers form a tree even when links add cycles.
        while let Some(node) = current.and_then(|id| self.nodes.get(id.0)) {
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }
}

impl FolderSource for MemoryTree {
    type Folder = MemoryFolderId;
    type File = MemoryFile;
    type FolderId = MemoryFolderId;
    type Error = MemoryError;

    fn folder_id(&self, folder: &MemoryFolderId) -> Result<MemoryFolderId, MemoryError> {
        self.node(*folder).map(|_| *folder)
    }

    fn folder_path(&self, folder: &MemoryFolderId) -> String {
        self.path_of(*folder)
    }

    fn list_files(&self, folder: &MemoryFolderId) -> Result<Vec<MemoryFile>, MemoryError> {
        Ok(self.listable(*folder)?.files.clone())
    }

    fn list_subfolders(&self, folder: &MemoryFolderId) -> Result<Vec<MemoryFolderId>, MemoryError> {
        Ok(self.listable(*folder)?.children.clone())
    }

    fn modification_timestamp(&self, file: &MemoryFile) -> Result<i64, MemoryError> {
        Ok(file.modified)
    }

    fn file_size(&self, file: &MemoryFile) -> Result<u64, MemoryError> {
        Ok(file.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::Result;

    #[test]
    fn test_paths_follow_parent_chain() -> Result<()> {
        let mut tree = MemoryTree::new("root");
        let a = tree.add_folder(tree.root(), "a")?;
        let b = tree.add_folder(a, "b")?;

        assert_eq!(tree.folder_path(&tree.root()), "/root");
        assert_eq!(tree.folder_path(&b), "/root/a/b");
        Ok(())
    }

    #[test]
    fn test_listing_returns_direct_entries_only() -> Result<()> {
        let mut tree = MemoryTree::new("root");
        let a = tree.add_folder(tree.root(), "a")?;
        tree.add_files_modified_at(tree.root(), &[1, 2])?;
        tree.add_file(a, MemoryFile::new("deep.txt", 10, 3))?;

        assert_eq!(tree.list_files(&tree.root())?.len(), 2);
        assert_eq!(tree.list_subfolders(&tree.root())?, vec![a]);
        assert_eq!(tree.list_files(&a)?[0].name, "deep.txt");
        Ok(())
    }

    #[test]
    fn test_link_keeps_original_path() -> Result<()> {
        let mut tree = MemoryTree::new("root");
        let a = tree.add_folder(tree.root(), "a")?;
        tree.link_subfolder(a, tree.root())?;

        assert_eq!(tree.list_subfolders(&a)?, vec![tree.root()]);
        assert_eq!(tree.folder_path(&a), "/root/a");
        Ok(())
    }

    #[test]
    fn test_unknown_folder_is_rejected() -> Result<()> {
        let mut tree = MemoryTree::new("root");
        let mut other = MemoryTree::new("other");
        let foreign = other.add_folder(other.root(), "x")?;

        assert!(matches!(
            tree.add_file(foreign, MemoryFile::new("f", 0, 0)),
            Err(MemoryError::UnknownFolder(_))
        ));
        assert!(tree.list_files(&foreign).is_err());
        Ok(())
    }

    #[test]
    fn test_failing_folder() -> Result<()> {
        let mut tree = MemoryTree::new("root");
        let a = tree.add_folder(tree.root(), "a")?;
        tree.fail_listing(a)?;

        let err = tree.list_files(&a).err();
        assert!(matches!(err, Some(MemoryError::ListingFailed { ref path }) if path == "/root/a"));
        assert!(tree.list_subfolders(&tree.root()).is_ok());
        Ok(())
    }
}
