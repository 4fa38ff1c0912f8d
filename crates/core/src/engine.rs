use ahash::AHashSet;
use folderstat_config::{DEFAULT_MAX_DEPTH, Settings};
use folderstat_models::{AggregationKind, AggregationRequest, AggregationResult};
use tracing::{debug, trace, warn};

use crate::function::{AggregationFunction, Count, LatestModified, Stats, TotalSize};
use crate::{AggregationError, FolderSource};

/// Guards applied while descending into subfolders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalLimits {
    /// Deepest level the walk may enter, the starting folder being level 0.
    pub max_depth: Option<usize>,
    /// Fail when a folder shows up again below itself.
    pub detect_cycles: bool,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            detect_cycles: true,
        }
    }
}

impl TraversalLimits {
    /// No guards at all. A cyclic source then never terminates.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_depth: None,
            detect_cycles: false,
        }
    }
}

impl From<&Settings> for TraversalLimits {
    fn from(settings: &Settings) -> Self {
        Self {
            max_depth: settings.depth_limit(),
            detect_cycles: settings.detect_cycles,
        }
    }
}

/// Walks a folder tree depth-first and folds an [`AggregationFunction`] over
/// its files.
///
/// The aggregator holds no per-call state and can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    limits: TraversalLimits,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_limits(limits: TraversalLimits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_limits(TraversalLimits::from(settings))
    }

    #[must_use]
    pub const fn limits(&self) -> TraversalLimits {
        self.limits
    }

    /// Aggregates `function` over the files of `folder`, and of every folder
    /// below it when `recursive` is set.
    ///
    /// # Errors
    ///
    /// - [`AggregationError::Collaborator`] if the source fails to list a
    ///   folder or read a file
    /// - [`AggregationError::CycleDetected`] if a folder is its own descendant
    ///   and cycle detection is on
    /// - [`AggregationError::MaxDepthExceeded`] if the tree is deeper than the
    ///   configured limit
    pub fn aggregate<S, F>(
        &self,
        source: &S,
        folder: &S::Folder,
        recursive: bool,
        function: &F,
    ) -> Result<F::Output, AggregationError<S::Error>>
    where
        S: FolderSource + ?Sized,
        F: AggregationFunction<S>,
    {
        debug!(
            "Aggregating {} over {} (recursive: {})",
            function.name(),
            source.folder_path(folder),
            recursive
        );

        let mut walk = Walk {
            source,
            function,
            recursive,
            limits: self.limits,
            ancestors: AHashSet::new(),
        };
        let result = walk.visit(folder, 0)?;

        debug!("Aggregation {} finished: {:?}", function.name(), result);
        Ok(result)
    }

    /// Same as [`Aggregator::aggregate`] for callers whose folder may be missing.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::InvalidArgument`] when `folder` is `None`,
    /// otherwise whatever [`Aggregator::aggregate`] returns.
    pub fn aggregate_optional<S, F>(
        &self,
        source: &S,
        folder: Option<&S::Folder>,
        recursive: bool,
        function: &F,
    ) -> Result<F::Output, AggregationError<S::Error>>
    where
        S: FolderSource + ?Sized,
        F: AggregationFunction<S>,
    {
        let Some(folder) = folder else {
            warn!("Aggregation {} requested without a folder", function.name());
            return Err(AggregationError::missing_folder());
        };
        self.aggregate(source, folder, recursive, function)
    }

    /// Runs the built-in aggregation selected by `request`.
    ///
    /// # Errors
    ///
    /// See [`Aggregator::aggregate_optional`].
    pub fn run<S>(
        &self,
        source: &S,
        folder: Option<&S::Folder>,
        request: &AggregationRequest,
    ) -> Result<AggregationResult, AggregationError<S::Error>>
    where
        S: FolderSource + ?Sized,
    {
        let recursive = request.recursive;
        match request.kind {
            AggregationKind::Count => self
                .aggregate_optional(source, folder, recursive, &Count)
                .map(AggregationResult::Count),
            AggregationKind::LatestModified => self
                .aggregate_optional(source, folder, recursive, &LatestModified)
                .map(AggregationResult::LatestModified),
            AggregationKind::TotalSize => self
                .aggregate_optional(source, folder, recursive, &TotalSize)
                .map(AggregationResult::TotalSize),
            AggregationKind::Stats => self
                .aggregate_optional(source, folder, recursive, &Stats)
                .map(AggregationResult::Stats),
        }
    }
}

struct Walk<'a, S, F>
where
    S: FolderSource + ?Sized,
{
    source: &'a S,
    function: &'a F,
    recursive: bool,
    limits: TraversalLimits,
    /// Folders on the current descent path.
    ancestors: AHashSet<S::FolderId>,
}

impl<S, F> Walk<'_, S, F>
where
    S: FolderSource + ?Sized,
    F: AggregationFunction<S>,
{
    fn visit(&mut self, folder: &S::Folder, depth: usize) -> Result<F::Output, AggregationError<S::Error>> {
        trace!("Visiting {} at depth {}", self.source.folder_path(folder), depth);

        if !self.limits.detect_cycles {
            return self.fold_folder(folder, depth);
        }

        let id = self.source.folder_id(folder)?;
        if !self.ancestors.insert(id.clone()) {
            let folder = self.source.folder_path(folder);
            warn!("Cycle detected at {}", folder);
            return Err(AggregationError::CycleDetected { folder });
        }
        let result = self.fold_folder(folder, depth);
        self.ancestors.remove(&id);
        result
    }

    fn fold_folder(&mut self, folder: &S::Folder, depth: usize) -> Result<F::Output, AggregationError<S::Error>> {
        let mut total = self.local_value(folder)?;
        if !self.recursive {
            return Ok(total);
        }

        let subfolders = self.source.list_subfolders(folder)?;
        if let Some(limit) = self.limits.max_depth {
            if !subfolders.is_empty() && depth >= limit {
                let folder = self.source.folder_path(folder);
                warn!("Maximum depth {} exceeded below {}", limit, folder);
                return Err(AggregationError::MaxDepthExceeded { limit, folder });
            }
        }

        for subfolder in &subfolders {
            let mut child = self.visit(subfolder, depth + 1)?;
            if let Some(extra) = self.function.folder_value() {
                child = self.function.combine(child, extra);
            }
            total = self.function.combine(total, child);
        }

        Ok(total)
    }

    /// Folds the files directly in `folder`; a folder without files yields
    /// the function's empty value.
    fn local_value(&self, folder: &S::Folder) -> Result<F::Output, AggregationError<S::Error>> {
        let mut local = None;
        for file in &self.source.list_files(folder)? {
            let value = self.function.file_value(self.source, file)?;
            local = Some(match local {
                Some(acc) => self.function.combine(acc, value),
                None => value,
            });
        }
        Ok(local.unwrap_or_else(|| self.function.empty()))
    }
}
