//! Folder aggregation: walk a folder tree through a [`FolderSource`] and fold
//! an [`AggregationFunction`] over the files found.

mod engine;
mod error;
pub mod function;
pub mod helpers;
mod local;
pub mod memory;
mod source;

pub use engine::{Aggregator, TraversalLimits};
pub use error::AggregationError;
pub use function::AggregationFunction;
pub use local::{LocalFileSystem, LocalFsError};
pub use source::FolderSource;
