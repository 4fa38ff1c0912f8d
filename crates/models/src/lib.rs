mod folder_stats;
mod kind;
mod request;
mod result;

pub use folder_stats::FolderStats;
pub use kind::AggregationKind;
pub use request::AggregationRequest;
pub use result::AggregationResult;
