use serde::{Deserialize, Serialize};

use crate::AggregationKind;

/// What to compute over a folder and whether to descend into subfolders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationRequest {
    pub kind: AggregationKind,
    pub recursive: bool,
}

impl AggregationRequest {
    /// Request using the kind's default recursion.
    #[must_use]
    pub const fn new(kind: AggregationKind) -> Self {
        Self {
            kind,
            recursive: kind.default_recursive(),
        }
    }

    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Applies an optional override, keeping the current flag when `None`.
    #[must_use]
    pub fn with_recursive(self, recursive: Option<bool>) -> Self {
        match recursive {
            Some(flag) => self.recursive(flag),
            None => self,
        }
    }
}
