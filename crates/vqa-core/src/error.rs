use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or querying an [`AnnotationStore`](crate::store::AnnotationStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The dataset file is missing, unreadable, or not valid JSON.
    #[error("failed to parse annotation file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A requested image id is not in the index.
    #[error("image not found in annotations: {image}")]
    Lookup { image: String },

    /// A dataset element does not have the shape of an annotation.
    #[error("invalid annotation at index {index}: {reason}")]
    Schema { index: usize, reason: String },
}

impl StoreError {
    pub(crate) fn parse(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        StoreError::Parse {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
