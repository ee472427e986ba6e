//! Opening the configured annotation file.

use anyhow::{Context, Result};
use std::path::Path;
use vqa_core::store::AnnotationStore;

use crate::config::Config;

/// Load the store named by `[dataset].path` (or `--annotations`).
///
/// A path of `-` reads the dataset from stdin.
pub fn open_store(config: &Config) -> Result<AnnotationStore> {
    let path = config.dataset_path()?;
    open_path(path)
}

/// Whether `path` is the `-` placeholder for stdin.
pub fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn open_path(path: &Path) -> Result<AnnotationStore> {
    if is_stdin(path) {
        let stdin = std::io::stdin();
        return AnnotationStore::from_reader(stdin.lock(), "<stdin>")
            .context("Failed to load annotations from stdin");
    }

    AnnotationStore::load(path)
        .with_context(|| format!("Failed to load annotations: {}", path.display()))
}
