//! # VQA Core
//!
//! In-memory access to visual-question-answering annotation datasets:
//! typed records, an image-indexed store, best-answer selection over
//! confident answers, and plain-text rendering.
//!
//! This crate has no CLI, configuration, or logging-subscriber concerns;
//! it only emits `tracing` events.
//!
//! ```no_run
//! use vqa_core::select::SelectionPolicy;
//! use vqa_core::store::{AnnotationStore, Query};
//!
//! # fn main() -> vqa_core::error::Result<()> {
//! let store = AnnotationStore::load("annotations/val.json")?;
//! let view = store.filter(&Query::new().answer_types(["other"]))?;
//! let best = store.best_answers(Some(view.as_slice()), &Query::new(), SelectionPolicy::LexicalMax)?;
//! vqa_core::render::render_annotations(&mut std::io::stdout(), &best).ok();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod render;
pub mod select;
pub mod stats;
pub mod store;
