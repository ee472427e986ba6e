//! `vqa filter`: select annotations by image id and answer type.

use anyhow::Result;
use std::io::Write;
use tracing::info;
use vqa_core::render::{render_annotations, RenderOutcome};
use vqa_core::store::Query;

use crate::config::Config;
use crate::{dataset, export};

/// Print the annotations matching `query`, as text or as a JSON array.
pub fn run_filter(config: &Config, query: &Query, json: bool, out: &mut impl Write) -> Result<()> {
    let store = dataset::open_store(config)?;
    let view = store.filter(query)?;
    info!(matched = view.len(), "filter complete");

    if json || config.output.is_json() {
        return export::write_json(out, &view);
    }

    if render_annotations(out, &view)? == RenderOutcome::Empty {
        eprintln!("(no annotations)");
    }
    Ok(())
}
