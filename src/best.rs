//! `vqa best`: derive the best answer per annotation.

use anyhow::Result;
use std::io::Write;
use tracing::info;
use vqa_core::render::{render_annotations, RenderOutcome};
use vqa_core::store::Query;

use crate::config::Config;
use crate::{dataset, export};

/// Filter by `query`, keep confident answers, and print the best answer of
/// each remaining annotation.
pub fn run_best(config: &Config, query: &Query, json: bool, out: &mut impl Write) -> Result<()> {
    let store = dataset::open_store(config)?;
    let best = store.best_answers(None, query, config.best_answer.policy)?;
    info!(
        selected = best.len(),
        policy = ?config.best_answer.policy,
        "best answers derived"
    );

    if json || config.output.is_json() {
        return export::write_json(out, &best);
    }

    if render_annotations(out, &best)? == RenderOutcome::Empty {
        eprintln!("(no annotations)");
    }
    Ok(())
}
