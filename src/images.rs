//! `vqa images`: list indexed image ids.

use anyhow::Result;
use std::io::Write;

use crate::config::Config;
use crate::dataset;

/// Print every indexed image id, sorted, one per line.
pub fn run_images(config: &Config, out: &mut impl Write) -> Result<()> {
    let store = dataset::open_store(config)?;

    let mut ids = store.image_ids();
    ids.sort();
    for id in &ids {
        writeln!(out, "{}", id)?;
    }

    if ids.is_empty() {
        eprintln!("(no annotations)");
    }
    Ok(())
}
