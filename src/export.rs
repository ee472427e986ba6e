//! JSON output for filtered and best-answer views.
//!
//! Writes a pretty-printed JSON array in the same shape as the input
//! dataset, so the output of `vqa filter --json` can be fed back in as an
//! annotation file. Best-answer views add an `answer` key per element.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

pub fn write_json<T: Serialize>(out: &mut impl Write, items: &[T]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, items)?;
    writeln!(out)?;
    Ok(())
}
