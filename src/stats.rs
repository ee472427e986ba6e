//! Dataset statistics overview.
//!
//! Gives a quick summary of a loaded annotation file: how many annotations
//! and images it holds, how answers are spread over answer types, and how
//! many annotations can produce a best answer at all.

use anyhow::Result;
use std::io::Write;
use vqa_core::stats::summarize;

use crate::config::Config;
use crate::dataset;

/// Run the stats command: load the dataset and print a summary.
pub fn run_stats(config: &Config, out: &mut impl Write) -> Result<()> {
    let path = config.dataset_path()?;
    let store = dataset::open_path(path)?;
    let summary = summarize(store.annotations());

    writeln!(out, "VQA Harness — Dataset Stats")?;
    writeln!(out, "===========================")?;
    writeln!(out)?;
    if dataset::is_stdin(path) {
        writeln!(out, "  Dataset:     <stdin>")?;
    } else {
        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        writeln!(out, "  Dataset:     {}", path.display())?;
        writeln!(out, "  Size:        {}", format_bytes(file_size))?;
    }
    writeln!(out)?;
    writeln!(out, "  Annotations: {}", summary.annotations)?;
    writeln!(out, "  Images:      {}", summary.distinct_images)?;
    writeln!(out, "  Answers:     {}", summary.answers)?;
    writeln!(
        out,
        "  Confident:   {} / {} ({}%)",
        summary.with_confident_answer,
        summary.annotations,
        percent(summary.with_confident_answer, summary.annotations)
    )?;

    if !summary.by_answer_type.is_empty() {
        writeln!(out)?;
        writeln!(out, "  By answer type:")?;
        writeln!(out, "  {:<24} {:>8} {:>6}", "ANSWER TYPE", "COUNT", "SHARE")?;
        writeln!(out, "  {}", "-".repeat(40))?;
        for (answer_type, count) in &summary.by_answer_type {
            writeln!(
                out,
                "  {:<24} {:>8} {:>5}%",
                answer_type,
                count,
                percent(*count, summary.annotations)
            )?;
        }
    }

    writeln!(out)?;
    Ok(())
}

fn percent(part: usize, whole: usize) -> usize {
    if whole > 0 {
        part * 100 / whole
    } else {
        0
    }
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
