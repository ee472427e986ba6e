//! # VQA Harness
//!
//! Command-line access to visual-question-answering annotation datasets.
//!
//! The dataset model, the image-indexed store, and best-answer selection live
//! in the `vqa-core` crate. This crate adds configuration, logging, the
//! `vqa` commands, and JSON export.
//!
//! ## Quick Start
//!
//! ```bash
//! vqa --annotations val.json images               # list image ids
//! vqa --annotations val.json filter --answer-type other
//! vqa --annotations val.json best --image VizWiz_val_00000000.jpg
//! vqa --annotations val.json best --json > best.json
//! vqa --annotations val.json stats
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`dataset`] | Opening the configured annotation file |
//! | [`images`] | `vqa images` |
//! | [`filter`] | `vqa filter` |
//! | [`best`] | `vqa best` |
//! | [`stats`] | `vqa stats` |
//! | [`export`] | JSON output |

pub mod best;
pub mod config;
pub mod dataset;
pub mod export;
pub mod filter;
pub mod images;
pub mod stats;
