//! Dataset summary counts.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::models::Annotation;

/// Aggregate counts over a set of annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub annotations: usize,
    pub distinct_images: usize,
    pub answers: usize,
    /// Annotations with at least one `"yes"` answer, i.e. those a best answer
    /// can be derived for.
    pub with_confident_answer: usize,
    /// Annotation count per answer type, ordered by type name.
    pub by_answer_type: BTreeMap<String, usize>,
}

pub fn summarize<'a, I>(anns: I) -> DatasetSummary
where
    I: IntoIterator<Item = &'a Annotation>,
{
    let mut summary = DatasetSummary::default();
    let mut images = HashSet::new();

    for ann in anns {
        summary.annotations += 1;
        summary.answers += ann.answers.len();
        if ann.confident_answers().next().is_some() {
            summary.with_confident_answer += 1;
        }
        *summary
            .by_answer_type
            .entry(ann.answer_type.clone())
            .or_insert(0) += 1;
        images.insert(ann.image.as_str());
    }
    summary.distinct_images = images.len();

    summary
}
