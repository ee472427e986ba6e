//! Best-answer selection over confident answers.
//!
//! # Selection
//!
//! 1. Drop every answer whose confidence marker is not exactly `"yes"`.
//! 2. Drop the annotation if no answers remain.
//! 3. Pick one of the remaining answer texts according to [`SelectionPolicy`].
//!
//! The default policy, [`SelectionPolicy::LexicalMax`], takes the
//! lexicographically greatest text. This is *not* a vote: `["cat", "cat",
//! "dog"]` selects `"dog"`. Majority voting is available as
//! [`SelectionPolicy::Majority`].

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::{Annotation, Answer, BestAnnotation};

/// How to pick one answer text among an annotation's confident answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Greatest answer text by byte-wise string ordering.
    #[default]
    LexicalMax,
    /// Most frequent answer text; ties go to the lexically greatest.
    Majority,
}

impl SelectionPolicy {
    fn pick<'a>(self, answers: &[&'a Answer]) -> Option<&'a str> {
        let texts = answers.iter().copied().map(|a| a.answer.as_str());
        match self {
            SelectionPolicy::LexicalMax => texts.max(),
            SelectionPolicy::Majority => {
                let mut counts: HashMap<&str, usize> = HashMap::new();
                for text in texts {
                    *counts.entry(text).or_insert(0) += 1;
                }
                counts
                    .into_iter()
                    .max_by(|(a, na), (b, nb)| na.cmp(nb).then_with(|| a.cmp(b)))
                    .map(|(text, _)| text)
            }
        }
    }
}

/// Derive the best-answer copy of a single annotation.
///
/// Returns `None` when the annotation has no confident answers.
pub fn select_best(ann: &Annotation, policy: SelectionPolicy) -> Option<BestAnnotation> {
    let confident: Vec<&Answer> = ann.confident_answers().collect();
    let answer = policy.pick(&confident)?.to_string();

    let mut annotation = Annotation {
        answers: confident.into_iter().cloned().collect(),
        ..ann.clone()
    };
    // The derived field is serialized alongside the annotation's own keys.
    annotation.extra.remove("answer");

    Some(BestAnnotation { annotation, answer })
}

/// Apply [`select_best`] across a view, keeping order and skipping
/// annotations without confident answers.
pub fn best_answers<'a, I>(anns: I, policy: SelectionPolicy) -> Vec<BestAnnotation>
where
    I: IntoIterator<Item = &'a Annotation>,
{
    anns.into_iter()
        .filter_map(|ann| select_best(ann, policy))
        .collect()
}
