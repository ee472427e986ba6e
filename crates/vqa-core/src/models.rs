//! Annotation records as they appear in a VQA dataset file.
//!
//! Each element of the dataset array is one [`Annotation`]: an image, the
//! question asked about it, the answer type, and the answers collected from
//! annotators. Fields the harness does not interpret are kept in `extra` and
//! written back out unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Confidence marker value that counts an answer as confident.
pub const CONFIDENT: &str = "yes";

/// One annotator's answer to a question.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Answer {
    /// Answer text as entered by the annotator.
    pub answer: String,
    /// `"yes"` when the annotator was confident. Anything else, including a
    /// missing or `null` marker, is not confident.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_confidence: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Answer {
    pub fn new(answer: impl Into<String>, confidence: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            answer_confidence: Some(confidence.into()),
            extra: Map::new(),
        }
    }

    /// Exact, case-sensitive match against [`CONFIDENT`].
    pub fn is_confident(&self) -> bool {
        self.answer_confidence.as_deref() == Some(CONFIDENT)
    }
}

/// A question/image/answers record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Annotation {
    /// Image file name; the store indexes annotations by this value.
    pub image: String,
    pub question: String,
    /// Categorical label such as `"other"`, `"yes/no"`, `"number"`.
    pub answer_type: String,
    pub answers: Vec<Answer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Annotation {
    pub fn new(
        image: impl Into<String>,
        question: impl Into<String>,
        answer_type: impl Into<String>,
        answers: Vec<Answer>,
    ) -> Self {
        Self {
            image: image.into(),
            question: question.into(),
            answer_type: answer_type.into(),
            answers,
            extra: Map::new(),
        }
    }

    /// Answers whose confidence marker is exactly `"yes"`, in original order.
    pub fn confident_answers(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter().filter(|a| a.is_confident())
    }
}

/// An annotation reduced to its confident answers, with a derived best answer.
///
/// Serializes as the underlying annotation object with an extra `answer` key,
/// so downstream JSON consumers see the same shape plus one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestAnnotation {
    #[serde(flatten)]
    pub annotation: Annotation,
    /// The selected answer text; always one of `annotation.answers`.
    pub answer: String,
}

/// Anything that can be printed by [`crate::render::render_annotations`].
pub trait QaView {
    fn annotation(&self) -> &Annotation;

    /// Derived best answer, when one has been selected.
    fn best_answer(&self) -> Option<&str> {
        None
    }
}

impl QaView for Annotation {
    fn annotation(&self) -> &Annotation {
        self
    }
}

impl QaView for &Annotation {
    fn annotation(&self) -> &Annotation {
        self
    }
}

impl QaView for BestAnnotation {
    fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    fn best_answer(&self) -> Option<&str> {
        Some(&self.answer)
    }
}
