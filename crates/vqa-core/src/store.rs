//! In-memory annotation store.
//!
//! [`AnnotationStore`] owns every annotation in file order plus an index from
//! image id to position. Queries never mutate the store: [`filter`] returns a
//! borrowed view, and [`best_answers`] takes that view back explicitly instead
//! of reading a cached "last filter" from the store.
//!
//! [`filter`]: AnnotationStore::filter
//! [`best_answers`]: AnnotationStore::best_answers

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::models::{Annotation, BestAnnotation};
use crate::select::{self, SelectionPolicy};

/// Filter criteria for [`AnnotationStore::filter`]. Empty lists mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Restrict to these image ids, returned in this order.
    pub images: Vec<String>,
    /// Restrict to annotations whose `answer_type` is one of these.
    pub answer_types: Vec<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn answer_types<I, S>(mut self, answer_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answer_types = answer_types.into_iter().map(Into::into).collect();
        self
    }
}

/// A VQA dataset loaded into memory.
///
/// Not synchronized internally, but holds no interior mutability either, so a
/// shared `&AnnotationStore` can be queried from anywhere.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    /// image id -> index into `annotations`. Last occurrence wins.
    by_image: HashMap<String, usize>,
}

impl AnnotationStore {
    /// An empty store, for deferred loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dataset file.
    ///
    /// Fails with [`StoreError::Parse`] if the file cannot be read or is not
    /// JSON, and with [`StoreError::Schema`] if any element is not a valid
    /// annotation. Nothing is kept on failure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading dataset into memory");
        let started = Instant::now();

        let file = File::open(path).map_err(|e| StoreError::parse(path, e))?;
        let store = Self::read_from(BufReader::new(file), path)?;

        info!(
            annotations = store.len(),
            images = store.by_image.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dataset loaded"
        );
        Ok(store)
    }

    /// Parse a dataset from any reader. `source` only labels parse errors.
    pub fn from_reader<R: Read>(reader: R, source: impl AsRef<Path>) -> Result<Self> {
        Self::read_from(reader, source.as_ref())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| StoreError::parse("<memory>", e))?;
        Self::from_value(value)
    }

    /// Build a store from already-typed annotations.
    pub fn from_annotations(annotations: Vec<Annotation>) -> Self {
        let mut by_image = HashMap::with_capacity(annotations.len());
        for (i, ann) in annotations.iter().enumerate() {
            if let Some(prev) = by_image.insert(ann.image.clone(), i) {
                warn!(
                    image = %ann.image,
                    first = prev,
                    replaced_by = i,
                    "duplicate image id, keeping the later annotation"
                );
            }
        }
        Self {
            annotations,
            by_image,
        }
    }

    fn read_from<R: Read>(reader: R, path: &Path) -> Result<Self> {
        let value: Value =
            serde_json::from_reader(reader).map_err(|e| StoreError::parse(PathBuf::from(path), e))?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self> {
        let elements = match value {
            Value::Array(elements) => elements,
            other => {
                return Err(StoreError::Schema {
                    index: 0,
                    reason: format!("expected a JSON array of annotations, found {}", kind(&other)),
                })
            }
        };

        let mut annotations = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            annotations.push(parse_annotation(index, element)?);
        }
        Ok(Self::from_annotations(annotations))
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Every annotation, in file order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The annotation indexed under `image`, if any.
    pub fn get(&self, image: &str) -> Option<&Annotation> {
        self.by_image.get(image).map(|&i| &self.annotations[i])
    }

    /// All indexed image ids. Order is unspecified.
    pub fn image_ids(&self) -> Vec<String> {
        self.by_image.keys().cloned().collect()
    }

    /// Select annotations matching `query`.
    ///
    /// With `query.images` set, returns exactly one annotation per requested
    /// id in request order, failing with [`StoreError::Lookup`] on the first
    /// unknown id. Otherwise starts from the full dataset in file order. The
    /// answer type restriction is applied afterwards and preserves order.
    pub fn filter(&self, query: &Query) -> Result<Vec<&Annotation>> {
        let mut view: Vec<&Annotation> = if query.images.is_empty() {
            self.annotations.iter().collect()
        } else {
            query
                .images
                .iter()
                .map(|image| {
                    self.get(image).ok_or_else(|| StoreError::Lookup {
                        image: image.clone(),
                    })
                })
                .collect::<Result<_>>()?
        };

        if !query.answer_types.is_empty() {
            view.retain(|ann| query.answer_types.contains(&ann.answer_type));
        }

        debug!(
            images = query.images.len(),
            answer_types = query.answer_types.len(),
            matched = view.len(),
            "filtered annotations"
        );
        Ok(view)
    }

    /// Reduce a view to annotations with confident answers and pick a best
    /// answer for each.
    ///
    /// `previous` is a view returned by an earlier [`filter`](Self::filter)
    /// call and takes precedence over `query`. When `None`, `filter(query)`
    /// is evaluated first.
    pub fn best_answers(
        &self,
        previous: Option<&[&Annotation]>,
        query: &Query,
        policy: SelectionPolicy,
    ) -> Result<Vec<BestAnnotation>> {
        let best = match previous {
            Some(view) => select::best_answers(view.iter().copied(), policy),
            None => {
                let view = self.filter(query)?;
                select::best_answers(view, policy)
            }
        };
        debug!(selected = best.len(), ?policy, "derived best answers");
        Ok(best)
    }
}

fn parse_annotation(index: usize, element: Value) -> Result<Annotation> {
    let obj = element.as_object().ok_or_else(|| StoreError::Schema {
        index,
        reason: format!("expected an object, found {}", kind(&element)),
    })?;
    match obj.get("image") {
        Some(Value::String(_)) => {}
        Some(other) => {
            return Err(StoreError::Schema {
                index,
                reason: format!("field `image` must be a string, found {}", kind(other)),
            })
        }
        None => {
            return Err(StoreError::Schema {
                index,
                reason: "missing required field `image`".to_string(),
            })
        }
    }

    serde_json::from_value(element).map_err(|e| StoreError::Schema {
        index,
        reason: e.to_string(),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"[
        {"image": "a.jpg", "question": "What color?", "answer_type": "other",
         "answers": [{"answer": "red", "answer_confidence": "yes"},
                     {"answer": "blue", "answer_confidence": "no"}]},
        {"image": "b.jpg", "question": "Is it on?", "answer_type": "yes/no",
         "answers": [{"answer": "no", "answer_confidence": "maybe"}]},
        {"image": "c.jpg", "question": "What brand?", "answer_type": "other",
         "answers": [{"answer": "acme", "answer_confidence": "yes"},
                     {"answer": "zenith", "answer_confidence": "yes"}]},
        {"image": "d.jpg", "question": "How many?", "answer_type": "number",
         "answers": [{"answer": "3", "answer_confidence": "yes"}]}
    ]"#;

    fn store() -> AnnotationStore {
        AnnotationStore::from_json_str(DATASET).unwrap()
    }

    fn images(view: &[&Annotation]) -> Vec<String> {
        view.iter().map(|a| a.image.clone()).collect()
    }

    #[test]
    fn test_empty_store() {
        let store = AnnotationStore::new();
        assert!(store.is_empty());
        assert!(store.image_ids().is_empty());
        assert!(store.filter(&Query::new()).unwrap().is_empty());
    }

    #[test]
    fn test_image_ids_match_distinct_images() {
        let mut ids = store().image_ids();
        ids.sort();
        assert_eq!(ids, vec!["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);
    }

    #[test]
    fn test_filter_all_preserves_file_order() {
        let store = store();
        let view = store.filter(&Query::new()).unwrap();
        assert_eq!(view.len(), store.len());
        assert_eq!(images(&view), vec!["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);
    }

    #[test]
    fn test_filter_images_in_request_order() {
        let store = store();
        let view = store
            .filter(&Query::new().images(["d.jpg", "a.jpg"]))
            .unwrap();
        assert_eq!(images(&view), vec!["d.jpg", "a.jpg"]);
    }

    #[test]
    fn test_filter_unknown_image_is_lookup_error() {
        let err = store()
            .filter(&Query::new().images(["a.jpg", "missing.jpg"]))
            .unwrap_err();
        match err {
            StoreError::Lookup { image } => assert_eq!(image, "missing.jpg"),
            other => panic!("expected Lookup, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_answer_type() {
        let store = store();
        let view = store.filter(&Query::new().answer_types(["other"])).unwrap();
        assert_eq!(images(&view), vec!["a.jpg", "c.jpg"]);
        assert!(view.iter().all(|a| a.answer_type == "other"));
    }

    #[test]
    fn test_filter_images_and_answer_type() {
        let store = store();
        let view = store
            .filter(
                &Query::new()
                    .images(["d.jpg", "c.jpg", "b.jpg"])
                    .answer_types(["other", "number"]),
            )
            .unwrap();
        assert_eq!(images(&view), vec!["d.jpg", "c.jpg"]);
    }

    #[test]
    fn test_duplicate_image_last_write_wins() {
        let store = AnnotationStore::from_json_str(
            r#"[
                {"image": "x.jpg", "question": "first", "answer_type": "other", "answers": []},
                {"image": "x.jpg", "question": "second", "answer_type": "other", "answers": []}
            ]"#,
        )
        .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.image_ids(), vec!["x.jpg"]);
        assert_eq!(store.get("x.jpg").unwrap().question, "second");
    }

    #[test]
    fn test_missing_image_is_schema_error() {
        let err = AnnotationStore::from_json_str(
            r#"[
                {"image": "ok.jpg", "question": "q", "answer_type": "other", "answers": []},
                {"question": "q", "answer_type": "other", "answers": []}
            ]"#,
        )
        .unwrap_err();
        match err {
            StoreError::Schema { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("image"), "reason: {reason}");
            }
            other => panic!("expected Schema, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_question_is_schema_error() {
        let err = AnnotationStore::from_json_str(
            r#"[{"image": "a.jpg", "answer_type": "other", "answers": []}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::Schema { index: 0, .. }));
        assert!(err.to_string().contains("question"));
    }

    #[test]
    fn test_non_array_is_schema_error() {
        let err = AnnotationStore::from_json_str(r#"{"image": "a.jpg"}"#).unwrap_err();
        assert!(matches!(err, StoreError::Schema { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = AnnotationStore::from_json_str("[{\"image\": ").unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_best_answers_uses_previous_view() {
        let store = store();
        let view = store.filter(&Query::new().images(["c.jpg"])).unwrap();
        // The query is ignored when a previous view is supplied.
        let best = store
            .best_answers(
                Some(view.as_slice()),
                &Query::new().images(["a.jpg"]),
                SelectionPolicy::LexicalMax,
            )
            .unwrap();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].annotation.image, "c.jpg");
        assert_eq!(best[0].answer, "zenith");
    }

    #[test]
    fn test_best_answers_falls_back_to_filter() {
        let store = store();
        let best = store
            .best_answers(
                None,
                &Query::new().answer_types(["other"]),
                SelectionPolicy::LexicalMax,
            )
            .unwrap();
        let imgs: Vec<_> = best.iter().map(|b| b.annotation.image.as_str()).collect();
        assert_eq!(imgs, vec!["a.jpg", "c.jpg"]);
    }

    #[test]
    fn test_best_answers_fallback_propagates_lookup_error() {
        let err = store()
            .best_answers(
                None,
                &Query::new().images(["nope.jpg"]),
                SelectionPolicy::LexicalMax,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Lookup { .. }));
    }

    #[test]
    fn test_best_answers_leaves_store_untouched() {
        let store = store();
        let before = store.annotations().to_vec();
        let _ = store
            .best_answers(None, &Query::new(), SelectionPolicy::LexicalMax)
            .unwrap();
        assert_eq!(store.annotations(), before.as_slice());
    }
}
