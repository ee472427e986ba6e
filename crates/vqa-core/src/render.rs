//! Plain-text rendering of annotations for inspection.

use std::io::{self, Write};

use crate::models::QaView;

/// Whether [`render_annotations`] wrote anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Empty,
    Rendered(usize),
}

/// Write each annotation's question, answers, and best answer (if derived).
///
/// ```text
/// Question: What color?
/// Answers:
///     answer: red, confidence: yes
/// Best answer:
///     red
/// ```
pub fn render_annotations<W, T>(out: &mut W, anns: &[T]) -> io::Result<RenderOutcome>
where
    W: Write + ?Sized,
    T: QaView,
{
    if anns.is_empty() {
        return Ok(RenderOutcome::Empty);
    }

    for view in anns {
        let ann = view.annotation();
        writeln!(out, "Question: {}", ann.question)?;
        writeln!(out, "Answers:")?;
        for a in &ann.answers {
            writeln!(
                out,
                "\tanswer: {}, confidence: {}",
                a.answer,
                a.answer_confidence.as_deref().unwrap_or("")
            )?;
        }
        if let Some(best) = view.best_answer() {
            writeln!(out, "Best answer:")?;
            writeln!(out, "\t{}", best)?;
        }
    }
    out.flush()?;

    Ok(RenderOutcome::Rendered(anns.len()))
}
