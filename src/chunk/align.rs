use crate::score::Score;

use super::Chunk;

/// How a hypothesis handled one reference chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkJudgement {
    /// The hypothesis produced the reference's text for this span.
    pub is_correct: bool,
    /// The hypothesis edited (part of) this span.
    pub attempted: bool,
}

impl ChunkJudgement {
    /// Add `reference.weight` to the matching cell of `score`.
    ///
    /// A wrong attempt at a span the reference edits counts both as a false
    /// positive and a false negative.
    pub fn apply(&self, reference: &Chunk, score: &mut Score) {
        let weight = reference.weight;
        match (self.attempted, self.is_correct) {
            (true, true) => score.tp += weight,
            (true, false) => {
                score.fp += weight;
                if reference.is_edited {
                    score.fn_ += weight;
                }
            }
            (false, true) => score.tn += weight,
            (false, false) => score.fn_ += weight,
        }
    }
}

/// Judge one reference chunk against the hypothesis chunk sequence.
///
/// The first hypothesis chunk with identical boundaries decides both flags.
/// Before that, a zero-width reference slot is provisionally correct, and any
/// edited hypothesis chunk overlapping a reference chunk with width marks it
/// as attempted.
pub fn annotate_chunk(reference: &Chunk, hypothesis: &[Chunk]) -> ChunkJudgement {
    let mut judgement = ChunkJudgement::default();
    for chunk in hypothesis {
        if reference.same_span(chunk) {
            judgement.is_correct = reference.correction == chunk.correction;
            judgement.attempted = chunk.is_edited;
            break;
        } else if reference.is_zero_width() {
            judgement.is_correct = true;
        } else if reference.overlaps(chunk) {
            judgement.attempted |= chunk.is_edited;
        }
    }
    judgement
}
