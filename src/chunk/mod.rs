//! Chunk sequences for boundary-aware comparison of two edit lists.
//!
//! A sentence is cut into chunks: one per edit, one per untouched token, and
//! one zero-width slot at every gap between chunks where an insertion could
//! go. Two edit lists over the same source then produce chunk sequences whose
//! boundaries can be compared directly.
//!
//! ```text
//!  tokens:  This  sentences  contain  gramamtical  error  .
//!  chunks: |∅|This|∅|sentences→sentence|∅|contain→contains|a|...
//! ```
//!
//! A slot is skipped when a zero-width chunk (an insertion edit) already
//! occupies that gap.

mod align;
mod display;

pub use align::{annotate_chunk, ChunkJudgement};
pub use display::ChunkDisplay;

use serde::{Deserialize, Serialize};

use crate::edit::Edit;

/// Error type carried by chunks that do not come from an edit.
pub const UNEDITED_TYPE: &str = "DUMMY:DUMMY";

/// One aligned unit of a sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// First source token covered.
    pub start: usize,
    /// One past the last source token covered; equal to `start` for slots
    /// and insertions.
    pub end: usize,
    /// Replacement text for edits, the token itself for untouched tokens,
    /// empty for slots.
    pub correction: String,
    pub error_type: String,
    pub weight: f64,
    pub is_edited: bool,
}

impl Chunk {
    pub fn from_edit(edit: &Edit) -> Self {
        Self {
            start: edit.start,
            end: edit.end,
            correction: edit.correction.clone(),
            error_type: edit.error_type.clone(),
            weight: 1.0,
            is_edited: true,
        }
    }

    /// An untouched source token.
    pub fn token(index: usize, text: &str) -> Self {
        Self {
            start: index,
            end: index + 1,
            correction: text.to_string(),
            error_type: UNEDITED_TYPE.to_string(),
            weight: 1.0,
            is_edited: false,
        }
    }

    /// An empty insertion slot before token `position`.
    pub fn slot(position: usize) -> Self {
        Self {
            start: position,
            end: position,
            correction: String::new(),
            error_type: UNEDITED_TYPE.to_string(),
            weight: 1.0,
            is_edited: false,
        }
    }

    pub fn is_zero_width(&self) -> bool {
        self.start == self.end
    }

    /// Same `start..end` boundaries.
    pub fn same_span(&self, other: &Chunk) -> bool {
        self.start == other.start && self.end == other.end
    }

    /// Either chunk starts strictly inside the other's span.
    pub fn overlaps(&self, other: &Chunk) -> bool {
        (self.start <= other.start && other.start < self.end)
            || (other.start <= self.start && self.start < other.end)
    }
}

/// Build the chunk sequence of a sentence from its edits.
///
/// `edits` must be ordered by source position, as annotators return them.
pub fn generate_chunks<S: AsRef<str>>(edits: &[Edit], tokens: &[S]) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(tokens.len() + 1);
    let mut pending = edits.iter().peekable();
    let mut position = 0;

    while position < tokens.len() {
        match pending.next_if(|edit| edit.start == position) {
            Some(edit) => {
                chunks.push(Chunk::from_edit(edit));
                // An insertion consumes no token, so the token at `position`
                // is visited again.
                position = edit.end;
            }
            None => {
                chunks.push(Chunk::token(position, tokens[position].as_ref()));
                position += 1;
            }
        }
    }

    // The walk never reaches an insertion after the last token. Only the
    // final edit is taken; earlier insertions at the same position are
    // dropped.
    if let Some(last) = edits.last() {
        if last.start == tokens.len() && last.is_insertion() {
            chunks.push(Chunk::from_edit(last));
        }
    }

    insert_slots(chunks)
}

/// Put a zero-width slot in front of every chunk with width, unless a
/// zero-width chunk already precedes it, and one after the last chunk.
fn insert_slots(chunks: Vec<Chunk>) -> Vec<Chunk> {
    let mut slotted = Vec::with_capacity(chunks.len() * 2 + 1);
    let mut previous_zero_width = false;

    for chunk in chunks {
        if chunk.is_zero_width() {
            previous_zero_width = true;
            slotted.push(chunk);
            continue;
        }
        if !previous_zero_width {
            slotted.push(Chunk::slot(chunk.start));
        }
        slotted.push(chunk);
        previous_zero_width = false;
    }

    if !previous_zero_width {
        let end = slotted.last().map_or(0, |chunk: &Chunk| chunk.end);
        slotted.push(Chunk::slot(end));
    }
    slotted
}

/// Split a sentence into the tokens edit spans refer to.
pub fn tokenize(sentence: &str) -> Vec<&str> {
    sentence.split(' ').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(chunks: &[Chunk]) -> Vec<(usize, usize, bool)> {
        chunks.iter().map(|c| (c.start, c.end, c.is_edited)).collect()
    }

    #[test]
    fn test_no_edits_alternates_slots_and_tokens() {
        let tokens = tokenize("This is a test .");
        let chunks = generate_chunks(&[], &tokens);

        assert_eq!(chunks.len(), 2 * tokens.len() + 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert!(!chunk.is_edited);
            if i % 2 == 0 {
                assert!(chunk.is_zero_width(), "chunk {} should be a slot", i);
                assert_eq!(chunk.start, i / 2);
                assert_eq!(chunk.correction, "");
            } else {
                assert_eq!((chunk.start, chunk.end), (i / 2, i / 2 + 1));
                assert_eq!(chunk.correction, tokens[i / 2]);
            }
            assert_eq!(chunk.error_type, UNEDITED_TYPE);
        }
    }

    #[test]
    fn test_empty_token_sequence() {
        let tokens: Vec<&str> = Vec::new();
        let chunks = generate_chunks(&[], &tokens);
        assert_eq!(chunks, vec![Chunk::slot(0)]);
    }

    #[test]
    fn test_end_of_sentence_insertion() {
        let tokens = tokenize("This is a");
        let edits = vec![Edit::new(3, 3, "sentence", "M:NOUN")];
        let chunks = generate_chunks(&edits, &tokens);

        assert_eq!(
            spans(&chunks),
            vec![
                (0, 0, false),
                (0, 1, false),
                (1, 1, false),
                (1, 2, false),
                (2, 2, false),
                (2, 3, false),
                (3, 3, true),
            ]
        );
        let last = chunks.last().unwrap();
        assert_eq!(last.correction, "sentence");
        assert_eq!(last.error_type, "M:NOUN");
    }

    #[test]
    fn test_only_final_end_insertion_is_kept() {
        let tokens = tokenize("This is a");
        let edits = vec![
            Edit::new(3, 3, "sentence", "M:NOUN"),
            Edit::new(3, 3, ".", "M:PUNCT"),
        ];
        let chunks = generate_chunks(&edits, &tokens);

        assert_eq!(chunks.len(), 7);
        assert_eq!(
            spans(&chunks[4..]),
            vec![(2, 2, false), (2, 3, false), (3, 3, true)]
        );
        let last = chunks.last().unwrap();
        assert_eq!(last.correction, ".");
        assert_eq!(last.error_type, "M:PUNCT");
        assert!(chunks.iter().all(|c| c.correction != "sentence"));
    }

    #[test]
    fn test_multi_token_edit_is_one_chunk() {
        let tokens = tokenize("He go to to school");
        let edits = vec![
            Edit::new(1, 2, "goes", "R:VERB:SVA"),
            Edit::new(2, 4, "to", "U:PREP"),
        ];
        let chunks = generate_chunks(&edits, &tokens);

        assert_eq!(
            spans(&chunks),
            vec![
                (0, 0, false),
                (0, 1, false),
                (1, 1, false),
                (1, 2, true),
                (2, 2, false),
                (2, 4, true),
                (4, 4, false),
                (4, 5, false),
                (5, 5, false),
            ]
        );
    }

    #[test]
    fn test_insertion_replaces_slot() {
        let tokens = tokenize("I have cat");
        let edits = vec![Edit::new(2, 2, "a", "M:DET")];
        let chunks = generate_chunks(&edits, &tokens);

        assert_eq!(
            spans(&chunks),
            vec![
                (0, 0, false),
                (0, 1, false),
                (1, 1, false),
                (1, 2, false),
                (2, 2, true),
                (2, 3, false),
                (3, 3, false),
            ]
        );
        // exactly one zero-width chunk per gap
        let zero_width: Vec<_> = chunks.iter().filter(|c| c.is_zero_width()).map(|c| c.start).collect();
        assert_eq!(zero_width, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_insertion_at_start() {
        let tokens = tokenize("cat sat");
        let edits = vec![Edit::new(0, 0, "The", "M:DET")];
        let chunks = generate_chunks(&edits, &tokens);
        assert_eq!(
            spans(&chunks),
            vec![(0, 0, true), (0, 1, false), (1, 1, false), (1, 2, false), (2, 2, false)]
        );
    }

    #[test]
    fn test_overlap() {
        let wide = Chunk::from_edit(&Edit::new(1, 4, "x", "R:OTHER"));
        let inner = Chunk::token(2, "b");
        let outside = Chunk::token(4, "e");
        let slot = Chunk::slot(2);

        assert!(wide.overlaps(&inner));
        assert!(inner.overlaps(&wide));
        assert!(!wide.overlaps(&outside));
        assert!(slot.overlaps(&wide));
        // a slot at a token's start falls inside that token
        assert!(slot.overlaps(&inner));
    }
}
