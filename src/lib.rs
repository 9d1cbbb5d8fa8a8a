#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Edit-based scoring for grammatical error correction output.
//!
//! A correction system rewrites source sentences; the scorers here compare
//! its rewrites against human references at the level of edits (span,
//! replacement text, error type) extracted by an [`EditAnnotator`].
//!
//! ## Metrics
//!
//! - [`ErrantScorer`] - edit precision/recall/F-beta against the best of
//!   several references. Corpus scores choose references with the running
//!   corpus total in view.
//! - [`GotoScorer`] - chunk alignment against one reference, with true
//!   negatives for untouched text, partial-overlap attempts and optional
//!   per-chunk weights.
//! - [`EnsembleScorer`] - mean and majority vote over other metrics.
//!
//! ## Modules
//!
//! - [`score`] - the [`Score`] tally and its ranking order
//! - [`cache`] - memoization of annotator calls
//! - [`aggregate`] - reference selection and corpus/sentence aggregation
//! - [`chunk`] - chunk generation, alignment and rendering
//! - [`config`] - scorer configuration (RON)
//! - [`weights`] - per-chunk weight tables (JSON)
//! - [`errors`] - error types

pub mod aggregate;
pub mod annotator;
pub mod cache;
pub mod chunk;
pub mod config;
pub mod edit;
pub mod ensemble;
pub mod errant;
pub mod errors;
pub mod goto;
pub mod score;
pub mod scorer;
pub mod weights;

pub use aggregate::{
    aggregate_to_overall, corpus_score, corpus_total, select_in_context, select_isolated,
    sentence_scores, sentence_totals, SentenceScores, TypedScores,
};
pub use annotator::EditAnnotator;
pub use cache::{CacheStats, EditCache, Fingerprint};
pub use chunk::{annotate_chunk, generate_chunks, Chunk, ChunkDisplay, ChunkJudgement};
pub use config::{ErrantConfig, GotoConfig};
pub use edit::{filter_edits, Edit, EditKey};
pub use ensemble::EnsembleScorer;
pub use errant::ErrantScorer;
pub use errors::{AnnotatorError, GecError, GecResult};
pub use goto::GotoScorer;
pub use score::{Score, DEFAULT_BETA};
pub use scorer::{expected_wins, pairwise_from_sentence_scores, Scorer};
pub use weights::WeightTable;

#[cfg(test)]
mod tests {
    mod stub;
    pub(crate) use stub::StubAnnotator;

    mod ensemble;
    mod errant;
    mod goto;
}
