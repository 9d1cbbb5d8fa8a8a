//! Edit-level precision/recall against the best of several references.
//!
//! Each hypothesis edit is a true positive if the reference contains the same
//! correction (same span, same replacement text) and a false positive
//! otherwise; each reference edit the hypothesis misses is a false negative.
//! Tallies are kept per error type so they can be re-aggregated by type,
//! sentence or corpus.

use std::collections::HashSet;

use crate::aggregate::{self, SentenceScores, TypedScores};
use crate::annotator::EditAnnotator;
use crate::cache::EditCache;
use crate::config::ErrantConfig;
use crate::edit::{Edit, EditKey};
use crate::errors::GecResult;
use crate::score::Score;
use crate::scorer::{validate_inputs, Scorer};

/// Tally one hypothesis edit list against one reference edit list.
///
/// The error type of a true or false positive comes from the hypothesis edit,
/// that of a false negative from the reference edit.
pub fn score_edits(hypothesis: &[Edit], reference: &[Edit], beta: f64) -> TypedScores {
    let hyp_keys: HashSet<EditKey<'_>> = hypothesis.iter().map(Edit::key).collect();
    let ref_keys: HashSet<EditKey<'_>> = reference.iter().map(Edit::key).collect();

    let mut scores = TypedScores::new();
    for edit in hypothesis {
        let score = scores
            .entry(edit.error_type.clone())
            .or_insert_with(|| Score::new(beta));
        if ref_keys.contains(&edit.key()) {
            score.tp += 1.0;
        } else {
            score.fp += 1.0;
        }
    }
    for edit in reference {
        if !hyp_keys.contains(&edit.key()) {
            scores
                .entry(edit.error_type.clone())
                .or_insert_with(|| Score::new(beta))
                .fn_ += 1.0;
        }
    }
    scores
}

/// Reference-selection scorer.
///
/// Corpus scores pick, for each sentence in order, the reference that gives
/// the best running corpus total; sentence scores pick the best reference of
/// each sentence independently.
pub struct ErrantScorer<A: EditAnnotator> {
    config: ErrantConfig,
    cache: EditCache<A>,
}

impl<A: EditAnnotator> ErrantScorer<A> {
    pub fn new(annotator: A) -> Self {
        Self::with_config(annotator, ErrantConfig::default())
    }

    pub fn with_config(annotator: A, config: ErrantConfig) -> Self {
        Self {
            config,
            cache: EditCache::new(annotator),
        }
    }

    pub fn config(&self) -> &ErrantConfig {
        &self.config
    }

    pub fn cache(&self) -> &EditCache<A> {
        &self.cache
    }

    /// Filtered edits turning `source` into `target`.
    pub fn edit_extraction(&mut self, source: &str, target: &str) -> GecResult<Vec<Edit>> {
        self.cache.edits(source, target)
    }

    /// Per-type tallies indexed `[sentence][reference][error type]`.
    pub fn verbose_score(
        &mut self,
        sources: &[String],
        hypotheses: &[String],
        references: &[Vec<String>],
    ) -> GecResult<Vec<SentenceScores>> {
        validate_inputs(sources, hypotheses, references)?;
        log::debug!(
            "edit scoring {} sentences against {} references",
            sources.len(),
            references.len()
        );

        let beta = self.config.beta;
        let mut scores = Vec::with_capacity(sources.len());
        for (sent_id, (source, hypothesis)) in sources.iter().zip(hypotheses).enumerate() {
            let hyp_edits = self.cache.edits(source, hypothesis)?;
            let mut sent_scores = Vec::with_capacity(references.len());
            for reference in references {
                let ref_edits = self.cache.edits(source, &reference[sent_id])?;
                sent_scores.push(score_edits(&hyp_edits, &ref_edits, beta));
            }
            scores.push(sent_scores);
        }
        Ok(scores)
    }
}

impl<A: EditAnnotator> Scorer for ErrantScorer<A> {
    fn score_sentence(
        &mut self,
        sources: &[String],
        hypotheses: &[String],
        references: &[Vec<String>],
    ) -> GecResult<Vec<f64>> {
        let verbose = self.verbose_score(sources, hypotheses, references)?;
        Ok(aggregate::sentence_scores(&verbose, self.config.beta))
    }

    fn score_corpus(
        &mut self,
        sources: &[String],
        hypotheses: &[String],
        references: &[Vec<String>],
    ) -> GecResult<f64> {
        let verbose = self.verbose_score(sources, hypotheses, references)?;
        Ok(aggregate::corpus_score(&verbose, self.config.beta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_edits_classification() {
        let hyp = vec![
            Edit::new(1, 2, "are", "R:VERB:SVA"),
            Edit::new(4, 4, "the", "M:DET"),
        ];
        let reference = vec![
            // same correction, different type: still a match
            Edit::new(1, 2, "are", "R:VERB"),
            Edit::new(5, 6, "", "U:PUNCT"),
        ];
        let scores = score_edits(&hyp, &reference, 0.5);

        assert_eq!(scores.len(), 3);
        assert_eq!(scores["R:VERB:SVA"], Score::with_counts(1.0, 0.0, 0.0, 0.0, 0.5));
        assert_eq!(scores["M:DET"], Score::with_counts(0.0, 1.0, 0.0, 0.0, 0.5));
        assert_eq!(scores["U:PUNCT"], Score::with_counts(0.0, 0.0, 1.0, 0.0, 0.5));
        // the reference's own type for a matched edit is never recorded
        assert!(!scores.contains_key("R:VERB"));
    }

    #[test]
    fn test_score_edits_same_type_accumulates() {
        let hyp = vec![Edit::new(0, 1, "A", "R:ORTH"), Edit::new(3, 4, "b", "R:ORTH")];
        let reference = vec![Edit::new(0, 1, "A", "R:ORTH"), Edit::new(6, 7, "c", "R:ORTH")];
        let scores = score_edits(&hyp, &reference, 0.5);
        assert_eq!(scores["R:ORTH"], Score::with_counts(1.0, 1.0, 1.0, 0.0, 0.5));
    }

    #[test]
    fn test_score_edits_replacement_text_matters() {
        let hyp = vec![Edit::new(2, 3, "is", "R:VERB")];
        let reference = vec![Edit::new(2, 3, "was", "R:VERB")];
        let scores = score_edits(&hyp, &reference, 0.5);
        assert_eq!(scores["R:VERB"], Score::with_counts(0.0, 1.0, 1.0, 0.0, 0.5));
    }

    #[test]
    fn test_score_edits_empty() {
        assert!(score_edits(&[], &[], 0.5).is_empty());
    }
}
