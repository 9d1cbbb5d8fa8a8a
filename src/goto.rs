//! Chunk-alignment scorer with per-chunk importance weights.
//!
//! Stricter than the reference-selection scorer: every chunk of the reference
//! (edited spans, untouched tokens and insertion slots) is judged, so leaving
//! a correct token alone earns a true negative and a partially overlapping
//! edit counts as an attempt. Only one reference set is used.

use crate::aggregate::{self, SentenceScores, TypedScores};
use crate::annotator::EditAnnotator;
use crate::cache::EditCache;
use crate::chunk::{annotate_chunk, generate_chunks, tokenize, Chunk, ChunkDisplay};
use crate::config::GotoConfig;
use crate::errors::{GecError, GecResult};
use crate::score::Score;
use crate::scorer::{validate_inputs, Scorer};

/// Judge every reference chunk against the hypothesis chunks.
pub fn score_chunks(reference: &[Chunk], hypothesis: &[Chunk], beta: f64) -> TypedScores {
    let mut scores = TypedScores::new();
    for chunk in reference {
        let judgement = annotate_chunk(chunk, hypothesis);
        log::trace!(
            "chunk {}..{} {:?}: {:?}",
            chunk.start,
            chunk.end,
            chunk.correction,
            judgement
        );
        let score = scores
            .entry(chunk.error_type.clone())
            .or_insert_with(|| Score::new(beta));
        judgement.apply(chunk, score);
    }
    scores
}

pub struct GotoScorer<A: EditAnnotator> {
    config: GotoConfig,
    cache: EditCache<A>,
}

impl<A: EditAnnotator> GotoScorer<A> {
    /// Unweighted scorer against the first reference set.
    pub fn new(annotator: A) -> Self {
        Self::with_config(annotator, GotoConfig::default())
    }

    pub fn with_config(annotator: A, config: GotoConfig) -> Self {
        Self {
            config,
            cache: EditCache::new(annotator),
        }
    }

    pub fn config(&self) -> &GotoConfig {
        &self.config
    }

    pub fn cache(&self) -> &EditCache<A> {
        &self.cache
    }

    /// Chunk sequence of `target` as a correction of `source`, unweighted.
    pub fn chunks(&mut self, source: &str, target: &str) -> GecResult<Vec<Chunk>> {
        let edits = self.cache.edits(source, target)?;
        Ok(generate_chunks(&edits, &tokenize(source)))
    }

    /// Render the chunk sequence of one sentence pair, with the weights of
    /// sentence `sent_id` applied when the scorer is weighted.
    pub fn render_chunks(&mut self, sent_id: usize, source: &str, target: &str) -> GecResult<String> {
        let mut chunks = self.chunks(source, target)?;
        self.apply_weights(sent_id, &mut chunks)?;
        let tokens = tokenize(source);
        Ok(ChunkDisplay::new(&chunks, &tokens).to_string())
    }

    fn apply_weights(&self, sent_id: usize, chunks: &mut [Chunk]) -> GecResult<()> {
        if let Some(table) = &self.config.weights {
            let row = table.row_for(sent_id, chunks.len())?;
            for (chunk, weight) in chunks.iter_mut().zip(row) {
                chunk.weight = *weight;
            }
        }
        Ok(())
    }

    /// Per-type tallies indexed `[sentence][0][error type]`; the single
    /// reference slot holds the configured reference set.
    pub fn verbose_score(
        &mut self,
        sources: &[String],
        hypotheses: &[String],
        references: &[Vec<String>],
    ) -> GecResult<Vec<SentenceScores>> {
        validate_inputs(sources, hypotheses, references)?;
        let ref_id = self.config.ref_id;
        let reference_set = references
            .get(ref_id)
            .ok_or(GecError::ReferenceIndexOutOfRange {
                index: ref_id,
                available: references.len(),
            })?;
        log::debug!(
            "chunk scoring {} sentences against reference {} (weighted: {})",
            sources.len(),
            ref_id,
            self.config.is_weighted()
        );

        let beta = self.config.beta;
        let mut scores = Vec::with_capacity(sources.len());
        for (sent_id, (source, hypothesis)) in sources.iter().zip(hypotheses).enumerate() {
            let hyp_chunks = self.chunks(source, hypothesis)?;
            let mut ref_chunks = self.chunks(source, &reference_set[sent_id])?;
            self.apply_weights(sent_id, &mut ref_chunks)?;
            scores.push(vec![score_chunks(&ref_chunks, &hyp_chunks, beta)]);
        }
        Ok(scores)
    }
}

impl<A: EditAnnotator> Scorer for GotoScorer<A> {
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
