//! The contract shared by every metric variant.
//!
//! Inputs follow one layout throughout the crate:
//!
//! - `sources[s]` is source sentence `s`,
//! - `hypotheses[s]` is the system's correction of it,
//! - `references[r][s]` is reference set `r`'s correction of it, so the
//!   outer dimension counts references and the inner one sentences.
//!
//! Sentences are whitespace tokenized (`"This is a sentence ."`).

use crate::errors::{GecError, GecResult};

/// A reference-based metric.
///
/// Implementations take `&mut self` so they can memoize annotator output.
pub trait Scorer {
    /// One score per sentence.
    fn score_sentence(
        &mut self,
        sources: &[String],
        hypotheses: &[String],
        references: &[Vec<String>],
    ) -> GecResult<Vec<f64>>;

    /// One score for the whole corpus; the mean sentence score unless the
    /// metric aggregates counts itself.
    fn score_corpus(
        &mut self,
        sources: &[String],
        hypotheses: &[String],
        references: &[Vec<String>],
    ) -> GecResult<f64> {
        let scores = self.score_sentence(sources, hypotheses, references)?;
        Ok(mean(&scores))
    }

    /// Compare several systems sentence by sentence.
    ///
    /// `systems[k][s]` is system `k`'s hypothesis for sentence `s`. The result
    /// is indexed `[sentence][i][j]` and holds `1` when system `i` beats
    /// system `j` on that sentence, `-1` when it loses and `0` on a tie.
    fn score_pairwise(
        &mut self,
        sources: &[String],
        systems: &[Vec<String>],
        references: &[Vec<String>],
    ) -> GecResult<Vec<Vec<Vec<i8>>>> {
        let per_system = systems
            .iter()
            .map(|hypotheses| self.score_sentence(sources, hypotheses, references))
            .collect::<GecResult<Vec<_>>>()?;
        Ok(pairwise_from_sentence_scores(&per_system, sources.len()))
    }
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn score_sentence(
        &mut self,
        sources: &[String],
        hypotheses: &[String],
        references: &[Vec<String>],
    ) -> GecResult<Vec<f64>> {
        (**self).score_sentence(sources, hypotheses, references)
    }

    fn score_corpus(
        &mut self,
        sources: &[String],
        hypotheses: &[String],
        references: &[Vec<String>],
    ) -> GecResult<f64> {
        (**self).score_corpus(sources, hypotheses, references)
    }

    fn score_pairwise(
        &mut self,
        sources: &[String],
        systems: &[Vec<String>],
        references: &[Vec<String>],
    ) -> GecResult<Vec<Vec<Vec<i8>>>> {
        (**self).score_pairwise(sources, systems, references)
    }
}

/// Check that every parallel input has one entry per source sentence.
pub fn validate_inputs(
    sources: &[String],
    hypotheses: &[String],
    references: &[Vec<String>],
) -> GecResult<()> {
    if references.is_empty() {
        return Err(GecError::NoReferences);
    }
    if hypotheses.len() != sources.len() {
        return Err(GecError::shape("hypotheses", sources.len(), hypotheses.len()));
    }
    for (ref_id, reference) in references.iter().enumerate() {
        if reference.len() != sources.len() {
            return Err(GecError::shape(
                format!("reference set {}", ref_id),
                sources.len(),
                reference.len(),
            ));
        }
    }
    Ok(())
}

/// Build the `[sentence][i][j]` win/loss tensor from per-system sentence
/// scores (`per_system[k][s]`).
pub fn pairwise_from_sentence_scores(per_system: &[Vec<f64>], num_sents: usize) -> Vec<Vec<Vec<i8>>> {
    (0..num_sents)
        .map(|sent| {
            per_system
                .iter()
                .map(|scores_i| {
                    per_system
                        .iter()
                        .map(|scores_j| sign(scores_i[sent] - scores_j[sent]))
                        .collect()
                })
                .collect()
        })
        .collect()
}

/// Rank systems by their expected share of pairwise wins.
///
/// For system `i`, the share of sentences it wins against each other system
/// `j`, averaged over all `j`. A lone system scores `0.0`.
pub fn expected_wins(pairwise: &[Vec<Vec<i8>>]) -> Vec<f64> {
    let num_sents = pairwise.len();
    let num_systems = match pairwise.first() {
        Some(first) => first.len(),
        None => return Vec::new(),
    };
    if num_systems < 2 {
        return vec![0.0; num_systems];
    }

    (0..num_systems)
        .map(|i| {
            let total: f64 = (0..num_systems)
                .filter(|&j| j != i)
                .map(|j| {
                    let wins = pairwise.iter().filter(|sent| sent[i][j] == 1).count();
                    wins as f64 / num_sents as f64
                })
                .sum();
            total / (num_systems - 1) as f64
        })
        .collect()
}

pub(crate) fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
