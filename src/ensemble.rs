//! Combining several metrics into one.

use crate::errors::{GecError, GecResult};
use crate::scorer::{sign, Scorer};

/// Averages sentence scores and majority-votes pairwise judgements of its
/// member metrics.
pub struct EnsembleScorer {
    metrics: Vec<Box<dyn Scorer>>,
}

impl EnsembleScorer {
    pub fn new(metrics: Vec<Box<dyn Scorer>>) -> GecResult<Self> {
        if metrics.is_empty() {
            return Err(GecError::EmptyEnsemble);
        }
        Ok(Self { metrics })
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl Scorer for EnsembleScorer {
    fn score_sentence(
        &mut self,
        sources: &[String],
        hypotheses: &[String],
        references: &[Vec<String>],
    ) -> GecResult<Vec<f64>> {
        let mut totals = vec![0.0; sources.len()];
        for metric in &mut self.metrics {
            let scores = metric.score_sentence(sources, hypotheses, references)?;
            for (total, score) in totals.iter_mut().zip(scores) {
                *total += score;
            }
        }
        let count = self.metrics.len() as f64;
        Ok(totals.into_iter().map(|total| total / count).collect())
    }

    /// Sum the members' `-1/0/1` judgements and keep the sign, so the
    /// majority decides and an even split is a tie.
    fn score_pairwise(
        &mut self,
        sources: &[String],
        systems: &[Vec<String>],
        references: &[Vec<String>],
    ) -> GecResult<Vec<Vec<Vec<i8>>>> {
        let num_systems = systems.len();
        let mut votes = vec![vec![vec![0i32; num_systems]; num_systems]; sources.len()];
        for metric in &mut self.metrics {
            let pairwise = metric.score_pairwise(sources, systems, references)?;
            for (sent_votes, sent) in votes.iter_mut().zip(pairwise) {
                for (row_votes, row) in sent_votes.iter_mut().zip(sent) {
                    for (vote, judgement) in row_votes.iter_mut().zip(row) {
                        *vote += i32::from(judgement);
                    }
                }
            }
        }
        log::debug!(
            "ensemble of {} metrics compared {} systems",
            self.metrics.len(),
            num_systems
        );
        Ok(votes
            .into_iter()
            .map(|sent| {
                sent.into_iter()
                    .map(|row| row.into_iter().map(|vote| sign(f64::from(vote))).collect())
                    .collect()
            })
            .collect())
    }
}
