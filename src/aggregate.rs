//! Turning per-type, per-reference tallies into sentence and corpus scores.
//!
//! Verbose scores are indexed `[sentence][reference][error type]`. Two
//! selection policies pick one reference per sentence:
//!
//! - [`corpus_score`] keeps a running corpus total and, for every sentence,
//!   picks the reference that maximises `running + candidate`. A reference
//!   that looks best in isolation can lose once the rest of the corpus is
//!   taken into account.
//! - [`sentence_scores`] compares the candidates of each sentence on their
//!   own, with no running total.
//!
//! Both keep the earlier reference on ties.

use std::collections::BTreeMap;

use crate::score::Score;

/// Tallies of one sentence against one reference, keyed by error type.
pub type TypedScores = BTreeMap<String, Score>;

/// Tallies of one sentence against every reference.
pub type SentenceScores = Vec<TypedScores>;

/// Sum the per-type tallies of one sentence/reference pair.
pub fn aggregate_to_overall(scores: &TypedScores, beta: f64) -> Score {
    scores
        .values()
        .fold(Score::new(beta), |overall, score| overall + *score)
}

/// Index and overall score of the reference chosen for one sentence, given
/// the corpus total accumulated so far.
pub fn select_in_context(
    candidates: &SentenceScores,
    running: &Score,
    beta: f64,
) -> Option<(usize, Score)> {
    let mut best: Option<(usize, Score)> = None;
    for (ref_id, typed) in candidates.iter().enumerate() {
        let candidate = aggregate_to_overall(typed, beta);
        let replace = match &best {
            None => true,
            Some((_, current)) => (*running + *current).is_worse_than(&(*running + candidate)),
        };
        if replace {
            best = Some((ref_id, candidate));
        }
    }
    best
}

/// Index and overall score of the best reference for one sentence in
/// isolation.
pub fn select_isolated(candidates: &SentenceScores, beta: f64) -> Option<(usize, Score)> {
    let mut best: Option<(usize, Score)> = None;
    for (ref_id, typed) in candidates.iter().enumerate() {
        let candidate = aggregate_to_overall(typed, beta);
        let replace = match &best {
            None => true,
            Some((_, current)) => current.is_worse_than(&candidate),
        };
        if replace {
            best = Some((ref_id, candidate));
        }
    }
    best
}

/// Fold the sentences in order into one corpus tally.
///
/// Sentences without any reference tallies contribute nothing.
pub fn corpus_total(verbose: &[SentenceScores], beta: f64) -> Score {
    verbose
        .iter()
        .enumerate()
        .fold(Score::new(beta), |running, (sent_id, candidates)| {
            match select_in_context(candidates, &running, beta) {
                Some((ref_id, best)) => {
                    log::trace!("sentence {}: reference {} selected", sent_id, ref_id);
                    running + best
                }
                None => running,
            }
        })
}

/// Corpus-level F-beta.
pub fn corpus_score(verbose: &[SentenceScores], beta: f64) -> f64 {
    corpus_total(verbose, beta).f()
}

/// Best overall tally of every sentence, each chosen in isolation.
pub fn sentence_totals(verbose: &[SentenceScores], beta: f64) -> Vec<Score> {
    verbose
        .iter()
        .map(|candidates| {
            select_isolated(candidates, beta)
                .map(|(_, best)| best)
                .unwrap_or_else(|| Score::new(beta))
        })
        .collect()
}

/// Sentence-level F-beta.
pub fn sentence_scores(verbose: &[SentenceScores], beta: f64) -> Vec<f64> {
    sentence_totals(verbose, beta).iter().map(Score::f).collect()
}
