//! An [`EditAnnotator`] built on a token-level diff.
//!
//! Sentences are split on single spaces and aligned with a longest common
//! subsequence. Every maximal run of changed tokens between two aligned
//! tokens becomes one [`Edit`]:
//!
//! ```text
//! source:  He  go            school
//! target:  He  goes  to      school
//! edit:        1..2 -> "goes to"  R:OTHER
//! ```
//!
//! Error types are coarse (`M:OTHER`, `U:OTHER`, `R:OTHER`); use a
//! linguistically informed annotator when per-type breakdowns matter.
//!
//! # Example
//!
//! ```
//! use layered_gec::{Edit, EditAnnotator};
//! use layered_gec_token_diff::TokenDiffAnnotator;
//!
//! let annotator = TokenDiffAnnotator;
//! let source = annotator.parse("I like cat").unwrap();
//! let target = annotator.parse("I like the cat").unwrap();
//! assert_eq!(
//!     annotator.annotate(&source, &target).unwrap(),
//!     vec![Edit::new(2, 2, "the", "M:OTHER")]
//! );
//! ```

use std::convert::Infallible;

use layered_gec::{Edit, EditAnnotator};

/// Error type of an edit that only adds tokens.
pub const MISSING_TYPE: &str = "M:OTHER";
/// Error type of an edit that only removes tokens.
pub const UNNECESSARY_TYPE: &str = "U:OTHER";
/// Error type of an edit that both removes and adds tokens.
pub const REPLACEMENT_TYPE: &str = "R:OTHER";

/// Annotates edits from a longest-common-subsequence token diff.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenDiffAnnotator;

impl EditAnnotator for TokenDiffAnnotator {
    type Parse = Vec<String>;
    type Error = Infallible;

    fn parse(&self, sentence: &str) -> Result<Vec<String>, Infallible> {
        Ok(sentence.split(' ').map(str::to_string).collect())
    }

    fn annotate(&self, source: &Vec<String>, target: &Vec<String>) -> Result<Vec<Edit>, Infallible> {
        let edits = group_changes(&diff(source, target), target);
        log::trace!(
            "{} edits between {} and {} tokens",
            edits.len(),
            source.len(),
            target.len()
        );
        Ok(edits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiffOp {
    /// `(source index, target index)` of an aligned token.
    Equal(usize, usize),
    /// Target token with no source counterpart.
    Insert(usize),
    /// Source token with no target counterpart.
    Delete(usize),
}

/// LCS alignment, in source order. Backtracking prefers insertions on ties.
fn diff(source: &[String], target: &[String]) -> Vec<DiffOp> {
    let n = source.len();
    let m = target.len();

    // lcs[i][j]: LCS length of source[..i] and target[..j]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            lcs[i][j] = if source[i - 1] == target[j - 1] {
                lcs[i - 1][j - 1] + 1
            } else {
                lcs[i - 1][j].max(lcs[i][j - 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && source[i - 1] == target[j - 1] {
            ops.push(DiffOp::Equal(i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i][j - 1] >= lcs[i - 1][j]) {
            ops.push(DiffOp::Insert(j - 1));
            j -= 1;
        } else {
            ops.push(DiffOp::Delete(i - 1));
            i -= 1;
        }
    }
    ops.reverse();
    ops
}

/// A run of changes being collected.
struct Run<'a> {
    start: usize,
    end: usize,
    inserted: Vec<&'a str>,
}

impl Run<'_> {
    fn into_edit(self) -> Edit {
        let error_type = match (self.start == self.end, self.inserted.is_empty()) {
            (true, _) => MISSING_TYPE,
            (false, true) => UNNECESSARY_TYPE,
            (false, false) => REPLACEMENT_TYPE,
        };
        Edit::new(self.start, self.end, self.inserted.join(" "), error_type)
    }
}

fn group_changes(ops: &[DiffOp], target: &[String]) -> Vec<Edit> {
    let mut edits = Vec::new();
    let mut run: Option<Run<'_>> = None;
    // Source index of the next unconsumed token.
    let mut position = 0;

    for op in ops {
        match *op {
            DiffOp::Equal(source_index, _) => {
                edits.extend(run.take().map(Run::into_edit));
                position = source_index + 1;
            }
            DiffOp::Delete(source_index) => {
                let current = run.get_or_insert_with(|| Run {
                    start: position,
                    end: position,
                    inserted: Vec::new(),
                });
                current.end = source_index + 1;
                position = source_index + 1;
            }
            DiffOp::Insert(target_index) => {
                run.get_or_insert_with(|| Run {
                    start: position,
                    end: position,
                    inserted: Vec::new(),
                })
                .inserted
                .push(target[target_index].as_str());
            }
        }
    }
    edits.extend(run.map(Run::into_edit));
    edits
}
