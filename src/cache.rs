//! Memoization of annotator calls.
//!
//! Evaluation corpora are scored many times over (one pass per system, per
//! metric variant, per attribution probe), so parses and edit lists are kept
//! for the lifetime of the owning scorer. Entries are never evicted: memory is
//! bounded by the number of distinct sentences and sentence pairs seen, which
//! is finite for a fixed corpus.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::annotator::EditAnnotator;
use crate::edit::{filter_edits, Edit};
use crate::errors::{GecError, GecResult};

/// Separator placed between source and target when fingerprinting a pair.
const PAIR_SEPARATOR: &str = "|||";

/// Hex SHA-256 digest of sentence content.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        Fingerprint(hex::encode(hasher.finalize()))
    }

    /// Fingerprint of an ordered `(source, target)` pair.
    pub fn of_pair(source: &str, target: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        hasher.update(PAIR_SEPARATOR.as_bytes());
        hasher.update(target.as_bytes());
        Fingerprint(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", &self.0[..12])
    }
}

/// Hit/miss counters for both memo tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub parse_hits: usize,
    pub parse_misses: usize,
    pub edit_hits: usize,
    pub edit_misses: usize,
}

/// An annotator wrapped with parse and edit-list memo tables.
pub struct EditCache<A: EditAnnotator> {
    annotator: A,
    parses: HashMap<Fingerprint, Arc<A::Parse>>,
    edits: HashMap<Fingerprint, Arc<Vec<Edit>>>,
    stats: CacheStats,
}

impl<A: EditAnnotator> fmt::Debug for EditCache<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditCache")
            .field("parse_entries", &self.parses.len())
            .field("edit_entries", &self.edits.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<A: EditAnnotator> EditCache<A> {
    pub fn new(annotator: A) -> Self {
        Self {
            annotator,
            parses: HashMap::new(),
            edits: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn annotator(&self) -> &A {
        &self.annotator
    }

    /// Parse a sentence, reusing an earlier parse of identical text.
    pub fn parse(&mut self, sentence: &str) -> GecResult<Arc<A::Parse>> {
        let key = Fingerprint::of(sentence);
        if let Some(parse) = self.parses.get(&key) {
            self.stats.parse_hits += 1;
            log::trace!("parse cache hit {:?}", key);
            return Ok(Arc::clone(parse));
        }

        self.stats.parse_misses += 1;
        log::trace!("parse cache miss {:?}", key);
        let parse = self
            .annotator
            .parse(sentence)
            .map_err(|e| GecError::annotation(sentence, e))?;
        let parse = Arc::new(parse);
        self.parses.insert(key, Arc::clone(&parse));
        Ok(parse)
    }

    /// Edits turning `source` into `target`, minus `noop`/`UNK` edits.
    pub fn edits(&mut self, source: &str, target: &str) -> GecResult<Vec<Edit>> {
        let key = Fingerprint::of_pair(source, target);
        if let Some(edits) = self.edits.get(&key) {
            self.stats.edit_hits += 1;
            log::trace!("edit cache hit {:?}", key);
            return Ok(filter_edits(edits));
        }

        self.stats.edit_misses += 1;
        log::trace!("edit cache miss {:?}", key);
        let source_parse = self.parse(source)?;
        let target_parse = self.parse(target)?;
        let edits = self
            .annotator
            .annotate(&source_parse, &target_parse)
            .map_err(|e| GecError::annotation(target, e))?;
        let filtered = filter_edits(&edits);
        self.edits.insert(key, Arc::new(edits));
        Ok(filtered)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn parse_entries(&self) -> usize {
        self.parses.len()
    }

    pub fn edit_entries(&self) -> usize {
        self.edits.len()
    }
}
