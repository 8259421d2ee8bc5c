//! Append-only log of observed rounds.
//!
//! Recovery works on consecutive entries, so the log keeps capture order and
//! hands out indices rather than letting callers reorder or edit entries.

use rand::RngCore;

use crate::oracle::ProtocolOracle;
use crate::transcript::Transcript;
use crate::width::Word;

/// What an eavesdropper records for one accepted round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub pseudonym_before: Word,
    pub pseudonym_after: Word,
    pub transcript: Transcript,
}

#[derive(Clone, Debug, Default)]
pub struct TranscriptHistory {
    entries: Vec<HistoryEntry>,
}

impl TranscriptHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its index.
    pub fn push(&mut self, entry: HistoryEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Drive one honest round on `oracle` and record it if it was accepted.
    pub fn observe<R: RngCore>(&mut self, oracle: &mut ProtocolOracle<R>) -> Option<usize> {
        let pseudonym_before = oracle.pseudonym();
        let transcript = oracle.run_once()?;
        Some(self.push(HistoryEntry {
            pseudonym_before,
            pseudonym_after: oracle.pseudonym(),
            transcript,
        }))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Whether entry `index + 1` starts from the state entry `index` left.
    pub fn is_chained(&self, index: usize) -> bool {
        match (self.entries.get(index), self.entries.get(index + 1)) {
            (Some(cur), Some(next)) => cur.pseudonym_after == next.pseudonym_before,
            _ => false,
        }
    }

    /// Indices `j` such that `(j, j + 1)` is a pair of consecutive rounds.
    pub fn chained_pairs(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.entries.len().saturating_sub(1)).filter(move |&j| self.is_chained(j))
    }
}
