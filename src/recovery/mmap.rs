use super::nonce::mmap_exposed_n1;
use super::IdentifierSolver;
use crate::error::{Error, Result};
use crate::history::TranscriptHistory;
use crate::width::{bit, BitWidth, Word};

/// What to do when both values of an identifier bit fit every exposing run.
///
/// Every exposing run separates the two candidates, since flipping bit `i`
/// of the guess flips bit `i` of `ID + P`. A candidate also needs at least
/// one exposing run to fit. Ties are therefore not expected from genuine
/// transcripts; the policy fixes what one would mean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Commit 0 and carry on.
    #[default]
    PreferZero,
    /// Stop with [`Error::AmbiguousBit`].
    Reject,
}

#[derive(Clone, Copy, Debug)]
pub struct MmapSolver {
    width: BitWidth,
    tie_break: TieBreak,
}

/// One observed round reduced to the three values the attack needs.
#[derive(Clone, Copy, Debug)]
struct Run {
    pseudonym: Word,
    b: Word,
    e: Word,
}

impl MmapSolver {
    pub fn new(width: BitWidth) -> Self {
        Self {
            width,
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Whether candidate bit `value` at position `i`, on top of `known`, fits
    /// every run whose pseudonym bit `i` is 0. A candidate with no exposing
    /// run at all does not fit.
    fn fits(&self, runs: &[Run], known: Word, i: u32, value: bool) -> bool {
        let guess = known | ((value as Word) << i);
        let mut checked = 0usize;
        for run in runs.iter().filter(|r| !bit(r.pseudonym, i)) {
            checked += 1;
            let n1 = run.e ^ self.width.add(guess, run.pseudonym);
            if bit(n1, i) != bit(run.b, i) {
                return false;
            }
        }
        checked > 0
    }
}

impl IdentifierSolver for MmapSolver {
    fn solve(&self, history: &TranscriptHistory) -> Result<Word> {
        let width = self.width;
        let runs: Vec<Run> = history
            .entries()
            .iter()
            .map(|entry| {
                let exposed = mmap_exposed_n1(width, entry);
                Run {
                    pseudonym: entry.pseudonym_before,
                    b: exposed.value,
                    e: entry.transcript.e,
                }
            })
            .collect();

        let mut known: Word = 0;
        for i in 0..width.bits() {
            let zero = self.fits(&runs, known, i, false);
            let one = self.fits(&runs, known, i, true);
            match (zero, one) {
                (true, false) => {}
                (false, true) => known |= 1 << i,
                (false, false) => {
                    return Err(Error::InsufficientEvidence {
                        unresolved: width.bits() - i,
                        entries: history.len(),
                    })
                }
                (true, true) => match self.tie_break {
                    TieBreak::PreferZero => {}
                    TieBreak::Reject => return Err(Error::AmbiguousBit { bit: i }),
                },
            }
        }
        Ok(known)
    }
}
