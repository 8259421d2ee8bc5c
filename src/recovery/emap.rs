use tracing::{debug, warn};

use super::nonce::{emap_nonces, ExposedBits};
use super::IdentifierSolver;
use crate::compressor::Compressor;
use crate::error::{Error, Result};
use crate::history::{HistoryEntry, TranscriptHistory};
use crate::state::Nonces;
use crate::width::{BitWidth, Word};

/// Key material one EMAP entry gives away once its nonces are known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveredMaterial {
    pub pseudonym: Word,
    pub nonces: Nonces,
    /// `P ⊕ P' ⊕ n2`, exact.
    pub key1: Word,
    /// `C ⊕ P ⊕ n2`, exact.
    pub key3: Word,
    /// `K2` at the pseudonym's zero bits, 0 elsewhere.
    pub key2_masked: Word,
    /// `K4` at the pseudonym's one bits, 0 elsewhere.
    pub key4_masked: Word,
}

impl RecoveredMaterial {
    pub fn from_entry(width: BitWidth, entry: &HistoryEntry) -> Self {
        let nonces = emap_nonces(width, entry);
        let p = entry.pseudonym_before;
        let t = &entry.transcript;
        Self {
            pseudonym: p,
            nonces,
            key1: p ^ entry.pseudonym_after ^ nonces.n2,
            key3: t.c ^ p ^ nonces.n2,
            key2_masked: (t.b ^ nonces.n1) & width.not(p),
            key4_masked: t.d ^ nonces.n2,
        }
    }
}

/// EMAP identifier recovery.
///
/// For a consecutive pair `(j, j+1)` the key recurrence gives
/// `term1 = K1_j ⊕ K1_{j+1} ⊕ n2_j`, whose top half is the identifier's top
/// half, and `term4 = K4_j ⊕ K4_{j+1} ⊕ n1_j`, whose bottom half is the
/// identifier's bottom half wherever `K4` is visible in both entries.
#[derive(Clone, Copy, Debug)]
pub struct EmapSolver {
    width: BitWidth,
    compressor: Compressor,
    key2_route: bool,
}

impl EmapSolver {
    pub fn new(width: BitWidth, compressor: Compressor) -> Self {
        Self {
            width,
            compressor,
            key2_route: false,
        }
    }

    /// Also learn low identifier bits through `K2` where both pseudonyms are 0.
    pub fn with_key2_route(mut self, enabled: bool) -> Self {
        self.key2_route = enabled;
        self
    }

    /// Top half of the identifier implied by pair `(j, j+1)`.
    fn high_half(&self, j: usize, cur: &RecoveredMaterial, next: &RecoveredMaterial) -> Result<Word> {
        let width = self.width;
        let term1 = cur.key1 ^ next.key1 ^ cur.nonces.n2;
        let term3 = cur.key3 ^ next.key3 ^ cur.nonces.n1;

        if term1 & width.quarter_mask() != self.compressor.slot(width, cur.key3) {
            return Err(Error::InconsistentHistory {
                index: j,
                reason: "F_p(K3) slot does not match the selected compressor",
            });
        }
        let high = width.high_half(term1);
        if width.high_half(term3) != high {
            return Err(Error::InconsistentHistory {
                index: j,
                reason: "K1 and K3 recurrences disagree on the identifier's top half",
            });
        }
        Ok(high)
    }

    /// Bottom-half identifier bits visible through pair `(j, j+1)`.
    fn low_bits(&self, cur: &RecoveredMaterial, next: &RecoveredMaterial) -> Vec<ExposedBits> {
        let width = self.width;
        let half = width.half_mask();

        let valid = cur.pseudonym & next.pseudonym & half;
        let mut out = vec![ExposedBits {
            mask: valid,
            value: (cur.key4_masked ^ next.key4_masked ^ cur.nonces.n1) & valid,
        }];

        if self.key2_route {
            let valid = width.not(cur.pseudonym) & width.not(next.pseudonym) & half;
            out.push(ExposedBits {
                mask: valid,
                value: (cur.key2_masked ^ next.key2_masked ^ cur.nonces.n2) & valid,
            });
        }
        out
    }
}

impl IdentifierSolver for EmapSolver {
    fn solve(&self, history: &TranscriptHistory) -> Result<Word> {
        let width = self.width;
        let material: Vec<RecoveredMaterial> = history
            .entries()
            .iter()
            .map(|entry| RecoveredMaterial::from_entry(width, entry))
            .collect();

        let mut high: Option<Word> = None;
        let mut low = ExposedBits::default();

        for j in history.chained_pairs() {
            let (cur, next) = (&material[j], &material[j + 1]);

            let pair_high = self.high_half(j, cur, next).map_err(|e| {
                warn!(index = j, error = %e, "rejecting EMAP history");
                e
            })?;
            match high {
                None => high = Some(pair_high),
                Some(h) if h != pair_high => {
                    warn!(index = j, "pairs disagree on the identifier's top half");
                    return Err(Error::InconsistentHistory {
                        index: j,
                        reason: "pairs disagree on the identifier's top half",
                    });
                }
                Some(_) => {}
            }

            for seen in self.low_bits(cur, next) {
                let overlap = low.mask & seen.mask;
                if (low.value ^ seen.value) & overlap != 0 {
                    return Err(Error::InconsistentHistory {
                        index: j,
                        reason: "pairs disagree on the identifier's bottom half",
                    });
                }
                low.mask |= seen.mask;
                low.value |= seen.value;
            }

            if low.mask == width.half_mask() {
                debug!(pairs_used = j + 1, "EMAP bottom half complete");
                break;
            }
        }

        let Some(high) = high else {
            return Err(Error::InsufficientEvidence {
                unresolved: width.bits(),
                entries: history.len(),
            });
        };
        let unresolved = width.half() - low.mask.count_ones();
        if unresolved > 0 {
            return Err(Error::InsufficientEvidence {
                unresolved,
                entries: history.len(),
            });
        }
        Ok(width.join_halves(high, low.value))
    }
}
