//! Per-entry nonce recovery.
//!
//! EMAP leaks both nonces completely from a single entry: `A ⊕ P' = n1 ⊕ n2`
//! holds at every bit, `D` exposes `n2` wherever the pseudonym bit is 0 and
//! `B` exposes `¬n1` wherever it is 1. MMAP only leaks `n1` at the
//! pseudonym's zero bits; the rest is solved jointly with the identifier.

use crate::history::HistoryEntry;
use crate::state::Nonces;
use crate::width::{BitWidth, Word};

/// Bits of a word known at the positions set in `mask`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExposedBits {
    pub mask: Word,
    pub value: Word,
}

/// Both EMAP nonces of one accepted round.
pub fn emap_nonces(width: BitWidth, entry: &HistoryEntry) -> Nonces {
    let p = entry.pseudonym_before;
    let t = &entry.transcript;
    let sum = t.a ^ entry.pseudonym_after;
    let n1_where_set = width.not(t.b) & p;
    let n2 = (t.d & width.not(p)) | ((sum ^ n1_where_set) & p);
    Nonces {
        n1: width.truncate(sum ^ n2),
        n2: width.truncate(n2),
    }
}

/// The `n1` bits an MMAP entry exposes through `B`.
pub fn mmap_exposed_n1(width: BitWidth, entry: &HistoryEntry) -> ExposedBits {
    let mask = width.not(entry.pseudonym_before);
    ExposedBits {
        mask,
        value: entry.transcript.b & mask,
    }
}
