//! Passive identifier recovery from a [`TranscriptHistory`].
//!
//! - [`EmapSolver`]: recovers both nonces per entry, then cancels the rotating
//!   keys between consecutive entries. The identifier's top half falls out of
//!   a single pair; the bottom half is accumulated bit by bit.
//! - [`MmapSolver`]: bit-by-bit guess-and-check from the LSB upward, carrying
//!   the addition in `E = (ID + P) ⊕ n1` through the already-fixed low bits.
//!
//! Both return the identifier the history implies. Confirming it against the
//! tag is the caller's job.

pub mod emap;
pub mod mmap;
pub mod nonce;

pub use emap::{EmapSolver, RecoveredMaterial};
pub use mmap::{MmapSolver, TieBreak};
pub use nonce::{emap_nonces, mmap_exposed_n1, ExposedBits};

use crate::error::Result;
use crate::history::TranscriptHistory;
use crate::width::Word;

pub trait IdentifierSolver {
    /// The identifier implied by `history`, or why it cannot be pinned down yet.
    fn solve(&self, history: &TranscriptHistory) -> Result<Word>;
}
