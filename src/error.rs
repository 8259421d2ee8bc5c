use thiserror::Error;

use crate::width::Word;

/// Errors surfaced by the oracles and the recovery engines.
///
/// None of these are panics: a rejected round or an unresolved bit is an
/// ordinary outcome that the caller can retry with more rounds.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("bit width {0} is not a positive multiple of 4 no larger than 128")]
    InvalidWidth(u32),

    #[error("consistency check failed: B = {received:#x}, expected {expected:#x}")]
    AuthenticationMismatch { received: Word, expected: Word },

    #[error("insufficient evidence: {unresolved} bit(s) unresolved after {entries} transcript(s)")]
    InsufficientEvidence { unresolved: u32, entries: usize },

    #[error("identifier bit {bit} is ambiguous: both candidates fit every exposing run")]
    AmbiguousBit { bit: u32 },

    #[error("transcript history is inconsistent at entry {index}: {reason}")]
    InconsistentHistory { index: usize, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = Error::InvalidWidth(10);
        assert!(e.to_string().contains("10"));

        let e = Error::AuthenticationMismatch {
            received: 0xAB,
            expected: 0xAA,
        };
        assert_eq!(e.to_string(), "consistency check failed: B = 0xab, expected 0xaa");

        let e = Error::InsufficientEvidence {
            unresolved: 3,
            entries: 17,
        };
        assert!(e.to_string().contains("3 bit(s)"));
        assert!(e.to_string().contains("17 transcript(s)"));
    }
}
