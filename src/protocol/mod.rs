//! Round logic of the two protocol families.
//!
//! A round is modelled as a pure transition over a [`SecretState`]: the tag
//! recovers the nonces from the challenge, checks `B`, and either accepts
//! (yielding the response and the next state) or rejects (yielding nothing
//! and leaving the state alone). [`Protocol`] supplies the message and
//! update formulas; the transition itself is shared.

mod emap;
mod mmap;

pub use emap::{Emap, UpdateTerms};
pub use mmap::Mmap;

use std::fmt;

use crate::compressor::Compressor;
use crate::error::Error;
use crate::state::{Nonces, SecretState};
use crate::transcript::{Challenge, Response};
use crate::width::{BitWidth, Word};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Arithmetic variant: XOR, AND, OR and addition mod `2^k`.
    Mmap,
    /// Purely bitwise variant with the `F_p` compressor in its key update.
    Emap,
}

impl Variant {
    /// Instantiate the round logic. `compressor` only matters for EMAP.
    pub fn protocol(self, compressor: Compressor) -> Box<dyn Protocol> {
        match self {
            Variant::Mmap => Box::new(Mmap),
            Variant::Emap => Box::new(Emap::new(compressor)),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Mmap => write!(f, "MMAP"),
            Variant::Emap => write!(f, "EMAP"),
        }
    }
}

/// Outcome of presenting a challenge to a tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Accepted { state: SecretState, response: Response },
    Rejected { received: Word, expected: Word },
}

impl Transition {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Transition::Accepted { .. })
    }

    pub fn into_result(self) -> Result<(SecretState, Response), Error> {
        match self {
            Transition::Accepted { state, response } => Ok((state, response)),
            Transition::Rejected { received, expected } => {
                Err(Error::AuthenticationMismatch { received, expected })
            }
        }
    }
}

/// Message and key-update formulas of one protocol family.
pub trait Protocol: fmt::Debug {
    fn variant(&self) -> Variant;

    fn compressor(&self) -> Option<Compressor> {
        None
    }

    /// Reader side: build `A || B || C` from the shared state and fresh nonces.
    fn challenge(&self, width: BitWidth, state: &SecretState, nonces: Nonces) -> Challenge;

    /// Tag side: extract `(n1', n2')` from `A` and `C`.
    fn extract_nonces(&self, width: BitWidth, state: &SecretState, challenge: &Challenge) -> Nonces;

    /// The value `B` must equal for the challenge to be accepted.
    fn expected_b(&self, width: BitWidth, state: &SecretState, n1: Word) -> Word;

    /// Tag side: `D || E`.
    fn response(&self, width: BitWidth, state: &SecretState, nonces: Nonces) -> Response;

    /// Next state, computed entirely from the old snapshot.
    fn update(&self, width: BitWidth, state: &SecretState, nonces: Nonces) -> SecretState;

    /// Steps 3 to 6 of a round, as seen by the tag.
    fn transition(&self, width: BitWidth, state: &SecretState, challenge: &Challenge) -> Transition {
        let nonces = self.extract_nonces(width, state, challenge);
        let expected = self.expected_b(width, state, nonces.n1);
        if challenge.b != expected {
            return Transition::Rejected {
                received: challenge.b,
                expected,
            };
        }
        Transition::Accepted {
            response: self.response(width, state, nonces),
            state: self.update(width, state, nonces),
        }
    }
}
