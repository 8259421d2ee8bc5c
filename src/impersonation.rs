//! Active attack: answer reader challenges in place of the tag.
//!
//! The impersonator only holds secret material an attacker already
//! compromised. It runs the same transition as the genuine tag, so a
//! successful answer also advances its copy of the keys in lockstep with
//! the reader's.

use tracing::debug;

use crate::compressor::Compressor;
use crate::error::Result;
use crate::protocol::{Protocol, Transition, Variant};
use crate::state::SecretState;
use crate::transcript::{Challenge, Response};
use crate::width::{BitWidth, Word};

#[derive(Debug)]
pub struct ImpersonationOracle {
    protocol: Box<dyn Protocol>,
    width: BitWidth,
    state: SecretState,
    answered: usize,
}

impl ImpersonationOracle {
    pub fn new(variant: Variant, bits: u32, compressor: Compressor, state: SecretState) -> Result<Self> {
        Ok(Self {
            protocol: variant.protocol(compressor),
            width: BitWidth::new(bits)?,
            state,
            answered: 0,
        })
    }

    pub fn state(&self) -> &SecretState {
        &self.state
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    /// `(D, E)` for a challenge that passes the `B` check; `None` otherwise,
    /// with the held state left as it was.
    pub fn respond(&mut self, challenge: Challenge) -> Option<Response> {
        match self.protocol.transition(self.width, &self.state, &challenge) {
            Transition::Accepted { state, response } => {
                self.state = state;
                self.answered += 1;
                Some(response)
            }
            Transition::Rejected { .. } => {
                debug!(variant = %self.protocol.variant(), "impersonator refused challenge");
                None
            }
        }
    }

    pub fn impersonate(&mut self, a: Word, b: Word, c: Word) -> Option<(Word, Word)> {
        self.respond(Challenge::new(a, b, c)).map(Response::into_pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{OracleConfig, ProtocolOracle};

    fn pair(variant: Variant, compressor: Compressor, seed: u64) -> (ProtocolOracle, ImpersonationOracle) {
        let oracle = OracleConfig::new(variant, 96)
            .with_compressor(compressor)
            .with_seed(seed)
            .build()
            .unwrap();
        let imp = ImpersonationOracle::new(variant, 96, compressor, oracle.snapshot()).unwrap();
        (oracle, imp)
    }

    #[test]
    fn test_answers_match_genuine_tag() {
        for (variant, compressor) in [
            (Variant::Emap, Compressor::XorFold),
            (Variant::Emap, Compressor::NibbleParity),
            (Variant::Mmap, Compressor::XorFold),
        ] {
            let (mut oracle, mut imp) = pair(variant, compressor, 81);
            for _ in 0..25 {
                let t = oracle.run_once().unwrap();
                assert_eq!(imp.impersonate(t.a, t.b, t.c), Some((t.d, t.e)));
                assert_eq!(imp.state(), &oracle.snapshot());
            }
            assert_eq!(imp.answered(), 25);
        }
    }

    #[test]
    fn test_bad_challenge_leaves_state() {
        let (mut oracle, mut imp) = pair(Variant::Emap, Compressor::XorFold, 82);
        let t = oracle.run_once().unwrap();
        let before = imp.state().clone();
        assert_eq!(imp.impersonate(t.a, t.b ^ (1 << 95), t.c), None);
        assert_eq!(imp.state(), &before);
        assert_eq!(imp.answered(), 0);
    }

    #[test]
    fn test_invalid_width() {
        let state = SecretState {
            identifier: 0,
            pseudonym: 0,
            key1: 0,
            key2: 0,
            key3: 0,
            key4: 0,
        };
        assert!(ImpersonationOracle::new(Variant::Emap, 10, Compressor::XorFold, state).is_err());
    }
}
