//! A simulated tag/reader pair that owns the secret state.
//!
//! [`ProtocolOracle::run_once`] plays a full honest round: the reader samples
//! nonces and builds the challenge, the tag checks it and answers. Only the
//! pseudonym is public; everything else in [`SecretState`] stays inside the
//! oracle apart from [`ProtocolOracle::verify_identifier`] and the explicit
//! [`ProtocolOracle::snapshot`] used to seed an impersonator.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::compressor::Compressor;
use crate::error::{Error, Result};
use crate::protocol::{Protocol, Transition, Variant};
use crate::state::{Nonces, SecretState};
use crate::transcript::{Challenge, Response, Transcript};
use crate::width::{BitWidth, Word, DEFAULT_BITS};

#[derive(Clone, Debug)]
pub struct OracleConfig {
    pub variant: Variant,
    pub bits: u32,
    pub compressor: Compressor,
    /// Fixed RNG seed; `None` draws one from the operating system.
    pub seed: Option<u64>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Emap,
            bits: DEFAULT_BITS,
            compressor: Compressor::default(),
            seed: None,
        }
    }
}

impl OracleConfig {
    pub fn new(variant: Variant, bits: u32) -> Self {
        Self {
            variant,
            bits,
            ..Default::default()
        }
    }

    pub fn with_compressor(mut self, compressor: Compressor) -> Self {
        self.compressor = compressor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(&self) -> Result<ProtocolOracle> {
        let rng = match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        ProtocolOracle::with_rng(self.variant, self.bits, self.compressor, rng)
    }
}

/// Fresh oracle with uniformly random secrets and the canonical compressor.
pub fn new_oracle(variant: Variant, bits: u32) -> Result<ProtocolOracle> {
    OracleConfig::new(variant, bits).build()
}

#[derive(Debug)]
pub struct ProtocolOracle<R: RngCore = ChaCha20Rng> {
    protocol: Box<dyn Protocol>,
    width: BitWidth,
    state: SecretState,
    rng: R,
    rounds: usize,
    accepted: usize,
}

impl<R: RngCore> ProtocolOracle<R> {
    /// Build an oracle whose secrets and nonces all come from `rng`.
    pub fn with_rng(variant: Variant, bits: u32, compressor: Compressor, mut rng: R) -> Result<Self> {
        let width = BitWidth::new(bits)?;
        let state = SecretState::random(width, &mut rng);
        Ok(Self {
            protocol: variant.protocol(compressor),
            width,
            state,
            rng,
            rounds: 0,
            accepted: 0,
        })
    }

    pub fn variant(&self) -> Variant {
        self.protocol.variant()
    }

    /// `F_p` strategy for EMAP, `None` for MMAP.
    pub fn compressor(&self) -> Option<Compressor> {
        self.protocol.compressor()
    }

    pub fn width(&self) -> BitWidth {
        self.width
    }

    /// The current pseudonym, sent in the clear at the start of each round.
    pub fn pseudonym(&self) -> Word {
        self.state.pseudonym
    }

    /// Rounds attempted so far, accepted or not.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn accepted_rounds(&self) -> usize {
        self.accepted
    }

    pub fn verify_identifier(&self, candidate: Word) -> bool {
        candidate == self.state.identifier
    }

    /// Copy of the full secret state, for the impersonation experiments.
    pub fn snapshot(&self) -> SecretState {
        self.state.clone()
    }

    /// One honest round. `None` if the tag rejected the challenge.
    pub fn run_once(&mut self) -> Option<Transcript> {
        self.run_once_with_interference(|_| {})
    }

    /// One round whose challenge passes through `tamper` on its way to the
    /// tag, as an active man-in-the-middle would see it.
    pub fn run_once_with_interference<F>(&mut self, tamper: F) -> Option<Transcript>
    where
        F: FnOnce(&mut Challenge),
    {
        let nonces = Nonces::random(self.width, &mut self.rng);
        let mut challenge = self.protocol.challenge(self.width, &self.state, nonces);
        tamper(&mut challenge);
        self.respond(challenge)
            .ok()
            .map(|response| Transcript::new(challenge, response))
    }

    /// Present an arbitrary challenge to the tag. The state only advances if
    /// the consistency check passes.
    pub fn respond(&mut self, challenge: Challenge) -> Result<Response> {
        self.rounds += 1;
        match self.protocol.transition(self.width, &self.state, &challenge) {
            Transition::Accepted { state, response } => {
                self.state = state;
                self.accepted += 1;
                Ok(response)
            }
            Transition::Rejected { received, expected } => {
                debug!(
                    variant = %self.variant(),
                    round = self.rounds,
                    "tag rejected challenge"
                );
                Err(Error::AuthenticationMismatch { received, expected })
            }
        }
    }

    /// Answer a forged reader challenge `(A, B, C)` with `(D, E)`.
    pub fn impersonate(&mut self, a: Word, b: Word, c: Word) -> Option<(Word, Word)> {
        self.respond(Challenge::new(a, b, c))
            .ok()
            .map(Response::into_pair)
    }
}
