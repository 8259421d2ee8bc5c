//! Passive identifier recovery against a live oracle.
//!
//! The attack eavesdrops round after round, re-solving the growing history
//! after every accepted round and stopping as soon as the tag confirms a
//! candidate. Running out of rounds is a normal outcome.

use rand::RngCore;
use tracing::{debug, info, instrument};

use crate::compressor::Compressor;
use crate::history::TranscriptHistory;
use crate::oracle::ProtocolOracle;
use crate::protocol::Variant;
use crate::recovery::{EmapSolver, IdentifierSolver, MmapSolver, TieBreak};
use crate::width::{BitWidth, Word};

/// Round budget that recovers a 96-bit EMAP identifier with overwhelming
/// probability. MMAP needs far fewer (about 64).
pub const DEFAULT_MAX_ROUNDS: usize = 200;

#[derive(Clone, Debug)]
pub struct PassiveRecoveryResult {
    pub success: bool,
    pub identifier: Option<Word>,
    /// Rounds driven on the oracle, rejected ones included.
    pub rounds_used: usize,
    /// Rounds that made it into the history.
    pub accepted_rounds: usize,
    pub details: String,
}

impl PassiveRecoveryResult {
    pub fn failed(rounds: usize, accepted: usize, details: String) -> Self {
        Self {
            success: false,
            identifier: None,
            rounds_used: rounds,
            accepted_rounds: accepted,
            details,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PassiveAttack {
    max_rounds: usize,
    tie_break: TieBreak,
    key2_route: bool,
}

impl Default for PassiveAttack {
    fn default() -> Self {
        Self::new()
    }
}

impl PassiveAttack {
    pub fn new() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            tie_break: TieBreak::default(),
            key2_route: false,
        }
    }

    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_key2_route(mut self, enabled: bool) -> Self {
        self.key2_route = enabled;
        self
    }

    fn solver(&self, variant: Variant, width: BitWidth, compressor: Option<Compressor>) -> Box<dyn IdentifierSolver> {
        match variant {
            Variant::Mmap => Box::new(MmapSolver::new(width).with_tie_break(self.tie_break)),
            Variant::Emap => Box::new(
                EmapSolver::new(width, compressor.unwrap_or_default()).with_key2_route(self.key2_route),
            ),
        }
    }

    #[instrument(skip(self, oracle), fields(variant = %oracle.variant(), bits = oracle.width().bits()))]
    pub fn run<R: RngCore>(&self, oracle: &mut ProtocolOracle<R>) -> PassiveRecoveryResult {
        let solver = self.solver(oracle.variant(), oracle.width(), oracle.compressor());
        let mut history = TranscriptHistory::new();
        let mut last_error = None;

        for round in 1..=self.max_rounds {
            if history.observe(oracle).is_none() {
                continue;
            }
            match solver.solve(&history) {
                Ok(candidate) if oracle.verify_identifier(candidate) => {
                    info!(round, accepted = history.len(), "identifier recovered");
                    return PassiveRecoveryResult {
                        success: true,
                        identifier: Some(candidate),
                        rounds_used: round,
                        accepted_rounds: history.len(),
                        details: format!(
                            "{} identifier recovered after {} rounds",
                            oracle.variant(),
                            round
                        ),
                    };
                }
                Ok(candidate) => {
                    debug!(round, "tag refused candidate {:#x}", candidate);
                    last_error = Some("candidate refused by tag".to_string());
                }
                Err(e) => {
                    debug!(round, error = %e, "identifier not resolved yet");
                    last_error = Some(e.to_string());
                }
            }
        }

        PassiveRecoveryResult::failed(
            self.max_rounds,
            history.len(),
            format!(
                "no confirmed identifier within {} rounds: {}",
                self.max_rounds,
                last_error.unwrap_or_else(|| "no rounds observed".to_string())
            ),
        )
    }
}

/// Eavesdrop on at most `max_rounds` rounds and return the identifier once
/// the tag confirms it.
pub fn recover_identifier_passive<R: RngCore>(oracle: &mut ProtocolOracle<R>, max_rounds: usize) -> Option<Word> {
    PassiveAttack::new()
        .with_max_rounds(max_rounds)
        .run(oracle)
        .identifier
}
