//! # umap-attacks - cryptanalysis of ultralightweight RFID authentication
//!
//! Simulates the MMAP and EMAP mutual-authentication protocols as
//! secret-holding oracles and implements the attacks that break them:
//!
//! 1. **Passive identifier recovery** (`recovery`, `attack`) - an eavesdropper
//!    logs successive transcripts and solves for the tag's static identifier
//! 2. **Impersonation** (`impersonation`) - answering reader challenges from
//!    compromised key material while staying in sync with the reader
//!
//! ## Modules
//!
//! - [`width`] - Working width `k` and masked fixed-width arithmetic
//! - [`compressor`] - The two `F_p` digest strategies used by EMAP
//! - [`protocol`] - MMAP/EMAP message formulas, key updates, round transition
//! - [`oracle`] - Stateful tag simulation with an injected RNG
//! - [`history`] - Append-only transcript log
//! - [`recovery`] - Nonce and identifier recovery engines
//! - [`attack`] - Passive attack driver
//! - [`impersonation`] - Active attack oracle
//!
//! ## Example
//!
//! ```rust
//! use umap_attacks::{recover_identifier_passive, OracleConfig, Variant};
//!
//! let mut oracle = OracleConfig::new(Variant::Emap, 96).with_seed(7).build().unwrap();
//! let id = recover_identifier_passive(&mut oracle, 200).unwrap();
//! assert!(oracle.verify_identifier(id));
//! ```

pub mod attack;
pub mod compressor;
pub mod error;
pub mod history;
pub mod impersonation;
pub mod oracle;
pub mod protocol;
pub mod recovery;
pub mod state;
pub mod transcript;
pub mod width;

pub use attack::{recover_identifier_passive, PassiveAttack, PassiveRecoveryResult};
pub use compressor::Compressor;
pub use error::{Error, Result};
pub use history::{HistoryEntry, TranscriptHistory};
pub use impersonation::ImpersonationOracle;
pub use oracle::{new_oracle, OracleConfig, ProtocolOracle};
pub use protocol::{Protocol, Transition, Variant};
pub use recovery::{EmapSolver, IdentifierSolver, MmapSolver, TieBreak};
pub use state::{Nonces, SecretState};
pub use transcript::{Challenge, Response, Transcript};
pub use width::{BitWidth, Word};
