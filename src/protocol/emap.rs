use super::{Protocol, Variant};
use crate::compressor::Compressor;
use crate::state::{Nonces, SecretState};
use crate::transcript::{Challenge, Response};
use crate::width::{BitWidth, Word};

/// EMAP round logic, parameterised by the `F_p` strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Emap {
    compressor: Compressor,
}

/// The four XOR masks folded into the keys by one EMAP update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateTerms {
    pub term1: Word,
    pub term2: Word,
    pub term3: Word,
    pub term4: Word,
}

impl Emap {
    pub fn new(compressor: Compressor) -> Self {
        Self { compressor }
    }

    /// Pack the identifier halves and the key digests into four `k`-bit
    /// terms of four `q`-bit slots each.
    pub fn update_terms(&self, width: BitWidth, s: &SecretState) -> UpdateTerms {
        let q = width.quarter();
        let id_high = width.high_half(s.identifier);
        let id_low = width.low_half(s.identifier);
        let fp = |key: Word| self.compressor.slot(width, key);
        let (fp1, fp2, fp3, fp4) = (fp(s.key1), fp(s.key2), fp(s.key3), fp(s.key4));

        UpdateTerms {
            term1: (id_high << (2 * q)) | (fp4 << q) | fp3,
            term2: (fp1 << (3 * q)) | (fp4 << (2 * q)) | id_low,
            term3: (id_high << (2 * q)) | (fp4 << q) | fp2,
            term4: (fp3 << (3 * q)) | (fp1 << (2 * q)) | id_low,
        }
    }
}

impl Protocol for Emap {
    fn variant(&self) -> Variant {
        Variant::Emap
    }

    fn compressor(&self) -> Option<Compressor> {
        Some(self.compressor)
    }

    fn challenge(&self, _width: BitWidth, s: &SecretState, nonces: Nonces) -> Challenge {
        Challenge {
            a: s.pseudonym ^ s.key1 ^ nonces.n1,
            b: (s.pseudonym | s.key2) ^ nonces.n1,
            c: s.pseudonym ^ s.key3 ^ nonces.n2,
        }
    }

    fn extract_nonces(&self, _width: BitWidth, s: &SecretState, challenge: &Challenge) -> Nonces {
        Nonces {
            n1: challenge.a ^ s.pseudonym ^ s.key1,
            n2: challenge.c ^ s.pseudonym ^ s.key3,
        }
    }

    fn expected_b(&self, _width: BitWidth, s: &SecretState, n1: Word) -> Word {
        (s.pseudonym | s.key2) ^ n1
    }

    fn response(&self, _width: BitWidth, s: &SecretState, nonces: Nonces) -> Response {
        Response {
            d: (s.pseudonym & s.key4) ^ nonces.n2,
            e: ((s.pseudonym & nonces.n1) | nonces.n2) ^ s.identifier ^ s.key_xor(),
        }
    }

    fn update(&self, width: BitWidth, s: &SecretState, nonces: Nonces) -> SecretState {
        let Nonces { n1, n2 } = nonces;
        let terms = self.update_terms(width, s);
        SecretState {
            identifier: s.identifier,
            pseudonym: s.pseudonym ^ n2 ^ s.key1,
            key1: s.key1 ^ n2 ^ terms.term1,
            key2: s.key2 ^ n2 ^ terms.term2,
            key3: s.key3 ^ n1 ^ terms.term3,
            key4: s.key4 ^ n1 ^ terms.term4,
        }
    }
}
