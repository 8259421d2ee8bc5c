use rand::{Rng, RngCore};

use crate::width::{BitWidth, Word};

/// Secret material held by a tag.
///
/// `identifier` is fixed for the tag's lifetime. The pseudonym and the four
/// keys are replaced together on every accepted round; a new state is built
/// rather than patched in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretState {
    pub identifier: Word,
    pub pseudonym: Word,
    pub key1: Word,
    pub key2: Word,
    pub key3: Word,
    pub key4: Word,
}

impl SecretState {
    /// Sample every field uniformly over `[0, 2^k)`.
    pub fn random(width: BitWidth, rng: &mut impl RngCore) -> Self {
        let mut sample = || width.truncate(rng.gen::<Word>());
        Self {
            identifier: sample(),
            pseudonym: sample(),
            key1: sample(),
            key2: sample(),
            key3: sample(),
            key4: sample(),
        }
    }

    /// XOR of the four keys, as folded into the EMAP `E` message.
    pub fn key_xor(&self) -> Word {
        self.key1 ^ self.key2 ^ self.key3 ^ self.key4
    }
}

/// Per-round session nonces. Never stored in a [`SecretState`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Nonces {
    pub n1: Word,
    pub n2: Word,
}

impl Nonces {
    pub fn new(n1: Word, n2: Word) -> Self {
        Self { n1, n2 }
    }

    pub fn random(width: BitWidth, rng: &mut impl RngCore) -> Self {
        Self {
            n1: width.truncate(rng.gen::<Word>()),
            n2: width.truncate(rng.gen::<Word>()),
        }
    }
}
