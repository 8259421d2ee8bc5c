//! The nonlinear compressor `F_p` used inside the EMAP key update.
//!
//! Two incompatible definitions of `F_p` circulate for EMAP. Both are kept
//! as named strategies; neither is silently substituted for the other.
//!
//! - [`Compressor::XorFold`] XORs every nibble of the word together and
//!   yields one 4-bit value: `1011 0110 1000` folds to `0101`.
//! - [`Compressor::NibbleParity`] reduces each nibble to its parity bit and
//!   packs the `k/4` bits, nibble `i` landing on bit `i`.

use crate::width::{BitWidth, Word};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compressor {
    /// XOR of all `k/4` nibbles, a single nibble result.
    #[default]
    XorFold,
    /// One parity bit per nibble, `k/4` bits in total.
    NibbleParity,
}

impl Compressor {
    /// Apply `F_p` to the low `k` bits of `z`.
    pub fn apply(&self, width: BitWidth, z: Word) -> Word {
        let z = width.truncate(z);
        match self {
            Compressor::XorFold => (0..width.nibbles()).fold(0, |acc, i| acc ^ nibble(z, i)),
            Compressor::NibbleParity => (0..width.nibbles()).fold(0, |acc, i| {
                let parity = (nibble(z, i).count_ones() & 1) as Word;
                acc | (parity << i)
            }),
        }
    }

    /// Number of meaningful output bits at `width`.
    pub fn output_bits(&self, width: BitWidth) -> u32 {
        match self {
            Compressor::XorFold => 4,
            Compressor::NibbleParity => width.nibbles(),
        }
    }

    /// `F_p(z)` clipped to a `q`-bit slot of an update term.
    pub fn slot(&self, width: BitWidth, z: Word) -> Word {
        self.apply(width, z) & width.quarter_mask()
    }
}

fn nibble(z: Word, i: u32) -> Word {
    (z >> (4 * i)) & 0xF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_fold_literal_example() {
        let w12 = BitWidth::new(12).unwrap();
        assert_eq!(Compressor::XorFold.apply(w12, 0xB68), 0x5);

        let w96 = BitWidth::new(96).unwrap();
        assert_eq!(Compressor::XorFold.apply(w96, 0xB68), 0x5);
    }

    #[test]
    fn test_xor_fold_cancels_repeated_nibbles() {
        let w = BitWidth::new(32).unwrap();
        assert_eq!(Compressor::XorFold.apply(w, 0xAAAA_AAAA), 0);
        assert_eq!(Compressor::XorFold.apply(w, 0x0000_00F0), 0xF);
    }

    #[test]
    fn test_nibble_parity_packs_one_bit_per_nibble() {
        let w12 = BitWidth::new(12).unwrap();
        // 1011 -> 1, 0110 -> 0, 1000 -> 1, nibble 0 on bit 0
        assert_eq!(Compressor::NibbleParity.apply(w12, 0xB68), 0b101);

        let w32 = BitWidth::new(32).unwrap();
        assert_eq!(Compressor::NibbleParity.apply(w32, 0x1111_1111), 0xFF);
        assert_eq!(Compressor::NibbleParity.apply(w32, 0x3333_3333), 0);
    }

    #[test]
    fn test_output_fits_declared_width() {
        let w = BitWidth::new(96).unwrap();
        let z = w.mask();
        for c in [Compressor::XorFold, Compressor::NibbleParity] {
            let out = c.apply(w, z ^ 0x1234_5678_9ABC);
            assert!(out < (1u128 << c.output_bits(w)));
        }
    }

    #[test]
    fn test_slot_clips_to_quarter_width() {
        let w8 = BitWidth::new(8).unwrap();
        // q = 2, so a 4-bit fold is clipped to its low two bits
        assert_eq!(Compressor::XorFold.apply(w8, 0x0F), 0xF);
        assert_eq!(Compressor::XorFold.slot(w8, 0x0F), 0x3);
    }
}
