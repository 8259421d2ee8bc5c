//! Working bit width `k` and the fixed-width arithmetic built on it.
//!
//! Every protocol word is carried in a `u128` and masked back to `k` bits
//! after each modular operation, so `k` is bounded by [`MAX_BITS`].

use crate::error::{Error, Result};

/// A protocol word. Only the low `k` bits are ever set.
pub type Word = u128;

/// Widest supported `k`.
pub const MAX_BITS: u32 = Word::BITS;

/// Width used by the published protocol descriptions.
pub const DEFAULT_BITS: u32 = 96;

/// Validated working width `k` with its derived constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitWidth {
    bits: u32,
}

impl Default for BitWidth {
    fn default() -> Self {
        Self { bits: DEFAULT_BITS }
    }
}

impl BitWidth {
    /// `k` must be a positive multiple of 4 no larger than [`MAX_BITS`].
    pub fn new(bits: u32) -> Result<Self> {
        if bits == 0 || bits % 4 != 0 || bits > MAX_BITS {
            return Err(Error::InvalidWidth(bits));
        }
        Ok(Self { bits })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// `k / 2`, the width of each identifier half.
    pub fn half(&self) -> u32 {
        self.bits / 2
    }

    /// `k / 4`, the slot width `q` used by the EMAP update terms.
    pub fn quarter(&self) -> u32 {
        self.bits / 4
    }

    /// Number of nibbles in a word (equal to `q`).
    pub fn nibbles(&self) -> u32 {
        self.bits / 4
    }

    pub fn mask(&self) -> Word {
        low_mask(self.bits)
    }

    pub fn half_mask(&self) -> Word {
        low_mask(self.half())
    }

    pub fn quarter_mask(&self) -> Word {
        low_mask(self.quarter())
    }

    /// Reduce an arbitrary word to `k` bits.
    pub fn truncate(&self, x: Word) -> Word {
        x & self.mask()
    }

    /// `(a + b) mod 2^k`.
    pub fn add(&self, a: Word, b: Word) -> Word {
        a.wrapping_add(b) & self.mask()
    }

    /// `(a - b) mod 2^k`.
    pub fn sub(&self, a: Word, b: Word) -> Word {
        a.wrapping_sub(b) & self.mask()
    }

    /// Bitwise complement within `k` bits.
    pub fn not(&self, x: Word) -> Word {
        !x & self.mask()
    }

    /// Top `k/2` bits of `x`, shifted down.
    pub fn high_half(&self, x: Word) -> Word {
        (x >> self.half()) & self.half_mask()
    }

    /// Bottom `k/2` bits of `x`.
    pub fn low_half(&self, x: Word) -> Word {
        x & self.half_mask()
    }

    /// Inverse of the half split.
    pub fn join_halves(&self, high: Word, low: Word) -> Word {
        ((high & self.half_mask()) << self.half()) | (low & self.half_mask())
    }
}

/// Mask with the low `bits` bits set; `bits` may equal [`MAX_BITS`].
pub fn low_mask(bits: u32) -> Word {
    if bits >= MAX_BITS {
        Word::MAX
    } else {
        (1 << bits) - 1
    }
}

pub fn bit(x: Word, i: u32) -> bool {
    (x >> i) & 1 != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_validation() {
        assert_eq!(BitWidth::new(10), Err(Error::InvalidWidth(10)));
        assert_eq!(BitWidth::new(0), Err(Error::InvalidWidth(0)));
        assert_eq!(BitWidth::new(132), Err(Error::InvalidWidth(132)));
        assert!(BitWidth::new(32).is_ok());
        assert!(BitWidth::new(96).is_ok());
        assert!(BitWidth::new(128).is_ok());
    }

    #[test]
    fn test_derived_constants() {
        let w = BitWidth::new(96).unwrap();
        assert_eq!(w.half(), 48);
        assert_eq!(w.quarter(), 24);
        assert_eq!(w.mask(), (1u128 << 96) - 1);
        assert_eq!(w.half_mask(), (1u128 << 48) - 1);
        assert_eq!(BitWidth::new(128).unwrap().mask(), u128::MAX);
    }

    #[test]
    fn test_modular_arithmetic_wraps() {
        let w = BitWidth::new(32).unwrap();
        assert_eq!(w.add(0xFFFF_FFFF, 1), 0);
        assert_eq!(w.sub(0, 1), 0xFFFF_FFFF);

        let full = BitWidth::new(128).unwrap();
        assert_eq!(full.add(u128::MAX, 2), 1);
        assert_eq!(full.sub(1, 2), u128::MAX);
    }

    #[test]
    fn test_halves_roundtrip() {
        let w = BitWidth::new(64).unwrap();
        let x = 0xDEAD_BEEF_CAFE_BABEu128;
        assert_eq!(w.high_half(x), 0xDEAD_BEEF);
        assert_eq!(w.low_half(x), 0xCAFE_BABE);
        assert_eq!(w.join_halves(w.high_half(x), w.low_half(x)), x);
    }

    #[test]
    fn test_not_stays_in_width() {
        let w = BitWidth::new(12).unwrap();
        assert_eq!(w.not(0x0F0), 0xF0F);
    }
}
