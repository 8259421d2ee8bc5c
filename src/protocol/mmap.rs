use super::{Protocol, Variant};
use crate::state::{Nonces, SecretState};
use crate::transcript::{Challenge, Response};
use crate::width::{BitWidth, Word};

/// MMAP round logic. All additions are taken mod `2^k`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mmap;

impl Protocol for Mmap {
    fn variant(&self) -> Variant {
        Variant::Mmap
    }

    fn challenge(&self, width: BitWidth, s: &SecretState, nonces: Nonces) -> Challenge {
        Challenge {
            a: s.pseudonym ^ s.key1 ^ nonces.n1,
            b: (s.pseudonym & s.key2) | nonces.n1,
            c: width.add(width.add(s.pseudonym, s.key3), nonces.n2),
        }
    }

    fn extract_nonces(&self, width: BitWidth, s: &SecretState, challenge: &Challenge) -> Nonces {
        Nonces {
            n1: challenge.a ^ s.pseudonym ^ s.key1,
            n2: width.sub(width.sub(challenge.c, s.pseudonym), s.key3),
        }
    }

    fn expected_b(&self, _width: BitWidth, s: &SecretState, n1: Word) -> Word {
        (s.pseudonym & s.key2) | n1
    }

    fn response(&self, width: BitWidth, s: &SecretState, nonces: Nonces) -> Response {
        Response {
            d: (s.pseudonym | s.key4) & nonces.n2,
            e: width.add(s.identifier, s.pseudonym) ^ nonces.n1,
        }
    }

    fn update(&self, width: BitWidth, s: &SecretState, nonces: Nonces) -> SecretState {
        let Nonces { n1, n2 } = nonces;
        let id = s.identifier;
        SecretState {
            identifier: id,
            pseudonym: width.add(s.pseudonym, n1 ^ n2) ^ id,
            key1: s.key1 ^ n2 ^ width.add(s.key3, id),
            key2: s.key2 ^ n2 ^ width.add(s.key4, id),
            key3: width.add(s.key3 ^ n1, s.key1 ^ id),
            key4: width.add(s.key4 ^ n1, s.key2 ^ id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_state() -> SecretState {
        SecretState {
            identifier: 0x0000_00F0,
            pseudonym: 0x1234_5678,
            key1: 0x1111_1111,
            key2: 0x2222_2222,
            key3: 0xFFFF_FFFF,
            key4: 0x4444_4444,
        }
    }

    #[test]
    fn test_messages_on_fixed_state() {
        let width = BitWidth::new(32).unwrap();
        let s = fixed_state();
        let nonces = Nonces::new(0x0F0F_0F0F, 0x0000_0002);

        let c = Mmap.challenge(width, &s, nonces);
        assert_eq!(c.a, 0x1234_5678 ^ 0x1111_1111 ^ 0x0F0F_0F0F);
        assert_eq!(c.b, (0x1234_5678 & 0x2222_2222) | 0x0F0F_0F0F);
        // 0x12345678 + 0xFFFFFFFF + 2 wraps to 0x12345679
        assert_eq!(c.c, 0x1234_5679);

        let r = Mmap.response(width, &s, nonces);
        assert_eq!(r.d, (0x1234_5678 | 0x4444_4444) & 0x2);
        assert_eq!(r.e, 0x1234_5768 ^ 0x0F0F_0F0F);
    }

    #[test]
    fn test_update_on_fixed_state() {
        let width = BitWidth::new(32).unwrap();
        let s = fixed_state();
        let nonces = Nonces::new(0x0F0F_0F0F, 0x0000_0002);
        let next = Mmap.update(width, &s, nonces);

        assert_eq!(next.identifier, s.identifier);
        assert_eq!(
            next.pseudonym,
            (0x1234_5678u128 + (0x0F0F_0F0F ^ 0x2)) & 0xFFFF_FFFF ^ 0xF0
        );
        assert_eq!(next.key1, 0x1111_1111 ^ 0x2 ^ 0xEF);
        assert_eq!(next.key2, 0x2222_2222 ^ 0x2 ^ 0x4444_4534);
        assert_eq!(
            next.key3,
            ((0xFFFF_FFFFu128 ^ 0x0F0F_0F0F) + (0x1111_1111 ^ 0xF0)) & 0xFFFF_FFFF
        );
        assert_eq!(next.key4, (0x4444_4444u128 ^ 0x0F0F_0F0F) + (0x2222_2222 ^ 0xF0));
    }
}
