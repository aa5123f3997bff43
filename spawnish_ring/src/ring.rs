// W-bit circular bit array stored as little-endian `u64` limbs.
//
// `RingState` is an unsigned integer of exactly `width` bits, indexed
// 0..width with wrap-around adjacency (bit width-1 neighbors bit 0). All
// operations re-mask to the configured width, so the invariant "every bit
// at position >= width is zero" holds at all times. Construction asserts
// `width >= 2`; a one-bit ring makes rotation degenerate.

use serde::{Deserialize, Serialize};

const LIMB_BITS: usize = 64;

/// A fixed-width unsigned integer interpreted as a circular bit array.
///
/// Limb 0 holds bits 0..64, limb 1 bits 64..128, and so on. The top limb
/// is partially used when `width` is not a multiple of 64; its unused high
/// bits are always zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingState {
    limbs: Vec<u64>,
    width: usize,
}

impl RingState {
    /// The all-zero state of the given width.
    ///
    /// Panics if `width < 2`.
    pub fn zero(width: usize) -> Self {
        assert!(width >= 2, "ring width must be at least 2, got {width}");
        RingState {
            limbs: vec![0; width.div_ceil(LIMB_BITS)],
            width,
        }
    }

    /// Build a state from a `u64`, keeping only the low `width` bits.
    pub fn from_u64(value: u64, width: usize) -> Self {
        let mut s = Self::zero(width);
        s.limbs[0] = value;
        s.apply_mask();
        s
    }

    /// Build a state from a `u128`, keeping only the low `width` bits.
    pub fn from_u128(value: u128, width: usize) -> Self {
        let mut s = Self::zero(width);
        s.limbs[0] = value as u64;
        if s.limbs.len() > 1 {
            s.limbs[1] = (value >> LIMB_BITS) as u64;
        }
        s.apply_mask();
        s
    }

    /// Interpret a big-endian byte string as an unsigned integer and keep
    /// its low `width` bits. The last byte of `bytes` supplies bits 0..8.
    pub fn from_bytes_be(bytes: &[u8], width: usize) -> Self {
        let mut s = Self::zero(width);
        for (i, &byte) in bytes.iter().rev().enumerate() {
            let bit_pos = i * 8;
            let limb = bit_pos / LIMB_BITS;
            if limb >= s.limbs.len() {
                break;
            }
            s.limbs[limb] |= (byte as u64) << (bit_pos % LIMB_BITS);
        }
        s.apply_mask();
        s
    }

    /// The configured ring width in bits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Read bit `i`. Panics if `i >= width`.
    pub fn bit(&self, i: usize) -> bool {
        assert!(i < self.width, "bit index {i} out of range for width {}", self.width);
        (self.limbs[i / LIMB_BITS] >> (i % LIMB_BITS)) & 1 == 1
    }

    /// Set bit `i` to 1. Panics if `i >= width`.
    pub fn set_bit(&mut self, i: usize) {
        assert!(i < self.width, "bit index {i} out of range for width {}", self.width);
        self.limbs[i / LIMB_BITS] |= 1u64 << (i % LIMB_BITS);
    }

    /// True if every bit is zero.
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u32 {
        self.limbs.iter().map(|l| l.count_ones()).sum()
    }

    /// Left shift by `k` bits, discarding anything shifted past the width.
    pub fn shl(&self, k: usize) -> Self {
        let mut out = Self::zero(self.width);
        if k >= self.width {
            return out;
        }
        let limb_shift = k / LIMB_BITS;
        let bit_shift = k % LIMB_BITS;
        for i in (limb_shift..out.limbs.len()).rev() {
            let mut v = self.limbs[i - limb_shift] << bit_shift;
            if bit_shift > 0 && i > limb_shift {
                v |= self.limbs[i - limb_shift - 1] >> (LIMB_BITS - bit_shift);
            }
            out.limbs[i] = v;
        }
        out.apply_mask();
        out
    }

    /// Circular rotation left by one bit: bit width-1 wraps to bit 0.
    pub fn rotate_left_1(&self) -> Self {
        let top = self.bit(self.width - 1);
        let mut out = Self::zero(self.width);
        let mut carry = 0u64;
        for (i, &limb) in self.limbs.iter().enumerate() {
            out.limbs[i] = (limb << 1) | carry;
            carry = limb >> (LIMB_BITS - 1);
        }
        out.apply_mask();
        if top {
            out.set_bit(0);
        }
        out
    }

    /// Circular rotation right by one bit: bit 0 wraps to bit width-1.
    pub fn rotate_right_1(&self) -> Self {
        let low = self.bit(0);
        let mut out = Self::zero(self.width);
        let mut carry = 0u64;
        for i in (0..self.limbs.len()).rev() {
            out.limbs[i] = (self.limbs[i] >> 1) | (carry << (LIMB_BITS - 1));
            carry = self.limbs[i] & 1;
        }
        if low {
            out.set_bit(self.width - 1);
        }
        out
    }

    /// Bitwise XOR. Panics if widths differ.
    pub fn xor(&self, other: &RingState) -> Self {
        assert_eq!(self.width, other.width, "xor requires equal widths");
        let mut out = self.clone();
        for (a, b) in out.limbs.iter_mut().zip(&other.limbs) {
            *a ^= b;
        }
        out
    }

    /// Bitwise OR. Panics if widths differ.
    pub fn or(&self, other: &RingState) -> Self {
        assert_eq!(self.width, other.width, "or requires equal widths");
        let mut out = self.clone();
        for (a, b) in out.limbs.iter_mut().zip(&other.limbs) {
            *a |= b;
        }
        out
    }

    /// Clear every bit at position >= width in the top limb.
    fn apply_mask(&mut self) {
        let used = self.width % LIMB_BITS;
        if used != 0 {
            let last = self.limbs.len() - 1;
            self.limbs[last] &= (1u64 << used) - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u64_masks_to_width() {
        let s = RingState::from_u64(0xFF, 4);
        assert!(s.bit(0) && s.bit(1) && s.bit(2) && s.bit(3));
        assert_eq!(s.count_ones(), 4);
    }

    #[test]
    fn from_u128_spans_two_limbs() {
        let s = RingState::from_u128(1u128 << 100, 128);
        assert!(s.bit(100));
        assert_eq!(s.count_ones(), 1);
    }

    #[test]
    fn from_bytes_be_little_end_is_last_byte() {
        // 0x0102 big-endian = bit 0 from the last byte, bit 8 from the first.
        let s = RingState::from_bytes_be(&[0x01, 0x02], 16);
        assert!(s.bit(1));
        assert!(s.bit(8));
        assert_eq!(s.count_ones(), 2);
    }

    #[test]
    fn from_bytes_be_truncates_to_width() {
        // 256 bits of ones masked down to 10.
        let s = RingState::from_bytes_be(&[0xFF; 32], 10);
        assert_eq!(s.count_ones(), 10);
    }

    #[test]
    fn shl_crosses_limb_boundary() {
        let s = RingState::from_u64(1, 128).shl(70);
        assert!(s.bit(70));
        assert_eq!(s.count_ones(), 1);
    }

    #[test]
    fn shl_discards_past_width() {
        let s = RingState::from_u64(0b11, 8).shl(7);
        // Bit 1 shifts to position 8 and falls off; bit 0 lands at 7.
        assert!(s.bit(7));
        assert_eq!(s.count_ones(), 1);
    }

    #[test]
    fn rotate_left_wraps_top_bit() {
        let s = RingState::from_u64(0x80, 8).rotate_left_1();
        assert!(s.bit(0));
        assert_eq!(s.count_ones(), 1);
    }

    #[test]
    fn rotate_right_wraps_low_bit() {
        let s = RingState::from_u64(1, 8).rotate_right_1();
        assert!(s.bit(7));
        assert_eq!(s.count_ones(), 1);
    }

    #[test]
    fn rotations_wrap_at_exact_limb_width() {
        let mut s = RingState::zero(64);
        s.set_bit(63);
        assert!(s.rotate_left_1().bit(0));
        let mut s = RingState::zero(64);
        s.set_bit(0);
        assert!(s.rotate_right_1().bit(63));
    }

    #[test]
    fn rotations_wrap_across_partial_top_limb() {
        // Width 65: top bit lives in the second limb's lowest position.
        let mut s = RingState::zero(65);
        s.set_bit(64);
        assert!(s.rotate_left_1().bit(0));
        let mut s = RingState::zero(65);
        s.set_bit(0);
        assert!(s.rotate_right_1().bit(64));
    }

    #[test]
    fn rotations_are_inverses() {
        let s = RingState::from_u128(0xDEAD_BEEF_CAFE, 100);
        assert_eq!(s.rotate_left_1().rotate_right_1(), s);
        assert_eq!(s.rotate_right_1().rotate_left_1(), s);
    }

    #[test]
    fn xor_and_or_combine_bitwise() {
        let a = RingState::from_u64(0b1100, 8);
        let b = RingState::from_u64(0b1010, 8);
        assert_eq!(a.xor(&b), RingState::from_u64(0b0110, 8));
        assert_eq!(a.or(&b), RingState::from_u64(0b1110, 8));
    }

    #[test]
    fn serde_round_trip() {
        let s = RingState::from_u128(0x1234_5678_9ABC, 200);
        let json = serde_json::to_string(&s).unwrap();
        let back: RingState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    #[should_panic(expected = "ring width must be at least 2")]
    fn width_one_is_rejected() {
        RingState::zero(1);
    }
}
