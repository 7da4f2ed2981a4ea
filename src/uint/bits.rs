//! [`Uint`] bit manipulation.

use super::Uint;
use crate::{ct::CtChoice, limb::Limb};

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Returns `true` if the bit at position `index` is set, `false`
    /// otherwise (including out-of-range positions).
    #[inline(always)]
    pub const fn bit_vartime(&self, index: u32) -> bool {
        if index >= Self::BITS {
            false
        } else {
            self.limbs[(index / Limb::BITS) as usize].bit_vartime(index % Limb::BITS)
        }
    }

    /// Get the value of the bit at position `index` as a truthy or falsy
    /// [`CtChoice`], without revealing which limb was inspected. Returns the
    /// falsy value for indices out of range.
    pub const fn bit(&self, index: u32) -> CtChoice {
        let limb_num = (index / Limb::BITS) as usize;
        let index_in_limb = index % Limb::BITS;
        let index_mask = 1 << index_in_limb;

        let mut result = 0;
        let mut i = 0;

        while i < LIMBS {
            let bit = self.limbs[i].0 & index_mask;
            let is_right_limb = CtChoice::from_usize_eq(i, limb_num);
            result |= is_right_limb.if_true_word(bit);
            i += 1;
        }

        CtChoice::from_word_lsb(result >> index_in_limb)
    }

    /// Sets the bit at `index` to 0 or 1 depending on `bit_value`, without
    /// revealing which limb was written. `index` must be below
    /// [`Uint::BITS`].
    pub const fn set_bit(self, index: u32, bit_value: CtChoice) -> Self {
        let mut result = self;
        let limb_num = (index / Limb::BITS) as usize;
        let index_in_limb = index % Limb::BITS;
        let index_mask = 1 << index_in_limb;

        let mut i = 0;
        while i < LIMBS {
            let is_right_limb = CtChoice::from_usize_eq(i, limb_num);
            let old_limb = result.limbs[i].0;
            let new_limb = bit_value.select_word(old_limb & !index_mask, old_limb | index_mask);
            result.limbs[i] = Limb(is_right_limb.select_word(old_limb, new_limb));
            i += 1;
        }
        result
    }

    /// Calculate the number of bits needed to represent this number: the
    /// index of the highest set bit plus one, and 0 for the value 0. Runs in
    /// variable time.
    pub const fn bits(&self) -> u32 {
        let mut i = LIMBS - 1;
        while i > 0 && self.limbs[i].0 == 0 {
            i -= 1;
        }

        let limb = self.limbs[i];
        Limb::BITS * (i as u32 + 1) - limb.leading_zeros()
    }

    /// Computes the bitwise OR of `self` and `rhs`.
    pub const fn bitor(&self, rhs: &Self) -> Self {
        let mut limbs = [Limb::ZERO; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            limbs[i] = Limb(self.limbs[i].0 | rhs.limbs[i].0);
            i += 1;
        }

        Self { limbs }
    }

    /// Keep the low `k` bits of `self`, zeroing the rest: the remainder
    /// modulo `2^k`. `k` must not exceed [`Uint::BITS`]; variable-time with
    /// respect to `k` only.
    pub const fn rem2k_vartime(&self, k: u32) -> Self {
        debug_assert!(k <= Self::BITS);
        let mut limbs = [Limb::ZERO; LIMBS];
        let full = (k / Limb::BITS) as usize;
        let partial = k % Limb::BITS;

        let mut i = 0;
        while i < LIMBS {
            if i < full {
                limbs[i] = self.limbs[i];
            } else if i == full && partial != 0 {
                limbs[i] = Limb(self.limbs[i].0 & ((1 << partial) - 1));
            }
            i += 1;
        }

        Self { limbs }
    }
}
