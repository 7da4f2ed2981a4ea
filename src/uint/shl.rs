//! [`Uint`] bitwise left shift operations.

use super::Uint;
use crate::limb::Limb;

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Computes `self << 1`, discarding the shifted-out bit.
    pub const fn shl1(&self) -> Self {
        let mut limbs = [Limb::ZERO; LIMBS];
        let mut carry = 0;
        let mut i = 0;

        while i < LIMBS {
            let w = self.limbs[i].0;
            limbs[i] = Limb((w << 1) | carry);
            carry = w >> Limb::HI_BIT;
            i += 1;
        }

        Self { limbs }
    }

    /// Computes `self << shift`, discarding shifted-out bits. `shift` must
    /// be below [`Uint::BITS`].
    ///
    /// NOTE: this operation is variable time with respect to `shift` *ONLY*.
    pub const fn shl_vartime(&self, shift: u32) -> Self {
        debug_assert!(shift < Self::BITS);
        let mut limbs = [Limb::ZERO; LIMBS];
        let shift_num = (shift / Limb::BITS) as usize;
        let rem = shift % Limb::BITS;

        let mut i = LIMBS;
        while i > shift_num {
            i -= 1;
            let mut limb = self.limbs[i - shift_num].0 << rem;
            // carry the spilled bits of the next-lower source limb
            if rem != 0 && i > shift_num {
                limb |= self.limbs[i - shift_num - 1].0 >> (Limb::BITS - rem);
            }
            limbs[i] = Limb(limb);
        }

        Self { limbs }
    }

    /// Computes `(lo, hi) << shift` across a wide pair. `shift` must be
    /// below `2 * Uint::BITS`; variable time with respect to `shift` only.
    pub const fn shl_vartime_wide(lower_upper: (Self, Self), shift: u32) -> (Self, Self) {
        debug_assert!(shift < 2 * Self::BITS);
        let (lower, upper) = lower_upper;

        if shift >= Self::BITS {
            let upper = lower.shl_vartime(shift - Self::BITS);
            (Self::ZERO, upper)
        } else if shift == 0 {
            (lower, upper)
        } else {
            let new_lower = lower.shl_vartime(shift);
            let upper_lo = lower.shr_vartime(Self::BITS - shift);
            let upper_hi = upper.shl_vartime(shift);
            (new_lower, upper_lo.bitor(&upper_hi))
        }
    }
}
