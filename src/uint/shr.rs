//! [`Uint`] bitwise right shift operations.

use super::Uint;
use crate::limb::Limb;

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Computes `self >> 1`.
    pub const fn shr1(&self) -> Self {
        let mut limbs = [Limb::ZERO; LIMBS];
        let mut carry = 0;
        let mut i = LIMBS;

        while i > 0 {
            i -= 1;
            let w = self.limbs[i].0;
            limbs[i] = Limb((w >> 1) | carry);
            carry = w << Limb::HI_BIT;
        }

        Self { limbs }
    }

    /// Computes `self >> shift`. `shift` must be below [`Uint::BITS`].
    ///
    /// NOTE: this operation is variable time with respect to `shift` *ONLY*.
    pub const fn shr_vartime(&self, shift: u32) -> Self {
        debug_assert!(shift < Self::BITS);
        let mut limbs = [Limb::ZERO; LIMBS];
        let shift_num = (shift / Limb::BITS) as usize;
        let rem = shift % Limb::BITS;

        let mut i = 0;
        while i < LIMBS - shift_num {
            let mut limb = self.limbs[i + shift_num].0 >> rem;
            // carry the spilled bits of the next-higher source limb
            if rem != 0 && i + shift_num + 1 < LIMBS {
                limb |= self.limbs[i + shift_num + 1].0 << (Limb::BITS - rem);
            }
            limbs[i] = Limb(limb);
            i += 1;
        }

        Self { limbs }
    }

    /// Computes `(lo, hi) >> shift`, returning the low half of the shifted
    /// pair. `shift` must not exceed [`Uint::BITS`]; the caller is
    /// responsible for any value bits above the low half. Variable time
    /// with respect to `shift` only.
    pub const fn shr_vartime_wide_lo(lower_upper: (Self, Self), shift: u32) -> Self {
        debug_assert!(shift <= Self::BITS);
        let (lower, upper) = lower_upper;

        if shift == Self::BITS {
            upper
        } else if shift == 0 {
            lower
        } else {
            lower
                .shr_vartime(shift)
                .bitor(&upper.shl_vartime(Self::BITS - shift))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::U128;

    #[test]
    fn shr1() {
        assert_eq!(U128::from_u64(3).shr1(), U128::ONE);
        assert_eq!(
            U128::from_u128(1 << 127).shr1(),
            U128::from_u128(1 << 126)
        );
    }

    #[test]
    fn shr_vartime() {
        let x = U128::from_u128(0x1234_5678_9ABC_DEF0_0000_0000_0000_0000);
        assert_eq!(x.shr_vartime(0), x);
        assert_eq!(x.shr_vartime(64), U128::from_u64(0x1234_5678_9ABC_DEF0));
        assert_eq!(x.shr_vartime(68), U128::from_u64(0x1234_5678_9ABC_DEF));
    }

    #[test]
    fn shr_vartime_wide_lo() {
        let lo = U128::from_u64(0xDEAD);
        let hi = U128::from_u64(0xBEEF);
        assert_eq!(U128::shr_vartime_wide_lo((lo, hi), 128), hi);
        assert_eq!(U128::shr_vartime_wide_lo((lo, hi), 0), lo);

        let shifted = U128::shr_vartime_wide_lo((U128::ZERO, U128::ONE), 64);
        assert_eq!(shifted, U128::from_u128(1 << 64));
    }
}
