//! [`Uint`] subtraction operations.

use super::Uint;
use crate::limb::Limb;
use core::ops::{Sub, SubAssign};
use subtle::CtOption;

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Computes `self - (rhs + borrow)`, returning the result along with the
    /// new borrow. The borrow is a full mask, as in [`Limb::sbb`].
    #[inline(always)]
    pub const fn sbb(&self, rhs: &Self, mut borrow: Limb) -> (Self, Limb) {
        let mut limbs = [Limb::ZERO; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            let (w, b) = self.limbs[i].sbb(rhs.limbs[i], borrow);
            limbs[i] = w;
            borrow = b;
            i += 1;
        }

        (Self { limbs }, borrow)
    }

    /// Perform checked subtraction, returning the result when no underflow
    /// occurred.
    pub fn checked_sub(&self, rhs: &Self) -> CtOption<Self> {
        let (result, borrow) = self.sbb(rhs, Limb::ZERO);
        CtOption::new(result, borrow.ct_is_nonzero().not().into())
    }

    /// Perform wrapping subtraction, discarding underflow and wrapping
    /// around the boundary of the type.
    pub const fn wrapping_sub(&self, rhs: &Self) -> Self {
        self.sbb(rhs, Limb::ZERO).0
    }
}

impl<const LIMBS: usize> Sub for Uint<LIMBS> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.sub(&rhs)
    }
}

impl<const LIMBS: usize> Sub<&Uint<LIMBS>> for Uint<LIMBS> {
    type Output = Self;

    fn sub(self, rhs: &Self) -> Self {
        self.checked_sub(rhs)
            .expect("attempted to subtract with underflow")
    }
}

impl<const LIMBS: usize> SubAssign for Uint<LIMBS> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

#[cfg(test)]
mod tests {
    use crate::{Limb, U64};

    #[test]
    fn sbb_no_borrow() {
        let (res, borrow) = U64::ONE.sbb(&U64::ONE, Limb::ZERO);
        assert_eq!(res, U64::ZERO);
        assert_eq!(borrow, Limb::ZERO);
    }

    #[test]
    fn sbb_with_borrow() {
        let (res, borrow) = U64::ZERO.sbb(&U64::ONE, Limb::ZERO);
        assert_eq!(res, U64::MAX);
        assert_eq!(borrow, Limb::MAX);
    }

    #[test]
    fn wrapping_sub_with_borrow() {
        assert_eq!(U64::ZERO.wrapping_sub(&U64::ONE), U64::MAX);
    }

    #[test]
    fn checked_sub_underflow() {
        let result = U64::ZERO.checked_sub(&U64::ONE);
        assert!(!bool::from(result.is_some()));
    }
}
