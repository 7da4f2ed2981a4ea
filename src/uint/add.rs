//! [`Uint`] addition operations.

use super::Uint;
use crate::limb::Limb;
use core::ops::{Add, AddAssign};
use subtle::CtOption;

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Computes `self + rhs + carry`, returning the result along with the
    /// new carry.
    #[inline(always)]
    pub const fn adc(&self, rhs: &Self, mut carry: Limb) -> (Self, Limb) {
        let mut limbs = [Limb::ZERO; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            let (w, c) = self.limbs[i].adc(rhs.limbs[i], carry);
            limbs[i] = w;
            carry = c;
            i += 1;
        }

        (Self { limbs }, carry)
    }

    /// Perform checked addition, returning the result when no overflow
    /// occurred.
    pub fn checked_add(&self, rhs: &Self) -> CtOption<Self> {
        let (result, carry) = self.adc(rhs, Limb::ZERO);
        CtOption::new(result, carry.ct_is_nonzero().not().into())
    }

    /// Perform wrapping addition, discarding overflow.
    pub const fn wrapping_add(&self, rhs: &Self) -> Self {
        self.adc(rhs, Limb::ZERO).0
    }
}

impl<const LIMBS: usize> Add for Uint<LIMBS> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.add(&rhs)
    }
}

impl<const LIMBS: usize> Add<&Uint<LIMBS>> for Uint<LIMBS> {
    type Output = Self;

    fn add(self, rhs: &Self) -> Self {
        self.checked_add(rhs)
            .expect("attempted to add with overflow")
    }
}

impl<const LIMBS: usize> AddAssign for Uint<LIMBS> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[cfg(test)]
mod tests {
    use crate::{Limb, U64};

    #[test]
    fn adc_no_carry() {
        let (res, carry) = U64::ZERO.adc(&U64::ONE, Limb::ZERO);
        assert_eq!(res, U64::ONE);
        assert_eq!(carry, Limb::ZERO);
    }

    #[test]
    fn adc_with_carry() {
        let (res, carry) = U64::MAX.adc(&U64::ONE, Limb::ZERO);
        assert_eq!(res, U64::ZERO);
        assert_eq!(carry, Limb::ONE);
    }

    #[test]
    fn wrapping_add_with_carry() {
        assert_eq!(U64::MAX.wrapping_add(&U64::ONE), U64::ZERO);
    }

    #[test]
    fn checked_add_ok() {
        let result = U64::ZERO.checked_add(&U64::ONE);
        assert_eq!(result.unwrap(), U64::ONE);
    }

    #[test]
    fn checked_add_overflow() {
        let result = U64::MAX.checked_add(&U64::ONE);
        assert!(!bool::from(result.is_some()));
    }
}
