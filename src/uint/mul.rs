//! [`Uint`] multiplication operations.

use super::Uint;
use crate::limb::Limb;
use core::ops::{Mul, MulAssign};
use subtle::CtOption;

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Compute "wide" multiplication, with a product twice the size of the
    /// input: schoolbook multiplication with double-width accumulation,
    /// returned as `(lo, hi)` halves.
    pub const fn mul_wide(&self, rhs: &Self) -> (Self, Self) {
        let mut lo = Self::ZERO;
        let mut hi = Self::ZERO;
        let mut i = 0;

        while i < LIMBS {
            let mut j = 0;
            let mut carry = Limb::ZERO;

            while j < LIMBS {
                let k = i + j;

                if k >= LIMBS {
                    let (n, c) = hi.limbs[k - LIMBS].mac(self.limbs[i], rhs.limbs[j], carry);
                    hi.limbs[k - LIMBS] = n;
                    carry = c;
                } else {
                    let (n, c) = lo.limbs[k].mac(self.limbs[i], rhs.limbs[j], carry);
                    lo.limbs[k] = n;
                    carry = c;
                }

                j += 1;
            }

            if i + j >= LIMBS {
                hi.limbs[i + j - LIMBS] = carry;
            } else {
                lo.limbs[i + j] = carry;
            }

            i += 1;
        }

        (lo, hi)
    }

    /// Square self, returning a "wide" result in two parts as `(lo, hi)`.
    pub const fn square_wide(&self) -> (Self, Self) {
        self.mul_wide(self)
    }

    /// Multiply by a single limb, returning the low `LIMBS` limbs together
    /// with the carry-out limb.
    pub const fn mul_limb(&self, rhs: Limb) -> (Self, Limb) {
        let mut limbs = [Limb::ZERO; LIMBS];
        let mut carry = Limb::ZERO;
        let mut i = 0;

        while i < LIMBS {
            let (w, c) = Limb::ZERO.mac(self.limbs[i], rhs, carry);
            limbs[i] = w;
            carry = c;
            i += 1;
        }

        (Self { limbs }, carry)
    }

    /// Perform checked multiplication, returning the result when the high
    /// half of the product is zero.
    pub fn checked_mul(&self, rhs: &Self) -> CtOption<Self> {
        let (lo, hi) = self.mul_wide(rhs);
        CtOption::new(lo, hi.ct_is_zero().into())
    }

    /// Perform wrapping multiplication, discarding overflow.
    pub const fn wrapping_mul(&self, rhs: &Self) -> Self {
        self.mul_wide(rhs).0
    }
}

impl<const LIMBS: usize> Mul for Uint<LIMBS> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.mul(&rhs)
    }
}

impl<const LIMBS: usize> Mul<&Uint<LIMBS>> for Uint<LIMBS> {
    type Output = Self;

    fn mul(self, rhs: &Self) -> Self {
        self.checked_mul(rhs)
            .expect("attempted to multiply with overflow")
    }
}

impl<const LIMBS: usize> MulAssign for Uint<LIMBS> {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}
