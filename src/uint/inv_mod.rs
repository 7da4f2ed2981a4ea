//! Modular inversion via the extended Euclidean algorithm.

use super::Uint;
use crate::limb::Limb;

/// A signed value tracked as magnitude plus sign, wide enough for Bezout
/// coefficients: their magnitudes never exceed the modulus.
#[derive(Copy, Clone)]
struct Signed<const LIMBS: usize> {
    mag: Uint<LIMBS>,
    neg: bool,
}

impl<const LIMBS: usize> Signed<LIMBS> {
    const fn new(mag: Uint<LIMBS>) -> Self {
        Self { mag, neg: false }
    }

    /// `self - other`.
    fn sub(&self, other: &Self) -> Self {
        if self.neg == other.neg {
            // same sign: the magnitudes subtract, flipping when they cross
            if self.mag >= other.mag {
                Self {
                    mag: self.mag.wrapping_sub(&other.mag),
                    neg: self.neg,
                }
            } else {
                Self {
                    mag: other.mag.wrapping_sub(&self.mag),
                    neg: !self.neg,
                }
            }
        } else {
            // opposite signs: the magnitudes add
            let (mag, carry) = self.mag.adc(&other.mag, Limb::ZERO);
            debug_assert!(carry == Limb::ZERO);
            Self { mag, neg: self.neg }
        }
    }
}

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Computes the multiplicative inverse of `self` modulo `modulus`, in
    /// variable time. Returns `None` when `gcd(self, modulus) != 1` or the
    /// modulus is below 2.
    ///
    /// Handles even moduli, which Montgomery-based inversion cannot; RSA key
    /// construction inverts the public exponent modulo the (even) totient.
    pub fn inv_mod(&self, modulus: &Self) -> Option<Self> {
        if modulus.bits() < 2 {
            return None;
        }

        // (old_t, t) track the Bezout coefficient of `self`
        let mut old_t = Signed::new(Self::ZERO);
        let mut t = Signed::new(Self::ONE);
        let mut old_r = *modulus;
        let mut r = self
            .div_rem(modulus)
            .expect("modulus checked nonzero")
            .1;

        while !r.is_zero_vartime() {
            let (q, rem) = old_r.div_rem(&r).expect("loop guard keeps r nonzero");

            // old_t - q * t; the product never exceeds the width because
            // convergent denominators are bounded by the modulus
            let (prod, prod_hi) = q.mul_wide(&t.mag);
            debug_assert!(prod_hi.is_zero_vartime());
            let stepped = old_t.sub(&Signed {
                mag: prod,
                neg: t.neg,
            });

            old_t = t;
            t = stepped;
            old_r = r;
            r = rem;
        }

        if old_r != Self::ONE {
            return None;
        }

        if old_t.neg {
            Some(modulus.wrapping_sub(&old_t.mag))
        } else {
            Some(old_t.mag)
        }
    }
}
