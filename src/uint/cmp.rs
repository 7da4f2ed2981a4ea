//! [`Uint`] comparisons.
//!
//! By default these are all constant-time and use the [`subtle`] crate at
//! the public boundary.

use super::Uint;
use crate::{ct::CtChoice, limb::Limb};
use core::cmp::Ordering;
use subtle::{Choice, ConstantTimeEq};

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Returns the truthy value if `self == 0`, and the falsy value
    /// otherwise.
    #[inline]
    pub(crate) const fn ct_is_zero(&self) -> CtChoice {
        let mut acc = 0;
        let mut i = 0;

        while i < LIMBS {
            acc |= self.limbs[i].0;
            i += 1;
        }

        CtChoice::from_word_nonzero(acc).not()
    }

    /// Determine whether `self == 0` in variable time.
    #[inline]
    pub const fn is_zero_vartime(&self) -> bool {
        self.ct_is_zero().is_true_vartime()
    }

    /// Returns the truthy value if `lhs == rhs`, and the falsy value
    /// otherwise.
    #[inline]
    pub(crate) const fn ct_eq(lhs: &Self, rhs: &Self) -> CtChoice {
        let mut acc = 0;
        let mut i = 0;

        while i < LIMBS {
            acc |= lhs.limbs[i].0 ^ rhs.limbs[i].0;
            i += 1;
        }

        CtChoice::from_word_nonzero(acc).not()
    }

    /// Returns the truthy value if `lhs < rhs`, and the falsy value
    /// otherwise: the whole-width subtraction borrows exactly when the
    /// left side is smaller.
    #[inline]
    pub(crate) const fn ct_lt(lhs: &Self, rhs: &Self) -> CtChoice {
        let (_, borrow) = lhs.sbb(rhs, Limb::ZERO);
        CtChoice::from_word_mask(borrow.0)
    }

    /// Compare `self` to `rhs` in variable time.
    pub const fn cmp_vartime(&self, rhs: &Self) -> Ordering {
        let mut i = LIMBS;

        while i > 0 {
            i -= 1;
            if self.limbs[i].0 < rhs.limbs[i].0 {
                return Ordering::Less;
            }
            if self.limbs[i].0 > rhs.limbs[i].0 {
                return Ordering::Greater;
            }
        }

        Ordering::Equal
    }
}

impl<const LIMBS: usize> ConstantTimeEq for Uint<LIMBS> {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        Uint::ct_eq(self, other).into()
    }
}

impl<const LIMBS: usize> PartialEq for Uint<LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const LIMBS: usize> PartialOrd for Uint<LIMBS> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const LIMBS: usize> Ord for Uint<LIMBS> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_vartime(other)
    }
}
