//! Limb comparisons.
//!
//! Constant-time unless explicitly noted otherwise.

use super::Limb;
use crate::ct::CtChoice;
use core::cmp::Ordering;
use subtle::{Choice, ConstantTimeEq};

impl Limb {
    /// Returns the truthy value if `self != 0`, and the falsy value
    /// otherwise.
    #[inline]
    pub(crate) const fn ct_is_nonzero(&self) -> CtChoice {
        CtChoice::from_word_nonzero(self.0)
    }

    /// Returns the truthy value if `self == rhs`, and the falsy value
    /// otherwise.
    #[inline]
    pub(crate) const fn ct_eq(lhs: Self, rhs: Self) -> CtChoice {
        CtChoice::from_word_eq(lhs.0, rhs.0)
    }
}

impl ConstantTimeEq for Limb {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Limb {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl PartialOrd for Limb {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Limb {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}
