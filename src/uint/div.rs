//! [`Uint`] division operations.
//!
//! Restoring shift-subtract division: the divisor is normalized (shifted
//! left until it is aligned with the dividend's width), then one quotient
//! bit is produced per step, restoring the remainder whenever the trial
//! subtraction borrows.
//!
//! These run in variable time and serve key construction, conversions, and
//! formatting; none of them touch per-message secret state inside the
//! exponentiation loops.

use super::Uint;
use crate::{
    errors::{Error, Result},
    limb::{Limb, WideWord, Word},
};

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Computes `self / rhs` and `self % rhs`, returning the quotient and
    /// remainder with `self = q * rhs + r` and `0 <= r < rhs`.
    ///
    /// Fails with [`Error::DivByZero`] when `rhs` is zero.
    pub fn div_rem(&self, rhs: &Self) -> Result<(Self, Self)> {
        if rhs.is_zero_vartime() {
            return Err(Error::DivByZero);
        }

        let mb = rhs.bits();
        let mut bd = Self::BITS - mb;
        let mut rem = *self;
        let mut quo = Self::ZERO;
        let mut c = rhs.shl_vartime(bd);

        loop {
            let (r, borrow) = rem.sbb(&c, Limb::ZERO);
            if borrow == Limb::ZERO {
                rem = r;
                quo = quo.bitor(&Self::ONE);
            }
            if bd == 0 {
                break;
            }
            bd -= 1;
            c = c.shr1();
            quo = quo.shl1();
        }

        Ok((quo, rem))
    }

    /// Computes `(lo, hi) % rhs` for a double-width dividend, returning the
    /// remainder.
    ///
    /// Fails with [`Error::DivByZero`] when `rhs` is zero.
    pub fn rem_wide(lower_upper: (Self, Self), rhs: &Self) -> Result<Self> {
        if rhs.is_zero_vartime() {
            return Err(Error::DivByZero);
        }

        let mb = rhs.bits();
        let mut bd = 2 * Self::BITS - mb;
        let (mut lower, mut upper) = lower_upper;
        let (mut c_lo, mut c_hi) = Self::shl_vartime_wide((*rhs, Self::ZERO), bd);

        loop {
            let (lo_s, borrow) = lower.sbb(&c_lo, Limb::ZERO);
            let (hi_s, borrow) = upper.sbb(&c_hi, borrow);
            if borrow == Limb::ZERO {
                lower = lo_s;
                upper = hi_s;
            }
            if bd == 0 {
                break;
            }
            bd -= 1;
            // shift the divisor image right one place
            c_lo = c_lo
                .shr1()
                .bitor(&c_hi.shl_vartime(Self::BITS - 1));
            c_hi = c_hi.shr1();
        }

        Ok(lower)
    }

    /// Computes `self / rhs` and `self % rhs` for a single-limb divisor via
    /// word-by-word long division.
    ///
    /// Fails with [`Error::DivByZero`] when `rhs` is zero.
    pub fn div_rem_limb(&self, rhs: Limb) -> Result<(Self, Limb)> {
        if rhs == Limb::ZERO {
            return Err(Error::DivByZero);
        }

        let divisor = rhs.0 as WideWord;
        let mut quo = Self::ZERO;
        let mut rem: Word = 0;
        let mut i = LIMBS;

        while i > 0 {
            i -= 1;
            let acc = ((rem as WideWord) << Limb::BITS) | (self.limbs[i].0 as WideWord);
            quo.limbs[i] = Limb((acc / divisor) as Word);
            rem = (acc % divisor) as Word;
        }

        Ok((quo, Limb(rem)))
    }
}
