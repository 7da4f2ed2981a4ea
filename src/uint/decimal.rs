//! Base-10 parsing and formatting for [`Uint`].
//!
//! The CSV sample format carries messages as decimal strings, so these run
//! in variable time and are never used on secret data.

use super::Uint;
use crate::limb::Limb;

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Parse a decimal string. Returns `None` when the input is empty,
    /// contains a non-digit, or does not fit the integer's width.
    pub fn from_dec_str(src: &str) -> Option<Self> {
        if src.is_empty() {
            return None;
        }

        let mut res = Self::ZERO;
        for c in src.bytes() {
            if !c.is_ascii_digit() {
                return None;
            }

            let (shifted, carry) = res.mul_limb(Limb(10));
            if carry != Limb::ZERO {
                return None;
            }

            let (sum, carry) = shifted.adc(&Self::from_u8(c - b'0'), Limb::ZERO);
            if carry != Limb::ZERO {
                return None;
            }
            res = sum;
        }

        Some(res)
    }

    /// Format as a decimal string with no leading zeros.
    pub fn to_dec_string(&self) -> String {
        if self.is_zero_vartime() {
            return "0".into();
        }

        let mut digits = Vec::new();
        let mut x = *self;
        while !x.is_zero_vartime() {
            let (q, r) = x
                .div_rem_limb(Limb(10))
                .expect("ten is not zero");
            digits.push(b'0' + r.0 as u8);
            x = q;
        }

        digits.reverse();
        String::from_utf8(digits).expect("decimal digits are valid UTF-8")
    }
}
