//! Big unsigned integers.

mod add;
mod bits;
mod cmp;
mod decimal;
mod div;
mod from;
mod inv_mod;
mod mul;
mod rand;
mod shl;
mod shr;
mod sub;

use crate::{ct::CtChoice, limb::Limb};
use core::fmt;
use subtle::{Choice, ConditionallySelectable};

/// Big unsigned integer.
///
/// Generic over the given number of `LIMBS`, stored from least significant
/// to most significant. A stack-allocated value type: all arithmetic is
/// modulo `2^(LIMBS * Limb::BITS)` with explicit carry and borrow returns
/// where overflow is possible, and no operation allocates.
#[derive(Copy, Clone, Eq)]
pub struct Uint<const LIMBS: usize> {
    /// Inner limb array. Stored from least significant to most significant.
    limbs: [Limb; LIMBS],
}

impl<const LIMBS: usize> Uint<LIMBS> {
    /// The value `0`.
    pub const ZERO: Self = Self::from_u8(0);

    /// The value `1`.
    pub const ONE: Self = Self::from_u8(1);

    /// Maximum value this [`Uint`] can express.
    pub const MAX: Self = Self {
        limbs: [Limb::MAX; LIMBS],
    };

    /// Total size of the represented integer in bits.
    pub const BITS: u32 = LIMBS as u32 * Limb::BITS;

    /// Total size of the represented integer in bytes.
    pub const BYTES: usize = LIMBS * Limb::BYTES;

    /// The number of limbs used on this platform.
    pub const LIMBS: usize = LIMBS;

    /// Const-friendly [`Uint`] constructor.
    pub const fn new(limbs: [Limb; LIMBS]) -> Self {
        Self { limbs }
    }

    /// Borrow the limbs of this [`Uint`].
    pub const fn as_limbs(&self) -> &[Limb; LIMBS] {
        &self.limbs
    }

    /// Convert this [`Uint`] into its inner limbs.
    pub const fn to_limbs(self) -> [Limb; LIMBS] {
        self.limbs
    }

    /// Returns the truthy value if this integer is odd, the falsy value
    /// otherwise.
    pub const fn is_odd(&self) -> CtChoice {
        CtChoice::from_word_lsb(self.limbs[0].0 & 1)
    }

    /// Return `b` if `choice` is truthy, otherwise return `a`.
    #[inline]
    pub(crate) const fn select(a: &Self, b: &Self, choice: CtChoice) -> Self {
        let mut limbs = [Limb::ZERO; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            limbs[i] = Limb(choice.select_word(a.limbs[i].0, b.limbs[i].0));
            i += 1;
        }

        Self { limbs }
    }
}

impl<const LIMBS: usize> ConditionallySelectable for Uint<LIMBS> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut limbs = [Limb::ZERO; LIMBS];

        for i in 0..LIMBS {
            limbs[i] = Limb::conditional_select(&a.limbs[i], &b.limbs[i], choice);
        }

        Self { limbs }
    }
}

impl<const LIMBS: usize> Default for Uint<LIMBS> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const LIMBS: usize> fmt::Debug for Uint<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint(0x{self:X})")
    }
}

impl<const LIMBS: usize> fmt::Display for Uint<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl<const LIMBS: usize> fmt::LowerHex for Uint<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for limb in self.limbs.iter().rev() {
            fmt::LowerHex::fmt(limb, f)?;
        }
        Ok(())
    }
}

impl<const LIMBS: usize> fmt::UpperHex for Uint<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for limb in self.limbs.iter().rev() {
            fmt::UpperHex::fmt(limb, f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "zeroize")]
impl<const LIMBS: usize> zeroize::DefaultIsZeroes for Uint<LIMBS> {}

macro_rules! impl_uint_aliases {
    ($(($name:ident, $bits:expr, $doc:expr)),+) => {
        $(
            #[doc = $doc]
            #[doc = "unsigned big integer."]
            pub type $name = Uint<{ nlimbs!($bits) }>;
        )+
    };
}

impl_uint_aliases! {
    (U64, 64, "64-bit"),
    (U128, 128, "128-bit"),
    (U256, 256, "256-bit"),
    (U512, 512, "512-bit"),
    (U1024, 1024, "1024-bit"),
    (U2048, 2048, "2048-bit")
}

#[cfg(test)]
mod tests {
    use crate::{U128, U64};
    use subtle::ConditionallySelectable;

    #[test]
    fn debug() {
        let n = U128::from_u128(0xAAAAAAAA_BBBBBBBB_CCCCCCCC_DDDDDDDD);
        assert_eq!(
            format!("{n:?}"),
            "Uint(0xAAAAAAAABBBBBBBBCCCCCCCCDDDDDDDD)"
        );
    }

    #[test]
    fn display() {
        let n = U128::from_u128(0xAAAAAAAA_BBBBBBBB_0CCCCCCC_DDDDDDDD);
        assert_eq!(n.to_string(), "AAAAAAAABBBBBBBB0CCCCCCCDDDDDDDD");
    }

    #[test]
    fn conditional_select() {
        let a = U64::from_u64(0x2222444466668888);
        let b = U64::from_u64(0x3333555577779999);

        assert_eq!(U64::conditional_select(&a, &b, 0.into()), a);
        assert_eq!(U64::conditional_select(&a, &b, 1.into()), b);
    }

    #[test]
    fn is_odd() {
        assert!(!U64::ZERO.is_odd().is_true_vartime());
        assert!(U64::ONE.is_odd().is_true_vartime());
        assert!(!U64::from_u64(9990).is_odd().is_true_vartime());
        assert!(U64::from_u64(9991).is_odd().is_true_vartime());
    }
}
