//! Conversions from primitive integers to [`Uint`].

use super::Uint;
use crate::limb::{Limb, Word};

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Create a [`Uint`] from a `u8` (const-friendly).
    pub const fn from_u8(n: u8) -> Self {
        assert!(LIMBS >= 1, "number of limbs must be greater than zero");
        let mut limbs = [Limb::ZERO; LIMBS];
        limbs[0].0 = n as Word;
        Self { limbs }
    }

    /// Create a [`Uint`] from a `u16` (const-friendly).
    pub const fn from_u16(n: u16) -> Self {
        assert!(LIMBS >= 1, "number of limbs must be greater than zero");
        let mut limbs = [Limb::ZERO; LIMBS];
        limbs[0].0 = n as Word;
        Self { limbs }
    }

    /// Create a [`Uint`] from a `u32` (const-friendly).
    pub const fn from_u32(n: u32) -> Self {
        assert!(LIMBS >= 1, "number of limbs must be greater than zero");
        let mut limbs = [Limb::ZERO; LIMBS];
        limbs[0].0 = n as Word;
        Self { limbs }
    }

    /// Create a [`Uint`] from a `u64` (const-friendly).
    #[cfg(target_pointer_width = "32")]
    pub const fn from_u64(n: u64) -> Self {
        assert!(LIMBS >= 2, "number of limbs must be two or greater");
        let mut limbs = [Limb::ZERO; LIMBS];
        limbs[0].0 = (n & 0xFFFF_FFFF) as u32;
        limbs[1].0 = (n >> 32) as u32;
        Self { limbs }
    }

    /// Create a [`Uint`] from a `u64` (const-friendly).
    #[cfg(target_pointer_width = "64")]
    pub const fn from_u64(n: u64) -> Self {
        assert!(LIMBS >= 1, "number of limbs must be greater than zero");
        let mut limbs = [Limb::ZERO; LIMBS];
        limbs[0].0 = n;
        Self { limbs }
    }

    /// Create a [`Uint`] from a `u128` (const-friendly).
    pub const fn from_u128(n: u128) -> Self {
        assert!(
            LIMBS >= (128 / Limb::BITS) as usize,
            "number of limbs must be large enough for a u128"
        );

        let lo = Self::from_u64((n & 0xFFFF_FFFF_FFFF_FFFF) as u64);
        let hi = Self::from_u64((n >> 64) as u64);
        let mut limbs = lo.limbs;

        let mut i = 0;
        let shift = (64 / Limb::BITS) as usize;
        while i + shift < LIMBS {
            limbs[i + shift].0 |= hi.limbs[i].0;
            i += 1;
        }

        Self { limbs }
    }
}

impl<const LIMBS: usize> From<u8> for Uint<LIMBS> {
    fn from(n: u8) -> Self {
        Self::from_u8(n)
    }
}

impl<const LIMBS: usize> From<u16> for Uint<LIMBS> {
    fn from(n: u16) -> Self {
        Self::from_u16(n)
    }
}

impl<const LIMBS: usize> From<u32> for Uint<LIMBS> {
    fn from(n: u32) -> Self {
        Self::from_u32(n)
    }
}

impl<const LIMBS: usize> From<u64> for Uint<LIMBS> {
    fn from(n: u64) -> Self {
        Self::from_u64(n)
    }
}

#[cfg(test)]
mod tests {
    use crate::{U128, U64};

    #[test]
    fn from_u8() {
        assert_eq!(U64::from_u8(0x2A).to_limbs()[0].0, 0x2A);
    }

    #[test]
    fn from_u64() {
        let x = U128::from_u64(0x0011_2233_4455_6677);
        assert_eq!(x, U128::from_u128(0x0011_2233_4455_6677));
        assert_eq!(x.bits(), 53);
    }

    #[test]
    fn from_u128() {
        // the two-word path agrees with shifting the halves in by hand
        let hi = U128::from_u64(0x0011_2233_4455_6677).shl_vartime(64);
        let lo = U128::from_u64(0x8899_AABB_CCDD_EEFF);
        assert_eq!(
            U128::from_u128(0x0011_2233_4455_6677_8899_AABB_CCDD_EEFF),
            hi.bitor(&lo)
        );
    }
}
