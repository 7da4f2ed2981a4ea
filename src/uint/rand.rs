//! Random generation of [`Uint`]s.

use super::Uint;
use crate::limb::Limb;
use rand_core::CryptoRngCore;

impl<const LIMBS: usize> Uint<LIMBS> {
    /// Generate a uniformly random value over the full width.
    pub fn random(rng: &mut (impl CryptoRngCore + ?Sized)) -> Self {
        let mut limbs = [Limb::ZERO; LIMBS];

        for limb in &mut limbs {
            #[cfg(target_pointer_width = "32")]
            {
                *limb = Limb(rng.next_u32());
            }
            #[cfg(target_pointer_width = "64")]
            {
                *limb = Limb(rng.next_u64());
            }
        }

        Self { limbs }
    }

    /// Generate a uniformly random value in `[0, modulus)` by rejection
    /// sampling over the modulus' bit length. The modulus must be nonzero.
    ///
    /// Runs in time variable to the value sampled.
    pub fn random_mod(rng: &mut (impl CryptoRngCore + ?Sized), modulus: &Self) -> Self {
        debug_assert!(!modulus.is_zero_vartime());
        let bits = modulus.bits();

        loop {
            let mut candidate = Self::random(rng);
            if bits < Self::BITS {
                candidate = candidate.rem2k_vartime(bits);
            }
            if candidate < *modulus {
                break candidate;
            }
        }
    }
}
