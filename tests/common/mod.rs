//! Shared helpers for equivalence tests against `num_bigint::BigUint`.

use num_bigint::BigUint;
use num_traits::Zero;
use rsa_timing::{Limb, Uint};

/// Convert a [`Uint`] into a [`BigUint`].
pub fn to_biguint<const LIMBS: usize>(uint: &Uint<LIMBS>) -> BigUint {
    uint.as_limbs()
        .iter()
        .rev()
        .fold(BigUint::zero(), |acc, limb| {
            (acc << (Limb::BITS as usize)) | BigUint::from(limb.0)
        })
}

/// Convert a [`BigUint`] into a [`Uint`], reducing modulo `2^BITS`.
pub fn to_uint<const LIMBS: usize>(big: &BigUint) -> Uint<LIMBS> {
    let mut acc = Uint::<LIMBS>::ZERO;
    for digit in big.to_u64_digits().iter().rev() {
        if Uint::<LIMBS>::BITS > 64 {
            acc = acc.shl_vartime(64);
        } else {
            acc = Uint::ZERO;
        }
        acc = acc.bitor(&Uint::from_u64(*digit));
    }
    acc
}
