//! End-to-end RSA scenarios: round trips, exponentiation agreement, and
//! key derivation.

use proptest::prelude::*;
use rsa_timing::{mod_exp, power_ladder, ExpMethod, RsaKey, Signer, U64};
use std::time::Duration;

const LIMBS: usize = U64::LIMBS;

/// p = 97, q = 103: n = 9991, phi = 9792, d = 31^-1 mod 9792 = 2527.
fn small_key() -> RsaKey<LIMBS> {
    RsaKey::new(
        &U64::from_u64(97),
        &U64::from_u64(103),
        &U64::from_u64(31),
    )
    .unwrap()
}

/// A 64-bit modulus whose private exponent is 33 bits.
fn demo_key() -> RsaKey<LIMBS> {
    RsaKey::new(
        &U64::from_u64(3594967279),
        &U64::from_u64(3590000009),
        &U64::from_u64(11583354540381690793),
    )
    .unwrap()
}

#[test]
fn small_round_trip() {
    let key = small_key();
    assert_eq!(*key.n(), U64::from_u64(9991));
    assert_eq!(*key.phi(), U64::from_u64(9792));
    assert_eq!(*key.d(), U64::from_u64(2527));

    let signer = Signer::with_pause(key, ExpMethod::Plain, Duration::ZERO);
    let signature = signer.sign(&U64::from_u64(1234)).unwrap();
    assert_eq!(signature, U64::from_u64(8809));
    assert_eq!(signer.verify(&signature).unwrap(), U64::from_u64(1234));
}

#[test]
fn demo_key_derivation() {
    let key = demo_key();
    assert_eq!(*key.n(), U64::from_u64(12905932563964705511));
    assert_eq!(*key.phi(), U64::from_u64(12905932556779738224));
    assert_eq!(*key.d(), U64::from_u64(4294967305));
    assert_eq!(key.d().bits(), 33);
}

#[test]
fn exponent_edge_cases() {
    let n = U64::from_u64(9991);
    for m in [0u64, 1, 1234, 9990] {
        let m = U64::from_u64(m);
        assert_eq!(mod_exp(&m, &U64::ZERO, &n).unwrap(), U64::ONE);
        assert_eq!(mod_exp(&m, &U64::ONE, &n).unwrap(), m);
        assert_eq!(power_ladder(&m, &U64::ZERO, &n).unwrap(), U64::ONE);
        assert_eq!(power_ladder(&m, &U64::ONE, &n).unwrap(), m);
    }
}

#[test]
fn ladder_equivalence_grid() {
    // every (message, exponent) pair in {1..100} x {1..200}
    let n = U64::from_u64(9991);
    for m in 1u64..=100 {
        let base = U64::from_u64(m);
        for d in 1u64..=200 {
            let exp = U64::from_u64(d);
            assert_eq!(
                mod_exp(&base, &exp, &n).unwrap(),
                power_ladder(&base, &exp, &n).unwrap(),
                "m = {m}, d = {d}"
            );
        }
    }
}

proptest! {
    /// Verify(Sign(M)) == M for every message and every method.
    #[test]
    fn sign_verify_round_trip(m in 0u64..9991) {
        let key = small_key();
        let message = U64::from_u64(m);

        for method in [ExpMethod::Plain, ExpMethod::PlainSleep, ExpMethod::Ladder] {
            let signer = Signer::with_pause(key, method, Duration::ZERO);
            let signature = signer.sign(&message).unwrap();
            prop_assert_eq!(signer.verify(&signature).unwrap(), message);
        }
    }

    /// All three methods produce identical signatures.
    #[test]
    fn methods_agree(m in 1u64..12905932563964705511) {
        let key = demo_key();
        let message = U64::from_u64(m);

        let plain = Signer::with_pause(key, ExpMethod::Plain, Duration::ZERO)
            .sign(&message)
            .unwrap();
        let ladder = Signer::with_pause(key, ExpMethod::Ladder, Duration::ZERO)
            .sign(&message)
            .unwrap();
        prop_assert_eq!(plain, ladder);
    }
}
